//! multi_page_workflow: sub-scripts dispatched in order on one page

use crate::browser::PageHandle;
use crate::error::Result;
use crate::script::{RawScript, Script};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Parameters for multi_page_workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowParams {
    /// Sub-scripts, parsed and dispatched per step so earlier steps run
    /// before a later malformed one fails the workflow
    #[serde(default)]
    pub workflow: Vec<RawScript>,
}

pub fn run(page: &dyn PageHandle, params: &WorkflowParams) -> Result<Value> {
    let mut results = Vec::new();

    for step in &params.workflow {
        let script = Script::parse(step)?;
        results.push(script.run(page)?);
    }

    Ok(json!({ "workflow": results }))
}
