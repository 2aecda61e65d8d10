//! custom workflow: caller-supplied code evaluated in the page
//!
//! The code runs with whatever power the remote page context grants; the
//! only sandbox is the remote browser itself. Callers already hold the
//! cloud-provider credentials, so this surface grants them nothing new.

use crate::browser::PageHandle;
use crate::error::Result;
use crate::script::decode_eval;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Parameters for custom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomParams {
    /// JavaScript function body; `args` is in scope
    pub code: String,

    /// Value bound to `args` inside the function
    #[serde(default)]
    pub args: Value,
}

/// Wrap the code in a function taking `args`, invoke it with the
/// caller's arguments, and return whatever it returns
pub fn run(page: &dyn PageHandle, params: &CustomParams) -> Result<Value> {
    // to_string on a Value cannot fail
    let args = serde_json::to_string(&params.args).unwrap_or_else(|_| "null".to_string());

    let expression = format!(
        "JSON.stringify((function(args) {{\n{}\n}})({}))",
        params.code, args
    );

    let result = decode_eval(page.evaluate(&expression)?);
    Ok(json!({ "custom": true, "result": result }))
}
