//! form_automation workflow

use crate::browser::PageHandle;
use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Parameters for form_automation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormParams {
    pub url: String,

    /// Ordered (selector, value) pairs to fill
    #[serde(default)]
    pub form_data: IndexMap<String, String>,

    /// Submit control to click after filling, if any
    #[serde(default)]
    pub submit_selector: Option<String>,
}

/// Navigate, fill each field in order, optionally submit and wait for
/// the resulting navigation to settle
pub fn run(page: &dyn PageHandle, params: &FormParams) -> Result<Value> {
    page.goto(&params.url)?;

    for (selector, value) in &params.form_data {
        page.fill(selector, value)?;
    }

    if let Some(submit) = &params.submit_selector {
        page.click(submit)?;
        page.wait_for_idle()?;
    }

    Ok(json!({ "url": params.url, "formSubmitted": true }))
}
