//! navigate_and_interact workflow

use crate::browser::PageHandle;
use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Parameters for navigate_and_interact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractParams {
    /// URL to navigate to before interacting
    pub url: String,

    /// Ordered interaction steps
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One interaction step, tagged by its `action` field
///
/// Unrecognized actions deserialize to [`Interaction::Unsupported`] and
/// are skipped at run time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Interaction {
    /// Click the element matching a selector
    Click { selector: String },
    /// Type text into the element matching a selector
    Type { selector: String, value: String },
    /// Wait for an element matching a selector to appear
    Wait { selector: String },
    /// Capture a screenshot, recorded into the step results
    Screenshot,
    #[serde(other)]
    Unsupported,
}

/// Navigate, wait for the page to settle, then execute the interaction
/// steps in order
///
/// Only screenshots contribute to the per-step results; other steps are
/// side effects on the page.
pub fn run(page: &dyn PageHandle, params: &InteractParams) -> Result<Value> {
    page.goto(&params.url)?;
    page.wait_for_idle()?;

    let mut results = Vec::new();

    for interaction in &params.interactions {
        match interaction {
            Interaction::Click { selector } => page.click(selector)?,
            Interaction::Type { selector, value } => page.fill(selector, value)?,
            Interaction::Wait { selector } => page.wait_for_selector(selector)?,
            Interaction::Screenshot => {
                let png = page.screenshot()?;
                results.push(json!({
                    "action": "screenshot",
                    "screenshot": STANDARD.encode(png),
                }));
            }
            Interaction::Unsupported => {
                log::debug!("Skipping unsupported interaction");
            }
        }
    }

    Ok(json!({ "url": params.url, "interactions": results }))
}
