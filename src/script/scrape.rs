//! scrape_with_interaction workflow

use crate::browser::PageHandle;
use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Delay after each pre-scrape click, unconditional
const INTERACTION_DELAY: Duration = Duration::from_secs(1);

/// Parameters for scrape_with_interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeParams {
    pub url: String,

    /// Clicks performed before extraction, each followed by a fixed delay
    #[serde(default)]
    pub interactions: Vec<ClickStep>,

    /// Named selectors to extract text from, in order
    #[serde(default)]
    pub selectors: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickStep {
    pub selector: String,
}

/// Navigate, run the click steps, then extract text for each named
/// selector into a name→text mapping
pub fn run(page: &dyn PageHandle, params: &ScrapeParams) -> Result<Value> {
    page.goto(&params.url)?;

    for interaction in &params.interactions {
        page.click(&interaction.selector)?;
        std::thread::sleep(INTERACTION_DELAY);
    }

    let mut data = Map::new();
    for (name, selector) in &params.selectors {
        data.insert(name.clone(), Value::String(page.text_content(selector)?));
    }

    Ok(json!({ "url": params.url, "data": data }))
}
