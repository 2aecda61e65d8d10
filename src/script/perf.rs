//! performance_testing workflow

use crate::browser::PageHandle;
use crate::error::Result;
use crate::script::decode_eval;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Parameters for performance_testing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerfParams {
    pub url: String,
}

/// Reads navigation and paint timing entries, zero when unavailable.
/// Stringified so the result survives CDP's by-reference object returns.
const METRICS_JS: &str = r#"
(function() {
    const navigation = performance.getEntriesByType('navigation')[0];
    const paint = performance.getEntriesByType('paint')[0];
    return JSON.stringify({
        domContentLoaded: navigation
            ? navigation.domContentLoadedEventEnd - navigation.domContentLoadedEventStart
            : 0,
        load: navigation ? navigation.loadEventEnd - navigation.loadEventStart : 0,
        firstPaint: paint ? paint.startTime : 0
    });
})()
"#;

/// Navigate while timing wall-clock load duration, then read the
/// browser-reported timing metrics
pub fn run(page: &dyn PageHandle, params: &PerfParams) -> Result<Value> {
    let start = Instant::now();
    page.goto(&params.url)?;
    page.wait_for_idle()?;
    let load_time = start.elapsed().as_millis() as u64;

    let metrics = decode_eval(page.evaluate(METRICS_JS)?);

    Ok(json!({
        "url": params.url,
        "loadTime": load_time,
        "metrics": metrics,
    }))
}
