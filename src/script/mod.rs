//! Script model and dispatch
//!
//! A request carries a raw `{kind, params}` envelope. [`Script::parse`]
//! turns it into a typed variant (one per workflow handler); an
//! unrecognized kind tag is an error, never a silent no-op.
//! [`Script::run`] dispatches to the matching handler against a live
//! page.

pub mod custom;
pub mod form;
pub mod interact;
pub mod perf;
pub mod scrape;
pub mod workflow;

use crate::browser::PageHandle;
use crate::error::{RelayError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use custom::CustomParams;
pub use form::FormParams;
pub use interact::{InteractParams, Interaction};
pub use perf::PerfParams;
pub use scrape::ScrapeParams;
pub use workflow::WorkflowParams;

/// Wire-level script envelope, kind tag plus untyped parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScript {
    pub kind: String,
    #[serde(default)]
    pub params: Value,
}

/// A parsed automation script, one variant per workflow handler
#[derive(Debug, Clone)]
pub enum Script {
    NavigateAndInteract(InteractParams),
    ScrapeWithInteraction(ScrapeParams),
    FormAutomation(FormParams),
    MultiPageWorkflow(WorkflowParams),
    PerformanceTesting(PerfParams),
    Custom(CustomParams),
}

fn parse_params<T: DeserializeOwned>(kind: &str, params: Value) -> Result<T> {
    serde_json::from_value(params)
        .map_err(|e| RelayError::InvalidParams(format!("{}: {}", kind, e)))
}

impl Script {
    /// Parse a raw envelope into a typed script
    pub fn parse(raw: &RawScript) -> Result<Self> {
        let params = raw.params.clone();
        match raw.kind.as_str() {
            "navigate_and_interact" => {
                Ok(Script::NavigateAndInteract(parse_params(&raw.kind, params)?))
            }
            "scrape_with_interaction" => {
                Ok(Script::ScrapeWithInteraction(parse_params(&raw.kind, params)?))
            }
            "form_automation" => Ok(Script::FormAutomation(parse_params(&raw.kind, params)?)),
            "multi_page_workflow" => Ok(Script::MultiPageWorkflow(parse_params(&raw.kind, params)?)),
            "performance_testing" => Ok(Script::PerformanceTesting(parse_params(&raw.kind, params)?)),
            "custom" => Ok(Script::Custom(parse_params(&raw.kind, params)?)),
            _ => Err(RelayError::UnknownScript(raw.kind.clone())),
        }
    }

    /// The kind tag this script was parsed from
    pub fn kind(&self) -> &'static str {
        match self {
            Script::NavigateAndInteract(_) => "navigate_and_interact",
            Script::ScrapeWithInteraction(_) => "scrape_with_interaction",
            Script::FormAutomation(_) => "form_automation",
            Script::MultiPageWorkflow(_) => "multi_page_workflow",
            Script::PerformanceTesting(_) => "performance_testing",
            Script::Custom(_) => "custom",
        }
    }

    /// Run the matching workflow handler against a page
    pub fn run(&self, page: &dyn PageHandle) -> Result<Value> {
        match self {
            Script::NavigateAndInteract(params) => interact::run(page, params),
            Script::ScrapeWithInteraction(params) => scrape::run(page, params),
            Script::FormAutomation(params) => form::run(page, params),
            Script::MultiPageWorkflow(params) => workflow::run(page, params),
            Script::PerformanceTesting(params) => perf::run(page, params),
            Script::Custom(params) => custom::run(page, params),
        }
    }
}

/// CDP evaluation returns object results as JSON-stringified text; decode
/// back to structured JSON when possible
pub(crate) fn decode_eval(value: Value) -> Value {
    if let Value::String(s) = &value {
        if let Ok(decoded) = serde_json::from_str(s) {
            return decoded;
        }
    }
    value
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_known_kinds() {
        let kinds = [
            ("navigate_and_interact", json!({"url": "https://example.test"})),
            (
                "scrape_with_interaction",
                json!({"url": "https://example.test", "selectors": {}}),
            ),
            (
                "form_automation",
                json!({"url": "https://example.test", "formData": {}}),
            ),
            ("multi_page_workflow", json!({"workflow": []})),
            ("performance_testing", json!({"url": "https://example.test"})),
            ("custom", json!({"code": "return 1;"})),
        ];

        for (kind, params) in kinds {
            let raw = RawScript {
                kind: kind.to_string(),
                params,
            };
            let script = Script::parse(&raw).unwrap();
            assert_eq!(script.kind(), kind);
        }
    }

    #[test]
    fn test_parse_unknown_kind_names_offender() {
        let raw = RawScript {
            kind: "unknown_kind".to_string(),
            params: json!({}),
        };
        let err = Script::parse(&raw).unwrap_err();
        assert_eq!(err.to_string(), "Unknown script type: unknown_kind");
    }

    #[test]
    fn test_parse_bad_params_is_invalid_params() {
        let raw = RawScript {
            kind: "performance_testing".to_string(),
            params: json!({}),
        };
        let err = Script::parse(&raw).unwrap_err();
        assert!(err.to_string().contains("performance_testing"));
    }

    #[test]
    fn test_raw_script_params_default_to_null() {
        let raw: RawScript = serde_json::from_value(json!({"kind": "custom"})).unwrap();
        assert!(raw.params.is_null());
    }

    #[test]
    fn test_decode_eval_parses_stringified_json() {
        let decoded = decode_eval(Value::String("{\"a\":1}".to_string()));
        assert_eq!(decoded, json!({"a": 1}));
    }

    #[test]
    fn test_decode_eval_passes_through_plain_values() {
        assert_eq!(decode_eval(json!(42)), json!(42));
        let plain = Value::String("not json at all".to_string());
        assert_eq!(decode_eval(plain.clone()), plain);
    }
}
