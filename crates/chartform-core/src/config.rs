// crates/chartform-core/src/config.rs

use crate::debounce::DEFAULT_DEBOUNCE_MS;
use crate::loader::DEFAULT_DATASET_PATH;
use crate::search::MIN_QUERY_CHARS;
use serde::{Deserialize, Serialize};

/// Page-level settings for the chart form.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
///
/// ```json
/// { "calculate_endpoint": "/api/calculate", "debounce_ms": 150 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub dataset_url: String,
    pub cards_url: String,
    pub calculate_endpoint: String,
    pub debounce_ms: u64,
    pub min_query_chars: usize,
    pub invalid_location_message: String,
    pub invalid_date_message: String,
    pub submit_label: String,
    pub submitting_label: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_PATH.to_string(),
            cards_url: "/static/data/astrology.json".to_string(),
            calculate_endpoint: "/calculate".to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_query_chars: MIN_QUERY_CHARS,
            invalid_location_message: "Please select a valid location from the suggestions."
                .to_string(),
            invalid_date_message: "Please enter your date of birth as DD/MM/YYYY.".to_string(),
            submit_label: "Calculate".to_string(),
            submitting_label: "Calculating...".to_string(),
        }
    }
}

#[cfg(feature = "json")]
impl FormConfig {
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            crate::ChartFormError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }
}

impl FormConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.min_query_chars == 0 {
            return Err(crate::ChartFormError::Config(
                "min_query_chars must be at least 1".into(),
            ));
        }
        if self.calculate_endpoint.trim().is_empty() {
            return Err(crate::ChartFormError::Config(
                "calculate_endpoint must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = FormConfig::from_json_str(r#"{ "debounce_ms": 150 }"#).unwrap();
        assert_eq!(cfg.debounce_ms, 150);
        assert_eq!(cfg.min_query_chars, 2);
        assert_eq!(cfg.calculate_endpoint, "/calculate");
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let err = FormConfig::from_json_str(r#"{ "min_query_chars": 0 }"#).unwrap_err();
        assert!(matches!(err, crate::ChartFormError::Config(_)));
    }
}
