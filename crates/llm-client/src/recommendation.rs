//! The validated output of the generator and how it is parsed.

use crate::error::LlmClientError;
use catalog::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// Summary returned without asking the model when nothing matched the query.
pub const FALLBACK_SUMMARY: &str =
    "We don't have this item. But we recommend these top rated items as alternatives below.";

/// Summary used when the model's JSON has no `summary` field.
pub const DEFAULT_SUMMARY: &str = "I've picked these options for you.";

/// Product ids chosen by the model plus its natural-language summary.
///
/// Ids are untrusted: they may repeat or point at products that do not
/// exist, and must only be interpreted by resolving them against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "productIds", default)]
    pub product_ids: Vec<ProductId>,
    #[serde(default = "default_summary")]
    pub summary: String,
}

fn default_summary() -> String {
    DEFAULT_SUMMARY.to_string()
}

impl Recommendation {
    pub fn new(product_ids: Vec<ProductId>, summary: impl Into<String>) -> Self {
        Self {
            product_ids,
            summary: summary.into(),
        }
    }

    /// Fixed answer for an empty candidate set.
    pub fn fallback() -> Self {
        Self::new(Vec::new(), FALLBACK_SUMMARY)
    }
}

/// Parse the model's raw answer into a [`Recommendation`].
///
/// The answer must be a JSON object. `productIds` and `summary` fall back to
/// their defaults when absent, but a present field of the wrong type (or a
/// non-object document) is rejected as a whole.
pub fn parse_recommendation(raw: &str) -> Result<Recommendation, LlmClientError> {
    let trimmed = raw.trim();

    let invalid = |reason: String| {
        error!(reason = %reason, raw = %trimmed, "Failed to parse AI JSON");
        LlmClientError::InvalidFormat {
            raw: trimmed.to_string(),
        }
    };

    let document: Value = serde_json::from_str(trimmed).map_err(|e| invalid(e.to_string()))?;

    if !document.is_object() {
        return Err(invalid(format!(
            "expected a JSON object, got {}",
            json_kind(&document)
        )));
    }

    serde_json::from_value(document).map_err(|e| invalid(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
