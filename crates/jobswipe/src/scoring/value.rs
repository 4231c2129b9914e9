use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw answer payload as submitted by a seeker.
///
/// Variants are tried in declaration order when deserializing, so a JSON number lands in
/// `Number`, a string in `Text`, an object in `Structured`, and anything else in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Structured(StructuredAnswer),
    Other(Value),
}

/// Object-shaped answer whose numeric payload lives under `value`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuredAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnswerValue {
    /// Resolves the number this answer scores with, if any.
    ///
    /// Containers only yield a number when their `value` field is itself numeric; a numeric
    /// string nested in a container does not count. Non-finite numbers never resolve.
    pub fn numeric_value(&self) -> Option<f64> {
        let candidate = match self {
            AnswerValue::Number(number) => Some(*number),
            AnswerValue::Text(raw) => raw.trim().parse::<f64>().ok(),
            AnswerValue::Structured(structured) => {
                structured.value.as_ref().and_then(Value::as_f64)
            }
            AnswerValue::Other(_) => None,
        };
        candidate.filter(|number| number.is_finite())
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}
