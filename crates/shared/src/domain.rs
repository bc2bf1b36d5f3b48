use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A random value as returned by the random service.
///
/// `as_num` is kept as a JSON number with its original digits: a default
/// request yields a 256-bit integer, well beyond any native integer type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomResult {
    pub bits: String,
    pub as_num: Number,
    pub bits_length: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
}

impl RandomResult {
    pub fn is_bounded(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    /// `min` and `max` travel together; the client reports but never rejects
    /// a body that breaks this.
    pub fn has_consistent_range(&self) -> bool {
        self.min.is_some() == self.max.is_some()
    }
}
