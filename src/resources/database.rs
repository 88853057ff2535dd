use crate::errors::*;
use crate::utils::SlotName;

/// Values of one slot found verbatim in an utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotMatch {
    pub slot: SlotName,
    pub values: Vec<String>,
}

impl SlotMatch {
    pub fn new<T: Into<SlotName>>(slot: T, values: Vec<String>) -> Self {
        SlotMatch {
            slot: slot.into(),
            values,
        }
    }
}

/// Domain database lookup: which known slot values occur in an utterance.
pub trait ValueDatabase: Send + Sync {
    fn find_values(&self, utterance: &str) -> Result<Vec<SlotMatch>>;
}
