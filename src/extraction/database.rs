use std::sync::Arc;

use crate::errors::*;
use crate::extraction::{TurnContext, ValueExtractor};
use crate::resources::database::ValueDatabase;
use crate::vocab::ENT_TOKEN;

/// Appends database matches as `ENT slot value` groups, one per matched
/// value, keeping the slot name next to the value it qualifies.
pub struct DatabaseExtractor {
    database: Arc<dyn ValueDatabase>,
}

impl DatabaseExtractor {
    pub fn new(database: Arc<dyn ValueDatabase>) -> Self {
        DatabaseExtractor { database }
    }
}

impl ValueExtractor for DatabaseExtractor {
    fn annotate(&self, utterance: &str, _context: &TurnContext) -> Result<String> {
        let mut annotated = utterance.to_string();
        for slot_match in self.database.find_values(utterance)? {
            for value in &slot_match.values {
                annotated.push_str(&format!(" {} {} {}", ENT_TOKEN, slot_match.slot, value));
            }
        }
        Ok(annotated)
    }
}
