use std::sync::Arc;

use crate::errors::*;
use crate::extraction::{TurnContext, ValueExtractor};
use crate::resources::value_model::SentenceValueModel;
use crate::vocab::ENT_TOKEN;

/// Appends every value the sentence value model decodes, in model order.
pub struct ModelValueExtractor {
    model: Arc<dyn SentenceValueModel>,
}

impl ModelValueExtractor {
    pub fn new(model: Arc<dyn SentenceValueModel>) -> Self {
        ModelValueExtractor { model }
    }
}

impl ValueExtractor for ModelValueExtractor {
    fn annotate(&self, utterance: &str, _context: &TurnContext) -> Result<String> {
        let mut annotated = utterance.to_string();
        for value in self.model.predict_sentence_values(utterance)? {
            annotated.push_str(&format!(" {} {}", ENT_TOKEN, value));
        }
        Ok(annotated)
    }
}
