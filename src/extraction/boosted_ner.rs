use std::sync::Arc;

use crate::errors::*;
use crate::extraction::{NerExtractor, TurnContext, ValueExtractor};
use crate::resources::ner::NamedEntityRecognizer;
use crate::vocab::ENT_TOKEN;

/// Binary-answer slots no tagger finds in practice; their labeled values are
/// appended unconditionally on top of the recognizer output.
const BOOSTED_SLOTS: &[&str] = &["hotel-parking", "hotel-internet"];

pub struct BoostedNerExtractor {
    ner: NerExtractor,
}

impl BoostedNerExtractor {
    pub fn new(recognizer: Arc<dyn NamedEntityRecognizer>) -> Self {
        BoostedNerExtractor {
            ner: NerExtractor::new(recognizer),
        }
    }
}

impl ValueExtractor for BoostedNerExtractor {
    fn annotate(&self, utterance: &str, context: &TurnContext) -> Result<String> {
        let mut annotated = self.ner.annotate(utterance, context)?;
        for (slot, value) in context.turn_labels {
            if BOOSTED_SLOTS.contains(&slot.as_str()) {
                annotated.push_str(&format!(" {} {}", ENT_TOKEN, value));
            }
        }
        Ok(annotated)
    }
}
