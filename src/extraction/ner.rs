use std::sync::Arc;

use crate::errors::*;
use crate::extraction::{TurnContext, ValueExtractor};
use crate::resources::ner::{Iob, NamedEntityRecognizer};
use crate::vocab::ENT_TOKEN;

/// Appends recognized entities: a `Begin` token opens a value with the `ENT`
/// marker, `Inside` tokens extend the value it opened.
///
/// Continuation tokens are appended even when no entity is open, so a tagger
/// emitting an orphaned `Inside` contributes a bare token without a marker.
pub struct NerExtractor {
    recognizer: Arc<dyn NamedEntityRecognizer>,
}

impl NerExtractor {
    pub fn new(recognizer: Arc<dyn NamedEntityRecognizer>) -> Self {
        NerExtractor { recognizer }
    }
}

impl ValueExtractor for NerExtractor {
    fn annotate(&self, utterance: &str, _context: &TurnContext) -> Result<String> {
        let mut annotated = utterance.to_string();
        for token in self.recognizer.tag(utterance)? {
            match token.iob {
                Iob::Begin => annotated.push_str(&format!(" {} {}", ENT_TOKEN, token.text)),
                Iob::Inside => annotated.push_str(&format!(" {}", token.text)),
                Iob::Outside => {}
            }
        }
        Ok(annotated)
    }
}
