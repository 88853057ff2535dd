use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::*;
use crate::extraction::{TurnContext, ValueExtractor};
use crate::vocab::ENT_TOKEN;

/// Leaks each labeled value of the turn into the utterance with probability
/// `percent / 100`, in label order.
///
/// The rng lives behind a `Mutex` so annotation stays usable from multiple
/// threads; the draw for one value consumes exactly one sample whatever its
/// outcome.
pub struct GroundTruthExtractor {
    percent: u8,
    rng: Mutex<StdRng>,
}

impl GroundTruthExtractor {
    pub fn new(percent: u8) -> Self {
        Self::with_rng(percent, StdRng::from_entropy())
    }

    /// Seeded variant for reproducible runs.
    pub fn with_rng(percent: u8, rng: StdRng) -> Self {
        GroundTruthExtractor {
            percent,
            rng: Mutex::new(rng),
        }
    }
}

impl ValueExtractor for GroundTruthExtractor {
    fn annotate(&self, utterance: &str, context: &TurnContext) -> Result<String> {
        let mut annotated = utterance.to_string();
        let mut rng = self.rng.lock().unwrap();
        for (_, value) in context.turn_labels {
            // strict comparison: probability 0 can never fire, even on an
            // exact 0.0 draw
            if rng.gen::<f64>() < f64::from(self.percent) * 0.01 {
                annotated.push_str(&format!(" {} {}", ENT_TOKEN, value));
            }
        }
        Ok(annotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<(String, String)> {
        vec![
            ("hotel-area".to_string(), "centre".to_string()),
            ("hotel-pricerange".to_string(), "cheap".to_string()),
        ]
    }

    #[test]
    fn test_zero_percent_never_appends() {
        // Given
        let extractor = GroundTruthExtractor::with_rng(0, StdRng::seed_from_u64(42));
        let labels = labels();
        let context = TurnContext {
            turn_labels: &labels,
        };

        // When
        let annotated = extractor.annotate("i want a hotel", &context).unwrap();

        // Then
        assert_eq!("i want a hotel", annotated);
    }

    #[test]
    fn test_hundred_percent_appends_every_value_in_label_order() {
        // Given
        let extractor = GroundTruthExtractor::with_rng(100, StdRng::seed_from_u64(42));
        let labels = labels();
        let context = TurnContext {
            turn_labels: &labels,
        };

        // When
        let annotated = extractor.annotate("i want a hotel", &context).unwrap();

        // Then
        assert_eq!("i want a hotel ENT centre ENT cheap", annotated);
    }

    #[test]
    fn test_same_seed_gives_same_annotation() {
        // Given
        let labels = labels();
        let context = TurnContext {
            turn_labels: &labels,
        };
        let first = GroundTruthExtractor::with_rng(50, StdRng::seed_from_u64(7));
        let second = GroundTruthExtractor::with_rng(50, StdRng::seed_from_u64(7));

        // When
        let first_annotated = first.annotate("i want a hotel", &context).unwrap();
        let second_annotated = second.annotate("i want a hotel", &context).unwrap();

        // Then
        assert_eq!(first_annotated, second_annotated);
    }

    #[test]
    fn test_no_labels_leaves_the_utterance_unchanged() {
        // Given
        let extractor = GroundTruthExtractor::with_rng(100, StdRng::seed_from_u64(42));
        let context = TurnContext { turn_labels: &[] };

        // When
        let annotated = extractor.annotate("hello there", &context).unwrap();

        // Then
        assert_eq!("hello there", annotated);
    }
}
