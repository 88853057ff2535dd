use crate::errors::*;

/// Learned extractor decoding candidate slot values from a sentence.
///
/// The model itself (tokenization, weights, decoding) lives entirely behind
/// this boundary; implementations only have to return the decoded value
/// strings in sentence order.
pub trait SentenceValueModel: Send + Sync {
    fn predict_sentence_values(&self, sentence: &str) -> Result<Vec<String>>;
}
