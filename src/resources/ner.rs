use crate::errors::*;

/// IOB chunk position of one tagged token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iob {
    Begin,
    Inside,
    Outside,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IobToken {
    pub text: String,
    pub iob: Iob,
}

impl IobToken {
    pub fn new<T: Into<String>>(text: T, iob: Iob) -> Self {
        IobToken {
            text: text.into(),
            iob,
        }
    }
}

/// Off-the-shelf entity tagger. Implementations wrap whatever tagging engine
/// the caller has available; only the token stream with IOB marks is used
/// here.
pub trait NamedEntityRecognizer: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<IobToken>>;
}
