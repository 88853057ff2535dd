use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use failure::{bail, ResultExt};
use serde_derive::{Deserialize, Serialize};

use crate::belief::BeliefState;
use crate::errors::*;
use crate::utils::{split_domain_slot, SlotName};

pub const UNK_TOKEN: &str = "UNK";
pub const PAD_TOKEN: &str = "PAD";
pub const SOS_TOKEN: &str = "SOS";
pub const EOS_TOKEN: &str = "EOS";
pub const ENT_TOKEN: &str = "ENT";
pub const SYS_TOKEN: &str = "SYS";
pub const USR_TOKEN: &str = "USR";

pub const UNK_INDEX: usize = 0;
pub const PAD_INDEX: usize = 1;
pub const SOS_INDEX: usize = 2;
pub const EOS_INDEX: usize = 3;
pub const ENT_INDEX: usize = 4;
pub const SYS_INDEX: usize = 5;
pub const USR_INDEX: usize = 6;

const RESERVED_TOKENS: [&str; 7] = [
    UNK_TOKEN, PAD_TOKEN, SOS_TOKEN, EOS_TOKEN, ENT_TOKEN, SYS_TOKEN, USR_TOKEN,
];

/// Bidirectional word <-> index table with reserved control tokens.
///
/// Words are stored in a dense arena so that the index range is contiguous
/// and the two directions cannot drift apart; the reverse direction is a
/// plain lookup map over the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocab {
    words: Vec<String>,
    indices: HashMap<String, usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct VocabModel {
    version: String,
    words: Vec<String>,
}

impl Default for Vocab {
    fn default() -> Self {
        Self::new()
    }
}

impl Vocab {
    /// Creates a table pre-seeded with the seven reserved control tokens at
    /// their fixed indices.
    pub fn new() -> Self {
        let mut vocab = Vocab {
            words: Vec::new(),
            indices: HashMap::new(),
        };
        for token in RESERVED_TOKENS.iter() {
            vocab.add_word(token);
        }
        vocab
    }

    /// Adds a word, assigning it the next sequential index; a no-op when the
    /// word is already present.
    pub fn add_word(&mut self, word: &str) {
        if !self.indices.contains_key(word) {
            self.indices.insert(word.to_string(), self.words.len());
            self.words.push(word.to_string());
        }
    }

    /// Adds every piece of a single-space split of `sentence`.
    ///
    /// The split is on the literal space character, not on whitespace runs:
    /// consecutive spaces and empty inputs contribute the empty word, which
    /// is a real vocabulary entry for this corpus.
    pub fn index_sentence(&mut self, sentence: &str) {
        for word in sentence.split(' ') {
            self.add_word(word);
        }
    }

    /// Adds the domain and slot-name pieces of composite "domain-slot" names.
    pub fn index_slots(&mut self, slots: &[SlotName]) {
        for slot in slots {
            let (domain, slot_part) = split_domain_slot(slot);
            self.add_word(domain);
            if let Some(slot_part) = slot_part {
                for piece in slot_part.split(' ') {
                    self.add_word(piece);
                }
            }
        }
    }

    /// Adds the slot-name pieces and value words of every belief entry.
    pub fn index_belief(&mut self, belief: &BeliefState) {
        for (slot, value) in belief.iter() {
            let (domain, slot_part) = split_domain_slot(slot);
            self.add_word(domain);
            if let Some(slot_part) = slot_part {
                for piece in slot_part.split(' ') {
                    self.add_word(piece);
                }
            }
            for piece in value.split(' ') {
                self.add_word(piece);
            }
        }
    }

    pub fn word_index(&self, word: &str) -> Option<usize> {
        self.indices.get(word).cloned()
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(|word| word.as_str())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.indices.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in index order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Vocab {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = crate::utils::open_resource(&path)?;
        let model: VocabModel = serde_json::from_reader(file).with_context(|_| {
            format!("Cannot deserialize vocab file '{:?}'", path.as_ref())
        })?;
        if model.version != crate::VOCAB_VERSION {
            bail!(DstDatagenError::WrongVocabVersion {
                file: model.version,
                runner: crate::VOCAB_VERSION,
            });
        }
        let mut indices = HashMap::with_capacity(model.words.len());
        for (index, word) in model.words.iter().enumerate() {
            if indices.insert(word.clone(), index).is_some() {
                bail!(DstDatagenError::InternalError(format!(
                    "duplicate word '{}' in vocab file '{:?}'",
                    word,
                    path.as_ref()
                )));
            }
        }
        Ok(Vocab {
            words: model.words,
            indices,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|_| format!("Cannot create vocab file '{:?}'", path.as_ref()))?;
        let model = VocabModel {
            version: crate::VOCAB_VERSION.to_string(),
            words: self.words.clone(),
        };
        serde_json::to_writer(file, &model)
            .with_context(|_| format!("Cannot serialize vocab to '{:?}'", path.as_ref()))?;
        Ok(())
    }
}
