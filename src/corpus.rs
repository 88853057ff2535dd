use std::fmt;
use std::path::Path;

use failure::ResultExt;
use serde_derive::{Deserialize, Serialize};

use crate::errors::*;
use crate::utils::{DomainName, SlotName};

/// Corpus split a set of documents belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Dev,
    Test,
}

impl Split {
    pub fn is_test(self) -> bool {
        self == Split::Test
    }

    /// Conventional file name of the split's corpus document under the data
    /// directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Split::Train => "train_dials.json",
            Split::Dev => "dev_dials.json",
            Split::Test => "test_dials.json",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Split::Train => write!(f, "train"),
            Split::Dev => write!(f, "dev"),
            Split::Test => write!(f, "test"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialogue {
    #[serde(rename = "dialogue_idx")]
    pub dialogue_id: String,
    pub domains: Vec<DomainName>,
    #[serde(rename = "dialogue")]
    pub turns: Vec<DialogueTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub turn_idx: usize,
    pub domain: DomainName,
    pub system_transcript: String,
    pub transcript: String,
    pub turn_label: Vec<(SlotName, String)>,
    pub belief_state: Vec<BeliefGroup>,
}

/// One annotation group of a raw belief state. Only the labeled slot pairs
/// matter downstream; the surrounding act metadata is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeliefGroup {
    pub slots: Vec<(SlotName, String)>,
}

pub fn load_dialogues<P: AsRef<Path>>(path: P) -> Result<Vec<Dialogue>> {
    let file = crate::utils::open_resource(&path)?;
    let dialogues = serde_json::from_reader(file)
        .with_context(|_| format!("Cannot deserialize dialogues file '{:?}'", path.as_ref()))?;
    Ok(dialogues)
}
