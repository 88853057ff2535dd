pub mod boosted_ner;
pub mod database;
pub mod ground_truth;
pub mod model;
pub mod ner;

use std::fmt;
use std::sync::Arc;

use failure::{bail, format_err};
use itertools::Itertools;
use serde_derive::{Deserialize, Serialize};

pub use self::boosted_ner::BoostedNerExtractor;
pub use self::database::DatabaseExtractor;
pub use self::ground_truth::GroundTruthExtractor;
pub use self::model::ModelValueExtractor;
pub use self::ner::NerExtractor;
use crate::errors::*;
use crate::resources::SharedResources;
use crate::utils::SlotName;

/// Which side of the conversation produced an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    System,
    User,
}

/// Per-turn inputs an extraction strategy may draw on besides the utterance
/// itself.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub turn_labels: &'a [(SlotName, String)],
}

/// Appends candidate slot values to an utterance, each introduced by the
/// `ENT` marker token. The annotated utterance is what ends up in the
/// dialogue history.
pub trait ValueExtractor: Send + Sync {
    fn annotate(&self, utterance: &str, context: &TurnContext) -> Result<String>;
}

impl fmt::Debug for dyn ValueExtractor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "dyn ValueExtractor")
    }
}

/// Extractor used when no value source is selected: utterances pass through
/// untouched.
pub struct IdentityExtractor;

impl ValueExtractor for IdentityExtractor {
    fn annotate(&self, utterance: &str, _context: &TurnContext) -> Result<String> {
        Ok(utterance.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    GroundTruth,
    Ner,
    BoostedNer,
    Model,
    Database,
    None,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValueSource::GroundTruth => write!(f, "ground_truth"),
            ValueSource::Ner => write!(f, "ner"),
            ValueSource::BoostedNer => write!(f, "boosted_ner"),
            ValueSource::Model => write!(f, "value_model"),
            ValueSource::Database => write!(f, "database"),
            ValueSource::None => write!(f, "none"),
        }
    }
}

fn default_percent_ground_truth() -> u8 {
    100
}

/// Value-annotation switches. The source flags are independent on purpose so
/// that configuration files stay flat; selecting more than one is rejected
/// when the source is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub use_ground_truth: bool,
    #[serde(default)]
    pub use_ner: bool,
    #[serde(default)]
    pub use_boosted_ner: bool,
    #[serde(default)]
    pub use_value_model: bool,
    #[serde(default)]
    pub use_database: bool,
    #[serde(default = "default_percent_ground_truth")]
    pub percent_ground_truth: u8,
    #[serde(default)]
    pub append_system_values: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            use_ground_truth: false,
            use_ner: false,
            use_boosted_ner: false,
            use_value_model: false,
            use_database: false,
            percent_ground_truth: default_percent_ground_truth(),
            append_system_values: false,
        }
    }
}

impl ExtractionConfig {
    /// Resolves the selected value source, rejecting conflicting selections.
    pub fn value_source(&self) -> Result<ValueSource> {
        let selected: Vec<ValueSource> = [
            (self.use_ground_truth, ValueSource::GroundTruth),
            (self.use_ner, ValueSource::Ner),
            (self.use_boosted_ner, ValueSource::BoostedNer),
            (self.use_value_model, ValueSource::Model),
            (self.use_database, ValueSource::Database),
        ]
        .iter()
        .filter(|(flag, _)| *flag)
        .map(|(_, source)| *source)
        .collect();
        match selected.as_slice() {
            [] => Ok(ValueSource::None),
            [source] => Ok(*source),
            sources => bail!(DstDatagenError::ConfigurationConflict(
                sources.iter().map(|source| source.to_string()).join(", ")
            )),
        }
    }
}

/// Builds the extractor for the configured value source, checking that the
/// collaborator it needs is present in the shared resources.
pub fn build_value_extractor(
    config: &ExtractionConfig,
    shared_resources: Arc<SharedResources>,
) -> Result<Box<dyn ValueExtractor>> {
    match config.value_source()? {
        ValueSource::GroundTruth => Ok(Box::new(GroundTruthExtractor::new(
            config.percent_ground_truth,
        )) as _),
        ValueSource::Ner => {
            let recognizer = shared_resources.ner.clone().ok_or_else(|| {
                format_err!("Cannot find named entity recognizer in shared resources")
            })?;
            Ok(Box::new(NerExtractor::new(recognizer)) as _)
        }
        ValueSource::BoostedNer => {
            let recognizer = shared_resources.ner.clone().ok_or_else(|| {
                format_err!("Cannot find named entity recognizer in shared resources")
            })?;
            Ok(Box::new(BoostedNerExtractor::new(recognizer)) as _)
        }
        ValueSource::Model => {
            let value_model = shared_resources.value_model.clone().ok_or_else(|| {
                format_err!("Cannot find sentence value model in shared resources")
            })?;
            Ok(Box::new(ModelValueExtractor::new(value_model)) as _)
        }
        ValueSource::Database => {
            let database = shared_resources
                .database
                .clone()
                .ok_or_else(|| format_err!("Cannot find value database in shared resources"))?;
            Ok(Box::new(DatabaseExtractor::new(database)) as _)
        }
        ValueSource::None => Ok(Box::new(IdentityExtractor) as _),
    }
}

/// Applies the built extractor with the speaker rule: system utterances pass
/// through unchanged unless system-side values were asked for.
#[derive(Debug)]
pub struct TurnAnnotator {
    extractor: Box<dyn ValueExtractor>,
    append_system_values: bool,
}

impl TurnAnnotator {
    pub fn new(extractor: Box<dyn ValueExtractor>, append_system_values: bool) -> Self {
        TurnAnnotator {
            extractor,
            append_system_values,
        }
    }

    pub fn annotate(
        &self,
        utterance: &str,
        speaker: Speaker,
        context: &TurnContext,
    ) -> Result<String> {
        if speaker == Speaker::System && !self.append_system_values {
            return Ok(utterance.to_string());
        }
        self.extractor.annotate(utterance, context)
    }
}
