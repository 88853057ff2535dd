mod belief;
mod composer;
mod corpus;
pub mod errors;
mod extraction;
mod ontology;
mod pipeline;
mod reader;
pub mod resources;
mod targets;
#[cfg(test)]
mod testutils;
mod utils;
mod vocab;

pub const VOCAB_VERSION: &str = "0.2.0";

pub use crate::belief::{normalize_belief, BeliefState};
pub use crate::composer::{ComposedTurn, TurnComposer};
pub use crate::corpus::{load_dialogues, BeliefGroup, Dialogue, DialogueTurn, Split};
pub use crate::errors::*;
pub use crate::extraction::{
    build_value_extractor, BoostedNerExtractor, DatabaseExtractor, ExtractionConfig,
    GroundTruthExtractor, ModelValueExtractor, NerExtractor, Speaker, TurnAnnotator, TurnContext,
    ValueExtractor, ValueSource,
};
pub use crate::ontology::{
    keep_dialogue, load_slot_ontology, retain_scoped, scope_slots, EXPERIMENT_DOMAINS,
};
pub use crate::pipeline::{
    dump_pretrained_embeddings, prepare_data, PipelineConfig, PreparedData,
};
pub use crate::reader::{DatasetReader, ReadOutput, ReaderConfig, TurnSample, SUBSAMPLE_SEED};
pub use crate::resources::SharedResources;
pub use crate::targets::{build_targets, Gate, SlotTargets};
pub use crate::utils::{DomainName, SlotName};
pub use crate::vocab::*;
