use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_derive::{Deserialize, Serialize};

use crate::belief::normalize_belief;
use crate::composer::TurnComposer;
use crate::corpus::{load_dialogues, Dialogue, Split};
use crate::errors::*;
use crate::extraction::{build_value_extractor, ExtractionConfig, TurnAnnotator};
use crate::ontology::{keep_dialogue, retain_scoped, scope_slots, EXPERIMENT_DOMAINS};
use crate::resources::SharedResources;
use crate::targets::{build_targets, Gate};
use crate::utils::{DomainName, SlotName};
use crate::vocab::Vocab;

/// Seed of the subsampling shuffle. Fixed so that reading the same corpus at
/// the same ratio always keeps the same dialogues.
pub const SUBSAMPLE_SEED: u64 = 10;

/// One emitted training example. Field order is the serialized key order the
/// downstream consumers expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnSample {
    #[serde(rename = "ID")]
    pub dialogue_id: String,
    pub turn_domain: DomainName,
    pub turn_id: usize,
    pub dialog_history: String,
    pub turn_belief: Vec<String>,
    pub gating_label: Vec<Gate>,
    pub generate_y: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReaderConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub use_speaker_tokens: bool,
    #[serde(default)]
    pub only_domain: Option<DomainName>,
    #[serde(default)]
    pub except_domain: Option<DomainName>,
    #[serde(default)]
    pub drop_slots: Vec<SlotName>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutput {
    pub samples: Vec<TurnSample>,
    /// Longest emitted history, in whitespace-separated tokens.
    pub max_history_len: usize,
    /// The domain-scoped slot ontology every emitted sample was built
    /// against.
    pub slots: Vec<SlotName>,
}

#[derive(Debug)]
pub struct DatasetReader {
    config: ReaderConfig,
    annotator: TurnAnnotator,
    composer: TurnComposer,
}

impl DatasetReader {
    /// Builds the reader, resolving the configured value source once.
    /// Conflicting source selections and missing collaborators surface here,
    /// before any corpus is read.
    pub fn new(config: ReaderConfig, shared_resources: Arc<SharedResources>) -> Result<Self> {
        let extractor = build_value_extractor(&config.extraction, shared_resources)?;
        let annotator = TurnAnnotator::new(extractor, config.extraction.append_system_values);
        let composer = TurnComposer::new(config.use_speaker_tokens);
        Ok(DatasetReader {
            config,
            annotator,
            composer,
        })
    }

    pub fn read_path<P: AsRef<Path>>(
        &self,
        path: P,
        split: Split,
        ontology: &[SlotName],
        data_ratio: usize,
        utterance_vocab: &mut Vocab,
        belief_vocab: &mut Vocab,
    ) -> Result<ReadOutput> {
        info!("Reading {} corpus ({:?}) ...", split, path.as_ref());
        let dialogues = load_dialogues(path)?;
        self.read(
            dialogues,
            split,
            ontology,
            data_ratio,
            utterance_vocab,
            belief_vocab,
        )
    }

    pub fn read(
        &self,
        mut dialogues: Vec<Dialogue>,
        split: Split,
        ontology: &[SlotName],
        data_ratio: usize,
        utterance_vocab: &mut Vocab,
        belief_vocab: &mut Vocab,
    ) -> Result<ReadOutput> {
        let only_domain = self.config.only_domain.as_deref();
        let except_domain = self.config.except_domain.as_deref();

        // The utterance vocabulary covers the whole split, before any
        // subsampling, so its content does not depend on the ratio.
        for dialogue in &dialogues {
            for turn in &dialogue.turns {
                utterance_vocab.index_sentence(&turn.system_transcript);
                utterance_vocab.index_sentence(&turn.transcript);
            }
        }

        if data_ratio != 100 {
            let mut rng = StdRng::seed_from_u64(SUBSAMPLE_SEED);
            dialogues.shuffle(&mut rng);
            dialogues.truncate(dialogues.len() * data_ratio / 100);
            debug!(
                "Subsampled {} split to {} dialogues ({}%)",
                split,
                dialogues.len(),
                data_ratio
            );
        }

        // Turn-invariant, so computed once for the whole read.
        let scoped_slots = scope_slots(ontology, split, only_domain, except_domain);

        let mut samples = Vec::new();
        let mut max_history_len = 0;
        let mut max_value_len = 0;
        let mut domain_counter: HashMap<DomainName, usize> = HashMap::new();

        for dialogue in &dialogues {
            for domain in &dialogue.domains {
                if EXPERIMENT_DOMAINS.contains(&domain.as_str()) {
                    *domain_counter.entry(domain.clone()).or_insert(0) += 1;
                }
            }

            if !keep_dialogue(&dialogue.domains, split, only_domain, except_domain) {
                continue;
            }

            let mut running_history = String::new();
            for turn in &dialogue.turns {
                let composed = self
                    .composer
                    .compose(&self.annotator, &running_history, turn)?;
                running_history.push_str(&composed.segment);

                let mut belief =
                    normalize_belief(&turn.belief_state, ontology, &self.config.drop_slots);
                retain_scoped(&mut belief, split, only_domain, except_domain);
                belief_vocab.index_belief(&belief);

                for slot in &scoped_slots {
                    if let Some(value) = belief.get(slot) {
                        max_value_len = max_value_len.max(value.chars().count());
                    }
                }

                let targets = build_targets(&belief, &scoped_slots);
                let history_len = composed.history.split_whitespace().count();
                max_history_len = max_history_len.max(history_len);

                samples.push(TurnSample {
                    dialogue_id: dialogue.dialogue_id.clone(),
                    turn_domain: turn.domain.clone(),
                    turn_id: turn.turn_idx,
                    dialog_history: composed.history,
                    turn_belief: belief.labels(),
                    gating_label: targets.gating_label,
                    generate_y: targets.generate_y,
                });
            }
        }

        // Time tokens for the value decoder, train split only. The guard on
        // the last token makes re-reading with an existing vocabulary a
        // no-op.
        if split == Split::Train
            && max_value_len > 0
            && !belief_vocab.contains(&format!("t{}", max_value_len - 1))
        {
            for time_index in 0..max_value_len {
                belief_vocab.add_word(&format!("t{}", time_index));
            }
        }

        info!(
            "Domain counter: {}",
            domain_counter
                .iter()
                .sorted()
                .map(|(domain, count)| format!("{}={}", domain, count))
                .join(", ")
        );
        info!("{} split read ({} samples)", split, samples.len());

        Ok(ReadOutput {
            samples,
            max_history_len,
            slots: scoped_slots,
        })
    }
}
