use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use failure::ResultExt;
use log::{debug, info};
use serde_derive::{Deserialize, Serialize};

use crate::corpus::Split;
use crate::errors::*;
use crate::ontology::load_slot_ontology;
use crate::reader::{DatasetReader, ReaderConfig, TurnSample};
use crate::resources::embedding::WordEmbedder;
use crate::resources::SharedResources;
use crate::utils::SlotName;
use crate::vocab::Vocab;

const UTTERANCE_VOCAB_FILE: &str = "utterance_vocab.json";
const BELIEF_VOCAB_FILE: &str = "belief_vocab.json";

fn default_ratio() -> usize {
    100
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the split corpus files (`train_dials.json`,
    /// `dev_dials.json`, `test_dials.json`).
    pub data_dir: PathBuf,
    pub ontology_path: PathBuf,
    /// Directory for the persisted vocabularies and embedding artifacts.
    pub vocab_dir: PathBuf,
    #[serde(default)]
    pub dump_embeddings: bool,
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default = "default_ratio")]
    pub train_data_ratio: usize,
    #[serde(default = "default_ratio")]
    pub dev_data_ratio: usize,
    #[serde(default = "default_ratio")]
    pub test_data_ratio: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedData {
    pub train: Vec<TurnSample>,
    pub dev: Vec<TurnSample>,
    pub test: Vec<TurnSample>,
    pub utterance_vocab: Vocab,
    pub belief_vocab: Vocab,
    pub all_slots: Vec<SlotName>,
    pub train_slots: Vec<SlotName>,
    pub dev_slots: Vec<SlotName>,
    pub test_slots: Vec<SlotName>,
    /// Longest history across the splits that were read, plus one.
    pub max_history_len: usize,
    /// Utterance-vocabulary size right after the train split was read; 0
    /// outside of training.
    pub train_vocab_size: usize,
}

/// Reads the corpus splits and assembles everything a training run consumes.
///
/// In training mode the train and dev splits go through the configured
/// reader while the test split is read plain (no value source, no speaker
/// tokens, no domain filters), and the vocabularies are persisted. When
/// already-persisted ones exist, those replace the freshly built pair.
/// Outside of training the persisted vocabularies are required
/// and only the test split is read, with the fully configured reader.
pub fn prepare_data(
    config: &PipelineConfig,
    shared_resources: Arc<SharedResources>,
    training: bool,
) -> Result<PreparedData> {
    info!("Preparing data ({:?}) ...", config.data_dir);
    let all_slots = load_slot_ontology(&config.ontology_path, &config.reader.drop_slots)?;

    let mut utterance_vocab = Vocab::new();
    let mut belief_vocab = Vocab::new();
    utterance_vocab.index_slots(&all_slots);
    belief_vocab.index_slots(&all_slots);

    fs::create_dir_all(&config.vocab_dir)
        .with_context(|_| format!("Cannot create vocab directory '{:?}'", config.vocab_dir))?;
    let utterance_vocab_path = config.vocab_dir.join(UTTERANCE_VOCAB_FILE);
    let belief_vocab_path = config.vocab_dir.join(BELIEF_VOCAB_FILE);

    let train;
    let dev;
    let test;
    let train_slots;
    let dev_slots;
    let test_slots;
    let max_history_len;
    let train_vocab_size;

    if training {
        let reader = DatasetReader::new(config.reader.clone(), shared_resources.clone())?;
        let train_output = reader.read_path(
            config.data_dir.join(Split::Train.file_name()),
            Split::Train,
            &all_slots,
            config.train_data_ratio,
            &mut utterance_vocab,
            &mut belief_vocab,
        )?;
        train_vocab_size = utterance_vocab.len();

        let dev_output = reader.read_path(
            config.data_dir.join(Split::Dev.file_name()),
            Split::Dev,
            &all_slots,
            config.dev_data_ratio,
            &mut utterance_vocab,
            &mut belief_vocab,
        )?;

        // The test split is read without any annotation so that evaluation
        // inputs stay pristine during training runs.
        let plain_config = ReaderConfig {
            drop_slots: config.reader.drop_slots.clone(),
            ..Default::default()
        };
        let plain_reader = DatasetReader::new(plain_config, shared_resources.clone())?;
        let test_output = plain_reader.read_path(
            config.data_dir.join(Split::Test.file_name()),
            Split::Test,
            &all_slots,
            config.test_data_ratio,
            &mut utterance_vocab,
            &mut belief_vocab,
        )?;

        if utterance_vocab_path.exists() && belief_vocab_path.exists() {
            info!(
                "Loading saved vocabulary files from {:?}",
                config.vocab_dir
            );
            utterance_vocab = Vocab::from_path(&utterance_vocab_path)?;
            belief_vocab = Vocab::from_path(&belief_vocab_path)?;
        } else {
            info!("Dumping vocabulary files to {:?}", config.vocab_dir);
            utterance_vocab.save(&utterance_vocab_path)?;
            belief_vocab.save(&belief_vocab_path)?;
        }

        if config.dump_embeddings {
            let embedding_path = config
                .vocab_dir
                .join(format!("emb{}.json", utterance_vocab.len()));
            if !embedding_path.exists() {
                dump_pretrained_embeddings(
                    &utterance_vocab,
                    &shared_resources.word_embedders,
                    &embedding_path,
                )?;
            }
        }

        max_history_len = train_output
            .max_history_len
            .max(dev_output.max_history_len)
            .max(test_output.max_history_len)
            + 1;
        train = train_output.samples;
        dev = dev_output.samples;
        test = test_output.samples;
        train_slots = train_output.slots;
        dev_slots = dev_output.slots;
        test_slots = test_output.slots;
    } else {
        utterance_vocab = Vocab::from_path(&utterance_vocab_path)?;
        belief_vocab = Vocab::from_path(&belief_vocab_path)?;

        let reader = DatasetReader::new(config.reader.clone(), shared_resources)?;
        let test_output = reader.read_path(
            config.data_dir.join(Split::Test.file_name()),
            Split::Test,
            &all_slots,
            config.test_data_ratio,
            &mut utterance_vocab,
            &mut belief_vocab,
        )?;

        max_history_len = test_output.max_history_len + 1;
        train = vec![];
        dev = vec![];
        test = test_output.samples;
        train_slots = vec![];
        dev_slots = vec![];
        test_slots = test_output.slots;
        train_vocab_size = 0;
    }

    info!("Read {} pairs train", train.len());
    info!("Read {} pairs dev", dev.len());
    info!("Read {} pairs test", test.len());
    info!("Vocab size: {}", utterance_vocab.len());
    info!("Train vocab size: {}", train_vocab_size);
    info!("Belief vocab size: {}", belief_vocab.len());
    info!("Max history length: {}", max_history_len);
    debug!("Train/dev slots ({}): {:?}", dev_slots.len(), dev_slots);
    debug!("Test slots ({}): {:?}", test_slots.len(), test_slots);

    Ok(PreparedData {
        train,
        dev,
        test,
        utterance_vocab,
        belief_vocab,
        all_slots,
        train_slots,
        dev_slots,
        test_slots,
        max_history_len,
        train_vocab_size,
    })
}

/// Writes one embedding row per vocabulary entry, in index order, as a JSON
/// array of arrays. Each row concatenates every embedder's vector for the
/// word, substituting a zero vector of the embedder's dimension for unknown
/// words.
pub fn dump_pretrained_embeddings<P: AsRef<Path>>(
    vocab: &Vocab,
    embedders: &[Arc<dyn WordEmbedder>],
    path: P,
) -> Result<()> {
    info!("Dumping pretrained embeddings at {:?}", path.as_ref());
    let mut rows: Vec<Vec<f32>> = Vec::with_capacity(vocab.len());
    for word in vocab.words() {
        let mut row = Vec::new();
        for embedder in embedders {
            match embedder.embed(word) {
                Some(vector) => row.extend(vector),
                None => row.extend(vec![0.0; embedder.dimension()]),
            }
        }
        rows.push(row);
    }
    let file = File::create(path.as_ref())
        .with_context(|_| format!("Cannot create embeddings file '{:?}'", path.as_ref()))?;
    serde_json::to_writer(file, &rows)
        .with_context(|_| format!("Cannot serialize embeddings to '{:?}'", path.as_ref()))?;
    Ok(())
}
