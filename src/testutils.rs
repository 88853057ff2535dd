use std::collections::HashMap;
use std::iter::FromIterator;
use std::sync::Arc;

use crate::errors::*;
use crate::resources::database::{SlotMatch, ValueDatabase};
use crate::resources::embedding::WordEmbedder;
use crate::resources::ner::{IobToken, NamedEntityRecognizer};
use crate::resources::value_model::SentenceValueModel;
use crate::resources::SharedResources;

#[derive(Default)]
pub struct SharedResourcesBuilder {
    ner: Option<Arc<dyn NamedEntityRecognizer>>,
    value_model: Option<Arc<dyn SentenceValueModel>>,
    database: Option<Arc<dyn ValueDatabase>>,
    word_embedders: Vec<Arc<dyn WordEmbedder>>,
}

impl SharedResourcesBuilder {
    pub fn ner<N: NamedEntityRecognizer + 'static>(mut self, ner: N) -> Self {
        self.ner = Some(Arc::new(ner) as _);
        self
    }

    pub fn value_model<M: SentenceValueModel + 'static>(mut self, model: M) -> Self {
        self.value_model = Some(Arc::new(model) as _);
        self
    }

    pub fn database<D: ValueDatabase + 'static>(mut self, database: D) -> Self {
        self.database = Some(Arc::new(database) as _);
        self
    }

    pub fn word_embedder<E: WordEmbedder + 'static>(mut self, embedder: E) -> Self {
        self.word_embedders.push(Arc::new(embedder) as _);
        self
    }

    pub fn build(self) -> SharedResources {
        SharedResources {
            ner: self.ner,
            value_model: self.value_model,
            database: self.database,
            word_embedders: self.word_embedders,
        }
    }
}

#[derive(Default)]
pub struct MockedEntityRecognizer {
    pub mocked_outputs: HashMap<String, Vec<IobToken>>,
}

impl NamedEntityRecognizer for MockedEntityRecognizer {
    fn tag(&self, text: &str) -> Result<Vec<IobToken>> {
        Ok(self
            .mocked_outputs
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![]))
    }
}

impl FromIterator<(String, Vec<IobToken>)> for MockedEntityRecognizer {
    fn from_iter<T: IntoIterator<Item = (String, Vec<IobToken>)>>(iter: T) -> Self {
        Self {
            mocked_outputs: HashMap::from_iter(iter),
        }
    }
}

#[derive(Default)]
pub struct MockedValueModel {
    pub mocked_outputs: HashMap<String, Vec<String>>,
}

impl SentenceValueModel for MockedValueModel {
    fn predict_sentence_values(&self, sentence: &str) -> Result<Vec<String>> {
        Ok(self
            .mocked_outputs
            .get(sentence)
            .cloned()
            .unwrap_or_else(|| vec![]))
    }
}

impl FromIterator<(String, Vec<String>)> for MockedValueModel {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self {
            mocked_outputs: HashMap::from_iter(iter),
        }
    }
}

#[derive(Default)]
pub struct MockedValueDatabase {
    pub mocked_outputs: HashMap<String, Vec<SlotMatch>>,
}

impl ValueDatabase for MockedValueDatabase {
    fn find_values(&self, utterance: &str) -> Result<Vec<SlotMatch>> {
        Ok(self
            .mocked_outputs
            .get(utterance)
            .cloned()
            .unwrap_or_else(|| vec![]))
    }
}

impl FromIterator<(String, Vec<SlotMatch>)> for MockedValueDatabase {
    fn from_iter<T: IntoIterator<Item = (String, Vec<SlotMatch>)>>(iter: T) -> Self {
        Self {
            mocked_outputs: HashMap::from_iter(iter),
        }
    }
}
