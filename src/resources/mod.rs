pub mod database;
pub mod embedding;
pub mod ner;
pub mod value_model;

use std::sync::Arc;

use crate::resources::database::ValueDatabase;
use crate::resources::embedding::WordEmbedder;
use crate::resources::ner::NamedEntityRecognizer;
use crate::resources::value_model::SentenceValueModel;

/// Collaborators the annotation strategies draw on.
///
/// Owned by the caller and passed in explicitly; each resource is only
/// required when a strategy that uses it is selected, so all of them are
/// optional here.
#[derive(Default, Clone)]
pub struct SharedResources {
    pub ner: Option<Arc<dyn NamedEntityRecognizer>>,
    pub value_model: Option<Arc<dyn SentenceValueModel>>,
    pub database: Option<Arc<dyn ValueDatabase>>,
    pub word_embedders: Vec<Arc<dyn WordEmbedder>>,
}
