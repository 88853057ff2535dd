use std::collections::HashMap;
use std::io::Read;
use std::iter::FromIterator;
use std::path::Path;
use std::str::FromStr;

use failure::{bail, format_err};

use crate::errors::*;

/// Pretrained word-vector table.
pub trait WordEmbedder: Send + Sync {
    /// Length of the vectors this embedder produces.
    fn dimension(&self) -> usize;
    fn embed(&self, word: &str) -> Option<Vec<f32>>;
}

/// Embedder backed by a whitespace-separated vector table, one
/// `word v1 .. vn` record per line (the common pretrained-vector format).
#[derive(Debug)]
pub struct HashMapWordEmbedder {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl HashMapWordEmbedder {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = crate::utils::open_resource(&path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b' ')
            .quoting(false)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut dimension = None;
        let mut vectors = HashMap::<String, Vec<f32>>::new();
        for record in csv_reader.records() {
            let elements = record?;
            if elements.len() < 2 {
                bail!("Invalid embedding record: '{}'", elements.as_slice());
            }
            let vector = elements
                .iter()
                .skip(1)
                .map(|element| {
                    f32::from_str(element).map_err(|_| {
                        format_err!(
                            "Cannot parse embedding coordinate '{}' for word '{}'",
                            element,
                            &elements[0]
                        )
                    })
                })
                .collect::<Result<Vec<f32>>>()?;
            match dimension {
                None => dimension = Some(vector.len()),
                Some(expected) if expected != vector.len() => bail!(
                    "Inconsistent embedding dimension: expected {} but word '{}' has {}",
                    expected,
                    &elements[0],
                    vector.len()
                ),
                _ => {}
            }
            vectors.insert(elements[0].to_string(), vector);
        }
        Ok(Self {
            dimension: dimension.unwrap_or(0),
            vectors,
        })
    }
}

impl FromIterator<(String, Vec<f32>)> for HashMapWordEmbedder {
    fn from_iter<T: IntoIterator<Item = (String, Vec<f32>)>>(iter: T) -> Self {
        let vectors: HashMap<String, Vec<f32>> = iter.into_iter().collect();
        let dimension = vectors.values().next().map(|v| v.len()).unwrap_or(0);
        Self { dimension, vectors }
    }
}

impl WordEmbedder for HashMapWordEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, word: &str) -> Option<Vec<f32>> {
        self.vectors.get(word).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_word_embedder() {
        // Given
        let table: &[u8] = b"the 0.1 -0.2 0.3\nhotel 1.0 2.0 -3.5\n";

        // When
        let embedder = HashMapWordEmbedder::from_reader(table).unwrap();

        // Then
        assert_eq!(3, embedder.dimension());
        assert_eq!(Some(vec![0.1, -0.2, 0.3]), embedder.embed("the"));
        assert_eq!(Some(vec![1.0, 2.0, -3.5]), embedder.embed("hotel"));
        assert_eq!(None, embedder.embed("unknown"));
    }

    #[test]
    fn test_inconsistent_dimension_is_rejected() {
        // Given
        let table: &[u8] = b"the 0.1 0.2\nhotel 1.0\n";

        // When
        let result = HashMapWordEmbedder::from_reader(table);

        // Then
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Inconsistent embedding dimension"));
    }

    #[test]
    fn test_non_numeric_coordinate_is_rejected() {
        // Given
        let table: &[u8] = b"the zero point one\n";

        // When
        let result = HashMapWordEmbedder::from_reader(table);

        // Then
        assert!(result.is_err());
    }
}
