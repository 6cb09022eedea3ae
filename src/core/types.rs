//! Core data model: dense labelled datasets and class-balance views

use crate::core::{RebalanceError, Result};

/// Dense labelled dataset: an N x D feature matrix plus N integer class labels.
///
/// Row `i` of the matrix corresponds to label `i`; the constructor rejects
/// mismatched lengths and ragged rows so every downstream consumer can rely
/// on the invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<i32>,
}

impl Dataset {
    /// Create a dataset, validating that features and labels line up.
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<i32>) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(RebalanceError::InvalidDataset(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }

        if let Some(first) = features.first() {
            let dim = first.len();
            for row in &features {
                if row.len() != dim {
                    return Err(RebalanceError::DimensionMismatch {
                        expected: dim,
                        actual: row.len(),
                    });
                }
            }
        }

        Ok(Self { features, labels })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Number of features per sample (0 for an empty dataset)
    pub fn dim(&self) -> usize {
        self.features.first().map_or(0, |row| row.len())
    }

    /// Check if the dataset has no samples
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Borrow the full feature matrix
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Borrow the label vector
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Borrow one feature row
    ///
    /// # Panics
    /// Panics if `i >= len()`
    pub fn row(&self, i: usize) -> &[f64] {
        &self.features[i]
    }

    /// Label of one sample
    ///
    /// # Panics
    /// Panics if `i >= len()`
    pub fn label(&self, i: usize) -> i32 {
        self.labels[i]
    }

    /// Build a new dataset from the given row indices, in order.
    /// Indices may repeat, which duplicates rows.
    ///
    /// # Panics
    /// Panics if any index is out of bounds
    pub fn select(&self, indices: &[usize]) -> Dataset {
        let features = indices.iter().map(|&i| self.features[i].clone()).collect();
        let labels = indices.iter().map(|&i| self.labels[i]).collect();
        Dataset { features, labels }
    }

    /// Indices of all rows carrying the given label
    pub fn rows_of_class(&self, label: i32) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == label)
            .map(|(i, _)| i)
            .collect()
    }

    /// Derive the per-class sample counts
    pub fn class_balance(&self) -> ClassBalance {
        ClassBalance::from_labels(&self.labels)
    }

    /// Append the rows of `other`, which must have the same feature width.
    pub fn append(&mut self, other: Dataset) -> Result<()> {
        if !self.is_empty() && !other.is_empty() && self.dim() != other.dim() {
            return Err(RebalanceError::DimensionMismatch {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        self.features.extend(other.features);
        self.labels.extend(other.labels);
        Ok(())
    }
}

/// Per-class sample counts derived from a label vector.
///
/// Classes are kept sorted; counts always sum to the number of labels the
/// view was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBalance {
    counts: Vec<(i32, usize)>,
}

impl ClassBalance {
    /// Count the distinct labels in a label vector
    pub fn from_labels(labels: &[i32]) -> Self {
        let mut counts: Vec<(i32, usize)> = Vec::new();
        for &label in labels {
            match counts.binary_search_by_key(&label, |&(l, _)| l) {
                Ok(pos) => counts[pos].1 += 1,
                Err(pos) => counts.insert(pos, (label, 1)),
            }
        }
        Self { counts }
    }

    /// Distinct labels, ascending
    pub fn classes(&self) -> Vec<i32> {
        self.counts.iter().map(|&(l, _)| l).collect()
    }

    /// Number of rows carrying `label` (0 if the label never occurs)
    pub fn count(&self, label: i32) -> usize {
        self.counts
            .binary_search_by_key(&label, |&(l, _)| l)
            .map(|pos| self.counts[pos].1)
            .unwrap_or(0)
    }

    /// Count of the majority class (0 for an empty view)
    pub fn max_count(&self) -> usize {
        self.counts.iter().map(|&(_, c)| c).max().unwrap_or(0)
    }

    /// Count of the smallest class (0 for an empty view)
    pub fn min_count(&self) -> usize {
        self.counts.iter().map(|&(_, c)| c).min().unwrap_or(0)
    }

    /// Total number of labelled rows
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&(_, c)| c).sum()
    }

    /// Number of distinct classes
    pub fn num_classes(&self) -> usize {
        self.counts.len()
    }

    /// True when every class has the same number of rows
    pub fn is_balanced(&self) -> bool {
        self.max_count() == self.min_count()
    }

    /// Iterate over `(label, count)` pairs in ascending label order
    pub fn iter(&self) -> impl Iterator<Item = (i32, usize)> + '_ {
        self.counts.iter().copied()
    }
}
