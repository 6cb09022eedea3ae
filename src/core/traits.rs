//! The classifier capability consumed by the trainer wrappers

use crate::core::{Dataset, RebalanceError, Result};

/// Any statistical classifier usable with the balancing trainers and the
/// fold evaluator.
///
/// Implementations declare their output classes up front and may be trained
/// any number of times; each `train` call fully re-fits the model.
/// `accuracy` and `correct` are pure derivations over `classify` and need no
/// overriding.
pub trait Classifier {
    /// Human-readable name used in evaluation reports
    fn name(&self) -> String;

    /// Declared output classes
    fn classes(&self) -> &[i32];

    /// Fit the model on a labelled dataset
    fn train(&mut self, data: &Dataset) -> Result<()>;

    /// Classify a batch of feature rows
    ///
    /// Returns `UnfitClassifier` when called before `train`.
    fn classify(&self, features: &[Vec<f64>]) -> Result<Vec<i32>>;

    /// Number of declared output classes
    fn class_count(&self) -> usize {
        self.classes().len()
    }

    /// Count of correctly classified rows in a labelled test set
    fn correct(&self, data: &Dataset) -> Result<usize> {
        let predicted = self.classify(data.features())?;
        Ok(predicted
            .iter()
            .zip(data.labels())
            .filter(|(p, a)| p == a)
            .count())
    }

    /// Proportion of correctly classified rows (0-1)
    fn accuracy(&self, data: &Dataset) -> Result<f64> {
        if data.is_empty() {
            return Err(RebalanceError::EmptyDataset);
        }
        Ok(self.correct(data)? as f64 / data.len() as f64)
    }
}
