//! Training wrapper that applies SMOTE + ENN before fitting

use log::debug;

use crate::core::{Classifier, Dataset, Result};
use crate::resample::{Resampler, SmoteEnn};

/// Wraps a classifier so every `train` call sees a synthetically balanced
/// dataset instead of the raw imbalanced one.
///
/// The wrapper owns no resampling logic; it is a composition point around a
/// [`Resampler`], by default [`SmoteEnn`]. Each trainer owns its own
/// resampler instance, so independent trainers never share transform state.
pub struct SmoteTrainer<C: Classifier, S: Resampler = SmoteEnn> {
    inner: C,
    resampler: S,
}

impl<C: Classifier> SmoteTrainer<C> {
    /// Wrap a classifier with a fresh default SMOTE+ENN resampler
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            resampler: SmoteEnn::new(),
        }
    }
}

impl<C: Classifier, S: Resampler> SmoteTrainer<C, S> {
    /// Wrap a classifier around an explicitly supplied resampler
    pub fn with_resampler(inner: C, resampler: S) -> Self {
        Self { inner, resampler }
    }

    /// Borrow the wrapped classifier
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Unwrap into the inner classifier
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Classifier, S: Resampler> Classifier for SmoteTrainer<C, S> {
    fn name(&self) -> String {
        format!("SMOTE ({})", self.inner.name())
    }

    fn classes(&self) -> &[i32] {
        self.inner.classes()
    }

    fn train(&mut self, data: &Dataset) -> Result<()> {
        let resampled = self.resampler.resample(data)?;
        debug!(
            "{} turned {} rows into {} before training",
            self.resampler.name(),
            data.len(),
            resampled.len()
        );
        self.inner.train(&resampled)
    }

    fn classify(&self, features: &[Vec<f64>]) -> Result<Vec<i32>> {
        self.inner.classify(features)
    }
}
