//! Training wrapper that oversamples minority classes before fitting

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::{Classifier, Dataset, Result};
use crate::resample::balance_classes_with_rng;

/// Wraps a classifier so every `train` call sees a class-balanced superset
/// of the training data.
///
/// Balancing duplicates minority rows with replacement until all of the
/// inner classifier's declared classes match the majority count; the
/// augmented set is then handed to the inner `train`. `classify` passes
/// through untouched, and inner-classifier errors propagate unchanged.
pub struct OversamplingTrainer<C: Classifier> {
    inner: C,
    seed: Option<u64>,
}

impl<C: Classifier> OversamplingTrainer<C> {
    /// Wrap a classifier
    pub fn new(inner: C) -> Self {
        Self { inner, seed: None }
    }

    /// Fix the RNG seed for reproducible oversampling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
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

impl<C: Classifier> Classifier for OversamplingTrainer<C> {
    fn name(&self) -> String {
        format!("Oversampled ({})", self.inner.name())
    }

    fn classes(&self) -> &[i32] {
        self.inner.classes()
    }

    fn train(&mut self, data: &Dataset) -> Result<()> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let classes = self.inner.classes().to_vec();
        let balanced = balance_classes_with_rng(data, &classes, &mut rng)?;
        debug!(
            "oversampled {} rows to {} before training",
            data.len(),
            balanced.len()
        );
        self.inner.train(&balanced)
    }

    fn classify(&self, features: &[Vec<f64>]) -> Result<Vec<i32>> {
        self.inner.classify(features)
    }
}
