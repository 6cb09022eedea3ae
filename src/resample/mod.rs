//! Dataset rebalancing transforms
//!
//! `oversample` duplicates existing minority rows; `smote` synthesizes new
//! ones and cleans ambiguous neighbours afterwards. Both leave the majority
//! class untouched.

pub mod oversample;
pub mod smote;

pub use oversample::{balance, balance_classes_with_rng, balance_with_rng};
pub use smote::SmoteEnn;

use crate::core::{Dataset, Result};

/// A transform that turns an imbalanced dataset into a balanced one
pub trait Resampler {
    /// Human-readable name used in logs
    fn name(&self) -> String;

    /// Produce a class-balanced dataset from `data`
    fn resample(&self, data: &Dataset) -> Result<Dataset>;
}
