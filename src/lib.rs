//! Class-imbalance-aware training wrappers and stratified evaluation
//!
//! Wrap any [`Classifier`] in an [`OversamplingTrainer`] or [`SmoteTrainer`]
//! so it trains on a class-balanced view of the data, then measure it with
//! the [`FoldEvaluator`], which scores each fold against a rebalanced test
//! partition so minority-class failure cannot hide behind majority-class
//! accuracy.

pub mod classifier;
pub mod core;
pub mod data;
pub mod eval;
pub mod resample;
pub mod trainer;

// Re-export main types for convenience
pub use crate::classifier::{LinearSvm, SvmParams};
pub use crate::core::{ClassBalance, Classifier, Dataset, RebalanceError, Result};
pub use crate::data::load_dataset;
pub use crate::eval::{EvaluationResult, FoldEvaluator};
pub use crate::resample::{balance, SmoteEnn};
pub use crate::trainer::{OversamplingTrainer, SmoteTrainer};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
