//! Classifier wrappers that rebalance the training set before delegating

pub mod oversample;
pub mod smote;

pub use oversample::OversamplingTrainer;
pub use smote::SmoteTrainer;
