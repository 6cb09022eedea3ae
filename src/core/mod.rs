//! Core types, traits, and errors

pub mod error;
pub mod traits;
pub mod types;

pub use error::{RebalanceError, Result};
pub use traits::Classifier;
pub use types::{ClassBalance, Dataset};
