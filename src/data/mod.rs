//! Dataset loading
//!
//! CSV is the only on-disk format; the loader handles header detection and
//! categorical preprocessing.

pub mod csv;

pub use self::csv::{from_reader, load_dataset};
