//! Data acquisition: the JSON dataset source and the synthetic sample.

pub mod sample;
pub mod source;

pub use sample::generate_sample;
pub use source::{DataLocation, DataSource};
