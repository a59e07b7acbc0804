//! Service layer: the extraction pipeline and its instruction prompt.

pub mod processor;
pub mod prompt;

pub use processor::{ImageProcessor, Outcome};
