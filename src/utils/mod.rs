//! Helpers shared across layers.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_normalizer`] - URL validation and scheme normalization

pub mod code_generator;
pub mod url_normalizer;
