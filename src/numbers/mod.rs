//! Number classification module
//!
//! Arithmetic predicates and the response types built from them.

mod classification;
pub mod predicates;

pub use classification::{Classification, ClassifyResponse, RejectedNumber};
