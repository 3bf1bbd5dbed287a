//! Request handler module
//!
//! Routes requests to the classification endpoint and health probes.

pub mod classify;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
