//! Request handler module
//!
//! Turns every incoming request into the rendered homepage.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
