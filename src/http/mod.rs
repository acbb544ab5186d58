//! HTTP protocol layer module
//!
//! Response construction, decoupled from page assembly.

pub mod response;

// Re-export commonly used types
pub use response::{build_405_response, build_options_response, build_page_response};
