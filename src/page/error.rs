//! Fragment fetch errors

use std::time::Duration;

use hyper::StatusCode;
use thiserror::Error;

/// Every way the project title fetch can fail.
///
/// None of these reach the rendered page. Before the body starts they leave
/// the fragment region empty; once it has started, `Body` and `Timeout` only
/// cut it short (see `Fragment::interrupted`).
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid fragment url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: hyper::http::uri::InvalidUri,
    },

    #[error("invalid redirect location: {0}")]
    InvalidRedirect(String),

    #[error("failed to build request: {0}")]
    Build(#[from] hyper::http::Error),

    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("upstream returned {0}")]
    Status(StatusCode),

    #[error("failed to read upstream body: {0}")]
    Body(#[from] hyper::Error),

    #[error("too many redirects (limit {0})")]
    TooManyRedirects(usize),

    #[error("upstream timed out after {0:?}")]
    Timeout(Duration),

    #[error("unsupported redirect target '{0}': only http is fetched")]
    UnsupportedScheme(String),
}
