//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, host
//! extraction, page rendering and access logging. Every path serves the page.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::page;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HOST, REFERER, USER_AGENT};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let host = request_host(&req).to_string();

    let response = match *req.method() {
        Method::GET | Method::HEAD => {
            let is_head = *req.method() == Method::HEAD;
            let page = page::assemble_page(
                &host,
                &state.fetcher,
                &state.config.page.appended_file,
            )
            .await;
            http::build_page_response(page, is_head, &state.config.http.server_name)
        }
        Method::OPTIONS => http::build_options_response(),
        ref method => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    if state.config.logging.access_log {
        let mut entry = access_entry(&req, peer_addr, host);
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Host the page is rendered for: the `Host` header, else the URI authority,
/// else empty
fn request_host<B>(req: &Request<B>) -> &str {
    req.headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().authority().map(hyper::http::uri::Authority::as_str))
        .unwrap_or("")
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr, host: String) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.host = Some(host).filter(|h| !h.is_empty());
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
