//! HTTP response building module
//!
//! Builders for the few responses the page server sends.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_LENGTH, CONTENT_TYPE, SERVER};
use hyper::Response;

const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Build the rendered page response; HEAD keeps the headers, drops the body
pub fn build_page_response(page: Vec<u8>, is_head: bool, server_name: &str) -> Response<Full<Bytes>> {
    let content_length = page.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(page)
    };

    Response::builder()
        .status(200)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header(CONTENT_LENGTH, content_length)
        .header(SERVER, server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header(CONTENT_TYPE, "text/plain")
        .header(ALLOW, ALLOWED_METHODS)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header(ALLOW, ALLOWED_METHODS)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_page_response() {
        let resp = build_page_response(b"<html></html>".to_vec(), false, "Tokio-Hyper/1.0");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "13");
        assert_eq!(resp.headers()[SERVER], "Tokio-Hyper/1.0");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<html></html>");
    }

    #[tokio::test]
    async fn test_head_response_keeps_length() {
        let resp = build_page_response(b"<html></html>".to_vec(), true, "Tokio-Hyper/1.0");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "13");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn test_405_and_options() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()[ALLOW], ALLOWED_METHODS);

        let resp = build_options_response();
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()[ALLOW], ALLOWED_METHODS);
    }
}
