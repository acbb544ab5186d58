//! Page assembly
//!
//! Builds the STOPS homepage for one request: fixed head, the project title
//! fragment fetched from the forge, fixed content, then the appended file.

mod error;
mod fetch;
mod host;
pub mod template;

pub use fetch::FragmentFetcher;
pub use host::split_host;

use std::path::Path;

use crate::logger;

/// Render the page for `host`.
///
/// Output order is fixed: head, fragment, content, appended file. A failed
/// fetch leaves the fragment region empty, a body that ends early contributes
/// what arrived, and an unreadable appended file contributes nothing. All of
/// these are logged; none shows up in the page.
pub async fn assemble_page(host: &str, fetcher: &FragmentFetcher, appended_file: &Path) -> Vec<u8> {
    let (group_name, domain) = split_host(host);

    let mut page = template::render_head(group_name).into_bytes();

    match fetcher.fetch(domain, group_name).await {
        Ok(fragment) => {
            if let Some(ref e) = fragment.interrupted {
                logger::log_warning(&format!(
                    "[Fragment] Project title for host '{host}' cut short after {} bytes: {e}",
                    fragment.contents.len()
                ));
            }
            page.extend_from_slice(&fragment.contents);
        }
        Err(e) => logger::log_warning(&format!(
            "[Fragment] No project title for host '{host}': {e}"
        )),
    }

    page.extend_from_slice(template::render_content(domain, group_name).as_bytes());

    match tokio::fs::read(appended_file).await {
        Ok(contents) => page.extend_from_slice(&contents),
        Err(e) => logger::log_warning(&format!(
            "[Page] Cannot read appended file {}: {e}",
            appended_file.display()
        )),
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use httpmock::prelude::*;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const APPENDED: &[u8] = b"<div id=\"tutorial\">\n\tCOPS &amp; STOPS\n</div>\n\xe2\x9c\x93";

    fn appended_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(APPENDED).unwrap();
        file
    }

    fn closed_port_host() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("stops.{addr}")
    }

    fn fetcher() -> FragmentFetcher {
        FragmentFetcher::new(&PageConfig::default())
    }

    #[tokio::test]
    async fn test_fragment_sits_between_head_and_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/export/projtitl.php")
                    .query_param("group_name", "stops");
                then.status(200).body("<h1>STOPS <em>title</em></h1>");
            })
            .await;
        let file = appended_file();
        let host = format!("stops.{}", server.address());

        let page = assemble_page(&host, &fetcher(), file.path()).await;

        mock.assert_async().await;
        let domain = server.address().to_string();
        let mut expected = template::render_head("stops").into_bytes();
        expected.extend_from_slice(b"<h1>STOPS <em>title</em></h1>");
        expected.extend_from_slice(template::render_content(&domain, "stops").as_bytes());
        expected.extend_from_slice(APPENDED);
        assert_eq!(page, expected);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_empty_region() {
        let file = appended_file();
        let host = closed_port_host();
        let (group_name, domain) = split_host(&host);

        let page = assemble_page(&host, &fetcher(), file.path()).await;

        let mut expected = template::render_head(group_name).into_bytes();
        expected.extend_from_slice(template::render_content(domain, group_name).as_bytes());
        expected.extend_from_slice(APPENDED);
        assert_eq!(page, expected);

        let text = String::from_utf8_lossy(&page);
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE html"));
        assert!(text.contains("<h3>Talks:</h3>"));
        assert!(text.contains("<h3>People:</h3>"));
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_not_embedded() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/export/projtitl.php");
                then.status(500).body("Internal Server Error");
            })
            .await;
        let file = appended_file();
        let host = format!("stops.{}", server.address());

        let page = assemble_page(&host, &fetcher(), file.path()).await;

        let text = String::from_utf8_lossy(&page);
        assert!(!text.contains("Internal Server Error"));
        assert!(text.contains(
            "may be changed as you like -->\n\n\n<!-- end of project description -->"
        ));
    }

    #[tokio::test]
    async fn test_appended_file_is_exact_tail() {
        let file = appended_file();
        let page = assemble_page(&closed_port_host(), &fetcher(), file.path()).await;

        assert!(page.ends_with(APPENDED));
        let html_end = b"</html>\n\n\n";
        let tail_start = page.len() - APPENDED.len();
        assert_eq!(&page[tail_start - html_end.len()..tail_start], html_end);
    }

    #[tokio::test]
    async fn test_missing_appended_file_renders_rest() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("stops.html");

        let page = assemble_page(&closed_port_host(), &fetcher(), &missing).await;

        assert!(page.ends_with(b"</body>\n</html>\n\n\n"));
    }

    #[tokio::test]
    async fn test_host_without_dot() {
        let file = appended_file();
        let page = assemble_page("localhost", &fetcher(), file.path()).await;

        let text = String::from_utf8_lossy(&page);
        assert!(text.contains("<title>localhost</title>"));
        assert!(text.contains(r#"<a href="http:///projects/localhost/">"#));
        assert!(page.ends_with(APPENDED));
    }

    #[tokio::test]
    async fn test_stylesheet_ignores_request_host() {
        let file = appended_file();
        let host = closed_port_host().replacen("stops.", "evil.", 1);
        let page = assemble_page(&host, &fetcher(), file.path()).await;

        let text = String::from_utf8_lossy(&page);
        assert!(text.contains(
            r#"<link href="http://r-forge.r-project.org/themes/rforge/styles/estilo1.css""#
        ));
        assert_eq!(text.matches("estilo1.css").count(), 1);
        assert!(text.contains("<title>evil</title>"));
    }

    #[tokio::test]
    async fn test_fragment_cut_short_is_still_embedded() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request).await;
            stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n<h2>STOPS partial")
                .await
                .unwrap();
        });
        let file = appended_file();
        let host = format!("stops.{addr}");

        let page = assemble_page(&host, &fetcher(), file.path()).await;

        let domain = addr.to_string();
        let mut expected = template::render_head("stops").into_bytes();
        expected.extend_from_slice(b"<h2>STOPS partial");
        expected.extend_from_slice(template::render_content(&domain, "stops").as_bytes());
        expected.extend_from_slice(APPENDED);
        assert_eq!(page, expected);
    }
}
