//! Project title fragment fetcher
//!
//! One plain HTTP GET per page render. Redirects are followed up to a
//! configured limit; 4xx/5xx answers count as failures, any other final
//! answer contributes its body. Once the body has started, whatever arrived
//! before a read error or the timeout is kept.

use std::future::Future;
use std::time::Duration;

use http_body_util::{BodyExt, Empty};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, LOCATION, USER_AGENT};
use hyper::http::uri::{PathAndQuery, Scheme};
use hyper::{Request, StatusCode, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::time::Instant;

use super::error::FetchError;
use crate::config::PageConfig;
use crate::logger;

/// Fragment body as far as it was read
#[derive(Debug)]
pub struct Fragment {
    pub contents: Bytes,
    /// Why the body stopped before its end, if it did
    pub interrupted: Option<FetchError>,
}

/// Outbound client for `http://{domain}{fragment_path}?group_name={group_name}`
pub struct FragmentFetcher {
    client: Client<HttpConnector, Empty<Bytes>>,
    fragment_path: String,
    max_redirects: usize,
    timeout: Option<Duration>,
    user_agent: Option<HeaderValue>,
}

impl FragmentFetcher {
    pub fn new(config: &PageConfig) -> Self {
        let user_agent = config.user_agent.as_deref().and_then(|ua| {
            HeaderValue::from_str(ua)
                .map_err(|e| logger::log_warning(&format!("Ignoring user agent '{ua}': {e}")))
                .ok()
        });

        // Scheme is checked per hop in `follow`, so https targets fail with
        // `UnsupportedScheme` instead of a connector error.
        let mut connector = HttpConnector::new();
        connector.enforce_http(false);

        Self {
            client: Client::builder(TokioExecutor::new()).build(connector),
            fragment_path: config.fragment_path.clone(),
            max_redirects: config.max_redirects,
            timeout: config.fetch_timeout(),
            user_agent,
        }
    }

    pub fn fragment_url(&self, domain: &str, group_name: &str) -> String {
        format!(
            "http://{domain}{}?group_name={group_name}",
            self.fragment_path
        )
    }

    /// Fetch the fragment for a project.
    ///
    /// `Err` means nothing usable arrived. After an accepted status the body
    /// is returned even if it ends early; the reason is in `interrupted`.
    pub async fn fetch(&self, domain: &str, group_name: &str) -> Result<Fragment, FetchError> {
        let url = self.fragment_url(domain, group_name);
        let uri = url
            .parse::<Uri>()
            .map_err(|source| FetchError::InvalidUrl { url, source })?;

        let deadline = self.timeout.map(|limit| Instant::now() + limit);
        let mut body = self.within(deadline, self.follow(uri)).await?;

        let mut contents = Vec::new();
        loop {
            let next = self
                .within(deadline, async {
                    body.frame().await.transpose().map_err(FetchError::from)
                })
                .await;
            match next {
                Ok(Some(frame)) => {
                    if let Ok(chunk) = frame.into_data() {
                        contents.extend_from_slice(&chunk);
                    }
                }
                Ok(None) => {
                    return Ok(Fragment {
                        contents: Bytes::from(contents),
                        interrupted: None,
                    })
                }
                Err(e) => {
                    return Ok(Fragment {
                        contents: Bytes::from(contents),
                        interrupted: Some(e),
                    })
                }
            }
        }
    }

    /// Run `step` against the shared fetch deadline, if any
    async fn within<T>(
        &self,
        deadline: Option<Instant>,
        step: impl Future<Output = Result<T, FetchError>>,
    ) -> Result<T, FetchError> {
        match (deadline, self.timeout) {
            (Some(deadline), Some(limit)) => tokio::time::timeout_at(deadline, step)
                .await
                .map_err(|_| FetchError::Timeout(limit))?,
            _ => step.await,
        }
    }

    /// Send the request, following redirects, until a final status is accepted
    async fn follow(&self, mut uri: Uri) -> Result<Incoming, FetchError> {
        let mut redirects = 0;
        loop {
            if uri.scheme() != Some(&Scheme::HTTP) {
                return Err(FetchError::UnsupportedScheme(uri.to_string()));
            }

            let response = self.client.request(self.build_request(&uri)?).await?;
            let status = response.status();

            if is_followed_redirect(status) {
                if let Some(location) = response.headers().get(LOCATION) {
                    if redirects == self.max_redirects {
                        return Err(FetchError::TooManyRedirects(self.max_redirects));
                    }
                    redirects += 1;
                    uri = resolve_location(&uri, location)?;
                    logger::log_debug(&format!("[Fetch] Following redirect to {uri}"));
                    continue;
                }
            }

            if status.is_client_error() || status.is_server_error() {
                return Err(FetchError::Status(status));
            }

            return Ok(response.into_body());
        }
    }

    fn build_request(&self, uri: &Uri) -> Result<Request<Empty<Bytes>>, FetchError> {
        let mut builder = Request::get(uri.clone());
        if let Some(ref ua) = self.user_agent {
            builder = builder.header(USER_AGENT, ua.clone());
        }
        Ok(builder.body(Empty::new())?)
    }
}

const fn is_followed_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

/// Resolve a `Location` header against the URL that produced it
fn resolve_location(base: &Uri, location: &HeaderValue) -> Result<Uri, FetchError> {
    let location = location
        .to_str()
        .map_err(|_| FetchError::InvalidRedirect("non-ASCII location".to_string()))?;
    if location.contains("://") {
        return location
            .parse::<Uri>()
            .map_err(|e| FetchError::InvalidRedirect(format!("{location}: {e}")));
    }

    let path_and_query = if location.starts_with('/') {
        location.to_string()
    } else {
        let base_path = base.path();
        let dir_end = base_path.rfind('/').map_or(0, |i| i + 1);
        format!("{}{location}", &base_path[..dir_end])
    };

    let mut parts = base.clone().into_parts();
    parts.path_and_query = Some(
        path_and_query
            .parse::<PathAndQuery>()
            .map_err(|e| FetchError::InvalidRedirect(format!("{location}: {e}")))?,
    );
    Uri::from_parts(parts).map_err(|e| FetchError::InvalidRedirect(format!("{location}: {e}")))
}
