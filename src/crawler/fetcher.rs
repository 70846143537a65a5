//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the direct and proxied HTTP clients
//! - Choosing a client per request from the proxy bypass list
//! - Archiving every exchange
//! - Following redirects under the configured budget

use crate::archive::TempArtifact;
use crate::config::Config;
use crate::crawler::context::CrawlContext;
use crate::crawler::item::CaptureItem;
use crate::crawler::response::{is_redirection, CapturedResponse};
use crate::url::bypasses_proxy;
use crate::{CaptureError, ConfigError};
use reqwest::header::{HeaderValue, REFERER, USER_AGENT};
use reqwest::{redirect::Policy, Client, Method, Proxy, Request};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Result of a completed fetch chain
#[derive(Debug)]
pub struct Fetched {
    /// The last response of the chain
    pub response: CapturedResponse,
    /// Temporary copy of the last response; empty when archival is disabled
    pub artifact: TempArtifact,
    /// Number of redirects followed
    pub redirects: u32,
}

/// Direct and proxied HTTP clients
pub struct HttpClients {
    direct: Client,
    proxied: Option<Client>,
    bypass: Vec<String>,
}

impl HttpClients {
    pub fn new(direct: Client, proxied: Option<Client>, bypass: Vec<String>) -> Self {
        Self {
            direct,
            proxied,
            bypass,
        }
    }

    /// Builds both clients from the configuration
    ///
    /// The proxied client only exists when a proxy is configured.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let user_agent = config.user_agent.header_value();
        let timeout = Duration::from_secs(config.crawler.http_timeout);

        let direct = build_http_client(&user_agent, timeout, None)?;
        let (proxied, bypass) = match &config.proxy {
            Some(proxy) => (
                Some(build_http_client(&user_agent, timeout, Some(&proxy.url))?),
                proxy.bypass.clone(),
            ),
            None => (None, Vec::new()),
        };

        Ok(Self::new(direct, proxied, bypass))
    }

    pub fn is_proxied(&self) -> bool {
        self.proxied.is_some()
    }

    /// Picks the client for a request URL
    ///
    /// The direct client is used when no proxy is configured or when the
    /// host (with its port) is on the bypass list.
    pub fn select(&self, url: &Url) -> &Client {
        match &self.proxied {
            Some(proxied) if !bypasses_proxy(&self.bypass, url) => proxied,
            _ => &self.direct,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are never followed by the client itself: the Fetch Executor
/// follows them so that every hop is archived. Bodies are never decoded
/// either, so the archive holds the bytes and headers as received.
///
/// # Arguments
///
/// * `user_agent` - Default User-Agent header value
/// * `timeout` - Whole-request timeout
/// * `proxy` - Proxy URL, or `None` for a direct connection
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use sumi_capture::crawler::build_http_client;
///
/// let client = build_http_client("SumiCapture/1.0", Duration::from_secs(30), None).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &str,
    timeout: Duration,
    proxy: Option<&str>,
) -> Result<Client, reqwest::Error> {
    let builder = Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::none());

    let builder = match proxy {
        Some(proxy) => builder.proxy(Proxy::all(proxy)?),
        None => builder.no_proxy(),
    };

    builder.build()
}

/// Builds a GET request for a URL
pub fn build_get(url: &Url) -> Request {
    Request::new(Method::GET, url.clone())
}

/// Sets a header from a string value
pub(crate) fn set_header(
    request: &mut Request,
    name: reqwest::header::HeaderName,
    value: &str,
) -> Result<(), CaptureError> {
    let value = HeaderValue::from_str(value).map_err(|e| CaptureError::RequestBuild {
        url: request.url().to_string(),
        message: format!("invalid {} header: {}", name, e),
    })?;
    request.headers_mut().insert(name, value);
    Ok(())
}

impl CrawlContext {
    /// Executes a GET request, archives it and follows redirects
    ///
    /// Redirects are followed while the status is a redirection, the target
    /// differs from the current URL and the item's redirect count is below
    /// the budget. Exhausting the budget is not an error: the last redirect
    /// response is returned as the final one.
    ///
    /// The temporary copy of every superseded hop is deleted before the next
    /// hop starts. On error, the copy of the failed hop is dropped (and so
    /// deleted) before the error is returned.
    pub async fn execute_get(
        &self,
        item: Arc<CaptureItem>,
        request: Request,
    ) -> Result<Fetched, CaptureError> {
        let mut item = item;
        let mut request = request;
        let mut redirects = 0;

        loop {
            let url = request.url().clone();
            let method = request.method().clone();
            let request_headers = request.headers().clone();

            let client = self.clients.select(&url);
            let response = client
                .execute(request)
                .await
                .map_err(|source| CaptureError::Transport {
                    url: url.to_string(),
                    source,
                })?;
            let response = CapturedResponse::read(method, url.clone(), request_headers, response)
                .await
                .map_err(|source| CaptureError::Transport {
                    url: url.to_string(),
                    source,
                })?;

            let artifact = match &self.archiver {
                Some(archiver) => {
                    let artifact = archiver.archive(&response).await?;
                    self.stats.crawled.incr();
                    artifact
                }
                None => TempArtifact::empty(),
            };

            if !is_redirection(response.status) {
                return Ok(Fetched {
                    response,
                    artifact,
                    redirects,
                });
            }

            let Some(location) = response.location().map(str::to_string) else {
                tracing::debug!(status = response.status.as_u16(), "Redirect without location: {}", url);
                return Ok(Fetched {
                    response,
                    artifact,
                    redirects,
                });
            };

            if location == url.as_str() || item.redirect() >= self.settings.max_redirect {
                tracing::debug!(
                    redirect = item.redirect(),
                    max_redirect = self.settings.max_redirect,
                    "Not following redirect from {} to {}",
                    url,
                    location
                );
                return Ok(Fetched {
                    response,
                    artifact,
                    redirects,
                });
            }

            let target = url
                .join(&location)
                .map_err(|source| CaptureError::RedirectLocation {
                    location: location.clone(),
                    source,
                })?;

            if target == url {
                return Ok(Fetched {
                    response,
                    artifact,
                    redirects,
                });
            }

            let next_item = Arc::new(item.redirected(target));
            let next_request = self.redirect_request(&next_item)?;

            artifact.delete();

            tracing::debug!(
                status = response.status.as_u16(),
                redirect = next_item.redirect(),
                "Following redirect from {} to {}",
                url,
                next_item.url()
            );

            item = next_item;
            request = next_request;
            redirects += 1;
        }
    }

    /// Builds the request for the next hop of a redirect chain
    fn redirect_request(&self, item: &CaptureItem) -> Result<Request, CaptureError> {
        let mut request = build_get(item.url());
        set_header(&mut request, USER_AGENT, &self.settings.user_agent)?;
        if let Some(parent_url) = item.parent_url() {
            set_header(&mut request, REFERER, parent_url.as_str())?;
        }
        Ok(request)
    }
}
