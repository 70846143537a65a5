//! In-memory view of one HTTP exchange
//!
//! The Fetch Executor reads every response fully before archiving it, so the
//! same bytes feed the archiver, the redirect logic and the document parser.
//! Bodies stay content-encoded; only the parser sees them decoded.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_ENCODING, CONTENT_TYPE, LOCATION};
use reqwest::{Method, Response, StatusCode, Version};
use std::io::{self, Read};
use url::Url;

/// A cookie set by a page response, replayed on its asset requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

/// A fully read HTTP response together with the request that produced it
#[derive(Debug, Clone)]
pub struct CapturedResponse {
    pub method: Method,
    /// URL of the request issued for this hop
    pub url: Url,
    pub request_headers: HeaderMap,
    pub status: StatusCode,
    pub version: Version,
    pub headers: HeaderMap,
    pub cookies: Vec<Cookie>,
    pub body: Vec<u8>,
}

impl CapturedResponse {
    /// Reads the response body to completion
    pub async fn read(
        method: Method,
        url: Url,
        request_headers: HeaderMap,
        response: Response,
    ) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let cookies = response
            .cookies()
            .map(|c| Cookie {
                name: c.name().to_string(),
                value: c.value().to_string(),
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Self {
            method,
            url,
            request_headers,
            status,
            version,
            headers,
            cookies,
            body,
        })
    }

    /// Returns a header value if it is present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the Content-Type header, or an empty string
    pub fn content_type(&self) -> &str {
        self.header(CONTENT_TYPE.as_str()).unwrap_or("")
    }

    pub fn location(&self) -> Option<&str> {
        self.header(LOCATION.as_str())
    }

    pub fn content_encoding(&self) -> Option<&str> {
        self.header(CONTENT_ENCODING.as_str())
    }

    /// True for textual payloads that may be parsed for links
    pub fn is_text(&self) -> bool {
        self.content_type().contains("text/")
    }
}

/// Returns true for the status codes the Fetch Executor follows
pub fn is_redirection(status: StatusCode) -> bool {
    matches!(status.as_u16(), 300 | 301 | 302 | 303 | 307 | 308)
}

/// Undoes the codings listed in a Content-Encoding header
///
/// Codings are removed last-applied first. `identity` and empty entries are
/// skipped; any coding other than gzip, deflate or br is an error.
pub fn decode_body(body: Vec<u8>, content_encoding: Option<&str>) -> io::Result<Vec<u8>> {
    let Some(content_encoding) = content_encoding else {
        return Ok(body);
    };

    let mut body = body;
    for coding in content_encoding.rsplit(',').map(str::trim) {
        body = match coding.to_ascii_lowercase().as_str() {
            "" | "identity" => body,
            "gzip" | "x-gzip" => read_all(flate2::read::GzDecoder::new(body.as_slice()))?,
            "deflate" => read_all(flate2::read::ZlibDecoder::new(body.as_slice()))?,
            "br" => read_all(brotli::Decompressor::new(body.as_slice(), 4096))?,
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unsupported content coding: {}", other),
                ))
            }
        };
    }

    Ok(body)
}

fn read_all(mut reader: impl Read) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}

/// Builds a `Cookie` request header from a list of cookies
pub fn cookie_header(cookies: &[Cookie]) -> Option<HeaderValue> {
    if cookies.is_empty() {
        return None;
    }

    let value = cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ");

    HeaderValue::from_str(&value).ok()
}
