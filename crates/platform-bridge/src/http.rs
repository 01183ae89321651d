//! Blocking one-shot HTTP over the bridge.
//!
//! The bridge performs the whole request and hands back the status,
//! the raw response header block, and a body reader. This module adds
//! the caller-facing conveniences: scheme defaulting, header parsing,
//! and chunked body reads. Dropping the stream releases the underlying
//! connection; nothing is acknowledged to the server.

use std::io::{self, Read};

use tracing::debug;

use crate::{PlatformBridge, RawHttpResponse};

/// Upper bound on a single body read handed to the bridge stream.
const READ_CHUNK: usize = 8192;

/// One HTTP request, headers as a raw `\r\n`-separated block.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub url: String,
    pub is_post: bool,
    pub headers: String,
    pub post_data: Vec<u8>,
    pub timeout_ms: i32,
    pub num_redirects_to_follow: i32,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            num_redirects_to_follow: 5,
            ..Self::default()
        }
    }
}

/// Parsed response metadata: status plus headers as an ordered list,
/// duplicate keys merged with `,`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpResponse {
    pub status_code: i32,
    pub headers: Vec<(String, String)>,
}

impl HttpResponse {
    /// First (merged) value for a header, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A connected response stream.
pub struct HttpStream {
    response: HttpResponse,
    body: Box<dyn Read + Send>,
    position: u64,
}

impl HttpStream {
    /// Issue the request through the bridge, blocking until the
    /// response metadata is available. A URL without a scheme gets
    /// `http://` prepended. `None` when the bridge cannot connect.
    pub fn connect(bridge: &dyn PlatformBridge, request: &HttpRequest) -> Option<Self> {
        let mut request = request.clone();
        if !request.url.contains("://") {
            request.url = format!("http://{}", request.url);
        }

        debug!("http {} {}", if request.is_post { "POST" } else { "GET" }, request.url);

        let raw = bridge.create_http_stream(&request)?;
        Some(Self {
            response: HttpResponse {
                status_code: raw.status_code,
                headers: parse_header_block(&raw.header_text),
            },
            body: raw.body,
            position: 0,
        })
    }

    pub fn status_code(&self) -> i32 {
        self.response.status_code
    }

    pub fn response(&self) -> &HttpResponse {
        &self.response
    }

    /// Bytes of body consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl Read for HttpStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = buf.len().min(READ_CHUNK);
        let read = self.body.read(&mut buf[..want])?;
        self.position += read as u64;
        Ok(read)
    }
}

/// Parse a raw response header block into ordered key/value pairs,
/// merging repeated keys with `,`.
fn parse_header_block(text: &str) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = Vec::new();

    for line in text.lines() {
        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };
        match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some((_, existing)) => {
                existing.push(',');
                existing.push_str(value);
            }
            None => headers.push((key.to_string(), value.to_string())),
        }
    }

    headers
}
