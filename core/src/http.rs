//! HTTP transport seam.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and interprets `HttpResponse` values; the
//! actual round trip is performed by a `Transport` implementation supplied by
//! the caller (a real HTTP client in production, a canned mock in tests). This
//! keeps the core deterministic and lets tests count or fail network calls
//! precisely.

use thiserror::Error;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// `status_text` carries the reason phrase ("Unprocessable Content", ...) so
/// error reporting can fall back to it when the body has no usable message.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No HTTP response was received: DNS failure, refused connection, broken
/// pipe. A 4xx/5xx status is *not* a transport error; implementations must
/// return those as an `HttpResponse` so the client can interpret them.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Executes one HTTP round trip.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
