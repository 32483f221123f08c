//! HTTP request/response model.
//!
//! Requests and responses are plain data. `TodoClient` builds requests and
//! parses responses; whoever owns the network (the browser app, or `ureq` in
//! the integration tests) executes the round-trip in between and reports what
//! happened as an `HttpResponse` or a `TransportFailure`.

use std::fmt;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to execute against the API
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Attach a JSON body and its content type.
    pub fn with_json(mut self, body: String) -> Self {
        self.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        self.body = Some(body);
        self
    }

    /// Attach `Authorization: Bearer <token>` when a non-empty token is present.
    pub fn with_bearer(mut self, token: Option<&str>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What came back from the server
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The session is gone: drop the stored token and send the user to login.
    pub fn requires_login(&self) -> bool {
        self.status == 401
    }

    /// Pass 2xx through, translate everything else into `ApiError::Transport`.
    pub fn error_for_status(self) -> Result<HttpResponse, ApiError> {
        if self.is_success() {
            return Ok(self);
        }
        if self.status >= 500 {
            log::error!("Server error: {} {}", self.status, self.body);
        }
        Err(ApiError::from_response(self.status, &self.body))
    }
}

/// The executor could not produce a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// Sent, but nothing came back (offline, CORS, connection reset)
    NoResponse(String),
    TimedOut,
    /// The request could not be built or sent at all
    Other(String),
}

impl From<TransportFailure> for ApiError {
    fn from(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::NoResponse(reason) => ApiError::Network { reason },
            TransportFailure::TimedOut => ApiError::Network {
                reason: "request timed out".to_string(),
            },
            TransportFailure::Other(message) => ApiError::Unexpected(message),
        }
    }
}

/// Fold an executor outcome into a checked response.
pub fn settle(outcome: Result<HttpResponse, TransportFailure>) -> Result<HttpResponse, ApiError> {
    outcome.map_err(ApiError::from)?.error_for_status()
}
