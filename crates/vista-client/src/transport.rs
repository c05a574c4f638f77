//! Transport port: the injected capability that actually talks HTTP.
//!
//! The client never opens sockets itself. It hands a path, the session
//! headers, and an optional body to a [`Transport`] and gets back a
//! [`Response`] whose body it drains completely before decoding.

use std::fmt;
use std::io::Read;

use crate::error::TransportError;

/// Header carrying the CSRF token on every request once it is known.
pub const CSRF_TOKEN_HEADER: &str = "Vista-CSRF-Token";

/// Header carrying the client's current workspace id.
pub const WORKSPACE_ID_HEADER: &str = "Vista-Workspace-Id";

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A single request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A response with a readable body stream.
///
/// Whoever receives it is responsible for reading the body to the end;
/// dropping the response closes the stream.
pub struct Response {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl Response {
    pub fn new(status: u16, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }

    /// A response backed by an in-memory body.
    pub fn from_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, std::io::Cursor::new(body.into()))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Drain the body and close the stream.
    pub fn into_bytes(mut self) -> Result<Vec<u8>, TransportError> {
        let mut bytes = Vec::new();
        self.body.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Executes GET and POST requests against the workspace server.
///
/// Implementations own connection handling, TLS, cookies, and redirects.
/// `path` is always server-relative (e.g. `/workspace/diff`).
pub trait Transport: Send + Sync {
    fn get(&self, path: &str, headers: &[Header]) -> Result<Response, TransportError>;

    fn post(
        &self,
        path: &str,
        headers: &[Header],
        body: Option<Vec<u8>>,
    ) -> Result<Response, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, path: &str, headers: &[Header]) -> Result<Response, TransportError> {
        (**self).get(path, headers)
    }

    fn post(
        &self,
        path: &str,
        headers: &[Header],
        body: Option<Vec<u8>>,
    ) -> Result<Response, TransportError> {
        (**self).post(path, headers, body)
    }
}
