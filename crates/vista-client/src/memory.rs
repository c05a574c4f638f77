// memory.rs — In-memory Transport with scripted responses.
//
// Used by this crate's tests and by callers that want to exercise code built
// on WorkspaceClient without a server. Responses are queued per
// (method, path) and served in FIFO order; every request is recorded so tests
// can assert on exactly what went over the wire.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::error::TransportError;
use crate::transport::{Header, Response, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// A request as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<Header>,
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// The body as UTF-8 text (lossy), or an empty string.
    pub fn body_text(&self) -> String {
        self.body
            .as_deref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    }
}

enum Scripted {
    Reply { status: u16, body: Vec<u8> },
    Fail(String),
}

#[derive(Default)]
struct State {
    scripted: HashMap<(Method, String), VecDeque<Scripted>>,
    requests: Vec<RecordedRequest>,
}

/// Scripted transport for tests and offline use.
#[derive(Default)]
pub struct MemoryTransport {
    state: Mutex<State>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with a JSON body for `GET path`.
    pub fn on_get(&self, path: &str, body: impl Into<String>) -> &Self {
        self.push(Method::Get, path, Scripted::Reply {
            status: 200,
            body: body.into().into_bytes(),
        })
    }

    /// Queue a 200 response with a JSON body for `POST path`.
    pub fn on_post(&self, path: &str, body: impl Into<String>) -> &Self {
        self.push(Method::Post, path, Scripted::Reply {
            status: 200,
            body: body.into().into_bytes(),
        })
    }

    /// Queue a response with an arbitrary status and body.
    pub fn on_status(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: impl Into<Vec<u8>>,
    ) -> &Self {
        self.push(method, path, Scripted::Reply {
            status,
            body: body.into(),
        })
    }

    /// Queue a transport failure for the next request to `path`.
    pub fn fail(&self, method: Method, path: &str, message: impl Into<String>) -> &Self {
        self.push(method, path, Scripted::Fail(message.into()))
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests received for one path, in order.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) -> &Self {
        self.lock()
            .scripted
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
        self
    }

    // Poisoned state is still consistent: every mutation is a single push.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn respond(&self, request: RecordedRequest) -> Result<Response, TransportError> {
        let mut state = self.lock();
        let key = (request.method, request.path.clone());
        state.requests.push(request);
        match state.scripted.get_mut(&key).and_then(VecDeque::pop_front) {
            Some(Scripted::Reply { status, body }) => Ok(Response::from_bytes(status, body)),
            Some(Scripted::Fail(message)) => Err(TransportError::Request {
                path: key.1,
                message,
            }),
            None => {
                tracing::warn!("no scripted response for {:?} {}, answering 404", key.0, key.1);
                Ok(Response::from_bytes(404, Vec::new()))
            }
        }
    }
}

impl Transport for MemoryTransport {
    fn get(&self, path: &str, headers: &[Header]) -> Result<Response, TransportError> {
        self.respond(RecordedRequest {
            method: Method::Get,
            path: path.to_string(),
            headers: headers.to_vec(),
            body: None,
        })
    }

    fn post(
        &self,
        path: &str,
        headers: &[Header],
        body: Option<Vec<u8>>,
    ) -> Result<Response, TransportError> {
        self.respond(RecordedRequest {
            method: Method::Post,
            path: path.to_string(),
            headers: headers.to_vec(),
            body,
        })
    }
}
