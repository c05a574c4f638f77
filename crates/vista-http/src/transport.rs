// transport.rs — HttpTransport: the Transport trait over reqwest's blocking client.
//
// The client keeps a cookie jar so the server-side session established by
// login survives between requests. Statuses are passed through unchanged;
// deciding what a non-2xx body means is the workspace client's job.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;

use vista_client::{Header, Response, Transport, TransportError};

use crate::config::HttpConfig;

/// Blocking HTTP transport bound to one server.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let invalid = |message: &str| TransportError::InvalidBaseUrl {
            url: config.base_url.clone(),
            message: message.to_string(),
        };
        let mut base_url = Url::parse(&config.base_url).map_err(|e| invalid(&e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL"));
        }
        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed"));
        }
        // Relative joins replace the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| TransportError::Request {
                path: String::new(),
                message: format!("could not build HTTP client: {}", e),
            })?;

        tracing::debug!("HTTP transport ready for {}", base_url);
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for a server-relative path. The base URL's own path is kept
    /// as a prefix (e.g. a `/vista` context root).
    pub fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::Request {
                path: path.to_string(),
                message: format!("invalid request path: {}", e),
            })
    }

    fn send(
        &self,
        path: &str,
        mut request: RequestBuilder,
        headers: &[Header],
    ) -> Result<Response, TransportError> {
        for header in headers {
            request = request.header(header.name.as_str(), header.value.as_str());
        }
        let response = request.send().map_err(|e| TransportError::Request {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let status = response.status().as_u16();
        tracing::debug!("{} -> {}", path, status);
        Ok(Response::new(status, response))
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str, headers: &[Header]) -> Result<Response, TransportError> {
        self.send(path, self.client.get(self.url_for(path)?), headers)
    }

    fn post(
        &self,
        path: &str,
        headers: &[Header],
        body: Option<Vec<u8>>,
    ) -> Result<Response, TransportError> {
        let mut request = self.client.post(self.url_for(path)?);
        if let Some(body) = body {
            request = request.body(body);
        }
        self.send(path, request, headers)
    }
}
