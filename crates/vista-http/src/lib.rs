//! # vista-http
//!
//! Blocking HTTP [`Transport`](vista_client::Transport) for the Vista
//! workspace client, built on `reqwest`.
//!
//! ```no_run
//! use vista_client::WorkspaceClient;
//! use vista_http::{HttpConfig, HttpTransport};
//!
//! let config = HttpConfig::load_or_default(std::path::Path::new("vista.toml"));
//! let transport = HttpTransport::new(&config)?;
//! let mut client = WorkspaceClient::new(transport);
//! client.log_in_to_current_workspace()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod transport;

pub use config::{ConfigError, HttpConfig};
pub use transport::HttpTransport;
