//! Request client core for a session-authenticated JSON API.
//!
//! # Overview
//! Wraps a blocking HTTP transport with the handling every call needs:
//! token attachment, transport-status interception (401/403/404), and
//! business-status classification of the `{ "status": .., "data": .. }`
//! envelope, including the single login prompt for 401/402.
//!
//! # Design
//! - The environment arrives as a `Host` (transport, storage, notifier,
//!   navigator, dialogs); the crate holds no global state.
//! - `RequestClient::get` returns `Result<Envelope, RequestError>`;
//!   `RequestError::code()` yields the numeric code (`-1` or a status).
//! - `Storage` keeps values JSON-encoded in a session-scoped string store.

pub mod client;
pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod modal;
pub mod services;
pub mod storage;
pub mod transport;
pub mod types;

pub use client::RequestClient;
pub use config::ClientConfig;
pub use error::{ConfigError, RequestError, StorageError, SETUP_FAILURE_CODE};
pub use host::{Dialogs, Host, LoginPrompt, Navigator, Notice, Notifier, PromptReason};
pub use http::{HttpRequest, HttpResponse, TransportError, TransportErrorKind};
pub use services::UserService;
pub use storage::{MemorySessionStore, SessionStore, Storage};
pub use transport::{Transport, UreqTransport};
pub use types::{Envelope, RequestOptions};
