//! httpenv - HTTP messages for server-gateway environments
//!
//! This crate models HTTP requests and responses independently of the web
//! server hosting them. The hosting layer hands its CGI/SAPI-style variable
//! set to [`Request::from_server_env`], which normalizes protocol version,
//! method, URL and headers into one structured request. Application code
//! fills in a [`Response`] and pushes it out through a [`Transport`] sink.
//!
//! # Architecture
//!
//! Requests and responses share their message plumbing through two small
//! capability traits instead of a base-type hierarchy:
//!
//! - `HasHeaders` exposes the ordered, case-insensitive header bag
//! - `HasBody` exposes the single-consumer body handle
//! - `Transport` decouples `Response::send` from the output sink, so the
//!   same response can be written to a socket, a file or a test buffer
//!
//! # Examples
//!
//! ```
//! use httpenv::{HasBody, HasHeaders, Request, Response, WireTransport};
//!
//! // Normalize a server environment into a request.
//! let request = Request::from_server_env([
//!     ("REQUEST_METHOD", "GET"),
//!     ("REQUEST_URI", "/files/report.pdf"),
//!     ("HTTP_HOST", "example.org"),
//! ]);
//! assert_eq!(request.method(), Some("GET"));
//! assert_eq!(request.header("Host"), Some("example.org"));
//!
//! // Build a response and write it to any io::Write sink.
//! let mut response = Response::new();
//! response.set_header("Content-Type", "text/plain");
//! response.set_body("hello");
//!
//! let mut transport = WireTransport::new(Vec::new());
//! response.send(&mut transport).unwrap();
//! assert!(transport.into_inner().starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

pub mod headers;
pub mod message;
pub mod request;
pub mod response;
pub mod status;
pub mod transport;

pub use headers::Headers;
pub use message::{Body, HasBody, HasHeaders, Message, Version};
pub use request::{Request, RequestBuilder};
pub use response::{Response, ResponseBuilder};
pub use status::{IntoStatus, Status};
pub use transport::{Transport, WireTransport};

/// Result type for message operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message layer errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Requested URI {url} is not within the base path {base_path}")]
    OutOfBasePath { url: String, base_path: String },

    #[error("Invalid status code {code}: must be in the range 100..=999")]
    InvalidStatusCode { code: u64 },

    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),
}

/// Base path a request is resolved against unless told otherwise
pub const DEFAULT_BASE_PATH: &str = "/";

/// CRLF line ending
pub const CRLF: &str = "\r\n";
