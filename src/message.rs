//! HTTP message plumbing
//!
//! This module defines the parts shared by requests and responses: the
//! protocol version, the body handle and the capability traits that expose
//! headers and body uniformly on both message types.

use crate::headers::Headers;
use crate::{Error, Result};
use bytes::Bytes;
use std::fmt;
use std::io::Read;
use std::mem;

/// HTTP protocol version
///
/// Stored as the bare version number; the `HTTP/` prefix belongs to the
/// wire format and is added back by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    Http10,
    Http11,
}

impl Version {
    /// Parse a version from its wire form (`HTTP/1.0`, `HTTP/1.1`)
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "HTTP/1.0" => Ok(Version::Http10),
            "HTTP/1.1" => Ok(Version::Http11),
            _ => Err(Error::InvalidVersion(s.to_string())),
        }
    }

    /// Convert version to its bare number
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http10 => "1.0",
            Version::Http11 => "1.1",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::Http11
    }
}

/// Message body handle
///
/// Bodies are either buffered bytes or an opaque stream handed over by the
/// hosting layer. Streams are single-consumer: sending drains them, and
/// rewinding is the owner's business.
pub enum Body {
    /// No body
    Empty,
    /// Buffered bytes
    Buffer(Bytes),
    /// Stream read to EOF when the message is sent
    Stream(Box<dyn Read + Send>),
}

impl Body {
    /// Buffered view of the body, if there is one
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Body::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Check if there is no body at all
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::Empty
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => write!(f, "Empty"),
            Body::Buffer(bytes) => write!(f, "Buffer({} bytes)", bytes.len()),
            Body::Stream(_) => write!(f, "Stream(..)"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Buffer(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Buffer(Bytes::from(bytes))
    }
}

impl From<&'static [u8]> for Body {
    fn from(bytes: &'static [u8]) -> Self {
        Body::Buffer(Bytes::from_static(bytes))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Body::Buffer(Bytes::from_static(text.as_bytes()))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Buffer(Bytes::from(text))
    }
}

impl From<Box<dyn Read + Send>> for Body {
    fn from(reader: Box<dyn Read + Send>) -> Self {
        Body::Stream(reader)
    }
}

/// Shared core of an HTTP message: version, header bag, body
///
/// This is a plain parts bundle. Requests and responses each own one and
/// surface it through [`HasHeaders`] and [`HasBody`].
#[derive(Debug, Default)]
pub struct Message {
    pub version: Version,
    pub headers: Headers,
    pub body: Body,
}

/// Read and write access to a message's header bag
pub trait HasHeaders {
    /// Get the headers
    fn headers(&self) -> &Headers;

    /// Get mutable headers
    fn headers_mut(&mut self) -> &mut Headers;

    /// Get a single header value (case-insensitive)
    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name)
    }

    /// Set a header under its canonical name, replacing any existing value
    fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers_mut().set(name, value);
    }

    /// Set several headers at once, in iteration order
    fn set_headers<I, N, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        for (name, value) in entries {
            self.headers_mut().set(name, value);
        }
    }

    /// Remove a header (case-insensitive)
    ///
    /// Returns `true` if a header was present.
    fn remove_header(&mut self, name: &str) -> bool {
        self.headers_mut().remove(name)
    }
}

/// Read and write access to a message's body handle
pub trait HasBody {
    /// Get the body
    fn body(&self) -> &Body;

    /// Get the mutable body
    fn body_mut(&mut self) -> &mut Body;

    /// Replace the body wholesale; there is no append
    fn set_body(&mut self, body: impl Into<Body>) {
        *self.body_mut() = body.into();
    }

    /// Take the body out, leaving `Body::Empty` behind
    fn take_body(&mut self) -> Body {
        mem::take(self.body_mut())
    }
}
