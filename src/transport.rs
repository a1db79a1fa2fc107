//! Transport sink abstraction
//!
//! Sending a response is decoupled from its destination through a small
//! operations trait, so the same send path serves sockets, files and
//! in-memory test buffers.

use crate::message::Version;
use crate::status::Status;
use crate::{Result, CRLF};
use std::io::Write;

/// Operations a response sink must support
///
/// `Response::send` issues exactly these calls, in order: one status line,
/// one call per header, then raw body bytes until done. The body phase is
/// always entered with at least one `write_bytes` call, even when the body
/// is empty, so sinks can finish their framing.
pub trait Transport {
    /// Write the status line
    fn write_status_line(&mut self, version: Version, status: &Status) -> Result<()>;

    /// Write a single header line
    fn write_header(&mut self, name: &str, value: &str) -> Result<()>;

    /// Write raw body bytes
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;
}

/// HTTP/1.x wire framing over any `io::Write` sink
///
/// Emits `HTTP/<version> <code> <reason>`, the header block and the blank
/// separator line, then passes body bytes through untouched.
#[derive(Debug)]
pub struct WireTransport<W: Write> {
    writer: W,
    in_body: bool,
}

impl<W: Write> WireTransport<W> {
    /// Create a transport writing to `writer`
    pub fn new(writer: W) -> Self {
        WireTransport {
            writer,
            in_body: false,
        }
    }

    /// Get a reference to the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a mutable reference to the underlying writer
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume the transport and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for WireTransport<W> {
    fn write_status_line(&mut self, version: Version, status: &Status) -> Result<()> {
        write!(self.writer, "HTTP/{} {}{}", version, status, CRLF)?;
        Ok(())
    }

    fn write_header(&mut self, name: &str, value: &str) -> Result<()> {
        write!(self.writer, "{}: {}{}", name, value, CRLF)?;
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        // The first body write closes the header block.
        if !self.in_body {
            self.writer.write_all(CRLF.as_bytes())?;
            self.in_body = true;
        }
        self.writer.write_all(bytes)?;
        Ok(())
    }
}
