//! HTTP response modeling
//!
//! A response collects status, headers and body, then pushes itself out
//! through a [`Transport`] sink in wire order: status line, headers in
//! insertion order, then raw body bytes.

use crate::headers::Headers;
use crate::message::{Body, HasBody, HasHeaders, Message, Version};
use crate::status::{IntoStatus, Status};
use crate::transport::Transport;
use crate::Result;
use std::io::Read;
use tracing::trace;

/// HTTP response
///
/// Fresh responses start out as `200 OK` on HTTP/1.1.
#[derive(Debug)]
pub struct Response {
    message: Message,
    status: Status,
}

impl Response {
    /// Create a new response with status `200 OK`
    pub fn new() -> Self {
        Response {
            message: Message::default(),
            status: Status::default(),
        }
    }

    /// Create a builder for constructing responses
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }

    /// Get the status
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Set the status
    ///
    /// Accepts a [`Status`], a bare code (`404`) or a full string
    /// (`"404 Can't find it"`). A custom reason phrase survives; a bare
    /// code gets the standard phrase. The current status is kept when the
    /// new one is rejected.
    pub fn set_status(&mut self, status: impl IntoStatus) -> Result<()> {
        self.status = status.into_status()?;
        Ok(())
    }

    /// Get the full status line, `<code> <reason>`
    pub fn status_line(&self) -> String {
        self.status.to_string()
    }

    /// Get the HTTP version
    pub fn http_version(&self) -> Version {
        self.message.version
    }

    /// Set the HTTP version
    pub fn set_http_version(&mut self, version: Version) {
        self.message.version = version;
    }

    /// Write the response to `transport`
    ///
    /// Emits the status line, every header in insertion order, then the
    /// body bytes untouched. A stream body is drained by this; a buffered
    /// body is left in place, so the response can be sent again.
    pub fn send<T: Transport>(&mut self, transport: &mut T) -> Result<()> {
        trace!(
            status = %self.status,
            header_count = self.message.headers.len(),
            "sending response"
        );

        transport.write_status_line(self.message.version, &self.status)?;
        for (name, value) in self.message.headers.iter() {
            transport.write_header(name, value)?;
        }

        match &mut self.message.body {
            Body::Empty => transport.write_bytes(&[])?,
            Body::Buffer(bytes) => transport.write_bytes(bytes.as_ref())?,
            Body::Stream(reader) => {
                let mut chunk = [0u8; 8 * 1024];
                let mut wrote_any = false;
                loop {
                    let n = reader.read(&mut chunk)?;
                    if n == 0 {
                        break;
                    }
                    transport.write_bytes(&chunk[..n])?;
                    wrote_any = true;
                }
                // The body phase must be entered even when the stream
                // turned out empty.
                if !wrote_any {
                    transport.write_bytes(&[])?;
                }
            }
        }

        Ok(())
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl HasHeaders for Response {
    fn headers(&self) -> &Headers {
        &self.message.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.message.headers
    }
}

impl HasBody for Response {
    fn body(&self) -> &Body {
        &self.message.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.message.body
    }
}

/// Builder for HTTP responses
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    version: Option<Version>,
    status: Option<Status>,
    headers: Headers,
    body: Body,
}

impl ResponseBuilder {
    /// Set the HTTP version
    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the status
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Set the body
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// Build the response, defaulting to `200 OK`
    pub fn build(self) -> Response {
        Response {
            message: Message {
                version: self.version.unwrap_or_default(),
                headers: self.headers,
                body: self.body,
            },
            status: self.status.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::WireTransport;
    use std::io::Cursor;

    #[test]
    fn test_new_is_200_ok() {
        let response = Response::new();
        assert_eq!(response.status().code(), 200);
        assert_eq!(response.status_line(), "200 OK");
        assert_eq!(response.http_version(), Version::Http11);
    }

    #[test]
    fn test_set_status_code() {
        let mut response = Response::new();
        response.set_status(404).unwrap();
        assert_eq!(response.status_line(), "404 Not Found");
    }

    #[test]
    fn test_set_status_string_with_reason() {
        let mut response = Response::new();
        response.set_status("403 You do not have permission").unwrap();
        assert_eq!(response.status().code(), 403);
        assert_eq!(response.status_line(), "403 You do not have permission");
    }

    #[test]
    fn test_set_status_rejects_out_of_range() {
        let mut response = Response::new();
        assert!(response.set_status(99).is_err());
        assert!(response.set_status(1000).is_err());
        assert!(response.set_status("abc").is_err());

        // A rejected update leaves the status untouched.
        assert_eq!(response.status_line(), "200 OK");
    }

    #[test]
    fn test_send_wire_format() {
        let mut response = Response::builder()
            .status(Status::new(404).unwrap())
            .header("Content-Type", "text/html; charset=utf-8")
            .header("X-Powered-By", "testsuite")
            .body("<h1>Not found</h1>")
            .build();

        let mut transport = WireTransport::new(Vec::new());
        response.send(&mut transport).unwrap();

        let wire = String::from_utf8(transport.into_inner()).unwrap();
        assert_eq!(
            wire,
            "HTTP/1.1 404 Not Found\r\n\
             Content-Type: text/html; charset=utf-8\r\n\
             X-Powered-By: testsuite\r\n\
             \r\n\
             <h1>Not found</h1>"
        );
    }

    #[test]
    fn test_send_empty_body_terminates_headers() {
        let mut response = Response::new();
        response.set_header("Content-Length", "0");

        let mut transport = WireTransport::new(Vec::new());
        response.send(&mut transport).unwrap();

        let wire = String::from_utf8(transport.into_inner()).unwrap();
        assert_eq!(wire, "HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
    }

    #[test]
    fn test_send_streams_body() {
        let mut response = Response::new();
        response.set_body(Body::Stream(Box::new(Cursor::new(b"streamed".to_vec()))));

        let mut transport = WireTransport::new(Vec::new());
        response.send(&mut transport).unwrap();

        assert_eq!(
            transport.into_inner(),
            b"HTTP/1.1 200 OK\r\n\r\nstreamed"
        );
    }

    #[test]
    fn test_send_empty_stream() {
        let mut response = Response::new();
        response.set_body(Body::Stream(Box::new(Cursor::new(Vec::new()))));

        let mut transport = WireTransport::new(Vec::new());
        response.send(&mut transport).unwrap();

        assert_eq!(transport.into_inner(), b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn test_send_http10_status_line() {
        let mut response = Response::new();
        response.set_http_version(Version::Http10);

        let mut transport = WireTransport::new(Vec::new());
        response.send(&mut transport).unwrap();

        assert!(transport.into_inner().starts_with(b"HTTP/1.0 200 OK\r\n"));
    }

    #[test]
    fn test_send_preserves_header_order() {
        let mut response = Response::new();
        response.set_headers([("B-Second", "2"), ("A-First", "1"), ("C-Third", "3")]);

        let mut transport = WireTransport::new(Vec::new());
        response.send(&mut transport).unwrap();

        let wire = String::from_utf8(transport.into_inner()).unwrap();
        let b = wire.find("B-Second").unwrap();
        let a = wire.find("A-First").unwrap();
        let c = wire.find("C-Third").unwrap();
        assert!(b < a && a < c);
    }

    #[test]
    fn test_buffered_body_survives_send() {
        let mut response = Response::new();
        response.set_body("kept");

        response.send(&mut WireTransport::new(Vec::new())).unwrap();
        response.send(&mut WireTransport::new(Vec::new())).unwrap();

        assert_eq!(response.body().as_bytes(), Some(&b"kept"[..]));
    }

    #[test]
    fn test_response_builder() {
        let response = Response::builder()
            .version(Version::Http10)
            .status(Status::new(207).unwrap())
            .header("Content-Type", "application/xml")
            .body("<d:multistatus/>")
            .build();

        assert_eq!(response.http_version(), Version::Http10);
        assert_eq!(response.status_line(), "207 Multi-Status");
        assert_eq!(response.header("content-type"), Some("application/xml"));
    }
}
