//! HTTP request modeling
//!
//! A request is either built directly or normalized out of a CGI/SAPI-style
//! server environment with [`Request::from_server_env`]. Path resolution
//! against a configurable base path lives here too.

use crate::headers::Headers;
use crate::message::{Body, HasBody, HasHeaders, Message, Version};
use crate::{Error, Result, DEFAULT_BASE_PATH};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use tracing::{debug, warn};

/// HTTP request
///
/// Method and URL stay unset until provided; a request normalized from a
/// server environment carries exactly what the environment had.
#[derive(Debug)]
pub struct Request {
    message: Message,
    method: Option<String>,
    url: Option<String>,
    absolute_url: Option<String>,
    base_path: String,
    post_data: HashMap<String, String>,
    raw_env: HashMap<String, String>,
}

impl Request {
    /// Create an empty request resolved against the root base path
    pub fn new() -> Self {
        Request {
            message: Message::default(),
            method: None,
            url: None,
            absolute_url: None,
            base_path: DEFAULT_BASE_PATH.to_string(),
            post_data: HashMap::new(),
            raw_env: HashMap::new(),
        }
    }

    /// Create a builder for constructing requests
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Build a request from a server-gateway environment
    ///
    /// The environment is the CGI/Apache-style variable set: `REQUEST_METHOD`,
    /// `REQUEST_URI`, `SERVER_PROTOCOL`, `HTTP_*` header entries and friends.
    /// Entries are inspected in iteration order and later duplicates win.
    /// Defaults when the environment is silent: version 1.1, scheme `http`,
    /// host `localhost`.
    ///
    /// The body is not taken from the environment; attach it separately.
    pub fn from_server_env<I, K, V>(env: I) -> Request
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env: Vec<(String, String)> = env
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        let mut headers = Headers::new();
        let mut method = None;
        let mut url = None;
        let mut version = Version::default();
        let mut scheme = "http";
        let mut host = "localhost".to_string();

        // Basic credentials are spread over two entries, so the password
        // is looked up out of band.
        let basic_password = env
            .iter()
            .find(|(key, _)| key == "PHP_AUTH_PW")
            .map(|(_, value)| value.as_str());

        for (key, value) in &env {
            match key.as_str() {
                "SERVER_PROTOCOL" => {
                    version = Version::from_str(value).unwrap_or_default();
                }
                "REQUEST_METHOD" => method = Some(value.clone()),
                "REQUEST_URI" => url = Some(value.clone()),

                // These sometimes show up without the HTTP_ prefix.
                "CONTENT_TYPE" => headers.set("Content-Type", value.clone()),
                "CONTENT_LENGTH" => headers.set("Content-Length", value.clone()),

                // Apache module SAPIs put credentials in these entries;
                // (fast)cgi setups usually do not.
                "PHP_AUTH_USER" => {
                    if let Some(password) = basic_password {
                        let credentials = STANDARD.encode(format!("{}:{}", value, password));
                        headers.set("Authorization", format!("Basic {}", credentials));
                    }
                }
                "PHP_AUTH_DIGEST" => {
                    headers.set("Authorization", format!("Digest {}", value));
                }

                // mod_rewrite may have prefixed the authorization header.
                "REDIRECT_HTTP_AUTHORIZATION" => {
                    headers.set("Authorization", value.clone());
                }

                "HTTP_HOST" => {
                    host = value.clone();
                    headers.set("Host", value.clone());
                }
                "HTTPS" => {
                    if !value.is_empty() && value != "off" {
                        scheme = "https";
                    }
                }

                other => {
                    if let Some(name) = other.strip_prefix("HTTP_") {
                        headers.set(name.replace('_', "-"), value.clone());
                    }
                }
            }
        }

        let absolute_url = format!("{}://{}{}", scheme, host, url.as_deref().unwrap_or_default());

        debug!(
            method = method.as_deref().unwrap_or("-"),
            url = url.as_deref().unwrap_or("-"),
            version = version.as_str(),
            header_count = headers.len(),
            "normalized server environment"
        );

        let mut request = Request::new();
        request.message.version = version;
        request.message.headers = headers;
        request.method = method;
        request.url = url;
        request.absolute_url = Some(absolute_url);
        request.raw_env = env.into_iter().collect();
        request
    }

    /// Get the request method, if one is set
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Set the request method
    pub fn set_method(&mut self, method: impl Into<String>) {
        self.method = Some(method.into());
    }

    /// Get the request URL, path plus query, as the server saw it
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Set the request URL
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    /// Get the absolute URL, scheme and host included
    pub fn absolute_url(&self) -> Option<&str> {
        self.absolute_url.as_deref()
    }

    /// Set the absolute URL
    pub fn set_absolute_url(&mut self, url: impl Into<String>) {
        self.absolute_url = Some(url.into());
    }

    /// Get the base path relative paths are resolved against
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Set the base path used by [`Request::path`]
    pub fn set_base_path(&mut self, base_path: impl Into<String>) {
        self.base_path = base_path.into();
    }

    /// Get the HTTP version
    pub fn http_version(&self) -> Version {
        self.message.version
    }

    /// Set the HTTP version
    pub fn set_http_version(&mut self, version: Version) {
        self.message.version = version;
    }

    /// Get the path relative to the base path
    ///
    /// Duplicate slashes are collapsed, the query part is dropped and the
    /// remainder is percent-decoded and trimmed of surrounding slashes, so
    /// `/dav/col/file.txt` under base path `/dav/` yields `col/file.txt`.
    /// Requesting the base path itself, with or without its trailing slash,
    /// yields an empty string.
    ///
    /// Fails when the URL falls outside the base path.
    pub fn path(&self) -> Result<String> {
        let url = self.url.as_deref().unwrap_or_default();
        let collapsed = collapse_slashes(url);

        if let Some(rest) = collapsed.strip_prefix(&self.base_path) {
            // Everything after the ? is not part of the path.
            let rest = match rest.split_once('?') {
                Some((path, _)) => path,
                None => rest,
            };
            return Ok(decode_path(rest).trim_matches('/').to_string());
        }

        // The base path requested without its trailing slash still counts.
        if format!("{}/", collapsed) == self.base_path {
            return Ok(String::new());
        }

        warn!(url, base_path = %self.base_path, "request url out of base path");
        Err(Error::OutOfBasePath {
            url: url.to_string(),
            base_path: self.base_path.clone(),
        })
    }

    /// Get the decoded query parameters
    ///
    /// Pairs without `=` get an empty value and duplicate names keep the
    /// last value. `+` decodes to a space, as submitted forms encode it.
    pub fn query_parameters(&self) -> HashMap<String, String> {
        let url = self.url.as_deref().unwrap_or_default();
        let query = match url.split_once('?') {
            Some((_, query)) => query,
            None => return HashMap::new(),
        };

        let mut parameters = HashMap::new();
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            parameters.insert(form_decode(name), form_decode(value));
        }
        parameters
    }

    /// Get the submitted form data, as parsed by the hosting layer
    pub fn post_data(&self) -> &HashMap<String, String> {
        &self.post_data
    }

    /// Set the submitted form data
    pub fn set_post_data(&mut self, post_data: HashMap<String, String>) {
        self.post_data = post_data;
    }

    /// Get a single entry from the raw server environment
    pub fn raw_env_value(&self, key: &str) -> Option<&str> {
        self.raw_env.get(key).map(String::as_str)
    }

    /// Replace the raw server environment
    pub fn set_raw_env(&mut self, env: HashMap<String, String>) {
        self.raw_env = env;
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl HasHeaders for Request {
    fn headers(&self) -> &Headers {
        &self.message.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.message.headers
    }
}

impl HasBody for Request {
    fn body(&self) -> &Body {
        &self.message.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.message.body
    }
}

/// Collapse every run of slashes in `url` down to one
fn collapse_slashes(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut previous_was_slash = false;
    for c in url.chars() {
        if c == '/' && previous_was_slash {
            continue;
        }
        previous_was_slash = c == '/';
        out.push(c);
    }
    out
}

/// Percent-decode a path fragment
///
/// Decoded bytes that do not form valid UTF-8 are read as ISO-8859-1
/// instead, so legacy-encoded urls still resolve.
fn decode_path(raw: &str) -> String {
    let bytes: Vec<u8> = percent_decode_str(raw).collect();
    match String::from_utf8(bytes) {
        Ok(path) => path,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

/// Decode an application/x-www-form-urlencoded component
fn form_decode(raw: &str) -> String {
    decode_path(&raw.replace('+', " "))
}

/// Builder for HTTP requests
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<String>,
    url: Option<String>,
    version: Option<Version>,
    headers: Headers,
    body: Body,
    base_path: Option<String>,
}

impl RequestBuilder {
    /// Set the HTTP method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the request URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the HTTP version
    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
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

    /// Set the base path
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Build the request
    pub fn build(self) -> Request {
        let mut request = Request::new();
        request.message = Message {
            version: self.version.unwrap_or_default(),
            headers: self.headers,
            body: self.body,
        };
        request.method = self.method;
        request.url = self.url;
        if let Some(base_path) = self.base_path {
            request.base_path = base_path;
        }
        request
    }
}
