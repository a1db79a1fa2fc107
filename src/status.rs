//! HTTP status handling
//!
//! A status is a validated code plus reason phrase pair. The phrase defaults
//! to the standard table and can be overridden per response, so a status
//! line is always `<code> <reason>` without further string surgery.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// HTTP status: a validated code and its reason phrase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Status {
    code: u16,
    reason: String,
}

impl Status {
    /// Create a status with the standard reason phrase for `code`
    ///
    /// Codes without a table entry get the phrase `Unknown`. Codes outside
    /// `100..=999` are rejected.
    pub fn new(code: u16) -> Result<Self> {
        Self::with_reason(code, standard_reason(code))
    }

    /// Create a status with an explicit reason phrase
    pub fn with_reason(code: u16, reason: impl Into<String>) -> Result<Self> {
        if !(100..=999).contains(&code) {
            return Err(Error::InvalidStatusCode { code: code as u64 });
        }
        Ok(Status {
            code,
            reason: reason.into(),
        })
    }

    /// Get the status code
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Get the reason phrase
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Default for Status {
    fn default() -> Self {
        Status {
            code: 200,
            reason: "OK".to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason)
    }
}

impl FromStr for Status {
    type Err = Error;

    /// Parse a bare code (`"404"`) or a full status line tail
    /// (`"404 Can't find it"`)
    fn from_str(s: &str) -> Result<Self> {
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, rest) = s.split_at(split);

        let code = if digits.is_empty() {
            0
        } else {
            digits.parse::<u64>().unwrap_or(u64::MAX)
        };
        if !(100..=999).contains(&code) {
            return Err(Error::InvalidStatusCode { code });
        }

        let reason = rest.strip_prefix(' ').unwrap_or(rest);
        if reason.is_empty() {
            Status::new(code as u16)
        } else {
            Status::with_reason(code as u16, reason)
        }
    }
}

/// Types accepted by `Response::set_status`: a prebuilt [`Status`], a bare
/// code, or a `"code reason"` string.
pub trait IntoStatus {
    /// Convert into a validated status
    fn into_status(self) -> Result<Status>;
}

impl IntoStatus for Status {
    fn into_status(self) -> Result<Status> {
        Ok(self)
    }
}

impl IntoStatus for u16 {
    fn into_status(self) -> Result<Status> {
        Status::new(self)
    }
}

impl IntoStatus for &str {
    fn into_status(self) -> Result<Status> {
        self.parse()
    }
}

impl IntoStatus for String {
    fn into_status(self) -> Result<Status> {
        self.parse()
    }
}

/// Standard reason phrase for a status code, or `"Unknown"`
pub fn standard_reason(code: u16) -> &'static str {
    match code {
        100 => "Continue",
        101 => "Switching Protocols",
        102 => "Processing",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        207 => "Multi-Status",
        208 => "Already Reported",
        226 => "IM Used",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        306 => "Reserved",
        307 => "Temporary Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Request Entity Too Large",
        414 => "Request-URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Requested Range Not Satisfiable",
        417 => "Expectation Failed",
        418 => "I'm a teapot",
        422 => "Unprocessable Entity",
        423 => "Locked",
        424 => "Failed Dependency",
        426 => "Upgrade Required",
        428 => "Precondition Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        451 => "Unavailable For Legal Reasons",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        506 => "Variant Also Negotiates",
        507 => "Insufficient Storage",
        508 => "Loop Detected",
        509 => "Bandwidth Limit Exceeded",
        510 => "Not Extended",
        511 => "Network Authentication Required",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_reason_lookup() {
        assert_eq!(standard_reason(200), "OK");
        assert_eq!(standard_reason(207), "Multi-Status");
        assert_eq!(standard_reason(418), "I'm a teapot");
        assert_eq!(standard_reason(507), "Insufficient Storage");
        assert_eq!(standard_reason(599), "Unknown");
    }

    #[test]
    fn test_new_uses_table() {
        let status = Status::new(404).unwrap();
        assert_eq!(status.code(), 404);
        assert_eq!(status.reason(), "Not Found");
        assert_eq!(status.to_string(), "404 Not Found");
    }

    #[test]
    fn test_unknown_code_gets_fallback_phrase() {
        let status = Status::new(599).unwrap();
        assert_eq!(status.to_string(), "599 Unknown");
    }

    #[test]
    fn test_out_of_range_codes() {
        assert!(Status::new(99).is_err());
        assert!(Status::new(1000).is_err());
        assert!(Status::with_reason(42, "x").is_err());
    }

    #[test]
    fn test_with_reason_overrides_table() {
        let status = Status::with_reason(404, "Nothing Here").unwrap();
        assert_eq!(status.to_string(), "404 Nothing Here");
    }

    #[test]
    fn test_parse_bare_code() {
        let status: Status = "404".parse().unwrap();
        assert_eq!(status.to_string(), "404 Not Found");
    }

    #[test]
    fn test_parse_code_with_reason() {
        let status: Status = "403 You do not have permission".parse().unwrap();
        assert_eq!(status.code(), 403);
        assert_eq!(status.reason(), "You do not have permission");
    }

    #[test]
    fn test_parse_rejects_bad_codes() {
        assert!("99".parse::<Status>().is_err());
        assert!("1000 Whatever".parse::<Status>().is_err());
        assert!("abc".parse::<Status>().is_err());
        assert!("".parse::<Status>().is_err());
    }

    #[test]
    fn test_into_status() {
        assert_eq!(200.into_status().unwrap().to_string(), "200 OK");
        assert_eq!("418".into_status().unwrap().reason(), "I'm a teapot");
        let composed = "503 Backend Down".to_string().into_status().unwrap();
        assert_eq!(composed.reason(), "Backend Down");
        assert!(99.into_status().is_err());
    }
}
