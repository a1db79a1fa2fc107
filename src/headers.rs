//! HTTP header bag
//!
//! This module provides the ordered header collection shared by requests and
//! responses: case-insensitive lookups, canonical storage names and
//! last-write-wins updates.

use std::fmt;

/// Ordered HTTP header collection
///
/// Headers are stored in insertion order and support:
/// - Case-insensitive name lookups
/// - Canonical storage names (`Content-Type`, never `content-type`)
/// - Replacement in place: overwriting a header keeps its original slot
#[derive(Debug, Clone)]
pub struct Headers {
    headers: Vec<(String, String)>,
}

impl Headers {
    /// Create a new empty header bag
    pub fn new() -> Self {
        Headers {
            headers: Vec::new(),
        }
    }

    /// Set a header, replacing any existing value
    ///
    /// The name is stored in canonical form (`x-powered-by` becomes
    /// `X-Powered-By`). If a header with the same name already exists,
    /// case-insensitively, its value is replaced and its position in
    /// the bag is kept.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = canonical_name(&name.into());
        let value = value.into();

        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
    }

    /// Get the value for a header (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check if a header exists
    pub fn contains(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// Remove a header (case-insensitive)
    ///
    /// Returns `true` if a header was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let initial_len = self.headers.len();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        initial_len != self.headers.len()
    }

    /// Get the number of headers
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Check if there are no headers
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Clear all headers
    pub fn clear(&mut self) {
        self.headers.clear();
    }

    /// Iterate over all headers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Canonical form of a header name: every hyphen-separated segment is
/// lower-cased with its first letter upper-cased.
fn canonical_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split('-').enumerate() {
        if i > 0 {
            out.push('-');
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    out
}

impl Default for Headers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.set(name, value);
        }
        headers
    }
}
