//! Session identifiers
//!
//! A session identifier correlates every message of one widget instance with a
//! single backend-side conversation. It is either supplied by the host page or
//! generated once as a random version 4 UUID.

use std::fmt;
use uuid::Uuid;

/// Opaque session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random identifier
    /// Shape: `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`, lowercase hex, `y` in {8,9,a,b}
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Resolve the identifier for a new widget instance
    /// A supplied value is used verbatim (it is opaque to the widget),
    /// otherwise a new one is generated
    pub fn resolve(supplied: Option<&str>) -> Self {
        match supplied {
            Some(id) if !id.trim().is_empty() => Self(id.to_string()),
            _ => Self::generate(),
        }
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a string has the shape of a generated identifier
    pub fn has_generated_shape(candidate: &str) -> bool {
        let bytes = candidate.as_bytes();
        if bytes.len() != 36 {
            return false;
        }
        for (i, b) in bytes.iter().enumerate() {
            let ok = match i {
                8 | 13 | 18 | 23 => *b == b'-',
                14 => *b == b'4',
                19 => matches!(b, b'8' | b'9' | b'a' | b'b'),
                _ => b.is_ascii_digit() || (b'a'..=b'f').contains(b),
            };
            if !ok {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
