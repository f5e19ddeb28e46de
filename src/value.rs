//! Binary-safe argument values (component C1).
//!
//! Every argument that flows into a command is carried as a [`BinaryStringValue`]: a byte
//! sequence with an advisory "is this valid text" predicate. The predicate is authoritative for
//! deciding whether a command can be assembled and rendered as text end to end, or whether it
//! must be carried as raw bytes to avoid corrupting a payload like a `DUMP` blob.

use std::str;

use bytes::Bytes;

use crate::error::{Error, Result};

/// A value carried as either UTF-8 text or raw bytes.
///
/// Construction never fails: [`BinaryStringValue::from_bytes`] simply records whether the given
/// bytes happen to be valid UTF-8. [`BinaryStringValue::as_text`] is the only fallible accessor,
/// and only fails when the predicate is false.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BinaryStringValue {
    bytes: Bytes,
    text_convertible: bool,
}

impl BinaryStringValue {
    /// Wraps a text string. Always text-convertible.
    pub fn from_text(s: impl Into<String>) -> Self {
        let s = s.into();
        Self {
            bytes: Bytes::from(s.into_bytes()),
            text_convertible: true,
        }
    }

    /// Wraps raw bytes. Text-convertible iff the bytes form valid UTF-8.
    pub fn from_bytes(b: impl Into<Bytes>) -> Self {
        let bytes = b.into();
        let text_convertible = str::from_utf8(&bytes).is_ok();
        Self {
            bytes,
            text_convertible,
        }
    }

    /// A raw byte view. Always succeeds.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes this value, returning the underlying bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// A text view. Fails with [`crate::error::ErrorKind::BinaryConversion`] when this value is
    /// not text-convertible.
    pub fn as_text(&self) -> Result<&str> {
        if self.text_convertible {
            // Safety/invariant: `text_convertible` is only ever true when `bytes` was produced
            // from a `String` or validated with `str::from_utf8`.
            Ok(str::from_utf8(&self.bytes).expect("text_convertible implies valid utf8"))
        } else {
            Err(Error::binary_conversion())
        }
    }

    /// Whether this value can be losslessly rendered as text.
    pub fn is_text_convertible(&self) -> bool {
        self.text_convertible
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl std::fmt::Debug for BinaryStringValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.text_convertible {
            write!(f, "{:?}", self.as_text().unwrap())
        } else {
            write!(f, "b\"")?;
            for byte in self.bytes.iter() {
                write!(f, "\\x{byte:02x}")?;
            }
            write!(f, "\"")
        }
    }
}

impl From<&str> for BinaryStringValue {
    fn from(s: &str) -> Self {
        Self::from_text(s)
    }
}

impl From<String> for BinaryStringValue {
    fn from(s: String) -> Self {
        Self::from_text(s)
    }
}

impl From<&String> for BinaryStringValue {
    fn from(s: &String) -> Self {
        Self::from_text(s.clone())
    }
}

impl From<Vec<u8>> for BinaryStringValue {
    fn from(b: Vec<u8>) -> Self {
        Self::from_bytes(b)
    }
}

impl From<&[u8]> for BinaryStringValue {
    fn from(b: &[u8]) -> Self {
        Self::from_bytes(b.to_vec())
    }
}

impl From<Bytes> for BinaryStringValue {
    fn from(b: Bytes) -> Self {
        Self::from_bytes(b)
    }
}

impl From<i64> for BinaryStringValue {
    fn from(i: i64) -> Self {
        Self::from_text(i.to_string())
    }
}

impl From<u64> for BinaryStringValue {
    fn from(i: u64) -> Self {
        Self::from_text(i.to_string())
    }
}

impl From<f64> for BinaryStringValue {
    fn from(f: f64) -> Self {
        Self::from_text(crate::command::format_float(f))
    }
}

impl From<usize> for BinaryStringValue {
    fn from(i: usize) -> Self {
        Self::from_text(i.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_value_is_always_convertible() {
        let v = BinaryStringValue::from_text("hello");
        assert!(v.is_text_convertible());
        assert_eq!(v.as_text().unwrap(), "hello");
        assert_eq!(v.as_bytes(), b"hello");
    }

    #[test]
    fn non_utf8_bytes_are_not_text_convertible() {
        let payload = vec![0x00, 0xFF, 0x01, 0xFE];
        let v = BinaryStringValue::from_bytes(payload.clone());
        assert!(!v.is_text_convertible());
        assert_eq!(v.as_bytes(), payload.as_slice());
        assert!(v.as_text().is_err());
    }

    #[test]
    fn utf8_bytes_are_text_convertible() {
        let v = BinaryStringValue::from_bytes(b"hello".to_vec());
        assert!(v.is_text_convertible());
        assert_eq!(v.as_text().unwrap(), "hello");
    }
}
