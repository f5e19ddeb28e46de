//! Response decoding (part of component C3/C5): the shape every registered converter expects,
//! and the single data-driven function that applies one to a transport-returned raw reply.
//!
//! Rather than storing a closure per appended command, every builder method registers a
//! [`ResponseKind`] tag. [`convert`] is the one place that knows how to turn a [`RawResponse`]
//! into a [`Value`] for each tag -- a tagged-variant table, as opposed to ~300 bespoke decoding
//! closures.

use bytes::Bytes;

use crate::error::{Error, Result};

/// A value returned by the transport, already demultiplexed out of the wire protocol but not
/// yet interpreted according to any particular command's expected shape.
#[derive(Clone, Debug, PartialEq)]
pub enum RawResponse {
    Nil,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    SimpleString(String),
    BulkString(Bytes),
    Array(Vec<RawResponse>),
    Map(Vec<(RawResponse, RawResponse)>),
    /// A command-level error reply (e.g. `-ERR ...`, `-CROSSSLOT ...`).
    Error { message: String, code: Option<String> },
}

/// The decoded result of one command within a batch.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nil,
    /// The literal non-nullable `"OK"` reply many write commands return.
    Okay,
    Boolean(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Bytes),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Converts a raw response into an opaque pass-through value, applying only the
    /// binary-output policy (not any command-specific shape check). Used for
    /// `custom_command` and other escape hatches.
    fn from_raw(raw: RawResponse, binary_output: bool) -> Value {
        match raw {
            RawResponse::Nil => Value::Nil,
            RawResponse::Boolean(b) => Value::Boolean(b),
            RawResponse::Integer(i) => Value::Int(i),
            RawResponse::Double(f) => Value::Float(f),
            RawResponse::SimpleString(s) => Value::Text(s),
            RawResponse::BulkString(b) => text_or_bytes(b, binary_output),
            RawResponse::Array(items) => {
                Value::Array(items.into_iter().map(|i| Value::from_raw(i, binary_output)).collect())
            }
            RawResponse::Map(pairs) => Value::Map(
                pairs
                    .into_iter()
                    .map(|(k, v)| (Value::from_raw(k, binary_output), Value::from_raw(v, binary_output)))
                    .collect(),
            ),
            RawResponse::Error { message, .. } => Value::Text(message),
        }
    }
}

fn text_or_bytes(bytes: Bytes, binary_output: bool) -> Value {
    if binary_output {
        return Value::Bytes(bytes);
    }
    match std::str::from_utf8(&bytes) {
        Ok(s) => Value::Text(s.to_owned()),
        Err(_) => Value::Bytes(bytes),
    }
}

fn describe(raw: &RawResponse) -> String {
    match raw {
        RawResponse::Nil => "nil".into(),
        RawResponse::Boolean(_) => "boolean".into(),
        RawResponse::Integer(_) => "integer".into(),
        RawResponse::Double(_) => "double".into(),
        RawResponse::SimpleString(_) => "simple string".into(),
        RawResponse::BulkString(_) => "bulk string".into(),
        RawResponse::Array(_) => "array".into(),
        RawResponse::Map(_) => "map".into(),
        RawResponse::Error { message, .. } => format!("error({message})"),
    }
}

/// The response shape a converter expects, one per appended command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseKind {
    /// A bulk string that may be nil (e.g. `GET` on a missing key).
    NullableText,
    /// A simple/bulk string that is never nil (e.g. `SET`'s `"OK"`).
    NonNullableText,
    Integer,
    /// An integer reply that may be nil (e.g. some `OBJECT` subcommands).
    IntegerOrNil,
    /// A float decoded from its text representation (e.g. `INCRBYFLOAT`).
    Float,
    /// A double reply that may be nil (e.g. `ZSCORE` on a missing member).
    NullableFloat,
    Boolean,
    ArrayOfNullableText,
    /// An array whose elements are themselves nullable text, but should always be rendered as
    /// bytes regardless of the batch's `binary_output` flag (e.g. `DUMP`'s payload nested in a
    /// pipeline response).
    ArrayOfNullableBytes,
    MapOrPairs,
    /// Pass the raw response straight through with only the binary-output policy applied; used
    /// for `custom_command` and other operations whose reply shape is not fixed.
    OpaquePassThrough,
}

/// Applies the converter registered for one command to its raw reply.
///
/// Any in-band server error is surfaced as a [`crate::error::ErrorKind::Server`] regardless of
/// the expected shape -- a command-level error is never silently miscast into, say, an empty
/// array.
pub(crate) fn convert(raw: RawResponse, kind: ResponseKind, binary_output: bool) -> Result<Value> {
    use RawResponse::*;

    if let Error { message, code } = &raw {
        return Err(crate::error::Error::server(message.clone(), code.clone()));
    }

    match (kind, raw) {
        (ResponseKind::OpaquePassThrough, raw) => Ok(Value::from_raw(raw, binary_output)),

        (ResponseKind::NullableText, Nil) => Ok(Value::Nil),
        (ResponseKind::NullableText, BulkString(b)) => Ok(text_or_bytes(b, binary_output)),
        (ResponseKind::NullableText, SimpleString(s)) => Ok(Value::Text(s)),

        (ResponseKind::NonNullableText, SimpleString(s)) if s == "OK" => Ok(Value::Okay),
        (ResponseKind::NonNullableText, SimpleString(s)) => Ok(Value::Text(s)),
        (ResponseKind::NonNullableText, BulkString(b)) => Ok(text_or_bytes(b, binary_output)),

        (ResponseKind::Integer, Integer(i)) => Ok(Value::Int(i)),
        (ResponseKind::IntegerOrNil, Nil) => Ok(Value::Nil),
        (ResponseKind::IntegerOrNil, Integer(i)) => Ok(Value::Int(i)),

        (ResponseKind::Float, BulkString(b)) => parse_float(&b, kind),
        (ResponseKind::Float, SimpleString(s)) => parse_float(s.as_bytes(), kind),
        (ResponseKind::Float, Double(f)) => Ok(Value::Float(f)),

        (ResponseKind::NullableFloat, Nil) => Ok(Value::Nil),
        (ResponseKind::NullableFloat, Double(f)) => Ok(Value::Float(f)),
        (ResponseKind::NullableFloat, BulkString(b)) => parse_float(&b, kind),

        (ResponseKind::Boolean, Integer(i)) => Ok(Value::Boolean(i != 0)),
        (ResponseKind::Boolean, Boolean(b)) => Ok(Value::Boolean(b)),

        (ResponseKind::ArrayOfNullableText, Array(items)) => {
            let values = items
                .into_iter()
                .map(|item| match item {
                    Nil => Ok(Value::Nil),
                    BulkString(b) => Ok(text_or_bytes(b, binary_output)),
                    SimpleString(s) => Ok(Value::Text(s)),
                    Integer(i) => Ok(Value::Int(i)),
                    other => Err(Error::response_shape(kind, describe(&other))),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Array(values))
        }

        (ResponseKind::ArrayOfNullableBytes, Array(items)) => {
            let values = items
                .into_iter()
                .map(|item| match item {
                    Nil => Ok(Value::Nil),
                    BulkString(b) => Ok(Value::Bytes(b)),
                    other => Err(Error::response_shape(kind, describe(&other))),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Array(values))
        }

        (ResponseKind::MapOrPairs, Map(pairs)) => {
            let values = pairs
                .into_iter()
                .map(|(k, v)| (Value::from_raw(k, binary_output), Value::from_raw(v, binary_output)))
                .collect();
            Ok(Value::Map(values))
        }
        (ResponseKind::MapOrPairs, Array(items)) => {
            if items.len() % 2 != 0 {
                return Err(Error::response_shape(kind, "flat array of odd length"));
            }
            let mut pairs = Vec::with_capacity(items.len() / 2);
            let mut it = items.into_iter();
            while let (Some(k), Some(v)) = (it.next(), it.next()) {
                pairs.push((Value::from_raw(k, binary_output), Value::from_raw(v, binary_output)));
            }
            Ok(Value::Map(pairs))
        }

        (kind, other) => Err(Error::response_shape(kind, describe(&other))),
    }
}

fn parse_float(bytes: &[u8], kind: ResponseKind) -> Result<Value> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .map(Value::Float)
        .ok_or_else(|| Error::response_shape(kind, "non-numeric text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_text_nil_decodes_to_nil() {
        assert_eq!(convert(RawResponse::Nil, ResponseKind::NullableText, false).unwrap(), Value::Nil);
    }

    #[test]
    fn non_nullable_text_ok_decodes_to_okay() {
        let v = convert(
            RawResponse::SimpleString("OK".into()),
            ResponseKind::NonNullableText,
            false,
        )
        .unwrap();
        assert_eq!(v, Value::Okay);
    }

    #[test]
    fn binary_output_flag_controls_bulk_string_decoding() {
        let raw = RawResponse::BulkString(Bytes::from_static(&[0xff, 0x00]));
        let as_bytes = convert(raw.clone(), ResponseKind::NullableText, true).unwrap();
        assert_eq!(as_bytes, Value::Bytes(Bytes::from_static(&[0xff, 0x00])));
    }

    #[test]
    fn server_error_always_surfaces_regardless_of_kind() {
        let raw = RawResponse::Error {
            message: "WRONGTYPE".into(),
            code: Some("WRONGTYPE".into()),
        };
        let err = convert(raw, ResponseKind::Integer, false).unwrap_err();
        assert!(matches!(err.kind(), crate::error::ErrorKind::Server { .. }));
    }

    #[test]
    fn mismatched_shape_is_a_response_shape_error() {
        let err = convert(RawResponse::Integer(1), ResponseKind::MapOrPairs, false).unwrap_err();
        assert!(matches!(err.kind(), crate::error::ErrorKind::ResponseShape { .. }));
    }
}
