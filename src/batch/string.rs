//! String commands: GET/SET and friends.

use crate::{batch::Batch, command::ArgBuilder, convert::ResponseKind, value::BinaryStringValue};

impl Batch {
    /// `GET key`
    pub fn get(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("GET").push(key).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `SET key value`. Either argument may independently be text or raw bytes; if either is
    /// not text-convertible the whole command is assembled as binary so the value is never
    /// forced through a text encoding.
    pub fn set(&mut self, key: impl Into<BinaryStringValue>, value: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("SET").push(key).push(value).build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `SET key value EX seconds` convenience overload.
    pub fn set_ex(
        &mut self,
        key: impl Into<BinaryStringValue>,
        value: impl Into<BinaryStringValue>,
        seconds: i64,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("SET")
            .push(key)
            .push(value)
            .push_token("EX")
            .push(seconds)
            .build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `SET key value NX` -- only set if the key does not already exist.
    pub fn set_nx(&mut self, key: impl Into<BinaryStringValue>, value: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("SET").push(key).push(value).push_token("NX").build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `APPEND key value`
    pub fn append_str(&mut self, key: impl Into<BinaryStringValue>, value: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("APPEND").push(key).push(value).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `STRLEN key`
    pub fn strlen(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("STRLEN").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `GETRANGE key start end`
    pub fn getrange(&mut self, key: impl Into<BinaryStringValue>, start: i64, end: i64) -> &mut Self {
        let cmd = ArgBuilder::new("GETRANGE").push(key).push(start).push(end).build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `SETRANGE key offset value`
    pub fn setrange(
        &mut self,
        key: impl Into<BinaryStringValue>,
        offset: i64,
        value: impl Into<BinaryStringValue>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("SETRANGE").push(key).push(offset).push(value).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `INCR key`
    pub fn incr(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("INCR").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `DECR key`
    pub fn decr(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("DECR").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `INCRBY key increment`
    pub fn incr_by(&mut self, key: impl Into<BinaryStringValue>, increment: i64) -> &mut Self {
        let cmd = ArgBuilder::new("INCRBY").push(key).push(increment).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `DECRBY key decrement`
    pub fn decr_by(&mut self, key: impl Into<BinaryStringValue>, decrement: i64) -> &mut Self {
        let cmd = ArgBuilder::new("DECRBY").push(key).push(decrement).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `INCRBYFLOAT key increment`
    pub fn incr_by_float(&mut self, key: impl Into<BinaryStringValue>, increment: f64) -> &mut Self {
        let cmd = ArgBuilder::new("INCRBYFLOAT").push(key).push(increment).build();
        self.append(cmd, ResponseKind::Float)
    }

    /// `MGET key [key...]`
    pub fn mget(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> &mut Self {
        let cmd = ArgBuilder::new("MGET").push_all(keys).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `MSET key value [key value...]`
    pub fn mset(&mut self, pairs: impl IntoIterator<Item = (impl Into<BinaryStringValue>, impl Into<BinaryStringValue>)>) -> &mut Self {
        let mut builder = ArgBuilder::new("MSET");
        for (k, v) in pairs {
            builder = builder.push(k).push(v);
        }
        self.append(builder.build(), ResponseKind::NonNullableText)
    }

    /// `MSETNX key value [key value...]`
    pub fn msetnx(&mut self, pairs: impl IntoIterator<Item = (impl Into<BinaryStringValue>, impl Into<BinaryStringValue>)>) -> &mut Self {
        let mut builder = ArgBuilder::new("MSETNX");
        for (k, v) in pairs {
            builder = builder.push(k).push(v);
        }
        self.append(builder.build(), ResponseKind::Boolean)
    }

    /// `GETDEL key`
    pub fn getdel(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("GETDEL").push(key).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `GETEX key [EX seconds | PERSIST]`
    pub fn getex(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("GETEX").push(key).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `GETEX key EX seconds`
    pub fn getex_ex(&mut self, key: impl Into<BinaryStringValue>, seconds: i64) -> &mut Self {
        let cmd = ArgBuilder::new("GETEX").push(key).push_token("EX").push(seconds).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `GETEX key PERSIST`
    pub fn getex_persist(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("GETEX").push(key).push_token("PERSIST").build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `LCS key1 key2`
    pub fn lcs(&mut self, key1: impl Into<BinaryStringValue>, key2: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("LCS").push(key1).push(key2).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `LCS key1 key2 LEN`
    pub fn lcs_len(&mut self, key1: impl Into<BinaryStringValue>, key2: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("LCS").push(key1).push(key2).push_token("LEN").build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `LCS key1 key2 IDX [MINMATCHLEN n] [WITHMATCHLEN]`
    pub fn lcs_idx(
        &mut self,
        key1: impl Into<BinaryStringValue>,
        key2: impl Into<BinaryStringValue>,
        min_match_len: Option<i64>,
        with_match_len: bool,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("LCS").push(key1).push(key2).push_token("IDX");
        if let Some(len) = min_match_len {
            builder = builder.push_token("MINMATCHLEN").push(len);
        }
        builder = builder.push_token_if(with_match_len, "WITHMATCHLEN");
        self.append(builder.build(), ResponseKind::MapOrPairs)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_with_binary_value_is_assembled_as_binary_command() {
        let mut batch = Batch::new(false);
        let payload = vec![0x00, 0xFF, 0x01, 0xFE];
        batch.set("k", payload.clone());
        let cmd = &batch.commands()[0];
        assert!(cmd.is_binary());
        assert_eq!(cmd.arguments(), vec![b"k".as_slice(), payload.as_slice()]);
    }
}
