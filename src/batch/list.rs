//! List commands: LPUSH/RPUSH and friends.

use std::time::Duration;

use crate::{
    batch::Batch,
    command::{ArgBuilder, CommandFlags},
    convert::ResponseKind,
    value::BinaryStringValue,
};

impl Batch {
    /// `LPUSH key element [element...]`
    pub fn lpush(
        &mut self,
        key: impl Into<BinaryStringValue>,
        elements: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("LPUSH").push(key).push_all(elements).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `LPUSHX key element [element...]`
    pub fn lpushx(
        &mut self,
        key: impl Into<BinaryStringValue>,
        elements: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("LPUSHX").push(key).push_all(elements).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `RPUSH key element [element...]`
    pub fn rpush(
        &mut self,
        key: impl Into<BinaryStringValue>,
        elements: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("RPUSH").push(key).push_all(elements).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `RPUSHX key element [element...]`
    pub fn rpushx(
        &mut self,
        key: impl Into<BinaryStringValue>,
        elements: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("RPUSHX").push(key).push_all(elements).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `LPOP key`
    pub fn lpop(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("LPOP").push(key).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `LPOP key count`
    pub fn lpop_count(&mut self, key: impl Into<BinaryStringValue>, count: i64) -> &mut Self {
        let cmd = ArgBuilder::new("LPOP").push(key).push(count).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `RPOP key`
    pub fn rpop(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("RPOP").push(key).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `RPOP key count`
    pub fn rpop_count(&mut self, key: impl Into<BinaryStringValue>, count: i64) -> &mut Self {
        let cmd = ArgBuilder::new("RPOP").push(key).push(count).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `LLEN key`
    pub fn llen(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("LLEN").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `LRANGE key start stop`
    pub fn lrange(&mut self, key: impl Into<BinaryStringValue>, start: i64, stop: i64) -> &mut Self {
        let cmd = ArgBuilder::new("LRANGE").push(key).push(start).push(stop).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `LRANGE key start stop`, decoding every element as raw bytes unconditionally -- for lists
    /// known to hold opaque binary payloads, where even an accidentally-UTF8-looking element must
    /// not be rendered as text.
    pub fn lrange_binary(&mut self, key: impl Into<BinaryStringValue>, start: i64, stop: i64) -> &mut Self {
        let cmd = ArgBuilder::new("LRANGE").push(key).push(start).push(stop).build();
        self.append(cmd, ResponseKind::ArrayOfNullableBytes)
    }

    /// `LINDEX key index`
    pub fn lindex(&mut self, key: impl Into<BinaryStringValue>, index: i64) -> &mut Self {
        let cmd = ArgBuilder::new("LINDEX").push(key).push(index).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `LSET key index element`
    pub fn lset(&mut self, key: impl Into<BinaryStringValue>, index: i64, element: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("LSET").push(key).push(index).push(element).build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `LTRIM key start stop`
    pub fn ltrim(&mut self, key: impl Into<BinaryStringValue>, start: i64, stop: i64) -> &mut Self {
        let cmd = ArgBuilder::new("LTRIM").push(key).push(start).push(stop).build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `LREM key count element`
    pub fn lrem(&mut self, key: impl Into<BinaryStringValue>, count: i64, element: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("LREM").push(key).push(count).push(element).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `LINSERT key BEFORE|AFTER pivot element`
    pub fn linsert(
        &mut self,
        key: impl Into<BinaryStringValue>,
        before: bool,
        pivot: impl Into<BinaryStringValue>,
        element: impl Into<BinaryStringValue>,
    ) -> &mut Self {
        let where_token = if before { "BEFORE" } else { "AFTER" };
        let cmd = ArgBuilder::new("LINSERT")
            .push(key)
            .push_token(where_token)
            .push(pivot)
            .push(element)
            .build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `LPOS key element [RANK rank] [COUNT count] [MAXLEN maxlen]`
    pub fn lpos(
        &mut self,
        key: impl Into<BinaryStringValue>,
        element: impl Into<BinaryStringValue>,
        rank: Option<i64>,
        count: Option<i64>,
        maxlen: Option<i64>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("LPOS").push(key).push(element);
        if let Some(rank) = rank {
            builder = builder.push_token("RANK").push(rank);
        }
        let multi = count.is_some();
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        if let Some(maxlen) = maxlen {
            builder = builder.push_token("MAXLEN").push(maxlen);
        }
        let kind = if multi {
            ResponseKind::ArrayOfNullableText
        } else {
            ResponseKind::IntegerOrNil
        };
        self.append(builder.build(), kind)
    }

    /// `LMOVE source destination LEFT|RIGHT LEFT|RIGHT`
    pub fn lmove(
        &mut self,
        source: impl Into<BinaryStringValue>,
        destination: impl Into<BinaryStringValue>,
        from_left: bool,
        to_left: bool,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("LMOVE")
            .push(source)
            .push(destination)
            .push_token(side_token(from_left))
            .push_token(side_token(to_left))
            .build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `BLMOVE source destination LEFT|RIGHT LEFT|RIGHT timeout`
    pub fn blmove(
        &mut self,
        source: impl Into<BinaryStringValue>,
        destination: impl Into<BinaryStringValue>,
        from_left: bool,
        to_left: bool,
        timeout: Duration,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("BLMOVE")
            .assert_flags(CommandFlags::new(true, true), true)
            .push(source)
            .push(destination)
            .push_token(side_token(from_left))
            .push_token(side_token(to_left))
            .push(timeout.as_secs_f64())
            .build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `BLPOP key [key...] timeout`
    pub fn blpop(
        &mut self,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        timeout: Duration,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("BLPOP")
            .assert_flags(CommandFlags::new(true, true), true)
            .push_all(keys)
            .push(timeout.as_secs_f64())
            .build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `BRPOP key [key...] timeout`
    pub fn brpop(
        &mut self,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        timeout: Duration,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("BRPOP")
            .assert_flags(CommandFlags::new(true, true), true)
            .push_all(keys)
            .push(timeout.as_secs_f64())
            .build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `LMPOP numkeys key [key...] LEFT|RIGHT [COUNT count]`. The `numkeys` prefix is derived
    /// from the key list, never supplied directly -- the caller cannot construct a malformed
    /// count.
    pub fn lmpop(
        &mut self,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        from_left: bool,
        count: Option<i64>,
    ) -> &mut Self {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        let mut builder = ArgBuilder::new("LMPOP")
            .push(keys.len() as i64)
            .push_all(keys)
            .push_token(side_token(from_left));
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        self.append(builder.build(), ResponseKind::MapOrPairs)
    }

    /// `BLMPOP timeout numkeys key [key...] LEFT|RIGHT [COUNT count]`
    pub fn blmpop(
        &mut self,
        timeout: Duration,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        from_left: bool,
        count: Option<i64>,
    ) -> &mut Self {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        let mut builder = ArgBuilder::new("BLMPOP")
            .assert_flags(CommandFlags::new(true, true), true)
            .push(timeout.as_secs_f64())
            .push(keys.len() as i64)
            .push_all(keys)
            .push_token(side_token(from_left));
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        self.append(builder.build(), ResponseKind::MapOrPairs)
    }
}

fn side_token(left: bool) -> &'static str {
    if left {
        "LEFT"
    } else {
        "RIGHT"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lmpop_derives_numkeys_prefix() {
        let mut batch = Batch::new(false);
        batch.lmpop(vec!["k1", "k2", "k3"], true, Some(2));
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![
                b"3".as_slice(),
                b"k1".as_slice(),
                b"k2".as_slice(),
                b"k3".as_slice(),
                b"LEFT".as_slice(),
                b"COUNT".as_slice(),
                b"2".as_slice(),
            ]
        );
    }

    #[test]
    fn lrange_binary_registers_a_bytes_converter() {
        let mut batch = Batch::new(false);
        batch.lrange_binary("k", 0, -1);
        assert_eq!(batch.converters()[0], crate::convert::ResponseKind::ArrayOfNullableBytes);
        assert_eq!(batch.commands()[0].name(), "LRANGE");
    }

    #[test]
    fn blmpop_places_timeout_before_numkeys() {
        let mut batch = Batch::new(false);
        batch.blmpop(Duration::from_secs(1), vec!["k1"], false, None);
        let cmd = &batch.commands()[0];
        assert_eq!(cmd.arguments()[0], b"1".as_slice());
        assert_eq!(cmd.arguments()[1], b"1".as_slice());
        assert_eq!(cmd.arguments()[2], b"k1".as_slice());
        assert_eq!(cmd.arguments()[3], b"RIGHT".as_slice());
    }
}
