//! Set commands: SADD/SREM and friends.

use crate::{
    batch::{require_non_empty, Batch},
    command::ArgBuilder,
    convert::ResponseKind,
    error::Result,
    value::BinaryStringValue,
};

impl Batch {
    /// `SADD key member [member...]`
    pub fn sadd(
        &mut self,
        key: impl Into<BinaryStringValue>,
        members: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("SADD").push(key).push_all(members).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `SREM key member [member...]`
    pub fn srem(
        &mut self,
        key: impl Into<BinaryStringValue>,
        members: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("SREM").push(key).push_all(members).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `SMEMBERS key`
    pub fn smembers(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("SMEMBERS").push(key).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `SCARD key`
    pub fn scard(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("SCARD").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `SISMEMBER key member`
    pub fn sismember(&mut self, key: impl Into<BinaryStringValue>, member: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("SISMEMBER").push(key).push(member).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `SMISMEMBER key member [member...]`
    pub fn smismember(
        &mut self,
        key: impl Into<BinaryStringValue>,
        members: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("SMISMEMBER").push(key).push_all(members).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `SMOVE source destination member`
    pub fn smove(
        &mut self,
        source: impl Into<BinaryStringValue>,
        destination: impl Into<BinaryStringValue>,
        member: impl Into<BinaryStringValue>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("SMOVE").push(source).push(destination).push(member).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `SPOP key`
    pub fn spop(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("SPOP").push(key).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `SPOP key count`
    pub fn spop_count(&mut self, key: impl Into<BinaryStringValue>, count: i64) -> &mut Self {
        let cmd = ArgBuilder::new("SPOP").push(key).push(count).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `SRANDMEMBER key`
    pub fn srandmember(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("SRANDMEMBER").push(key).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `SRANDMEMBER key count`
    pub fn srandmember_count(&mut self, key: impl Into<BinaryStringValue>, count: i64) -> &mut Self {
        let cmd = ArgBuilder::new("SRANDMEMBER").push(key).push(count).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `SUNION key [key...]`
    pub fn sunion(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> &mut Self {
        let cmd = ArgBuilder::new("SUNION").push_all(keys).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `SUNIONSTORE destination key [key...]`. The destination precedes the source keys
    /// directly -- unlike `SINTERCARD`'s `numkeys`-style commands, there is no count prefix.
    pub fn sunionstore(
        &mut self,
        destination: impl Into<BinaryStringValue>,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("SUNIONSTORE").push(destination).push_all(keys).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `SINTER key [key...]`
    pub fn sinter(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> &mut Self {
        let cmd = ArgBuilder::new("SINTER").push_all(keys).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `SINTERSTORE destination key [key...]`
    pub fn sinterstore(
        &mut self,
        destination: impl Into<BinaryStringValue>,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("SINTERSTORE").push(destination).push_all(keys).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `SINTERCARD numkeys key [key...] [LIMIT limit]`. Unlike `SINTERSTORE`, `SINTERCARD`
    /// requires the explicit `numkeys` prefix; it is derived from the key list and the method
    /// fails rather than emit a malformed `numkeys 0` invocation.
    pub fn sintercard(
        &mut self,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        limit: Option<i64>,
    ) -> Result<&mut Self> {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        require_non_empty(&keys, "sintercard keys")?;
        let mut builder = ArgBuilder::new("SINTERCARD").push(keys.len() as i64).push_all(keys);
        if let Some(limit) = limit {
            builder = builder.push_token("LIMIT").push(limit);
        }
        Ok(self.append(builder.build(), ResponseKind::Integer))
    }

    /// `SDIFF key [key...]`
    pub fn sdiff(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> &mut Self {
        let cmd = ArgBuilder::new("SDIFF").push_all(keys).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `SDIFFSTORE destination key [key...]`
    pub fn sdiffstore(
        &mut self,
        destination: impl Into<BinaryStringValue>,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("SDIFFSTORE").push(destination).push_all(keys).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `SSCAN key cursor [MATCH pattern] [COUNT count]`
    pub fn sscan(
        &mut self,
        key: impl Into<BinaryStringValue>,
        cursor: impl Into<BinaryStringValue>,
        match_pattern: Option<impl Into<BinaryStringValue>>,
        count: Option<i64>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("SSCAN").push(key).push(cursor);
        if let Some(pattern) = match_pattern {
            builder = builder.push_token("MATCH").push(pattern);
        }
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        self.append(builder.build(), ResponseKind::MapOrPairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sintercard_requires_numkeys_prefix() {
        let mut batch = Batch::new(false);
        batch.sintercard(vec!["k1", "k2"], Some(3)).unwrap();
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![b"2".as_slice(), b"k1".as_slice(), b"k2".as_slice(), b"LIMIT".as_slice(), b"3".as_slice()]
        );
    }

    #[test]
    fn sintercard_rejects_empty_key_list() {
        let mut batch = Batch::new(false);
        let empty: Vec<&str> = vec![];
        assert!(batch.sintercard(empty, None).is_err());
    }

    #[test]
    fn sunionstore_has_no_numkeys_prefix() {
        let mut batch = Batch::new(false);
        batch.sunionstore("dest", vec!["k1", "k2"]);
        let cmd = &batch.commands()[0];
        assert_eq!(cmd.arguments(), vec![b"dest".as_slice(), b"k1".as_slice(), b"k2".as_slice()]);
    }
}
