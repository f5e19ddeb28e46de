//! Stream commands: XADD/XREAD and friends.

use std::time::Duration;

use crate::{
    batch::{token_for, Batch},
    command::ArgBuilder,
    convert::ResponseKind,
    value::BinaryStringValue,
};

impl Batch {
    /// `XADD key id field value [field value...]`
    pub fn xadd(
        &mut self,
        key: impl Into<BinaryStringValue>,
        id: impl Into<BinaryStringValue>,
        fields: impl IntoIterator<Item = (impl Into<BinaryStringValue>, impl Into<BinaryStringValue>)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("XADD").push(key).push(id);
        for (field, value) in fields {
            builder = builder.push(field).push(value);
        }
        self.append(builder.build(), ResponseKind::NonNullableText)
    }

    /// `XADD key NOMKSTREAM MAXLEN ~ count id field value [field value...]`
    pub fn xadd_trimmed(
        &mut self,
        key: impl Into<BinaryStringValue>,
        id: impl Into<BinaryStringValue>,
        approx_maxlen: i64,
        nomkstream: bool,
        fields: impl IntoIterator<Item = (impl Into<BinaryStringValue>, impl Into<BinaryStringValue>)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("XADD")
            .push(key)
            .push_token_if(nomkstream, "NOMKSTREAM")
            .push_token("MAXLEN")
            .push_token("~")
            .push(approx_maxlen)
            .push(id);
        for (field, value) in fields {
            builder = builder.push(field).push(value);
        }
        self.append(builder.build(), ResponseKind::NonNullableText)
    }

    /// `XLEN key`
    pub fn xlen(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("XLEN").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `XRANGE key start end [COUNT count]`
    pub fn xrange(
        &mut self,
        key: impl Into<BinaryStringValue>,
        start: impl Into<BinaryStringValue>,
        end: impl Into<BinaryStringValue>,
        count: Option<i64>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("XRANGE").push(key).push(start).push(end);
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `XREVRANGE key end start [COUNT count]`
    pub fn xrevrange(
        &mut self,
        key: impl Into<BinaryStringValue>,
        end: impl Into<BinaryStringValue>,
        start: impl Into<BinaryStringValue>,
        count: Option<i64>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("XREVRANGE").push(key).push(end).push(start);
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `XDEL key id [id...]`
    pub fn xdel(
        &mut self,
        key: impl Into<BinaryStringValue>,
        ids: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("XDEL").push(key).push_all(ids).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `XTRIM key MAXLEN ~ count`
    pub fn xtrim(&mut self, key: impl Into<BinaryStringValue>, approx_maxlen: i64) -> &mut Self {
        let cmd = ArgBuilder::new("XTRIM")
            .push(key)
            .push_token("MAXLEN")
            .push_token("~")
            .push(approx_maxlen)
            .build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `XACK key group id [id...]`
    pub fn xack(
        &mut self,
        key: impl Into<BinaryStringValue>,
        group: impl Into<BinaryStringValue>,
        ids: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("XACK").push(key).push(group).push_all(ids).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `XGROUP CREATE key group id [MKSTREAM] [ENTRIESREAD entries-read]`
    pub fn xgroup_create(
        &mut self,
        key: impl Into<BinaryStringValue>,
        group: impl Into<BinaryStringValue>,
        id: impl Into<BinaryStringValue>,
        mkstream: bool,
        entries_read: Option<i64>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("XGROUP")
            .push_token("CREATE")
            .push(key)
            .push(group)
            .push(id)
            .push_token_if(mkstream, "MKSTREAM");
        if let Some(entries_read) = entries_read {
            builder = token_for(builder, "ENTRIESREAD", entries_read);
        }
        self.append(builder.build(), ResponseKind::NonNullableText)
    }

    /// `XGROUP DESTROY key group`
    pub fn xgroup_destroy(&mut self, key: impl Into<BinaryStringValue>, group: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("XGROUP").push_token("DESTROY").push(key).push(group).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `XGROUP SETID key group id [ENTRIESREAD entries-read]`
    pub fn xgroup_setid(
        &mut self,
        key: impl Into<BinaryStringValue>,
        group: impl Into<BinaryStringValue>,
        id: impl Into<BinaryStringValue>,
        entries_read: Option<i64>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("XGROUP").push_token("SETID").push(key).push(group).push(id);
        if let Some(entries_read) = entries_read {
            builder = token_for(builder, "ENTRIESREAD", entries_read);
        }
        self.append(builder.build(), ResponseKind::NonNullableText)
    }

    /// `XGROUP CREATECONSUMER key group consumer`
    pub fn xgroup_createconsumer(
        &mut self,
        key: impl Into<BinaryStringValue>,
        group: impl Into<BinaryStringValue>,
        consumer: impl Into<BinaryStringValue>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("XGROUP")
            .push_token("CREATECONSUMER")
            .push(key)
            .push(group)
            .push(consumer)
            .build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `XGROUP DELCONSUMER key group consumer`
    pub fn xgroup_delconsumer(
        &mut self,
        key: impl Into<BinaryStringValue>,
        group: impl Into<BinaryStringValue>,
        consumer: impl Into<BinaryStringValue>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("XGROUP")
            .push_token("DELCONSUMER")
            .push(key)
            .push(group)
            .push(consumer)
            .build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `XREAD [COUNT count] [BLOCK ms] STREAMS key [key...] id [id...]`. Keys precede ids, and
    /// both lists follow the single `STREAMS` token -- the server rejects a duplicated token or
    /// an interleaved key/id ordering, so this is the only grammar this method can emit.
    pub fn xread(
        &mut self,
        count: Option<i64>,
        block: Option<Duration>,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        ids: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("XREAD");
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        if let Some(block) = block {
            builder = builder.push_token("BLOCK").push(block.as_millis() as i64);
        }
        builder = builder.push_token("STREAMS").push_all(keys).push_all(ids);
        self.append(builder.build(), ResponseKind::MapOrPairs)
    }

    /// `XREADGROUP GROUP group consumer [COUNT count] [BLOCK ms] [NOACK] STREAMS key [key...] id [id...]`
    pub fn xreadgroup(
        &mut self,
        group: impl Into<BinaryStringValue>,
        consumer: impl Into<BinaryStringValue>,
        count: Option<i64>,
        block: Option<Duration>,
        noack: bool,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        ids: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("XREADGROUP")
            .push_token("GROUP")
            .push(group)
            .push(consumer);
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        if let Some(block) = block {
            builder = builder.push_token("BLOCK").push(block.as_millis() as i64);
        }
        builder = builder.push_token_if(noack, "NOACK");
        builder = builder.push_token("STREAMS").push_all(keys).push_all(ids);
        self.append(builder.build(), ResponseKind::MapOrPairs)
    }

    /// `XPENDING key group`
    pub fn xpending(&mut self, key: impl Into<BinaryStringValue>, group: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("XPENDING").push(key).push(group).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `XPENDING key group start end count [consumer]`
    pub fn xpending_range(
        &mut self,
        key: impl Into<BinaryStringValue>,
        group: impl Into<BinaryStringValue>,
        start: impl Into<BinaryStringValue>,
        end: impl Into<BinaryStringValue>,
        count: i64,
        consumer: Option<impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("XPENDING").push(key).push(group).push(start).push(end).push(count);
        builder = builder.push_opt(consumer);
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `XCLAIM key group consumer min-idle-time id [id...]`
    pub fn xclaim(
        &mut self,
        key: impl Into<BinaryStringValue>,
        group: impl Into<BinaryStringValue>,
        consumer: impl Into<BinaryStringValue>,
        min_idle_time_millis: i64,
        ids: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("XCLAIM")
            .push(key)
            .push(group)
            .push(consumer)
            .push(min_idle_time_millis)
            .push_all(ids)
            .build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `XCLAIM key group consumer min-idle-time id [id...] JUSTID`
    pub fn xclaim_justid(
        &mut self,
        key: impl Into<BinaryStringValue>,
        group: impl Into<BinaryStringValue>,
        consumer: impl Into<BinaryStringValue>,
        min_idle_time_millis: i64,
        ids: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("XCLAIM")
            .push(key)
            .push(group)
            .push(consumer)
            .push(min_idle_time_millis)
            .push_all(ids)
            .push_token("JUSTID")
            .build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `XAUTOCLAIM key group consumer min-idle-time start [COUNT count]`
    pub fn xautoclaim(
        &mut self,
        key: impl Into<BinaryStringValue>,
        group: impl Into<BinaryStringValue>,
        consumer: impl Into<BinaryStringValue>,
        min_idle_time_millis: i64,
        start: impl Into<BinaryStringValue>,
        count: Option<i64>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("XAUTOCLAIM")
            .push(key)
            .push(group)
            .push(consumer)
            .push(min_idle_time_millis)
            .push(start);
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `XAUTOCLAIM key group consumer min-idle-time start [COUNT count] JUSTID`
    pub fn xautoclaim_justid(
        &mut self,
        key: impl Into<BinaryStringValue>,
        group: impl Into<BinaryStringValue>,
        consumer: impl Into<BinaryStringValue>,
        min_idle_time_millis: i64,
        start: impl Into<BinaryStringValue>,
        count: Option<i64>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("XAUTOCLAIM")
            .push(key)
            .push(group)
            .push(consumer)
            .push(min_idle_time_millis)
            .push(start);
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        builder = builder.push_token("JUSTID");
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `XINFO STREAM key`
    pub fn xinfo_stream(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("XINFO").push_token("STREAM").push(key).build();
        self.append(cmd, ResponseKind::MapOrPairs)
    }

    /// `XINFO GROUPS key`
    pub fn xinfo_groups(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("XINFO").push_token("GROUPS").push(key).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `XINFO CONSUMERS key group`
    pub fn xinfo_consumers(&mut self, key: impl Into<BinaryStringValue>, group: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("XINFO").push_token("CONSUMERS").push(key).push(group).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xreadgroup_places_keys_before_ids_after_single_streams_token() {
        let mut batch = Batch::new(false);
        batch.xreadgroup("g", "c", Some(10), None, false, vec!["s1", "s2"], vec!["0", "0"]);
        let cmd = &batch.commands()[0];
        let args = cmd.arguments();
        let streams_idx = args.iter().position(|a| *a == b"STREAMS".as_slice()).unwrap();
        assert_eq!(args[streams_idx + 1], b"s1".as_slice());
        assert_eq!(args[streams_idx + 2], b"s2".as_slice());
        assert_eq!(args[streams_idx + 3], b"0".as_slice());
        assert_eq!(args[streams_idx + 4], b"0".as_slice());
        assert_eq!(args.iter().filter(|a| **a == b"STREAMS".as_slice()).count(), 1);
    }

    #[test]
    fn xgroup_create_supports_mkstream_flag() {
        let mut batch = Batch::new(false);
        batch.xgroup_create("s", "g", "$", true, None);
        let cmd = &batch.commands()[0];
        assert_eq!(cmd.name(), "XGROUP");
        assert!(cmd.arguments().contains(&b"MKSTREAM".as_slice()));
    }

    #[test]
    fn xgroup_create_emits_entriesread_after_mkstream() {
        let mut batch = Batch::new(false);
        batch.xgroup_create("s", "g", "$", true, Some(42));
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![
                b"CREATE".as_slice(),
                b"s".as_slice(),
                b"g".as_slice(),
                b"$".as_slice(),
                b"MKSTREAM".as_slice(),
                b"ENTRIESREAD".as_slice(),
                b"42".as_slice(),
            ]
        );
    }

    #[test]
    fn xgroup_setid_omits_entriesread_when_absent() {
        let mut batch = Batch::new(false);
        batch.xgroup_setid("s", "g", "0", None);
        let cmd = &batch.commands()[0];
        assert!(!cmd.arguments().contains(&b"ENTRIESREAD".as_slice()));
    }
}
