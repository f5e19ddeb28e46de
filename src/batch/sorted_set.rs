//! Sorted set commands: ZADD/ZRANGE and friends.

use std::time::Duration;

use crate::{
    batch::{require_non_empty, Batch},
    command::{ArgBuilder, Cmd, CommandFlags},
    convert::ResponseKind,
    error::Result,
    value::BinaryStringValue,
};

impl Batch {
    /// `ZADD key score member [score member...]`. Flattens a member-to-score map into the
    /// wire's `score1 member1 score2 member2 ...` ordering -- the score always precedes its
    /// member, the reverse of most other per-element command grammars in this category.
    pub fn zadd(
        &mut self,
        key: impl Into<BinaryStringValue>,
        members: impl IntoIterator<Item = (impl Into<BinaryStringValue>, f64)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("ZADD").push(key);
        for (member, score) in members {
            builder = builder.push(score).push(member);
        }
        self.append(builder.build(), ResponseKind::Integer)
    }

    /// `ZADD key GT|LT CH score member [score member...]`
    pub fn zadd_with_flags(
        &mut self,
        key: impl Into<BinaryStringValue>,
        members: impl IntoIterator<Item = (impl Into<BinaryStringValue>, f64)>,
        nx: bool,
        gt: bool,
        lt: bool,
        ch: bool,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("ZADD")
            .push(key)
            .push_token_if(nx, "NX")
            .push_token_if(gt, "GT")
            .push_token_if(lt, "LT")
            .push_token_if(ch, "CH");
        for (member, score) in members {
            builder = builder.push(score).push(member);
        }
        self.append(builder.build(), ResponseKind::Integer)
    }

    /// `ZADD key INCR score member` -- the single-element incremental form.
    pub fn zadd_incr(&mut self, key: impl Into<BinaryStringValue>, member: impl Into<BinaryStringValue>, score: f64) -> &mut Self {
        let cmd = ArgBuilder::new("ZADD").push(key).push_token("INCR").push(score).push(member).build();
        self.append(cmd, ResponseKind::NullableFloat)
    }

    /// `ZREM key member [member...]`
    pub fn zrem(
        &mut self,
        key: impl Into<BinaryStringValue>,
        members: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("ZREM").push(key).push_all(members).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `ZCARD key`
    pub fn zcard(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZCARD").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `ZSCORE key member`
    pub fn zscore(&mut self, key: impl Into<BinaryStringValue>, member: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZSCORE").push(key).push(member).build();
        self.append(cmd, ResponseKind::NullableFloat)
    }

    /// `ZMSCORE key member [member...]`
    pub fn zmscore(
        &mut self,
        key: impl Into<BinaryStringValue>,
        members: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("ZMSCORE").push(key).push_all(members).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `ZRANK key member`
    pub fn zrank(&mut self, key: impl Into<BinaryStringValue>, member: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZRANK").push(key).push(member).build();
        self.append(cmd, ResponseKind::IntegerOrNil)
    }

    /// `ZRANK key member WITHSCORE`
    pub fn zrank_withscore(&mut self, key: impl Into<BinaryStringValue>, member: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZRANK").push(key).push(member).push_token("WITHSCORE").build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `ZREVRANK key member`
    pub fn zrevrank(&mut self, key: impl Into<BinaryStringValue>, member: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZREVRANK").push(key).push(member).build();
        self.append(cmd, ResponseKind::IntegerOrNil)
    }

    /// `ZREVRANK key member WITHSCORE`
    pub fn zrevrank_withscore(&mut self, key: impl Into<BinaryStringValue>, member: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZREVRANK").push(key).push(member).push_token("WITHSCORE").build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `ZRANGE key start stop`
    pub fn zrange(&mut self, key: impl Into<BinaryStringValue>, start: i64, stop: i64) -> &mut Self {
        let cmd = ArgBuilder::new("ZRANGE").push(key).push(start).push(stop).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `ZRANGE key start stop WITHSCORES`
    pub fn zrange_withscores(&mut self, key: impl Into<BinaryStringValue>, start: i64, stop: i64) -> &mut Self {
        let cmd = ArgBuilder::new("ZRANGE").push(key).push(start).push(stop).push_token("WITHSCORES").build();
        self.append(cmd, ResponseKind::MapOrPairs)
    }

    /// `ZRANGE key min max BYSCORE [LIMIT offset count]`
    pub fn zrange_byscore(
        &mut self,
        key: impl Into<BinaryStringValue>,
        min: impl Into<BinaryStringValue>,
        max: impl Into<BinaryStringValue>,
        limit: Option<(i64, i64)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("ZRANGE").push(key).push(min).push(max).push_token("BYSCORE");
        if let Some((offset, count)) = limit {
            builder = builder.push_token("LIMIT").push(offset).push(count);
        }
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `ZRANGE key min max BYLEX [LIMIT offset count]`
    pub fn zrange_bylex(
        &mut self,
        key: impl Into<BinaryStringValue>,
        min: impl Into<BinaryStringValue>,
        max: impl Into<BinaryStringValue>,
        limit: Option<(i64, i64)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("ZRANGE").push(key).push(min).push(max).push_token("BYLEX");
        if let Some((offset, count)) = limit {
            builder = builder.push_token("LIMIT").push(offset).push(count);
        }
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `ZRANGESTORE destination source start stop`
    pub fn zrangestore(
        &mut self,
        destination: impl Into<BinaryStringValue>,
        source: impl Into<BinaryStringValue>,
        start: i64,
        stop: i64,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("ZRANGESTORE").push(destination).push(source).push(start).push(stop).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `ZRANGEBYSCORE key min max [LIMIT offset count]` -- the legacy (pre-`ZRANGE BYSCORE`)
    /// form, kept because servers that predate the unified `ZRANGE` still only accept this.
    pub fn zrangebyscore(
        &mut self,
        key: impl Into<BinaryStringValue>,
        min: impl Into<BinaryStringValue>,
        max: impl Into<BinaryStringValue>,
        limit: Option<(i64, i64)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("ZRANGEBYSCORE").push(key).push(min).push(max);
        if let Some((offset, count)) = limit {
            builder = builder.push_token("LIMIT").push(offset).push(count);
        }
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `ZREVRANGEBYSCORE key max min [LIMIT offset count]`
    pub fn zrevrangebyscore(
        &mut self,
        key: impl Into<BinaryStringValue>,
        max: impl Into<BinaryStringValue>,
        min: impl Into<BinaryStringValue>,
        limit: Option<(i64, i64)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("ZREVRANGEBYSCORE").push(key).push(max).push(min);
        if let Some((offset, count)) = limit {
            builder = builder.push_token("LIMIT").push(offset).push(count);
        }
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `ZRANGEBYLEX key min max [LIMIT offset count]`
    pub fn zrangebylex(
        &mut self,
        key: impl Into<BinaryStringValue>,
        min: impl Into<BinaryStringValue>,
        max: impl Into<BinaryStringValue>,
        limit: Option<(i64, i64)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("ZRANGEBYLEX").push(key).push(min).push(max);
        if let Some((offset, count)) = limit {
            builder = builder.push_token("LIMIT").push(offset).push(count);
        }
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `ZREVRANGEBYLEX key max min [LIMIT offset count]`
    pub fn zrevrangebylex(
        &mut self,
        key: impl Into<BinaryStringValue>,
        max: impl Into<BinaryStringValue>,
        min: impl Into<BinaryStringValue>,
        limit: Option<(i64, i64)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("ZREVRANGEBYLEX").push(key).push(max).push(min);
        if let Some((offset, count)) = limit {
            builder = builder.push_token("LIMIT").push(offset).push(count);
        }
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `ZREVRANGE key start stop`
    pub fn zrevrange(&mut self, key: impl Into<BinaryStringValue>, start: i64, stop: i64) -> &mut Self {
        let cmd = ArgBuilder::new("ZREVRANGE").push(key).push(start).push(stop).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `ZREVRANGE key start stop WITHSCORES`
    pub fn zrevrange_withscores(&mut self, key: impl Into<BinaryStringValue>, start: i64, stop: i64) -> &mut Self {
        let cmd = ArgBuilder::new("ZREVRANGE").push(key).push(start).push(stop).push_token("WITHSCORES").build();
        self.append(cmd, ResponseKind::MapOrPairs)
    }

    /// `ZCOUNT key min max`
    pub fn zcount(&mut self, key: impl Into<BinaryStringValue>, min: impl Into<BinaryStringValue>, max: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZCOUNT").push(key).push(min).push(max).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `ZLEXCOUNT key min max`
    pub fn zlexcount(&mut self, key: impl Into<BinaryStringValue>, min: impl Into<BinaryStringValue>, max: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZLEXCOUNT").push(key).push(min).push(max).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `ZINCRBY key increment member`
    pub fn zincrby(&mut self, key: impl Into<BinaryStringValue>, increment: f64, member: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZINCRBY").push(key).push(increment).push(member).build();
        self.append(cmd, ResponseKind::Float)
    }

    /// `ZPOPMIN key`
    pub fn zpopmin(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZPOPMIN").push(key).build();
        self.append(cmd, ResponseKind::MapOrPairs)
    }

    /// `ZPOPMIN key count`
    pub fn zpopmin_count(&mut self, key: impl Into<BinaryStringValue>, count: i64) -> &mut Self {
        let cmd = ArgBuilder::new("ZPOPMIN").push(key).push(count).build();
        self.append(cmd, ResponseKind::MapOrPairs)
    }

    /// `ZPOPMAX key`
    pub fn zpopmax(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZPOPMAX").push(key).build();
        self.append(cmd, ResponseKind::MapOrPairs)
    }

    /// `ZPOPMAX key count`
    pub fn zpopmax_count(&mut self, key: impl Into<BinaryStringValue>, count: i64) -> &mut Self {
        let cmd = ArgBuilder::new("ZPOPMAX").push(key).push(count).build();
        self.append(cmd, ResponseKind::MapOrPairs)
    }

    /// `BZPOPMIN key [key...] timeout`
    pub fn bzpopmin(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>, timeout: Duration) -> &mut Self {
        let cmd = ArgBuilder::new("BZPOPMIN")
            .assert_flags(CommandFlags::new(true, true), true)
            .push_all(keys)
            .push(timeout.as_secs_f64())
            .build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `BZPOPMAX key [key...] timeout`
    pub fn bzpopmax(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>, timeout: Duration) -> &mut Self {
        let cmd = ArgBuilder::new("BZPOPMAX")
            .assert_flags(CommandFlags::new(true, true), true)
            .push_all(keys)
            .push(timeout.as_secs_f64())
            .build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `ZMPOP numkeys key [key...] MIN|MAX [COUNT count]`
    pub fn zmpop(
        &mut self,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        min: bool,
        count: Option<i64>,
    ) -> &mut Self {
        let cmd = zmpop_command("ZMPOP", None, keys, min, count);
        self.append(cmd, ResponseKind::MapOrPairs)
    }

    /// `BZMPOP timeout numkeys key [key...] MIN|MAX [COUNT count]`
    pub fn bzmpop(
        &mut self,
        timeout: Duration,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        min: bool,
        count: Option<i64>,
    ) -> &mut Self {
        let cmd = zmpop_command("BZMPOP", Some(timeout), keys, min, count);
        self.append(cmd, ResponseKind::MapOrPairs)
    }

    /// `ZRANDMEMBER key`
    pub fn zrandmember(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("ZRANDMEMBER").push(key).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `ZRANDMEMBER key count [WITHSCORES]`
    pub fn zrandmember_count(&mut self, key: impl Into<BinaryStringValue>, count: i64, with_scores: bool) -> &mut Self {
        let cmd = ArgBuilder::new("ZRANDMEMBER")
            .push(key)
            .push(count)
            .push_token_if(with_scores, "WITHSCORES")
            .build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `ZSCAN key cursor [MATCH pattern] [COUNT count]`
    pub fn zscan(
        &mut self,
        key: impl Into<BinaryStringValue>,
        cursor: impl Into<BinaryStringValue>,
        match_pattern: Option<impl Into<BinaryStringValue>>,
        count: Option<i64>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("ZSCAN").push(key).push(cursor);
        if let Some(pattern) = match_pattern {
            builder = builder.push_token("MATCH").push(pattern);
        }
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        self.append(builder.build(), ResponseKind::MapOrPairs)
    }

    /// `ZDIFF numkeys key [key...] [WITHSCORES]`
    pub fn zdiff(
        &mut self,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        with_scores: bool,
    ) -> &mut Self {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        let cmd = ArgBuilder::new("ZDIFF")
            .push(keys.len() as i64)
            .push_all(keys)
            .push_token_if(with_scores, "WITHSCORES")
            .build();
        self.append(cmd, if with_scores { ResponseKind::MapOrPairs } else { ResponseKind::ArrayOfNullableText })
    }

    /// `ZDIFFSTORE destination numkeys key [key...]`
    pub fn zdiffstore(
        &mut self,
        destination: impl Into<BinaryStringValue>,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        let cmd = ArgBuilder::new("ZDIFFSTORE")
            .push(destination)
            .push(keys.len() as i64)
            .push_all(keys)
            .build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `ZINTER numkeys key [key...] [WITHSCORES]`
    pub fn zinter(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>, with_scores: bool) -> &mut Self {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        let cmd = ArgBuilder::new("ZINTER")
            .push(keys.len() as i64)
            .push_all(keys)
            .push_token_if(with_scores, "WITHSCORES")
            .build();
        self.append(cmd, if with_scores { ResponseKind::MapOrPairs } else { ResponseKind::ArrayOfNullableText })
    }

    /// `ZINTERCARD numkeys key [key...] [LIMIT limit]`
    pub fn zintercard(
        &mut self,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        limit: Option<i64>,
    ) -> Result<&mut Self> {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        require_non_empty(&keys, "zintercard keys")?;
        let mut builder = ArgBuilder::new("ZINTERCARD").push(keys.len() as i64).push_all(keys);
        if let Some(limit) = limit {
            builder = builder.push_token("LIMIT").push(limit);
        }
        Ok(self.append(builder.build(), ResponseKind::Integer))
    }

    /// `ZINTERSTORE destination numkeys key [key...]`
    pub fn zinterstore(
        &mut self,
        destination: impl Into<BinaryStringValue>,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        let cmd = ArgBuilder::new("ZINTERSTORE")
            .push(destination)
            .push(keys.len() as i64)
            .push_all(keys)
            .build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `ZUNION numkeys key [key...] [WITHSCORES]`
    pub fn zunion(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>, with_scores: bool) -> &mut Self {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        let cmd = ArgBuilder::new("ZUNION")
            .push(keys.len() as i64)
            .push_all(keys)
            .push_token_if(with_scores, "WITHSCORES")
            .build();
        self.append(cmd, if with_scores { ResponseKind::MapOrPairs } else { ResponseKind::ArrayOfNullableText })
    }

    /// `ZUNIONSTORE destination numkeys key [key...]`
    pub fn zunionstore(
        &mut self,
        destination: impl Into<BinaryStringValue>,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        let cmd = ArgBuilder::new("ZUNIONSTORE")
            .push(destination)
            .push(keys.len() as i64)
            .push_all(keys)
            .build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `ZREMRANGEBYRANK key start stop`
    pub fn zremrangebyrank(&mut self, key: impl Into<BinaryStringValue>, start: i64, stop: i64) -> &mut Self {
        let cmd = ArgBuilder::new("ZREMRANGEBYRANK").push(key).push(start).push(stop).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `ZREMRANGEBYSCORE key min max`
    pub fn zremrangebyscore(
        &mut self,
        key: impl Into<BinaryStringValue>,
        min: impl Into<BinaryStringValue>,
        max: impl Into<BinaryStringValue>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("ZREMRANGEBYSCORE").push(key).push(min).push(max).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `ZREMRANGEBYLEX key min max`
    pub fn zremrangebylex(
        &mut self,
        key: impl Into<BinaryStringValue>,
        min: impl Into<BinaryStringValue>,
        max: impl Into<BinaryStringValue>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("ZREMRANGEBYLEX").push(key).push(min).push(max).build();
        self.append(cmd, ResponseKind::Integer)
    }
}

/// Shared assembly for `ZMPOP`/`BZMPOP`: identical `numkeys key... MIN|MAX [COUNT n]` tail, with
/// `BZMPOP` additionally prefixing a timeout before the `numkeys` token.
fn zmpop_command(
    name: &'static str,
    timeout: Option<Duration>,
    keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    min: bool,
    count: Option<i64>,
) -> Cmd {
    let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
    let min_max = if min { "MIN" } else { "MAX" };
    let mut builder = ArgBuilder::new(name).assert_flags(CommandFlags::new(timeout.is_some(), false), timeout.is_some());
    if let Some(timeout) = timeout {
        builder = builder.push(timeout.as_secs_f64());
    }
    builder = builder.push(keys.len() as i64).push_all(keys).push_token(min_max);
    if let Some(count) = count {
        builder = builder.push_token("COUNT").push(count);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zadd_orders_score_before_member() {
        let mut batch = Batch::new(false);
        batch.zadd("zs", vec![("alice", 1.0), ("bob", 2.0)]);
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![b"zs".as_slice(), b"1".as_slice(), b"alice".as_slice(), b"2".as_slice(), b"bob".as_slice()]
        );
    }

    #[test]
    fn zmpop_derives_numkeys_with_no_timeout() {
        let mut batch = Batch::new(false);
        batch.zmpop(vec!["k1", "k2"], true, None);
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![b"2".as_slice(), b"k1".as_slice(), b"k2".as_slice(), b"MIN".as_slice()]
        );
    }

    #[test]
    fn bzmpop_prefixes_timeout_before_numkeys() {
        let mut batch = Batch::new(false);
        batch.bzmpop(Duration::from_secs(2), vec!["k1"], false, Some(5));
        let cmd = &batch.commands()[0];
        assert_eq!(cmd.arguments()[0], b"2".as_slice());
        assert_eq!(cmd.arguments()[1], b"1".as_slice());
        assert_eq!(cmd.arguments()[2], b"k1".as_slice());
        assert_eq!(cmd.arguments()[3], b"MAX".as_slice());
        assert_eq!(cmd.arguments()[4], b"COUNT".as_slice());
        assert_eq!(cmd.arguments()[5], b"5".as_slice());
    }
}
