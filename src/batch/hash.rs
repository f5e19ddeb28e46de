//! Hash commands: HSET/HGET and friends.

use crate::{
    batch::Batch,
    command::ArgBuilder,
    convert::ResponseKind,
    value::BinaryStringValue,
};

impl Batch {
    /// `HSET key field value [field value...]`
    pub fn hset(
        &mut self,
        key: impl Into<BinaryStringValue>,
        fields: impl IntoIterator<Item = (impl Into<BinaryStringValue>, impl Into<BinaryStringValue>)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("HSET").push(key);
        for (field, value) in fields {
            builder = builder.push(field).push(value);
        }
        self.append(builder.build(), ResponseKind::Integer)
    }

    /// `HSETNX key field value`
    pub fn hsetnx(
        &mut self,
        key: impl Into<BinaryStringValue>,
        field: impl Into<BinaryStringValue>,
        value: impl Into<BinaryStringValue>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("HSETNX").push(key).push(field).push(value).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `HGET key field`
    pub fn hget(&mut self, key: impl Into<BinaryStringValue>, field: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("HGET").push(key).push(field).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `HDEL key field [field...]`
    pub fn hdel(
        &mut self,
        key: impl Into<BinaryStringValue>,
        fields: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("HDEL").push(key).push_all(fields).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `HEXISTS key field`
    pub fn hexists(&mut self, key: impl Into<BinaryStringValue>, field: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("HEXISTS").push(key).push(field).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `HLEN key`
    pub fn hlen(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("HLEN").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `HSTRLEN key field`
    pub fn hstrlen(&mut self, key: impl Into<BinaryStringValue>, field: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("HSTRLEN").push(key).push(field).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `HKEYS key`
    pub fn hkeys(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("HKEYS").push(key).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `HVALS key`
    pub fn hvals(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("HVALS").push(key).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `HGETALL key`
    pub fn hgetall(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("HGETALL").push(key).build();
        self.append(cmd, ResponseKind::MapOrPairs)
    }

    /// `HMGET key field [field...]`
    pub fn hmget(
        &mut self,
        key: impl Into<BinaryStringValue>,
        fields: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("HMGET").push(key).push_all(fields).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `HINCRBY key field increment`
    pub fn hincrby(
        &mut self,
        key: impl Into<BinaryStringValue>,
        field: impl Into<BinaryStringValue>,
        increment: i64,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("HINCRBY").push(key).push(field).push(increment).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `HINCRBYFLOAT key field increment`
    pub fn hincrbyfloat(
        &mut self,
        key: impl Into<BinaryStringValue>,
        field: impl Into<BinaryStringValue>,
        increment: f64,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("HINCRBYFLOAT").push(key).push(field).push(increment).build();
        self.append(cmd, ResponseKind::Float)
    }

    /// `HRANDFIELD key`
    pub fn hrandfield(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("HRANDFIELD").push(key).build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `HRANDFIELD key count [WITHVALUES]`
    pub fn hrandfield_count(
        &mut self,
        key: impl Into<BinaryStringValue>,
        count: i64,
        with_values: bool,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("HRANDFIELD")
            .push(key)
            .push(count)
            .push_token_if(with_values, "WITHVALUES")
            .build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `HSCAN key cursor [MATCH pattern] [COUNT count] [NOVALUES]`
    pub fn hscan(
        &mut self,
        key: impl Into<BinaryStringValue>,
        cursor: impl Into<BinaryStringValue>,
        match_pattern: Option<impl Into<BinaryStringValue>>,
        count: Option<i64>,
        no_values: bool,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("HSCAN").push(key).push(cursor);
        if let Some(pattern) = match_pattern {
            builder = builder.push_token("MATCH").push(pattern);
        }
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        builder = builder.push_token_if(no_values, "NOVALUES");
        self.append(builder.build(), ResponseKind::MapOrPairs)
    }

    /// `HTTL key FIELDS numfields field [field...]`
    pub fn httl(
        &mut self,
        key: impl Into<BinaryStringValue>,
        fields: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        self.append(hash_fields_command("HTTL", key, fields), ResponseKind::ArrayOfNullableText)
    }

    /// `HPTTL key FIELDS numfields field [field...]`
    pub fn hpttl(
        &mut self,
        key: impl Into<BinaryStringValue>,
        fields: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        self.append(hash_fields_command("HPTTL", key, fields), ResponseKind::ArrayOfNullableText)
    }

    /// `HEXPIRETIME key FIELDS numfields field [field...]`
    pub fn hexpiretime(
        &mut self,
        key: impl Into<BinaryStringValue>,
        fields: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        self.append(hash_fields_command("HEXPIRETIME", key, fields), ResponseKind::ArrayOfNullableText)
    }

    /// `HPEXPIRETIME key FIELDS numfields field [field...]`
    pub fn hpexpiretime(
        &mut self,
        key: impl Into<BinaryStringValue>,
        fields: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        self.append(hash_fields_command("HPEXPIRETIME", key, fields), ResponseKind::ArrayOfNullableText)
    }

    /// `HEXPIRE key seconds FIELDS numfields field [field...]`
    pub fn hexpire(
        &mut self,
        key: impl Into<BinaryStringValue>,
        seconds: i64,
        fields: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let fields: Vec<BinaryStringValue> = fields.into_iter().map(Into::into).collect();
        let cmd = ArgBuilder::new("HEXPIRE")
            .push(key)
            .push(seconds)
            .push_token("FIELDS")
            .push(fields.len() as i64)
            .push_all(fields)
            .build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `HPERSIST key FIELDS numfields field [field...]`
    pub fn hpersist(
        &mut self,
        key: impl Into<BinaryStringValue>,
        fields: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        self.append(hash_fields_command("HPERSIST", key, fields), ResponseKind::ArrayOfNullableText)
    }
}

/// The shared `cmd key FIELDS numfields field [field...]` grammar used by the hash field-TTL
/// family. `numfields` is derived from the field list rather than taken as a caller-supplied
/// argument, so it can never drift out of sync with the list itself.
fn hash_fields_command(
    name: &'static str,
    key: impl Into<BinaryStringValue>,
    fields: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
) -> crate::command::Cmd {
    let fields: Vec<BinaryStringValue> = fields.into_iter().map(Into::into).collect();
    ArgBuilder::new(name)
        .push(key)
        .push_token("FIELDS")
        .push(fields.len() as i64)
        .push_all(fields)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn httl_derives_numfields_from_list() {
        let mut batch = Batch::new(false);
        batch.httl("h", vec!["a", "b", "c"]);
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![b"h".as_slice(), b"FIELDS".as_slice(), b"3".as_slice(), b"a".as_slice(), b"b".as_slice(), b"c".as_slice()]
        );
    }

    #[test]
    fn hset_flattens_field_value_pairs_in_order() {
        let mut batch = Batch::new(false);
        batch.hset("h", vec![("f1", "v1"), ("f2", "v2")]);
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![b"h".as_slice(), b"f1".as_slice(), b"v1".as_slice(), b"f2".as_slice(), b"v2".as_slice()]
        );
    }
}
