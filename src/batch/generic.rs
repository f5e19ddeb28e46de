//! Generic key-management commands: DEL/EXPIRE/TYPE/SCAN and friends.

use crate::{
    batch::Batch,
    command::{ArgBuilder, Cmd},
    convert::ResponseKind,
    value::BinaryStringValue,
};

/// Ordering direction for a `SORT`/`SORT_RO` clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// The option tokens shared by `SORT` and `SORT_RO`, assembled in the one order the server
/// accepts: `BY` then `LIMIT` then any number of `GET` patterns then `ASC|DESC` then `ALPHA`.
#[derive(Clone, Debug, Default)]
pub struct SortOptions {
    by: Option<BinaryStringValue>,
    limit: Option<(i64, i64)>,
    get: Vec<BinaryStringValue>,
    order: Option<SortOrder>,
    alpha: bool,
}

impl SortOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(mut self, pattern: impl Into<BinaryStringValue>) -> Self {
        self.by = Some(pattern.into());
        self
    }

    pub fn limit(mut self, offset: i64, count: i64) -> Self {
        self.limit = Some((offset, count));
        self
    }

    pub fn get(mut self, pattern: impl Into<BinaryStringValue>) -> Self {
        self.get.push(pattern.into());
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn alpha(mut self, alpha: bool) -> Self {
        self.alpha = alpha;
        self
    }

    fn apply(&self, mut builder: ArgBuilder) -> ArgBuilder {
        if let Some(by) = &self.by {
            builder = builder.push_token("BY").push(by.clone());
        }
        if let Some((offset, count)) = self.limit {
            builder = builder.push_token("LIMIT").push(offset).push(count);
        }
        for pattern in &self.get {
            builder = builder.push_token("GET").push(pattern.clone());
        }
        if let Some(order) = self.order {
            builder = builder.push_token(match order {
                SortOrder::Asc => "ASC",
                SortOrder::Desc => "DESC",
            });
        }
        builder = builder.push_token_if(self.alpha, "ALPHA");
        builder
    }
}

impl Batch {
    /// `DEL key [key...]`
    pub fn del(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> &mut Self {
        let cmd = ArgBuilder::new("DEL").push_all(keys).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `UNLINK key [key...]`
    pub fn unlink(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> &mut Self {
        let cmd = ArgBuilder::new("UNLINK").push_all(keys).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `EXISTS key [key...]`
    pub fn exists(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> &mut Self {
        let cmd = ArgBuilder::new("EXISTS").push_all(keys).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `EXPIRE key seconds`
    pub fn expire(&mut self, key: impl Into<BinaryStringValue>, seconds: i64) -> &mut Self {
        let cmd = ArgBuilder::new("EXPIRE").push(key).push(seconds).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `EXPIREAT key unix-time-seconds`
    pub fn expireat(&mut self, key: impl Into<BinaryStringValue>, unix_time_seconds: i64) -> &mut Self {
        let cmd = ArgBuilder::new("EXPIREAT").push(key).push(unix_time_seconds).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `PEXPIRE key milliseconds`
    pub fn pexpire(&mut self, key: impl Into<BinaryStringValue>, milliseconds: i64) -> &mut Self {
        let cmd = ArgBuilder::new("PEXPIRE").push(key).push(milliseconds).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `PEXPIREAT key unix-time-milliseconds`
    pub fn pexpireat(&mut self, key: impl Into<BinaryStringValue>, unix_time_millis: i64) -> &mut Self {
        let cmd = ArgBuilder::new("PEXPIREAT").push(key).push(unix_time_millis).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `TTL key`
    pub fn ttl(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("TTL").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `PTTL key`
    pub fn pttl(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("PTTL").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `EXPIRETIME key`
    pub fn expiretime(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("EXPIRETIME").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `PEXPIRETIME key`
    pub fn pexpiretime(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("PEXPIRETIME").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `PERSIST key`
    pub fn persist(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("PERSIST").push(key).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `TYPE key`
    pub fn key_type(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("TYPE").push(key).build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `RENAME key newkey`
    pub fn rename(&mut self, key: impl Into<BinaryStringValue>, newkey: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("RENAME").push(key).push(newkey).build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `RENAMENX key newkey`
    pub fn renamenx(&mut self, key: impl Into<BinaryStringValue>, newkey: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("RENAMENX").push(key).push(newkey).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `TOUCH key [key...]`
    pub fn touch(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> &mut Self {
        let cmd = ArgBuilder::new("TOUCH").push_all(keys).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `COPY source destination`. `DB`/`REPLACE` tokens, when present, must follow `source
    /// destination` in that order -- the server rejects any other token placement.
    pub fn copy(&mut self, source: impl Into<BinaryStringValue>, destination: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("COPY").push(source).push(destination).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `COPY source destination [DB db] [REPLACE]`
    pub fn copy_with_options(
        &mut self,
        source: impl Into<BinaryStringValue>,
        destination: impl Into<BinaryStringValue>,
        db: Option<i64>,
        replace: bool,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("COPY").push(source).push(destination);
        if let Some(db) = db {
            builder = builder.push_token("DB").push(db);
        }
        builder = builder.push_token_if(replace, "REPLACE");
        self.append(builder.build(), ResponseKind::Boolean)
    }

    /// `SORT key [BY pattern] [LIMIT offset count] [GET pattern...] [ASC|DESC] [ALPHA] [STORE
    /// destination]`. Option tokens must precede `STORE`; the server rejects `STORE` appearing
    /// before other option tokens, so [`SortOptions`] is applied in full before the trailing
    /// `STORE destination` is appended.
    pub fn sort(&mut self, key: impl Into<BinaryStringValue>, options: &SortOptions) -> &mut Self {
        let builder = options.apply(ArgBuilder::new("SORT").push(key));
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `SORT_RO key [BY pattern] [LIMIT offset count] [GET pattern...] [ASC|DESC] [ALPHA]`. The
    /// read-only variant has no `STORE` clause; the server rejects one.
    pub fn sort_ro(&mut self, key: impl Into<BinaryStringValue>, options: &SortOptions) -> &mut Self {
        let builder = options.apply(ArgBuilder::new("SORT_RO").push(key));
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `SORT key ... STORE destination`. `destination` must follow every other option token.
    pub fn sort_store(
        &mut self,
        key: impl Into<BinaryStringValue>,
        options: &SortOptions,
        destination: impl Into<BinaryStringValue>,
    ) -> &mut Self {
        let builder = options
            .apply(ArgBuilder::new("SORT").push(key))
            .push_token("STORE")
            .push(destination);
        self.append(builder.build(), ResponseKind::Integer)
    }

    /// `RANDOMKEY`
    pub fn randomkey(&mut self) -> &mut Self {
        let cmd = ArgBuilder::new("RANDOMKEY").build();
        self.append(cmd, ResponseKind::NullableText)
    }

    /// `SCAN cursor [MATCH pattern] [COUNT count] [TYPE type]`
    pub fn scan(
        &mut self,
        cursor: impl Into<BinaryStringValue>,
        match_pattern: Option<impl Into<BinaryStringValue>>,
        count: Option<i64>,
        type_filter: Option<&'static str>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("SCAN").push(cursor);
        if let Some(pattern) = match_pattern {
            builder = builder.push_token("MATCH").push(pattern);
        }
        if let Some(count) = count {
            builder = builder.push_token("COUNT").push(count);
        }
        if let Some(type_filter) = type_filter {
            builder = builder.push_token("TYPE").push_token(type_filter);
        }
        self.append(builder.build(), ResponseKind::MapOrPairs)
    }

    /// `DUMP` and `RESTORE` live in [`crate::batch::string`] alongside the other payload-bearing
    /// string operations, since both are most often paired with `GET`/`SET` in practice.
    pub fn dump(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("DUMP").push(key).build();
        self.append(cmd, ResponseKind::OpaquePassThrough)
    }

    /// `RESTORE key ttl serialized_value`. Always assembled as a binary command so the
    /// serialized payload is never forced through a text encoding.
    pub fn restore(
        &mut self,
        key: impl Into<BinaryStringValue>,
        ttl_millis: i64,
        serialized_value: impl Into<BinaryStringValue>,
    ) -> &mut Self {
        let mut cmd = Cmd::new_binary("RESTORE");
        cmd.add_argument(key).add_argument(ttl_millis).add_argument(serialized_value);
        self.append(cmd, ResponseKind::NonNullableText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_with_options_orders_db_then_replace() {
        let mut batch = Batch::new(false);
        batch.copy_with_options("src", "dst", Some(1), true);
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![b"src".as_slice(), b"dst".as_slice(), b"DB".as_slice(), b"1".as_slice(), b"REPLACE".as_slice()]
        );
    }

    #[test]
    fn restore_is_always_binary() {
        let mut batch = Batch::new(false);
        batch.restore("k", 0, "plain-text-payload");
        assert!(batch.commands()[0].is_binary());
    }

    #[test]
    fn sort_store_places_destination_after_every_option_token() {
        let mut batch = Batch::new(false);
        let options = SortOptions::new().by("weight_*").limit(0, 10).order(SortOrder::Desc).alpha(true);
        batch.sort_store("mylist", &options, "dest");
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![
                b"mylist".as_slice(),
                b"BY".as_slice(),
                b"weight_*".as_slice(),
                b"LIMIT".as_slice(),
                b"0".as_slice(),
                b"10".as_slice(),
                b"DESC".as_slice(),
                b"ALPHA".as_slice(),
                b"STORE".as_slice(),
                b"dest".as_slice(),
            ]
        );
    }
}
