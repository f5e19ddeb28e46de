//! Server administration commands: `INFO`, `CONFIG`, `FLUSH{DB,ALL}`, `WAIT`, `SELECT`, `MOVE`,
//! and the `OBJECT` introspection subcommands.

use crate::{batch::Batch, command::ArgBuilder, convert::ResponseKind, value::BinaryStringValue};

impl Batch {
    /// `INFO [section...]`
    pub fn info(&mut self, sections: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> &mut Self {
        let cmd = ArgBuilder::new("INFO").push_all(sections).build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `DBSIZE`
    pub fn dbsize(&mut self) -> &mut Self {
        let cmd = ArgBuilder::new("DBSIZE").build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `LASTSAVE`
    pub fn lastsave(&mut self) -> &mut Self {
        let cmd = ArgBuilder::new("LASTSAVE").build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `FLUSHDB [ASYNC|SYNC]`
    pub fn flushdb(&mut self, r#async: Option<bool>) -> &mut Self {
        let mut builder = ArgBuilder::new("FLUSHDB");
        if let Some(is_async) = r#async {
            builder = builder.push_token(if is_async { "ASYNC" } else { "SYNC" });
        }
        self.append(builder.build(), ResponseKind::NonNullableText)
    }

    /// `FLUSHALL [ASYNC|SYNC]`
    pub fn flushall(&mut self, r#async: Option<bool>) -> &mut Self {
        let mut builder = ArgBuilder::new("FLUSHALL");
        if let Some(is_async) = r#async {
            builder = builder.push_token(if is_async { "ASYNC" } else { "SYNC" });
        }
        self.append(builder.build(), ResponseKind::NonNullableText)
    }

    /// `CONFIG GET parameter [parameter...]`
    pub fn config_get(&mut self, parameters: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> &mut Self {
        let builder = ArgBuilder::new("CONFIG").push_token("GET").push_all(parameters);
        self.append(builder.build(), ResponseKind::MapOrPairs)
    }

    /// `CONFIG SET parameter value [parameter value...]`
    pub fn config_set(
        &mut self,
        pairs: impl IntoIterator<Item = (impl Into<BinaryStringValue>, impl Into<BinaryStringValue>)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("CONFIG").push_token("SET");
        for (param, value) in pairs {
            builder = builder.push(param).push(value);
        }
        self.append(builder.build(), ResponseKind::NonNullableText)
    }

    /// `CONFIG RESETSTAT`
    pub fn config_resetstat(&mut self) -> &mut Self {
        let cmd = ArgBuilder::new("CONFIG").push_token("RESETSTAT").build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `LOLWUT [VERSION n]`
    pub fn lolwut(&mut self, version: Option<i64>) -> &mut Self {
        let mut builder = ArgBuilder::new("LOLWUT");
        if let Some(version) = version {
            builder = builder.push_token("VERSION").push(version);
        }
        self.append(builder.build(), ResponseKind::NonNullableText)
    }

    /// `WAIT numreplicas timeout`
    pub fn wait(&mut self, numreplicas: i64, timeout_millis: i64) -> &mut Self {
        let cmd = ArgBuilder::new("WAIT").push(numreplicas).push(timeout_millis).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `SELECT index`
    pub fn select(&mut self, index: i64) -> &mut Self {
        let cmd = ArgBuilder::new("SELECT").push(index).build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `MOVE key db`
    pub fn move_key(&mut self, key: impl Into<BinaryStringValue>, db: i64) -> &mut Self {
        let cmd = ArgBuilder::new("MOVE").push(key).push(db).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `OBJECT ENCODING key`
    pub fn object_encoding(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("OBJECT").push_token("ENCODING").push(key).build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `OBJECT FREQ key`
    pub fn object_freq(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("OBJECT").push_token("FREQ").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `OBJECT IDLETIME key`
    pub fn object_idletime(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("OBJECT").push_token("IDLETIME").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `OBJECT REFCOUNT key`
    pub fn object_refcount(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("OBJECT").push_token("REFCOUNT").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_get_forwards_every_parameter() {
        let mut batch = Batch::new(false);
        batch.config_get(vec!["maxmemory", "maxmemory-policy"]);
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![b"GET".as_slice(), b"maxmemory".as_slice(), b"maxmemory-policy".as_slice()]
        );
    }

    #[test]
    fn flushdb_omits_async_token_when_unspecified() {
        let mut batch = Batch::new(false);
        batch.flushdb(None);
        assert!(batch.commands()[0].arguments().is_empty());
    }

    #[test]
    fn object_encoding_assembles_subcommand_then_key() {
        let mut batch = Batch::new(false);
        batch.object_encoding("k");
        let cmd = &batch.commands()[0];
        assert_eq!(cmd.arguments(), vec![b"ENCODING".as_slice(), b"k".as_slice()]);
    }
}
