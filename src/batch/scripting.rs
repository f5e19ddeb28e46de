//! Scripting and functions commands: `FCALL`/`FCALL_RO` and the `FUNCTION` subcommand family.
//!
//! Script/function bodies are reference-counted by the server's native container; this builder
//! only ever emits the function name (or SHA1, for the collaborator `EVAL`-family commands) and
//! its arguments -- it never holds a reference to a script, so there is no possibility of a
//! cycle back through a batch.

use crate::{batch::Batch, command::{ArgBuilder, Cmd}, convert::ResponseKind, value::BinaryStringValue};

/// The policy token accepted by `FUNCTION RESTORE payload [policy]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionRestorePolicy {
    Append,
    Flush,
    Replace,
}

impl FunctionRestorePolicy {
    fn token(self) -> &'static str {
        match self {
            FunctionRestorePolicy::Append => "APPEND",
            FunctionRestorePolicy::Flush => "FLUSH",
            FunctionRestorePolicy::Replace => "REPLACE",
        }
    }
}

impl Batch {
    /// `FCALL function numkeys key [key...] arg [arg...]`
    pub fn fcall(
        &mut self,
        function: impl Into<BinaryStringValue>,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        args: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        let builder = ArgBuilder::new("FCALL")
            .push(function)
            .push(keys.len() as i64)
            .push_all(keys)
            .push_all(args);
        self.append(builder.build(), ResponseKind::OpaquePassThrough)
    }

    /// `FCALL function 0 value [value...]` -- the legacy two-argument shape where the caller
    /// supplies only values, never keys. `numkeys` is always `0` and every value is passed as an
    /// argument, not a key. Kept because the source documents this as a shape still in active
    /// use by existing callers, not a shape to migrate away from.
    pub fn fcall_args_only(
        &mut self,
        function: impl Into<BinaryStringValue>,
        values: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let builder = ArgBuilder::new("FCALL").push(function).push(0i64).push_all(values);
        self.append(builder.build(), ResponseKind::OpaquePassThrough)
    }

    /// `FCALL_RO function numkeys key [key...] arg [arg...]`
    pub fn fcall_ro(
        &mut self,
        function: impl Into<BinaryStringValue>,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
        args: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        let builder = ArgBuilder::new("FCALL_RO")
            .push(function)
            .push(keys.len() as i64)
            .push_all(keys)
            .push_all(args);
        self.append(builder.build(), ResponseKind::OpaquePassThrough)
    }

    /// `FUNCTION LIST [LIBRARYNAME name] [WITHCODE]`
    pub fn function_list(&mut self, library_name: Option<impl Into<BinaryStringValue>>, with_code: bool) -> &mut Self {
        let mut builder = ArgBuilder::new("FUNCTION").push_token("LIST");
        if let Some(name) = library_name {
            builder = builder.push_token("LIBRARYNAME").push(name);
        }
        builder = builder.push_token_if(with_code, "WITHCODE");
        self.append(builder.build(), ResponseKind::OpaquePassThrough)
    }

    /// `FUNCTION LOAD [REPLACE] code`
    pub fn function_load(&mut self, code: impl Into<BinaryStringValue>, replace: bool) -> &mut Self {
        let mut cmd = Cmd::new_binary("FUNCTION");
        cmd.add_argument("LOAD");
        if replace {
            cmd.add_argument("REPLACE");
        }
        cmd.add_argument(code);
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `FUNCTION DELETE library-name`
    pub fn function_delete(&mut self, library_name: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("FUNCTION").push_token("DELETE").push(library_name).build();
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `FUNCTION FLUSH [ASYNC|SYNC]`
    pub fn function_flush(&mut self, r#async: Option<bool>) -> &mut Self {
        let mut builder = ArgBuilder::new("FUNCTION").push_token("FLUSH");
        if let Some(is_async) = r#async {
            builder = builder.push_token(if is_async { "ASYNC" } else { "SYNC" });
        }
        self.append(builder.build(), ResponseKind::NonNullableText)
    }

    /// `FUNCTION DUMP`. Always a binary command: the serialized library payload must survive
    /// byte-exact through a later `FUNCTION RESTORE`.
    pub fn function_dump(&mut self) -> &mut Self {
        let mut cmd = Cmd::new_binary("FUNCTION");
        cmd.add_argument("DUMP");
        self.append(cmd, ResponseKind::OpaquePassThrough)
    }

    /// `FUNCTION RESTORE payload [APPEND|FLUSH|REPLACE]`. `payload` must precede the policy
    /// token and the whole command is assembled as binary to preserve the serialized blob.
    pub fn function_restore(
        &mut self,
        payload: impl Into<BinaryStringValue>,
        policy: Option<FunctionRestorePolicy>,
    ) -> &mut Self {
        let mut cmd = Cmd::new_binary("FUNCTION");
        cmd.add_argument("RESTORE");
        cmd.add_argument(payload);
        if let Some(policy) = policy {
            cmd.add_argument(policy.token());
        }
        self.append(cmd, ResponseKind::NonNullableText)
    }

    /// `FUNCTION STATS`
    pub fn function_stats(&mut self) -> &mut Self {
        let cmd = ArgBuilder::new("FUNCTION").push_token("STATS").build();
        self.append(cmd, ResponseKind::MapOrPairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fcall_emits_numkeys_before_keys_and_args() {
        let mut batch = Batch::new(false);
        batch.fcall("myfunc", vec!["k1", "k2"], vec!["a1"]);
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![b"myfunc".as_slice(), b"2".as_slice(), b"k1".as_slice(), b"k2".as_slice(), b"a1".as_slice()]
        );
    }

    #[test]
    fn fcall_args_only_uses_zero_numkeys_and_treats_values_as_args() {
        let mut batch = Batch::new(false);
        batch.fcall_args_only("myfunc", vec!["v1", "v2"]);
        let cmd = &batch.commands()[0];
        assert_eq!(cmd.arguments(), vec![b"myfunc".as_slice(), b"0".as_slice(), b"v1".as_slice(), b"v2".as_slice()]);
    }

    #[test]
    fn function_restore_places_payload_before_policy() {
        let mut batch = Batch::new(false);
        batch.function_restore(vec![0xAB, 0xCD], Some(FunctionRestorePolicy::Replace));
        let cmd = &batch.commands()[0];
        assert!(cmd.is_binary());
        assert_eq!(
            cmd.arguments(),
            vec![b"RESTORE".as_slice(), [0xAB, 0xCD].as_slice(), b"REPLACE".as_slice()]
        );
    }
}
