//! Bitmap commands: SETBIT/BITCOUNT and friends.

use crate::{
    batch::Batch,
    command::ArgBuilder,
    convert::ResponseKind,
    value::BinaryStringValue,
};

impl Batch {
    /// `SETBIT key offset value`
    pub fn setbit(&mut self, key: impl Into<BinaryStringValue>, offset: i64, value: bool) -> &mut Self {
        let cmd = ArgBuilder::new("SETBIT")
            .push(key)
            .push(offset)
            .push(if value { 1i64 } else { 0i64 })
            .build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `GETBIT key offset`
    pub fn getbit(&mut self, key: impl Into<BinaryStringValue>, offset: i64) -> &mut Self {
        let cmd = ArgBuilder::new("GETBIT").push(key).push(offset).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `BITCOUNT key` -- the zero-argument overload.
    pub fn bitcount(&mut self, key: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("BITCOUNT").push(key).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `BITCOUNT key start end` -- the two-argument overload.
    pub fn bitcount_range(&mut self, key: impl Into<BinaryStringValue>, start: i64, end: i64) -> &mut Self {
        let cmd = ArgBuilder::new("BITCOUNT").push(key).push(start).push(end).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `BITCOUNT key start end BYTE|BIT` -- the three-argument overload. The indexing-unit
    /// token, when present, must be last.
    pub fn bitcount_range_unit(
        &mut self,
        key: impl Into<BinaryStringValue>,
        start: i64,
        end: i64,
        unit_bit: bool,
    ) -> &mut Self {
        let unit = if unit_bit { "BIT" } else { "BYTE" };
        let cmd = ArgBuilder::new("BITCOUNT").push(key).push(start).push(end).push_token(unit).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `BITOP operation destkey key [key...]`
    pub fn bitop(
        &mut self,
        operation: &'static str,
        destkey: impl Into<BinaryStringValue>,
        keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("BITOP")
            .push_token(operation)
            .push(destkey)
            .push_all(keys)
            .build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `BITPOS key bit` -- base overload.
    pub fn bitpos(&mut self, key: impl Into<BinaryStringValue>, bit: bool) -> &mut Self {
        let cmd = ArgBuilder::new("BITPOS").push(key).push(if bit { 1i64 } else { 0i64 }).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `BITPOS key bit start [end [BYTE|BIT]]`. The unit token, when present, requires both
    /// `start` and `end` -- it cannot be supplied without `end`.
    pub fn bitpos_range(
        &mut self,
        key: impl Into<BinaryStringValue>,
        bit: bool,
        start: i64,
        end: Option<(i64, Option<bool>)>,
    ) -> &mut Self {
        let mut builder = ArgBuilder::new("BITPOS").push(key).push(if bit { 1i64 } else { 0i64 }).push(start);
        if let Some((end, unit_bit)) = end {
            builder = builder.push(end);
            if let Some(unit_bit) = unit_bit {
                builder = builder.push_token(if unit_bit { "BIT" } else { "BYTE" });
            }
        }
        self.append(builder.build(), ResponseKind::Integer)
    }

    /// `BITFIELD key [GET|SET|INCRBY|OVERFLOW ...]` -- raw subcommand tokens, already assembled
    /// by the caller, to avoid re-deriving BITFIELD's mini-grammar inside this builder.
    pub fn bitfield(
        &mut self,
        key: impl Into<BinaryStringValue>,
        subcommands: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("BITFIELD").push(key).push_all(subcommands).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }

    /// `BITFIELD_RO key GET ...`
    pub fn bitfield_ro(
        &mut self,
        key: impl Into<BinaryStringValue>,
        subcommands: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("BITFIELD_RO").push(key).push_all(subcommands).build();
        self.append(cmd, ResponseKind::ArrayOfNullableText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitcount_three_overloads_emit_correct_arity() {
        let mut batch = Batch::new(false);
        batch.bitcount("k");
        batch.bitcount_range("k", 0, -1);
        batch.bitcount_range_unit("k", 0, -1, true);
        assert_eq!(batch.commands()[0].arity(), 1);
        assert_eq!(batch.commands()[1].arity(), 3);
        assert_eq!(batch.commands()[2].arity(), 4);
        assert_eq!(batch.commands()[2].arguments().last().unwrap(), &b"BIT".as_slice());
    }

    #[test]
    fn bitop_places_operation_token_before_destkey() {
        let mut batch = Batch::new(false);
        batch.bitop("AND", "dest", vec!["k1", "k2"]);
        let cmd = &batch.commands()[0];
        assert_eq!(
            cmd.arguments(),
            vec![b"AND".as_slice(), b"dest".as_slice(), b"k1".as_slice(), b"k2".as_slice()]
        );
    }
}
