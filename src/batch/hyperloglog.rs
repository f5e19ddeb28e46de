//! HyperLogLog commands: PFADD/PFCOUNT/PFMERGE.

use crate::{
    batch::{require_non_empty, Batch},
    command::ArgBuilder,
    convert::ResponseKind,
    error::Result,
    value::BinaryStringValue,
};

impl Batch {
    /// `PFADD key [element...]`
    pub fn pfadd(
        &mut self,
        key: impl Into<BinaryStringValue>,
        elements: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("PFADD").push(key).push_all(elements).build();
        self.append(cmd, ResponseKind::Boolean)
    }

    /// `PFCOUNT key [key...]`
    pub fn pfcount(&mut self, keys: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> Result<&mut Self> {
        let keys: Vec<BinaryStringValue> = keys.into_iter().map(Into::into).collect();
        require_non_empty(&keys, "pfcount keys")?;
        let cmd = ArgBuilder::new("PFCOUNT").push_all(keys).build();
        Ok(self.append(cmd, ResponseKind::Integer))
    }

    /// `PFMERGE destkey [sourcekey...]`
    pub fn pfmerge(
        &mut self,
        destkey: impl Into<BinaryStringValue>,
        sourcekeys: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let cmd = ArgBuilder::new("PFMERGE").push(destkey).push_all(sourcekeys).build();
        self.append(cmd, ResponseKind::NonNullableText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pfcount_rejects_empty_key_list() {
        let mut batch = Batch::new(false);
        let empty: Vec<&str> = vec![];
        assert!(batch.pfcount(empty).is_err());
    }

    #[test]
    fn pfmerge_preserves_source_order() {
        let mut batch = Batch::new(false);
        batch.pfmerge("dest", vec!["a", "b"]);
        let cmd = &batch.commands()[0];
        assert_eq!(cmd.arguments(), vec![b"dest".as_slice(), b"a".as_slice(), b"b".as_slice()]);
    }
}
