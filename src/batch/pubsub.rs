//! Publish/subscribe commands the batch builder can assemble. Subscription *registration* and
//! message delivery are handled by the out-of-scope pub/sub callback subsystem
//! ([`crate::subscription`]); this module only covers the request/reply commands that fit the
//! batch model (`PUBLISH`, `SPUBLISH`, and the `PUBSUB` introspection subcommands).

use crate::{batch::Batch, command::ArgBuilder, convert::ResponseKind, value::BinaryStringValue};

impl Batch {
    /// `PUBLISH channel message`
    pub fn publish(&mut self, channel: impl Into<BinaryStringValue>, message: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("PUBLISH").push(channel).push(message).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `SPUBLISH shardchannel message`
    pub fn spublish(&mut self, shard_channel: impl Into<BinaryStringValue>, message: impl Into<BinaryStringValue>) -> &mut Self {
        let cmd = ArgBuilder::new("SPUBLISH").push(shard_channel).push(message).build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `PUBSUB CHANNELS [pattern]`
    pub fn pubsub_channels(&mut self, pattern: Option<impl Into<BinaryStringValue>>) -> &mut Self {
        let builder = ArgBuilder::new("PUBSUB").push_token("CHANNELS").push_opt(pattern);
        self.append(builder.build(), ResponseKind::ArrayOfNullableText)
    }

    /// `PUBSUB NUMPAT`
    pub fn pubsub_numpat(&mut self) -> &mut Self {
        let cmd = ArgBuilder::new("PUBSUB").push_token("NUMPAT").build();
        self.append(cmd, ResponseKind::Integer)
    }

    /// `PUBSUB NUMSUB [channel...]`
    pub fn pubsub_numsub(&mut self, channels: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> &mut Self {
        let builder = ArgBuilder::new("PUBSUB").push_token("NUMSUB").push_all(channels);
        self.append(builder.build(), ResponseKind::MapOrPairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pubsub_channels_omits_pattern_token_when_absent() {
        let mut batch = Batch::new(false);
        let none: Option<&str> = None;
        batch.pubsub_channels(none);
        let cmd = &batch.commands()[0];
        assert_eq!(cmd.arguments(), vec![b"CHANNELS".as_slice()]);
    }

    #[test]
    fn publish_preserves_argument_order() {
        let mut batch = Batch::new(false);
        batch.publish("news", "hello");
        let cmd = &batch.commands()[0];
        assert_eq!(cmd.name(), "PUBLISH");
        assert_eq!(cmd.arguments(), vec![b"news".as_slice(), b"hello".as_slice()]);
    }
}
