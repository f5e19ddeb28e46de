//! Subscription configuration: a collaborator surface the batch builder never interprets, only
//! round-trips unchanged to the transport. Message delivery and the pub/sub callback subsystem
//! are out of scope for this crate.

use std::{
    any::Any,
    collections::{HashMap, HashSet},
    fmt,
    sync::Arc,
};

use bytes::Bytes;

/// The three channel addressing modes a subscription can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PubSubChannelKind {
    /// An exact channel name (`SUBSCRIBE`).
    Exact,
    /// A glob pattern over channel names (`PSUBSCRIBE`).
    Pattern,
    /// A cluster-sharded channel (`SSUBSCRIBE`).
    Sharded,
}

/// The signature of the message callback a [`SubscriptionConfig`] carries. The core never calls
/// it -- invocation is the pub/sub callback subsystem's job, out of scope here.
pub type MessageCallback = Arc<dyn Fn(PubSubChannelKind, Bytes, Bytes) + Send + Sync>;

/// A mapping from channel-addressing mode to the set of channel identifiers subscribed under
/// it, plus an optional message callback and an opaque context, neither of which the core ever
/// inspects or invokes.
///
/// Equality and cloning only ever touch the channel map -- `callback` and `context` are
/// intentionally not `PartialEq`-constrained, matching the source's treatment of both as inert
/// payloads the core forwards rather than interprets.
#[derive(Clone, Default)]
pub struct SubscriptionConfig {
    channels: HashMap<PubSubChannelKind, HashSet<Bytes>>,
    callback: Option<MessageCallback>,
    context: Option<Arc<dyn Any + Send + Sync>>,
}

impl SubscriptionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one channel identifier under the given addressing mode.
    pub fn add_channel(&mut self, kind: PubSubChannelKind, channel: impl Into<Bytes>) -> &mut Self {
        self.channels.entry(kind).or_default().insert(channel.into());
        self
    }

    /// The channel identifiers registered under the given addressing mode.
    pub fn channels(&self, kind: PubSubChannelKind) -> impl Iterator<Item = &Bytes> {
        self.channels.get(&kind).into_iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.values().all(HashSet::is_empty)
    }

    /// Attaches the message callback. Opaque to the core: stored and forwarded, never invoked.
    pub fn with_callback(mut self, callback: MessageCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn callback(&self) -> Option<&MessageCallback> {
        self.callback.as_ref()
    }

    /// Attaches an opaque context value. Stored and forwarded, never downcast or inspected.
    pub fn with_context(mut self, context: Arc<dyn Any + Send + Sync>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn context(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.context.as_ref()
    }
}

impl fmt::Debug for SubscriptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionConfig")
            .field("channels", &self.channels)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .field("context", &self.context.as_ref().map(|_| "<opaque>"))
            .finish()
    }
}

impl PartialEq for SubscriptionConfig {
    fn eq(&self, other: &Self) -> bool {
        self.channels == other.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_channels_unchanged() {
        let mut config = SubscriptionConfig::new();
        config.add_channel(PubSubChannelKind::Exact, Bytes::from_static(b"news"));
        config.add_channel(PubSubChannelKind::Pattern, Bytes::from_static(b"news.*"));

        let exact: Vec<_> = config.channels(PubSubChannelKind::Exact).collect();
        assert_eq!(exact, vec![&Bytes::from_static(b"news")]);
        let sharded: Vec<_> = config.channels(PubSubChannelKind::Sharded).collect();
        assert!(sharded.is_empty());
    }

    #[test]
    fn callback_and_context_are_opaque_and_excluded_from_equality() {
        let mut a = SubscriptionConfig::new();
        a.add_channel(PubSubChannelKind::Exact, Bytes::from_static(b"news"));
        let b = a.clone().with_callback(Arc::new(|_, _, _| {})).with_context(Arc::new(42u32));

        assert_eq!(a, b, "callback/context must not affect equality");
        assert!(a.callback().is_none());
        assert!(b.callback().is_some());
        assert_eq!(b.context().and_then(|c| c.downcast_ref::<u32>()).copied(), Some(42));
    }
}
