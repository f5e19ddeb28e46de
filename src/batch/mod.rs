//! The batch builder (component C3) and batch envelope (component C4): a fluent, single-
//! threaded-cooperative surface of one method per logical server operation, plus the envelope
//! that carries the assembled command list to the execution dispatcher.
//!
//! # State machine
//!
//! The spec describes an `Open -> Submitted -> Completed | Failed` state machine. Rather than
//! track that as a runtime enum on `Batch` (which would need a panic or an error return on every
//! one of the ~300 builder methods to reject post-submission appends), this crate enforces it
//! with ownership: [`crate::dispatcher::exec`] takes a `Batch` by value. Once a batch has been
//! handed to `exec`, the caller no longer holds a `Batch` to append to -- the type system makes
//! "Submitted" unrepresentable as a mistake rather than a checked runtime error. `Completed` and
//! `Failed` are the two variants of the `Result` that `exec` returns.

mod bitmap;
mod generic;
mod geo;
mod hash;
mod hyperloglog;
mod list;
mod pubsub;
mod scripting;
mod server;
mod set;
mod sorted_set;
mod stream;
mod string;

pub use self::generic::{SortOptions, SortOrder};
pub use self::geo::GeoUnit;
pub use self::scripting::FunctionRestorePolicy;

use crate::{
    command::{ArgBuilder, Cmd},
    convert::ResponseKind,
    error::{Error, Result},
    options::BatchOptions,
    subscription::SubscriptionConfig,
    value::BinaryStringValue,
};

/// Per-batch state carried only for atomic cluster batches: the options envelope from spec §6.
#[derive(Clone, Debug, Default)]
struct ClusterContext {
    options: BatchOptions,
}

/// The batch builder and envelope (components C3 and C4 combined into one owned value, per the
/// source's own observation that `Transaction`/`ClusterTransaction` are just degenerate
/// `is_atomic = true` batches -- modeled here as constructors, not distinct types).
#[derive(Clone, Debug)]
pub struct Batch {
    is_atomic: bool,
    commands: Vec<Cmd>,
    converters: Vec<ResponseKind>,
    binary_output: bool,
    cluster: Option<ClusterContext>,
    subscription: Option<SubscriptionConfig>,
}

impl Batch {
    /// A standalone (non-cluster) batch. `is_atomic = true` executes as a MULTI/EXEC
    /// transaction against the primary; `is_atomic = false` executes as a pipeline.
    pub fn new(is_atomic: bool) -> Self {
        Self {
            is_atomic,
            commands: Vec::new(),
            converters: Vec::new(),
            binary_output: false,
            cluster: None,
            subscription: None,
        }
    }

    /// A cluster batch, carrying the routing/retry/timeout options envelope described in spec
    /// §6. `is_atomic = true` requires all referenced keys to hash to the same slot (the core
    /// does not enforce this; a `CROSSSLOT` server error surfaces through the dispatcher).
    pub fn new_cluster(is_atomic: bool) -> Self {
        Self {
            is_atomic,
            commands: Vec::new(),
            converters: Vec::new(),
            binary_output: false,
            cluster: Some(ClusterContext::default()),
            subscription: None,
        }
    }

    /// A standalone atomic transaction. Equivalent to `Batch::new(true)`; kept as a named
    /// constructor because the source's historical `Transaction` type is exactly this.
    pub fn transaction() -> Self {
        Self::new(true)
    }

    /// A cluster atomic transaction. Equivalent to `Batch::new_cluster(true)`.
    pub fn cluster_transaction() -> Self {
        Self::new_cluster(true)
    }

    /// Attaches (or replaces) the cluster options envelope. Has no effect on standalone
    /// batches other than upgrading them to carry cluster options -- callers normally build a
    /// cluster batch with [`Batch::new_cluster`] instead.
    pub fn with_options(&mut self, options: BatchOptions) -> &mut Self {
        self.cluster = Some(ClusterContext { options });
        self
    }

    /// The cluster options envelope, if this is a cluster batch.
    pub fn options(&self) -> Option<&BatchOptions> {
        self.cluster.as_ref().map(|c| &c.options)
    }

    /// Attaches the pub/sub subscription configuration this batch's connection should carry.
    /// The core never interprets it -- it is only held here so the dispatcher can round-trip it
    /// to the transport unchanged (see `SPEC_FULL.md` §1, "Subscription configuration").
    pub fn with_subscription(&mut self, subscription: SubscriptionConfig) -> &mut Self {
        self.subscription = Some(subscription);
        self
    }

    pub fn subscription(&self) -> Option<&SubscriptionConfig> {
        self.subscription.as_ref()
    }

    /// Sets the sticky binary-output decoding mode. This is a decoding-time flag only: it does
    /// not rewrite commands already appended, it only changes how the dispatcher renders bulk
    /// string replies when it later applies converters to the response vector (see
    /// `SPEC_FULL.md` §4 for the reasoning -- the source is ambiguous here and this crate
    /// resolves it in favor of decode-time application).
    pub fn with_binary_output(&mut self) -> &mut Self {
        self.binary_output = true;
        self
    }

    pub fn binary_output(&self) -> bool {
        self.binary_output
    }

    /// Whether this batch executes atomically (MULTI/EXEC) or as a pipeline.
    pub fn is_atomic(&self) -> bool {
        self.is_atomic
    }

    /// The number of commands appended so far.
    pub fn size(&self) -> usize {
        debug_assert_eq!(self.commands.len(), self.converters.len());
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// A read-only snapshot of the appended commands, in append order.
    pub fn commands(&self) -> &[Cmd] {
        &self.commands
    }

    pub(crate) fn converters(&self) -> &[ResponseKind] {
        &self.converters
    }

    /// Appends a command plus its response converter. This is the single choke point every
    /// builder method funnels through, maintaining the `len(commands) == len(converters)`
    /// invariant unconditionally.
    fn append(&mut self, cmd: Cmd, kind: ResponseKind) -> &mut Self {
        self.commands.push(cmd);
        self.converters.push(kind);
        self
    }

    /// The escape hatch: an arbitrary command whose first argument is the command name.
    /// Response shape is unknown, so it is decoded as an opaque pass-through value.
    pub fn custom_command(
        &mut self,
        args: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> Result<&mut Self> {
        let mut parts: Vec<BinaryStringValue> = args.into_iter().map(Into::into).collect();
        if parts.is_empty() {
            return Err(Error::argument("custom_command requires at least a command name"));
        }
        let name_value = parts.remove(0);
        let name = name_value.as_text().unwrap_or("CUSTOM").to_owned();
        let cmd = Cmd::from_parts(name, parts);
        Ok(self.append(cmd, ResponseKind::OpaquePassThrough))
    }

    /// As [`Batch::custom_command`], but guarantees every argument (including the command name)
    /// is preserved byte-exact even when it is not text-convertible.
    pub fn custom_command_binary(
        &mut self,
        name: &'static str,
        args: impl IntoIterator<Item = impl Into<BinaryStringValue>>,
    ) -> &mut Self {
        let mut cmd = Cmd::new_binary(name);
        for arg in args {
            cmd.add_argument(arg);
        }
        self.append(cmd, ResponseKind::OpaquePassThrough)
    }
}

/// Shared helper: requires a non-empty key/value list, as many commands' wire grammar does not
/// tolerate a zero-key invocation (the server would reject it, but we catch it at the call site
/// so the caller gets an `ArgumentError` instead of a round trip).
pub(crate) fn require_non_empty<T>(items: &[T], what: &'static str) -> Result<()> {
    if items.is_empty() {
        Err(Error::argument(format!("{what} must not be empty")))
    } else {
        Ok(())
    }
}

pub(crate) use self::builder_support::*;

mod builder_support {
    use super::*;

    /// Common numeric token used by several range/limit-style options (`LIMIT offset count`,
    /// `COUNT n`), kept here so every category module renders integers identically.
    pub(crate) fn token_for(builder: ArgBuilder, token: &'static str, value: i64) -> ArgBuilder {
        builder.push_token(token).push(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_batch_starts_open_and_empty() {
        let batch = Batch::new(false);
        assert_eq!(batch.size(), 0);
        assert!(batch.is_empty());
        assert!(!batch.is_atomic());
        assert!(batch.options().is_none());
    }

    #[test]
    fn cluster_batch_carries_default_options() {
        let batch = Batch::new_cluster(true);
        assert!(batch.is_atomic());
        assert!(batch.options().is_some());
    }

    #[test]
    fn transaction_constructors_are_atomic() {
        assert!(Batch::transaction().is_atomic());
        assert!(Batch::cluster_transaction().is_atomic());
        assert!(Batch::cluster_transaction().options().is_some());
    }

    #[test]
    fn accessors_do_not_mutate_state() {
        let mut batch = Batch::new(false);
        batch.set("k", "v");
        let size_before = batch.size();
        let atomic_before = batch.is_atomic();
        let commands_before = batch.commands().len();
        // Calling accessors repeatedly must not change anything.
        assert_eq!(batch.size(), size_before);
        assert_eq!(batch.is_atomic(), atomic_before);
        assert_eq!(batch.commands().len(), commands_before);
    }

    #[test]
    fn converter_alignment_holds_after_every_append() {
        let mut batch = Batch::new(false);
        batch.set("k", "v");
        batch.get("k");
        batch.incr("n");
        assert_eq!(batch.commands().len(), batch.converters().len());
    }

    #[test]
    fn subscription_is_absent_until_attached() {
        let mut batch = Batch::new(false);
        assert!(batch.subscription().is_none());

        let mut config = crate::subscription::SubscriptionConfig::new();
        config.add_channel(crate::subscription::PubSubChannelKind::Exact, "news");
        batch.with_subscription(config);
        assert!(batch.subscription().is_some());
    }

    #[test]
    fn custom_command_requires_at_least_a_name() {
        let mut batch = Batch::new(false);
        let empty: Vec<&str> = vec![];
        assert!(batch.custom_command(empty).is_err());
    }

    #[test]
    fn custom_command_binary_preserves_raw_bytes() {
        let mut batch = Batch::new(false);
        let payload = vec![0x00, 0xFF];
        batch.custom_command_binary("ECHO", vec![BinaryStringValue::from_bytes(payload.clone())]);
        let cmd = &batch.commands()[0];
        assert!(cmd.is_binary());
        assert_eq!(cmd.arguments(), vec![payload.as_slice()]);
    }
}
