//! The transport boundary (external collaborator, out of scope): the network connection pool
//! that actually serializes a request and returns raw response frames. This crate only defines
//! the interface the dispatcher submits batches through.

use std::{future::Future, pin::Pin, time::Duration};

use crate::{convert::RawResponse, error::Result, route::SingleNodeRoute, subscription::SubscriptionConfig};

/// A boxed, `Send` future, matching the teacher's `BoxFuture` alias used throughout its
/// operation-execution plumbing.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One command as it crosses the transport boundary: a name and its ordered byte-string
/// arguments, already flattened out of [`crate::command::Cmd`]'s text/binary distinction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireCommand {
    pub name: String,
    pub args: Vec<Vec<u8>>,
}

/// Where to send an atomic cluster batch; non-atomic batches ignore this and are scattered by
/// the transport's own slot-aware routing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoutingHint {
    Node(SingleNodeRoute),
    AnyPrimary,
}

/// The options triple the dispatcher hands to the transport alongside a cluster batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransportOptions {
    pub timeout: Option<Duration>,
    pub raise_on_error: bool,
    pub retry_on_server_error: bool,
    pub retry_on_connection_error: bool,
}

/// A fully assembled request ready for the transport to serialize and send.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRequest {
    pub is_atomic: bool,
    pub commands: Vec<WireCommand>,
    pub routing: Option<RoutingHint>,
    pub options: Option<TransportOptions>,
    /// Round-tripped unchanged from [`crate::batch::Batch::with_subscription`]; the core never
    /// interprets it.
    pub subscription: Option<SubscriptionConfig>,
}

/// The network transport / connection pool this crate submits assembled batches to.
///
/// Implementations own connection establishment, pooling, wire-protocol encoding, and cluster
/// topology discovery -- all explicitly out of scope here. The dispatcher only requires that
/// `execute` return exactly one [`RawResponse`] per submitted command, in order.
pub trait Transport: Send + Sync {
    fn execute<'a>(&'a self, request: TransportRequest) -> BoxFuture<'a, Result<Vec<RawResponse>>>;
}
