//! A client-side batch builder for a Valkey/Redis-compatible key-value server.
//!
//! An application accumulates an ordered sequence of server commands on a [`Batch`] -- one
//! fluent method per logical operation -- and submits it once, via [`dispatcher::exec`], to a
//! [`Transport`](transport::Transport) that executes the commands either as an atomic
//! MULTI/EXEC-style transaction or as a non-atomic, ordered pipeline.
//!
//! # Layout
//!
//! - [`value`] -- binary-safe argument values (component C1).
//! - [`command`] -- immutable command records (component C2).
//! - [`batch`] -- the typed builder surface and the batch envelope (components C3/C4).
//! - [`options`] / [`route`] -- the cluster routing/retry/timeout envelope.
//! - [`dispatcher`] -- hands a batch to a transport and decodes the response (component C5).
//! - [`convert`] -- the response-shape table every builder method registers against.
//! - [`error`] -- the crate-wide error taxonomy.
//! - [`transport`] -- the trait a connection pool implements to actually execute a batch.
//! - [`subscription`] -- pub/sub subscription configuration, forwarded unchanged.
//!
//! This crate does not open sockets, encode the wire protocol, or resolve cluster topology --
//! those are the transport's concern. It composes correctness-critical argument vectors and
//! decodes the response the transport returns.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::too_many_arguments)]

pub mod batch;
pub mod command;
pub mod convert;
pub mod dispatcher;
pub mod error;
pub mod options;
pub mod route;
pub mod subscription;
pub mod transport;
pub mod value;

pub use crate::{
    batch::Batch,
    command::Cmd,
    convert::{RawResponse, Value},
    dispatcher::{exec, BatchOutcome},
    error::{Error, ErrorKind, Result},
    options::{BatchOptions, RetryStrategy},
    route::SingleNodeRoute,
    subscription::{MessageCallback, PubSubChannelKind, SubscriptionConfig},
    transport::Transport,
    value::BinaryStringValue,
};
