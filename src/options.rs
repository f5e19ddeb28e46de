//! The options envelope that surrounds a submitted batch in cluster mode (component C4's
//! `options` field, detailed in the wire grammar table in the spec).
//!
//! Mirrors the teacher's convention for optional configuration structs: plain
//! `Option<T>`-fielded structs deriving [`TypedBuilder`] with
//! `#[builder(field_defaults(default, setter(into)))]`, so every field can be set fluently and
//! omitted fields default to `None`.

use std::time::Duration;

use typed_builder::TypedBuilder;

use crate::route::SingleNodeRoute;

/// Two independent retry-enablement toggles for non-atomic (pipeline) batches.
///
/// Atomic batches are never silently retried by the dispatcher: replaying part of a
/// MULTI/EXEC transaction after a partial failure would break its all-or-nothing semantics, so
/// this struct is only consulted for pipelines.
#[derive(Clone, Debug, Default, PartialEq, Eq, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct RetryStrategy {
    /// Retry the whole pipeline on a server error classified as retryable.
    pub retry_on_server_error: Option<bool>,
    /// Retry the whole pipeline on a connection-level error classified as retryable.
    pub retry_on_connection_error: Option<bool>,
}

impl RetryStrategy {
    pub fn retries_server_errors(&self) -> bool {
        self.retry_on_server_error.unwrap_or(false)
    }

    pub fn retries_connection_errors(&self) -> bool {
        self.retry_on_connection_error.unwrap_or(false)
    }
}

/// The cluster batch options bundle (spec §6): deadline, error-raising policy, routing, and
/// retry enablement.
#[derive(Clone, Debug, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct BatchOptions {
    /// Hard deadline for the whole batch. `None` means no client-side deadline.
    pub timeout: Option<Duration>,
    /// When `true`, the dispatcher surfaces the first in-band command error as a typed batch
    /// failure instead of delivering it as a response entry. Defaults to `false`.
    pub raise_on_error: Option<bool>,
    /// Pins an atomic batch's execution to one node. Ignored for non-atomic batches.
    pub route: Option<SingleNodeRoute>,
    /// Retry enablement for non-atomic batches. Ignored for atomic batches.
    pub retry_strategy: Option<RetryStrategy>,
}

impl BatchOptions {
    pub fn raises_on_error(&self) -> bool {
        self.raise_on_error.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_all_none() {
        let opts = BatchOptions::builder().build();
        assert!(opts.timeout.is_none());
        assert!(!opts.raises_on_error());
        assert!(opts.route.is_none());
        assert!(opts.retry_strategy.is_none());
    }

    #[test]
    fn builder_accepts_bare_values_via_into() {
        let opts = BatchOptions::builder()
            .timeout(Duration::from_millis(50))
            .raise_on_error(true)
            .route(SingleNodeRoute::slot_primary(42))
            .build();
        assert_eq!(opts.timeout, Some(Duration::from_millis(50)));
        assert!(opts.raises_on_error());
        assert_eq!(opts.route, Some(SingleNodeRoute::slot_primary(42)));
    }
}
