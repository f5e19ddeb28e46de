//! The execution dispatcher (component C5): hands a [`Batch`] to a [`Transport`], awaits one
//! ordered response frame per command, and applies each command's registered converter.
//!
//! The dispatcher does not itself loop retrying a pipeline. Spec §4.5/§9 is explicit that "the
//! core contributes only the enablement bits" for retries -- `retry_strategy`'s two booleans are
//! forwarded to the transport as part of [`TransportOptions`], and it is the transport's
//! connection-pool/retry policy (out of scope for this crate) that decides how many times, and
//! with what backoff, to resubmit. See `DESIGN.md` for the record of this decision.

use std::time::Duration;

#[cfg(feature = "tracing-unstable")]
use tracing::{debug, trace};

use crate::{
    batch::Batch,
    convert::{self, Value},
    error::{Error, Result},
    transport::{RoutingHint, Transport, TransportOptions, TransportRequest, WireCommand},
};

/// The per-command outcome of executing a batch: either the converted value, or the typed error
/// that command's slot produced (a response-shape mismatch or an in-band server error), when
/// `raise_on_error` did not elevate it to a batch-level failure.
pub type BatchOutcome = Vec<Result<Value>>;

/// Executes `batch` against `transport`, returning one decoded [`Value`] (or error) per command
/// in append order.
///
/// Fails outright (rather than returning a partial [`BatchOutcome`]) when:
/// - the transport itself fails (connection error, or the batch's `timeout` elapses),
/// - the transport returns a response vector of the wrong length (a fatal internal invariant
///   violation -- this would indicate a transport defect, not a caller error),
/// - `raise_on_error` is set and some command's reply is a [`crate::error::ErrorKind::Server`] or
///   [`crate::error::ErrorKind::ResponseShape`], in which case the *first* such error aborts
///   decoding and is returned directly.
pub async fn exec(batch: Batch, transport: &dyn Transport) -> Result<BatchOutcome> {
    debug_assert_eq!(batch.commands().len(), batch.converters().len());

    let raise_on_error = batch.options().map(|o| o.raises_on_error()).unwrap_or(false);
    let timeout = batch.options().and_then(|o| o.timeout);

    let request = build_request(&batch);
    #[cfg(feature = "tracing-unstable")]
    debug!(
        is_atomic = batch.is_atomic(),
        commands = batch.size(),
        raise_on_error,
        "submitting batch"
    );

    let responses = match timeout {
        Some(deadline) => run_with_timeout(deadline, transport, request).await?,
        None => transport.execute(request).await?,
    };

    if responses.len() != batch.converters().len() {
        return Err(Error::internal(format!(
            "transport returned {} responses for {} submitted commands",
            responses.len(),
            batch.converters().len()
        )));
    }

    let binary_output = batch.binary_output();
    let mut outcome = Vec::with_capacity(responses.len());
    for (_slot, (raw, kind)) in responses.into_iter().zip(batch.converters().iter().copied()).enumerate() {
        match convert::convert(raw, kind, binary_output) {
            Ok(value) => outcome.push(Ok(value)),
            Err(err) if raise_on_error => {
                #[cfg(feature = "tracing-unstable")]
                trace!(slot = _slot, "raise_on_error aborting decode on first in-band error");
                return Err(err);
            }
            Err(err) => outcome.push(Err(err)),
        }
    }
    Ok(outcome)
}

async fn run_with_timeout(
    deadline: Duration,
    transport: &dyn Transport,
    request: TransportRequest,
) -> Result<Vec<crate::convert::RawResponse>> {
    match tokio::time::timeout(deadline, transport.execute(request)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(Error::timeout(deadline)),
    }
}

fn build_request(batch: &Batch) -> TransportRequest {
    let commands = batch
        .commands()
        .iter()
        .map(|cmd| WireCommand {
            name: cmd.name().to_owned(),
            args: cmd.arguments().into_iter().map(|a| a.to_vec()).collect(),
        })
        .collect();

    let options = batch.options();
    let routing = options.map(|opts| match (batch.is_atomic(), &opts.route) {
        (true, Some(route)) => RoutingHint::Node(route.clone()),
        _ => RoutingHint::AnyPrimary,
    });

    let transport_options = options.map(|opts| {
        let (retry_server, retry_conn) = if batch.is_atomic() {
            // Atomic batches are never silently retried: replaying part of a MULTI/EXEC after a
            // partial failure would break its all-or-nothing semantics.
            (false, false)
        } else {
            let strategy = opts.retry_strategy.clone().unwrap_or_default();
            (strategy.retries_server_errors(), strategy.retries_connection_errors())
        };
        TransportOptions {
            timeout: opts.timeout,
            raise_on_error: opts.raises_on_error(),
            retry_on_server_error: retry_server,
            retry_on_connection_error: retry_conn,
        }
    });

    TransportRequest {
        is_atomic: batch.is_atomic(),
        commands,
        routing,
        options: transport_options,
        subscription: batch.subscription().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        convert::RawResponse,
        options::BatchOptions,
        route::SingleNodeRoute,
        transport::BoxFuture,
    };
    use std::sync::Mutex;

    struct MockTransport {
        responses: Mutex<Vec<Vec<RawResponse>>>,
        requests: Mutex<Vec<TransportRequest>>,
    }

    impl MockTransport {
        fn new(responses: Vec<Vec<RawResponse>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for MockTransport {
        fn execute<'a>(&'a self, request: TransportRequest) -> BoxFuture<'a, Result<Vec<RawResponse>>> {
            self.requests.lock().unwrap().push(request);
            let next = self.responses.lock().unwrap().remove(0);
            Box::pin(async move { Ok(next) })
        }
    }

    struct BlockingTransport;

    impl Transport for BlockingTransport {
        fn execute<'a>(&'a self, _request: TransportRequest) -> BoxFuture<'a, Result<Vec<RawResponse>>> {
            Box::pin(async move {
                // Simulates a transport that never returns, so the dispatcher's own timeout must
                // fire rather than waiting on the transport.
                std::future::pending::<()>().await;
                unreachable!()
            })
        }
    }

    #[tokio::test]
    async fn pipeline_get_set_decodes_in_order() {
        let mut batch = Batch::new(false);
        batch.set("k", "v");
        batch.get("k");

        let transport = MockTransport::new(vec![vec![
            RawResponse::SimpleString("OK".into()),
            RawResponse::BulkString("v".into()),
        ]]);

        let outcome = exec(batch, &transport).await.unwrap();
        assert_eq!(outcome[0].as_ref().unwrap(), &Value::Okay);
        assert_eq!(outcome[1].as_ref().unwrap(), &Value::Text("v".into()));
    }

    #[tokio::test]
    async fn atomic_increment_chain_decodes_in_order() {
        let mut batch = Batch::transaction();
        batch.set("n", "10");
        batch.incr("n");
        batch.incr_by("n", 5);
        batch.get("n");

        let transport = MockTransport::new(vec![vec![
            RawResponse::SimpleString("OK".into()),
            RawResponse::Integer(11),
            RawResponse::Integer(16),
            RawResponse::BulkString("16".into()),
        ]]);

        let outcome = exec(batch, &transport).await.unwrap();
        assert_eq!(outcome[1].as_ref().unwrap(), &Value::Int(11));
        assert_eq!(outcome[2].as_ref().unwrap(), &Value::Int(16));
        assert_eq!(outcome[3].as_ref().unwrap(), &Value::Text("16".into()));
    }

    #[tokio::test]
    async fn mismatched_response_length_is_a_fatal_internal_error() {
        let mut batch = Batch::new(false);
        batch.get("k");
        batch.get("k2");

        let transport = MockTransport::new(vec![vec![RawResponse::Nil]]);
        let err = exec(batch, &transport).await.unwrap_err();
        assert!(matches!(err.kind(), crate::error::ErrorKind::Internal(_)));
    }

    #[tokio::test]
    async fn raise_on_error_aborts_on_first_in_band_server_error() {
        let mut batch = Batch::new_cluster(true);
        batch.with_options(BatchOptions::builder().raise_on_error(true).build());
        batch.set("{s1}a", "1");
        batch.set("{s2}b", "2");

        let transport = MockTransport::new(vec![vec![
            RawResponse::Error {
                message: "CROSSSLOT Keys in request don't hash to the same slot".into(),
                code: Some("CROSSSLOT".into()),
            },
            RawResponse::SimpleString("OK".into()),
        ]]);

        let err = exec(batch, &transport).await.unwrap_err();
        assert!(matches!(err.kind(), crate::error::ErrorKind::Server { .. }));
    }

    #[tokio::test]
    async fn without_raise_on_error_server_error_is_delivered_in_band() {
        let mut batch = Batch::new_cluster(true);
        batch.set("{s1}a", "1");
        batch.set("{s2}b", "2");

        let transport = MockTransport::new(vec![vec![
            RawResponse::Error {
                message: "CROSSSLOT".into(),
                code: Some("CROSSSLOT".into()),
            },
            RawResponse::SimpleString("OK".into()),
        ]]);

        let outcome = exec(batch, &transport).await.unwrap();
        assert!(outcome[0].is_err());
        assert!(outcome[1].is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_fires_without_waiting_for_a_blocked_transport() {
        let mut batch = Batch::new_cluster(false);
        batch.with_options(BatchOptions::builder().timeout(Duration::from_millis(50)).build());
        for i in 0..1000 {
            batch.get(format!("k{i}"));
        }

        let transport = BlockingTransport;
        let (_, result) = tokio::join!(
            tokio::time::advance(Duration::from_millis(60)),
            exec(batch, &transport)
        );
        let err = result.unwrap_err();
        assert!(matches!(err.kind(), crate::error::ErrorKind::Timeout(_)));
    }

    #[test]
    fn atomic_batch_never_forwards_retry_flags_even_if_set() {
        let mut opts_holder = BatchOptions::builder()
            .retry_strategy(crate::options::RetryStrategy::builder().retry_on_server_error(true).build())
            .build();
        opts_holder.raise_on_error = Some(false);
        let mut batch = Batch::new_cluster(true);
        batch.with_options(opts_holder);
        batch.get("k");

        let request = build_request(&batch);
        let options = request.options.unwrap();
        assert!(!options.retry_on_server_error);
    }

    #[test]
    fn non_atomic_batch_forwards_retry_flags() {
        let mut batch = Batch::new_cluster(false);
        batch.with_options(
            BatchOptions::builder()
                .retry_strategy(crate::options::RetryStrategy::builder().retry_on_connection_error(true).build())
                .build(),
        );
        batch.get("k");

        let request = build_request(&batch);
        let options = request.options.unwrap();
        assert!(options.retry_on_connection_error);
    }

    #[test]
    fn subscription_config_round_trips_into_the_transport_request_unchanged() {
        use crate::subscription::{PubSubChannelKind, SubscriptionConfig};

        let mut batch = Batch::new(false);
        let mut subscription = SubscriptionConfig::new();
        subscription.add_channel(PubSubChannelKind::Exact, "news");
        batch.with_subscription(subscription.clone());
        batch.get("k");

        let request = build_request(&batch);
        assert_eq!(request.subscription, Some(subscription));
    }

    #[test]
    fn cluster_atomic_route_is_forwarded_as_a_node_hint() {
        let mut batch = Batch::new_cluster(true);
        batch.with_options(BatchOptions::builder().route(SingleNodeRoute::slot_primary(7)).build());
        batch.get("k");

        let request = build_request(&batch);
        assert_eq!(request.routing, Some(RoutingHint::Node(SingleNodeRoute::slot_primary(7))));
    }
}
