//! End-to-end scenario tests mirroring the seed suite (spec.md §8): each test builds a batch with
//! the public builder API, executes it against a mock transport, and asserts on the decoded
//! result -- exercising the full C1-C5 path rather than any single component in isolation.

use std::sync::Mutex;
use std::time::Duration;

use pretty_assertions::assert_eq;
use valkey_batch_core::{
    convert::RawResponse,
    dispatcher::exec,
    options::BatchOptions,
    transport::{BoxFuture, Transport, TransportRequest},
    Batch, Error, ErrorKind, Result, Value,
};

/// A transport that replays one canned response vector per call, recording every request it was
/// asked to execute so tests can assert on what the dispatcher actually sent.
struct ScriptedTransport {
    responses: Mutex<Vec<Vec<RawResponse>>>,
    seen: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<Vec<RawResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Transport for ScriptedTransport {
    fn execute<'a>(&'a self, request: TransportRequest) -> BoxFuture<'a, Result<Vec<RawResponse>>> {
        self.seen.lock().unwrap().push(request);
        let next = self.responses.lock().unwrap().remove(0);
        Box::pin(async move { Ok(next) })
    }
}

/// A transport that never resolves, standing in for an intentionally blocked connection.
struct BlockedTransport;

impl Transport for BlockedTransport {
    fn execute<'a>(&'a self, _request: TransportRequest) -> BoxFuture<'a, Result<Vec<RawResponse>>> {
        Box::pin(async move {
            std::future::pending::<()>().await;
            unreachable!()
        })
    }
}

/// Scenario 1: pipeline GET/SET.
#[tokio::test]
async fn pipeline_set_then_get_returns_ok_then_value() {
    let mut batch = Batch::new(false);
    batch.set("k", "v");
    batch.get("k");

    let transport = ScriptedTransport::new(vec![vec![
        RawResponse::SimpleString("OK".into()),
        RawResponse::BulkString("v".into()),
    ]]);

    let outcome = exec(batch, &transport).await.unwrap();
    assert_eq!(outcome[0].as_ref().unwrap(), &Value::Okay);
    assert_eq!(outcome[1].as_ref().unwrap(), &Value::Text("v".into()));
}

/// Scenario 2: atomic increment chain.
#[tokio::test]
async fn atomic_set_incr_incrby_get_decodes_each_reply() {
    let mut batch = Batch::transaction();
    batch.set("n", "10");
    batch.incr("n");
    batch.incr_by("n", 5);
    batch.get("n");
    assert!(batch.is_atomic());

    let transport = ScriptedTransport::new(vec![vec![
        RawResponse::SimpleString("OK".into()),
        RawResponse::Integer(11),
        RawResponse::Integer(16),
        RawResponse::BulkString("16".into()),
    ]]);

    let outcome = exec(batch, &transport).await.unwrap();
    assert_eq!(outcome[0].as_ref().unwrap(), &Value::Okay);
    assert_eq!(outcome[1].as_ref().unwrap(), &Value::Int(11));
    assert_eq!(outcome[2].as_ref().unwrap(), &Value::Int(16));
    assert_eq!(outcome[3].as_ref().unwrap(), &Value::Text("16".into()));
}

/// Scenario 3: binary safety round trip through DUMP/DEL/RESTORE/GET.
#[tokio::test]
async fn dump_restore_round_trips_non_text_payload_byte_exact() {
    let payload: Vec<u8> = vec![0x00, 0xFF, 0x01, 0xFE];

    let mut batch = Batch::new(false);
    batch.set("k", payload.clone());
    batch.dump("k");
    batch.del(vec!["k"]);
    batch.restore("k", 0, payload.clone());
    batch.get("k");

    // The command record for `set` and `restore` must both be binary, since the payload is not
    // text-convertible.
    assert!(batch.commands()[0].is_binary());
    assert!(batch.commands()[3].is_binary());

    let transport = ScriptedTransport::new(vec![vec![
        RawResponse::SimpleString("OK".into()),
        RawResponse::BulkString(bytes::Bytes::from(payload.clone())),
        RawResponse::Integer(1),
        RawResponse::SimpleString("OK".into()),
        RawResponse::BulkString(bytes::Bytes::from(payload.clone())),
    ]]);

    let outcome = exec(batch, &transport).await.unwrap();
    match outcome[4].as_ref().unwrap() {
        Value::Bytes(b) => assert_eq!(b.as_ref(), payload.as_slice()),
        Value::Text(s) => assert_eq!(s.as_bytes(), payload.as_slice()),
        other => panic!("unexpected decoded value: {other:?}"),
    }
}

/// Scenario 4: SINTERCARD must emit an explicit numkeys prefix.
#[tokio::test]
async fn sintercard_emits_numkeys_prefix_not_bare_keys() {
    let mut batch = Batch::new(false);
    batch.sadd("a", vec!["x", "y"]);
    batch.sadd("b", vec!["y", "z"]);
    batch.sintercard(vec!["a", "b"], None).unwrap();

    let cmd = &batch.commands()[2];
    assert_eq!(cmd.name(), "SINTERCARD");
    assert_eq!(cmd.arguments()[0], b"2".as_slice(), "numkeys must precede the key list");
    assert_eq!(cmd.arguments(), vec![b"2".as_slice(), b"a".as_slice(), b"b".as_slice()]);

    let transport = ScriptedTransport::new(vec![vec![
        RawResponse::Integer(2),
        RawResponse::Integer(2),
        RawResponse::Integer(1),
    ]]);

    let outcome = exec(batch, &transport).await.unwrap();
    assert_eq!(outcome[2].as_ref().unwrap(), &Value::Int(1));
}

/// Scenario 5: atomic cross-slot failure surfaces as a server error, in-band or raised depending
/// on `raise_on_error`.
#[tokio::test]
async fn cross_slot_atomic_batch_raises_when_configured() {
    let mut batch = Batch::new_cluster(true);
    batch.with_options(BatchOptions::builder().raise_on_error(true).build());
    batch.set("{s1}a", "1");
    batch.set("{s2}b", "2");

    let transport = ScriptedTransport::new(vec![vec![
        RawResponse::Error {
            message: "CROSSSLOT Keys in request don't hash to the same slot".into(),
            code: Some("CROSSSLOT".into()),
        },
        RawResponse::SimpleString("OK".into()),
    ]]);

    let err = exec(batch, &transport).await.unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Server { .. }));
}

#[tokio::test]
async fn cross_slot_atomic_batch_delivers_in_band_without_raise_on_error() {
    let mut batch = Batch::new_cluster(true);
    batch.set("{s1}a", "1");
    batch.set("{s2}b", "2");

    let transport = ScriptedTransport::new(vec![vec![
        RawResponse::Error {
            message: "CROSSSLOT".into(),
            code: Some("CROSSSLOT".into()),
        },
        RawResponse::SimpleString("OK".into()),
    ]]);

    let outcome = exec(batch, &transport).await.unwrap();
    assert!(outcome[0].is_err());
    assert!(matches!(outcome[0].as_ref().unwrap_err().kind(), ErrorKind::Server { .. }));
    assert_eq!(outcome[1].as_ref().unwrap(), &Value::Okay);
}

/// Scenario 6: a whole-batch timeout must fire without waiting on a blocked transport, and must
/// not report any partial success.
#[tokio::test(start_paused = true)]
async fn timeout_on_blocked_transport_fails_the_whole_batch() {
    let mut batch = Batch::new_cluster(false);
    batch.with_options(BatchOptions::builder().timeout(Duration::from_millis(50)).build());
    for i in 0..1000 {
        batch.get(format!("k{i}"));
    }

    let transport = BlockedTransport;
    let (_, result) = tokio::join!(
        tokio::time::advance(Duration::from_millis(75)),
        exec(batch, &transport)
    );

    let err: Error = result.unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Timeout(_)));
}

/// Order preservation and converter alignment hold for an arbitrary mixed-category sequence.
#[test]
fn order_and_converter_alignment_hold_across_mixed_categories() {
    let mut batch = Batch::new(false);
    batch.set("k", "v");
    batch.lpush("list", vec!["a", "b"]);
    batch.hset("h", vec![("f", "v")]);
    batch.sadd("s", vec!["m"]);
    batch.zadd("z", vec![("m1", 1.0_f64)]);

    // `size()` internally asserts `len(commands) == len(converters)` on every call.
    assert_eq!(batch.size(), 5);
    let names: Vec<&str> = batch.commands().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["SET", "LPUSH", "HSET", "SADD", "ZADD"]);
}
