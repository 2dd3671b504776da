//! Dispatch loop behavior over in-memory transports.

use async_trait::async_trait;
use rankbot_core::RemoteOperation;
use rankbot_error::{ServiceError, ServiceErrorKind, TransportErrorKind};
use rankbot_social::irc::FrameReader;
use rankbot_social::{
    CommandRegistry, DispatchOutcome, Dispatcher, OperationError, OperationResult,
    RemoteOperations,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const COMMANDS: &str = r#"{
    "!hello": {"type": "static", "response": "hi", "cooldown": 2},
    "!rank": {"type": "api", "endpoint": "riot_rank_info", "cooldown": 30},
    "!bans": {"type": "api", "endpoint": "current_bans_info"}
}"#;

/// Answers rank requests and fails ban requests, counting every call.
#[derive(Default)]
struct FakeOperations {
    calls: AtomicUsize,
}

#[async_trait]
impl RemoteOperations for FakeOperations {
    async fn run(&self, operation: RemoteOperation) -> OperationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match operation {
            RemoteOperation::RiotRankInfo => Ok("Current Rank: GOLD II 42".to_string()),
            _ => Err(OperationError {
                phrase: "Not in an Active Match",
                source: ServiceError::new(ServiceErrorKind::NotFound("spectator".to_string())),
            }),
        }
    }
}

fn message(sender: &str, text: &str) -> String {
    format!(
        "@badge-info=;display-name={sender} :{sender}!{sender}@{sender}.tmi.twitch.tv PRIVMSG #chan :{text}"
    )
}

fn dispatcher(
    operations: Arc<FakeOperations>,
) -> Dispatcher<&'static [u8], Vec<u8>> {
    let registry = CommandRegistry::from_json(COMMANDS).unwrap();
    Dispatcher::from_parts(
        FrameReader::new(&b""[..]),
        Vec::new(),
        "chan",
        registry,
        operations,
    )
}

fn take_output(dispatcher: &mut Dispatcher<&'static [u8], Vec<u8>>) -> String {
    String::from_utf8(std::mem::take(dispatcher.writer_mut())).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_static_command_respects_cooldown() {
    let mut dispatcher = dispatcher(Arc::new(FakeOperations::default()));

    let outcome = dispatcher.handle_frame(&message("bob", "!hello")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Replied);
    assert_eq!(take_output(&mut dispatcher), "PRIVMSG #chan :@bob hi\r\n");

    tokio::time::advance(Duration::from_secs(1)).await;
    let outcome = dispatcher.handle_frame(&message("bob", "!hello")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::CoolingDown);
    assert_eq!(take_output(&mut dispatcher), "");

    tokio::time::advance(Duration::from_secs(1)).await;
    let outcome = dispatcher.handle_frame(&message("bob", "!hello")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Replied);
    assert_eq!(take_output(&mut dispatcher), "PRIVMSG #chan :@bob hi\r\n");
}

#[tokio::test(start_paused = true)]
async fn test_cooldown_is_per_command_not_per_user() {
    let operations = Arc::new(FakeOperations::default());
    let mut dispatcher = dispatcher(operations.clone());

    dispatcher.handle_frame(&message("alice", "!rank")).await.unwrap();
    let outcome = dispatcher.handle_frame(&message("bob", "  !RANK")).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::CoolingDown);
    assert_eq!(operations.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        take_output(&mut dispatcher),
        "PRIVMSG #chan :@alice Current Rank: GOLD II 42\r\n"
    );
}

#[tokio::test(start_paused = true)]
async fn test_keepalive_leaves_cooldowns_untouched() {
    let mut dispatcher = dispatcher(Arc::new(FakeOperations::default()));

    let outcome = dispatcher.handle_frame("PING :tmi.twitch.tv").await.unwrap();

    assert_eq!(outcome, DispatchOutcome::Keepalive);
    assert_eq!(take_output(&mut dispatcher), "PONG :tmi.twitch.tv\r\n");
    assert!(dispatcher.cooldowns().is_empty());
}

#[tokio::test]
async fn test_unknown_and_non_message_lines_write_nothing() {
    let mut dispatcher = dispatcher(Arc::new(FakeOperations::default()));

    assert_eq!(
        dispatcher.handle_frame(&message("bob", "hello there")).await.unwrap(),
        DispatchOutcome::UnknownCommand
    );
    assert_eq!(
        dispatcher
            .handle_frame(":tmi.twitch.tv 376 rankbot :>")
            .await
            .unwrap(),
        DispatchOutcome::Ignored
    );
    assert_eq!(take_output(&mut dispatcher), "");
    assert!(dispatcher.cooldowns().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_operation_replies_phrase_and_records_cooldown() {
    let mut dispatcher = dispatcher(Arc::new(FakeOperations::default()));

    let outcome = dispatcher.handle_frame(&message("bob", "!bans")).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::Replied);
    assert_eq!(
        take_output(&mut dispatcher),
        "PRIVMSG #chan :@bob Not in an Active Match\r\n"
    );
    assert!(dispatcher.cooldowns().last_used("!bans").is_some());
}

#[tokio::test]
async fn test_run_processes_stream_until_closed() {
    let input = format!(
        "PING :tmi.twitch.tv\r\n{}\r\n{}\r\n",
        message("bob", "!hello"),
        message("bob", "!hello")
    );
    let input: &'static [u8] = Box::leak(input.into_bytes().into_boxed_slice());
    let registry = CommandRegistry::from_json(COMMANDS).unwrap();
    let mut dispatcher = Dispatcher::from_parts(
        FrameReader::new(input),
        Vec::new(),
        "chan",
        registry,
        Arc::new(FakeOperations::default()),
    );

    let err = dispatcher.run().await.unwrap_err();

    assert_eq!(err.kind, TransportErrorKind::Closed);
    assert_eq!(
        String::from_utf8(dispatcher.writer().clone()).unwrap(),
        "PONG :tmi.twitch.tv\r\nPRIVMSG #chan :@bob hi\r\n"
    );
}
