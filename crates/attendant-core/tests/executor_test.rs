mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use attendant_assistants::{RunStatus, ThreadMessage};
use attendant_core::{OrchestratorError, RunExecutor, RunPolicy};
use attendant_types::MessageRole;
use common::StubPlatform;

fn zero_delay_policy(max_attempts: u32) -> RunPolicy {
    RunPolicy {
        poll_interval: Duration::ZERO,
        max_attempts,
    }
}

#[tokio::test]
async fn test_completes_after_queued_polls() {
    // queued N times, then completed: success after exactly N+1 polls.
    let n = 3;
    let platform = Arc::new(
        StubPlatform::new().with_run_script(vec![RunStatus::Queued; n]),
    );
    let executor = RunExecutor::new(platform.clone(), zero_delay_policy(10));

    let reply = executor
        .execute("thread_0", "asst_0", "Hi", None)
        .await
        .unwrap();

    assert_eq!(reply, "stubbed reply");
    assert_eq!(platform.polls.load(Ordering::SeqCst), n + 1);
}

#[tokio::test]
async fn test_unknown_statuses_keep_polling() {
    // Statuses outside the modeled lifecycle are treated as in flight.
    let platform = Arc::new(
        StubPlatform::new().with_run_script(vec![RunStatus::Unknown, RunStatus::Unknown]),
    );
    let executor = RunExecutor::new(platform.clone(), zero_delay_policy(10));

    let reply = executor
        .execute("thread_0", "asst_0", "Hi", None)
        .await
        .unwrap();

    assert_eq!(reply, "stubbed reply");
    assert_eq!(platform.polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_terminal_failure_is_not_retried() {
    let platform = Arc::new(
        StubPlatform::new()
            .with_run_script(vec![RunStatus::Failed])
            .with_run_error("server_error: boom"),
    );
    let executor = RunExecutor::new(platform.clone(), zero_delay_policy(10));

    let err = executor
        .execute("thread_0", "asst_0", "Hi", None)
        .await
        .unwrap_err();

    match err {
        OrchestratorError::RunFailed { status, detail } => {
            assert_eq!(status, RunStatus::Failed);
            assert_eq!(detail.as_deref(), Some("server_error: boom"));
        }
        other => panic!("expected RunFailed, got {:?}", other),
    }
    // Exactly one poll: terminal failures stop the loop immediately.
    assert_eq!(platform.polls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancelled_and_expired_are_terminal() {
    for status in [RunStatus::Cancelled, RunStatus::Expired] {
        let platform = Arc::new(StubPlatform::new().with_run_script(vec![status]));
        let executor = RunExecutor::new(platform.clone(), zero_delay_policy(10));

        let err = executor
            .execute("thread_0", "asst_0", "Hi", None)
            .await
            .unwrap_err();

        assert!(matches!(err, OrchestratorError::RunFailed { status: s, .. } if s == status));
    }
}

#[tokio::test]
async fn test_timeout_after_exact_poll_budget() {
    let budget = 5;
    let platform = Arc::new(StubPlatform::new().with_default_status(RunStatus::InProgress));
    let executor = RunExecutor::new(platform.clone(), zero_delay_policy(budget));

    let err = executor
        .execute("thread_0", "asst_0", "Hi", None)
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::RunTimeout { attempts } if attempts == budget));
    // Not earlier and not later than the configured budget.
    assert_eq!(platform.polls.load(Ordering::SeqCst), budget as usize);
}

#[tokio::test]
async fn test_expired_deadline_stops_polling() {
    let platform = Arc::new(StubPlatform::new().with_default_status(RunStatus::Queued));
    let executor = RunExecutor::new(platform.clone(), zero_delay_policy(10));

    let past = tokio::time::Instant::now() - Duration::from_millis(1);
    let err = executor
        .execute("thread_0", "asst_0", "Hi", Some(past))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::RunTimeout { attempts: 0 }));
    assert_eq!(platform.polls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_is_not_overshot_by_the_poll_interval() {
    let platform = Arc::new(StubPlatform::new().with_default_status(RunStatus::InProgress));
    let executor = RunExecutor::new(
        platform.clone(),
        RunPolicy {
            poll_interval: Duration::from_secs(60),
            max_attempts: 10,
        },
    );

    let start = tokio::time::Instant::now();
    let deadline = start + Duration::from_secs(90);
    let err = executor
        .execute("thread_0", "asst_0", "Hi", Some(deadline))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::RunTimeout { attempts: 2 }));
    // Polls happen at 0s and 60s; the sleep after the second poll is clamped
    // to the deadline instead of running a full interval to 120s.
    assert_eq!(platform.polls.load(Ordering::SeqCst), 2);
    assert_eq!(start.elapsed(), Duration::from_secs(90));
}

#[tokio::test]
async fn test_empty_thread_is_an_error() {
    let platform = Arc::new(StubPlatform::new().with_reply(None));
    let executor = RunExecutor::new(platform, zero_delay_policy(10));

    let err = executor
        .execute("thread_0", "asst_0", "Hi", None)
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::EmptyResponse));
}

#[tokio::test]
async fn test_user_message_at_head_is_a_race_not_a_reply() {
    let platform = Arc::new(StubPlatform::new().with_reply(Some(ThreadMessage {
        role: MessageRole::User,
        content: "someone else's message".to_string(),
    })));
    let executor = RunExecutor::new(platform, zero_delay_policy(10));

    let err = executor
        .execute("thread_0", "asst_0", "Hi", None)
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::UnexpectedRole));
}
