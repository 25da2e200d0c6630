//! Rate limiter timing tests. These run on tokio's paused clock, so sleeps
//! complete instantly while `Instant::now()` advances by the slept amount.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use perioscope_bedrock::error::{CallError, InvokeError};
use perioscope_bedrock::limiter::{LimiterConfig, RateLimiter};
use tokio::task::JoinSet;
use tokio::time::Instant;

fn config(max_requests: usize) -> LimiterConfig {
    LimiterConfig {
        max_requests,
        window_secs: 60,
        base_delay_ms: 100,
        max_delay_ms: 10_000,
        max_retries: 3,
    }
}

/// Timer deadlines round up to the next millisecond tick.
fn assert_gaps(attempts: &[Instant], expected_ms: &[u64]) {
    assert_eq!(attempts.len(), expected_ms.len() + 1);
    for (pair, &ms) in attempts.windows(2).zip(expected_ms) {
        let gap = pair[1] - pair[0];
        let expected = Duration::from_millis(ms);
        assert!(
            gap >= expected && gap <= expected + Duration::from_millis(2),
            "expected a {expected:?} backoff, got {gap:?}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn twenty_calls_at_fourteen_per_minute_defers_six() {
    let limiter = RateLimiter::new(config(14));
    let dispatched = Mutex::new(Vec::new());
    let start = Instant::now();

    for _ in 0..20 {
        limiter
            .invoke(|| {
                dispatched.lock().unwrap().push(Instant::now());
                async { Ok::<_, CallError>(()) }
            })
            .await
            .unwrap();
    }

    let dispatched = dispatched.into_inner().unwrap();
    assert_eq!(dispatched.len(), 20);

    let immediate = dispatched
        .iter()
        .filter(|t| t.duration_since(start) < Duration::from_secs(1))
        .count();
    assert_eq!(immediate, 14);

    for t in &dispatched[14..] {
        assert!(
            t.duration_since(start) >= Duration::from_secs(60),
            "deferred call dispatched after {:?}",
            t.duration_since(start)
        );
    }
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_never_exceed_the_window() {
    let limiter = Arc::new(RateLimiter::new(config(14)));
    let dispatched = Arc::new(Mutex::new(Vec::new()));
    let mut tasks = JoinSet::new();

    for _ in 0..30 {
        let limiter = Arc::clone(&limiter);
        let dispatched = Arc::clone(&dispatched);
        tasks.spawn(async move {
            limiter
                .invoke(|| {
                    dispatched.lock().unwrap().push(Instant::now());
                    async { Ok::<_, CallError>(()) }
                })
                .await
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    let mut times = dispatched.lock().unwrap().clone();
    times.sort();
    assert_eq!(times.len(), 30);
    for (i, t) in times.iter().enumerate() {
        let in_window = times[i..]
            .iter()
            .take_while(|later| later.duration_since(*t) < Duration::from_secs(60))
            .count();
        assert!(in_window <= 14, "{in_window} dispatches within one window");
    }
}

#[tokio::test(start_paused = true)]
async fn quota_failures_back_off_exponentially_then_surface() {
    let limiter = RateLimiter::new(config(14));
    let attempts = Mutex::new(Vec::new());

    let result: Result<(), InvokeError> = limiter
        .invoke(|| {
            attempts.lock().unwrap().push(Instant::now());
            async { Err(CallError::RateLimited("429 Too Many Requests".to_string())) }
        })
        .await;

    assert_eq!(
        result,
        Err(InvokeError::RetriesExhausted {
            attempts: 4,
            message: "429 Too Many Requests".to_string(),
        })
    );

    let attempts = attempts.into_inner().unwrap();
    assert_eq!(attempts.len(), 4);
    assert_gaps(&attempts, &[100, 200, 400]);
}

#[tokio::test(start_paused = true)]
async fn backoff_is_capped_at_max_delay() {
    let limiter = RateLimiter::new(LimiterConfig {
        base_delay_ms: 1_000,
        max_delay_ms: 1_500,
        ..config(14)
    });
    let attempts = Mutex::new(Vec::new());

    let _ = limiter
        .invoke(|| {
            attempts.lock().unwrap().push(Instant::now());
            async { Err::<(), _>(CallError::RateLimited("throttled".to_string())) }
        })
        .await;

    let attempts = attempts.into_inner().unwrap();
    assert_gaps(&attempts, &[1_000, 1_500, 1_500]);
}

#[tokio::test(start_paused = true)]
async fn recovers_when_quota_frees_up() {
    let limiter = RateLimiter::new(config(14));
    let calls = Mutex::new(0u32);

    let result = limiter
        .invoke(|| {
            let mut calls = calls.lock().unwrap();
            *calls += 1;
            let n = *calls;
            async move {
                if n < 3 {
                    Err(CallError::RateLimited("slow down".to_string()))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

    assert_eq!(result, Ok(3));
    assert_eq!(limiter.in_window().await, 3);
}

#[tokio::test(start_paused = true)]
async fn service_errors_are_not_retried() {
    let limiter = RateLimiter::new(config(14));
    let calls = Mutex::new(0u32);

    let result: Result<(), InvokeError> = limiter
        .invoke(|| {
            *calls.lock().unwrap() += 1;
            async { Err(CallError::Service("model not found".to_string())) }
        })
        .await;

    assert_eq!(result, Err(InvokeError::Service("model not found".to_string())));
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn abandoned_wait_records_no_dispatch() {
    let limiter = RateLimiter::new(config(1));

    limiter
        .invoke(|| async { Ok::<_, CallError>(()) })
        .await
        .unwrap();
    assert_eq!(limiter.in_window().await, 1);

    let abandoned = tokio::time::timeout(
        Duration::from_secs(5),
        limiter.invoke(|| async { Ok::<_, CallError>(()) }),
    )
    .await;
    assert!(abandoned.is_err());
    assert_eq!(limiter.in_window().await, 1);

    tokio::time::advance(Duration::from_secs(60)).await;
    assert_eq!(limiter.in_window().await, 0);
    limiter
        .invoke(|| async { Ok::<_, CallError>(()) })
        .await
        .unwrap();
    assert_eq!(limiter.in_window().await, 1);
}

#[tokio::test(start_paused = true)]
async fn reset_clears_the_window() {
    let limiter = RateLimiter::new(config(2));
    for _ in 0..2 {
        limiter
            .invoke(|| async { Ok::<_, CallError>(()) })
            .await
            .unwrap();
    }
    assert_eq!(limiter.in_window().await, 2);

    limiter.reset().await;
    assert_eq!(limiter.in_window().await, 0);
}

#[test]
fn backoff_delay_doubles_from_base() {
    let config = LimiterConfig::default();
    assert_eq!(config.backoff_delay(0), Duration::from_secs(1));
    assert_eq!(config.backoff_delay(1), Duration::from_secs(2));
    assert_eq!(config.backoff_delay(2), Duration::from_secs(4));
    assert_eq!(config.backoff_delay(10), Duration::from_secs(10));
    assert_eq!(config.backoff_delay(u32::MAX), Duration::from_secs(10));
}
