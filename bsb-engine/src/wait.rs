//! Bounded-retry readiness waits
//!
//! The host environment often has to wait for something to appear (a player
//! object, a progress-bar element) before attaching. This is a polling wait
//! with an explicit interval and timeout; on timeout the caller gets a typed
//! error instead of waiting forever.

use bsb_common::config::WaitOptions;
use bsb_common::{Error, Result};
use std::future::Future;
use tokio::time::Instant;

/// Poll `probe` until it yields a value or the timeout elapses
///
/// The probe is tried immediately, then once per poll interval. `what` names
/// the awaited thing in the timeout error.
pub async fn wait_for<T, F, Fut>(options: &WaitOptions, what: &str, mut probe: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + options.timeout();

    loop {
        if let Some(value) = probe().await {
            return Ok(value);
        }
        if Instant::now() + options.poll_interval() > deadline {
            tracing::warn!(what = %what, timeout_ms = options.timeout_ms, "readiness wait timed out");
            return Err(Error::Timeout(what.to_string()));
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast_options() -> WaitOptions {
        WaitOptions {
            poll_interval_ms: 5,
            timeout_ms: 200,
        }
    }

    #[tokio::test]
    async fn test_immediate_success() {
        let result = wait_for(&fast_options(), "value", || async { Some(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_eventual_success() {
        let attempts = Cell::new(0);
        let result = wait_for(&fast_options(), "value", || {
            attempts.set(attempts.get() + 1);
            let ready = attempts.get() >= 3;
            async move { ready.then_some("ok") }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert!(attempts.get() >= 3);
    }

    #[tokio::test]
    async fn test_timeout() {
        let options = WaitOptions {
            poll_interval_ms: 5,
            timeout_ms: 20,
        };
        let result: Result<()> = wait_for(&options, "player object", || async { None }).await;

        match result {
            Err(Error::Timeout(what)) => assert_eq!(what, "player object"),
            other => panic!("expected timeout, got {:?}", other.map(|_| ())),
        }
    }
}
