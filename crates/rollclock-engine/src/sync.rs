//! Best-effort network time correction.
//!
//! A [`ReferenceClock`] is asked for a trusted instant; the difference to the
//! local clock becomes the [`TimeSource`] offset. Failures are an expected
//! steady state, not exceptions: they are logged, the previous offset stays in
//! place and the caller sees [`SyncOutcome::Unsynced`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::time::{TimeOffset, TimeSource};

/// Default endpoint: returns the current time for the caller's IP as JSON.
pub const DEFAULT_TIME_URL: &str = "https://worldtimeapi.org/api/ip";

/// Default re-sync cadence.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Result of one sync attempt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SyncOutcome {
    /// The source now carries this offset.
    Synced(TimeOffset),
    /// The attempt failed; the source kept whatever offset it had.
    Unsynced,
}

/// An external source of trusted time.
pub trait ReferenceClock: Send + Sync + 'static {
    /// Fetches the reference instant once.
    fn fetch(&self) -> impl Future<Output = Result<DateTime<Utc>>> + Send;
}

/// HTTP reference clock speaking the worldtimeapi.org JSON format.
#[derive(Debug, Clone)]
pub struct WorldTimeApi {
    client: reqwest::Client,
    url: String,
}

impl WorldTimeApi {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ReferenceClock for WorldTimeApi {
    async fn fetch(&self) -> Result<DateTime<Utc>> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", self.url))?
            .error_for_status()
            .with_context(|| format!("GET {} returned an error status", self.url))?
            .text()
            .await
            .context("failed to read time response body")?;

        parse_reference_time(&body)
    }
}

#[derive(Debug, Deserialize)]
struct TimeBody {
    datetime: DateTime<FixedOffset>,
}

/// Extracts the ISO-8601 `datetime` field of a time API response.
pub fn parse_reference_time(body: &str) -> Result<DateTime<Utc>> {
    let parsed: TimeBody =
        serde_json::from_str(body).context("malformed time response body")?;
    Ok(parsed.datetime.with_timezone(&Utc))
}

/// Runs one sync attempt against `reference`.
///
/// The local instant is sampled after the response arrives.
pub async fn sync<R: ReferenceClock>(source: &TimeSource, reference: &R) -> SyncOutcome {
    match reference.fetch().await {
        Ok(remote) => {
            let offset = TimeOffset::between(remote, source.local_now());
            source.apply_offset(offset);
            log::info!("time synced, offset {offset}");
            SyncOutcome::Synced(offset)
        }
        Err(e) => {
            log::warn!("time sync failed, keeping offset {}: {e:#}", source.offset());
            SyncOutcome::Unsynced
        }
    }
}

/// Periodic sync bound to the lifetime of a mounted view.
///
/// Syncs immediately, then every `interval`; [`trigger`](Self::trigger) runs an
/// extra attempt without waiting. Dropping the handle cancels the task,
/// including an in-flight fetch.
#[derive(Debug)]
pub struct SyncTask {
    handle: JoinHandle<()>,
    wake: Arc<Notify>,
}

impl SyncTask {
    /// Spawns the task on the current tokio runtime.
    pub fn spawn<R: ReferenceClock>(source: TimeSource, reference: R, interval: Duration) -> Self {
        let period = interval.max(Duration::from_millis(1));

        let wake = Arc::new(Notify::new());
        let woken = wake.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = woken.notified() => log::debug!("time sync requested"),
                }
                sync(&source, &reference).await;
            }
        });

        log::debug!("time sync scheduled every {period:?}");
        Self { handle, wake }
    }

    /// Requests an immediate attempt. Coalesces with a pending request.
    pub fn trigger(&self) {
        self.wake.notify_one();
    }

    /// Cancels the task.
    pub fn stop(self) {}
}

impl Drop for SyncTask {
    fn drop(&mut self) {
        self.handle.abort();
        log::debug!("time sync stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::anyhow;
    use chrono::{TimeDelta, TimeZone};

    use super::*;
    use crate::time::testing::ManualClock;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 14, 32, 7).unwrap()
    }

    /// Reference clock answering with a fixed instant, or failing.
    #[derive(Clone)]
    struct FakeReference {
        answer: Option<DateTime<Utc>>,
        calls: Arc<AtomicUsize>,
    }

    impl FakeReference {
        fn answering(t: DateTime<Utc>) -> Self {
            Self { answer: Some(t), calls: Arc::default() }
        }

        fn failing() -> Self {
            Self { answer: None, calls: Arc::default() }
        }
    }

    impl ReferenceClock for FakeReference {
        async fn fetch(&self) -> Result<DateTime<Utc>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.ok_or_else(|| anyhow!("connection refused"))
        }
    }

    // ── parse_reference_time ──────────────────────────────────────────────

    #[test]
    fn parses_worldtimeapi_body() {
        let body = r#"{"abbreviation":"CEST","datetime":"2026-10-17T16:32:07.200123+02:00","unixtime":1792247527}"#;
        let t = parse_reference_time(body).unwrap();
        assert_eq!(t.timestamp_millis(), t0().timestamp_millis() + 200);
    }

    #[test]
    fn rejects_missing_or_malformed_datetime() {
        assert!(parse_reference_time(r#"{"unixtime":1}"#).is_err());
        assert!(parse_reference_time(r#"{"datetime":"yesterday"}"#).is_err());
        assert!(parse_reference_time("<html>502</html>").is_err());
    }

    // ── sync ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn success_applies_offset() {
        let source = TimeSource::with_clock(ManualClock::at(t0()));
        let reference = FakeReference::answering(t0() + TimeDelta::milliseconds(1_500));

        let outcome = sync(&source, &reference).await;

        assert_eq!(outcome, SyncOutcome::Synced(TimeOffset::from_millis(1_500)));
        assert_eq!(source.now(), t0() + TimeDelta::milliseconds(1_500));
        assert!(source.is_synced());
    }

    #[tokio::test]
    async fn failure_without_prior_sync_keeps_local_time() {
        let source = TimeSource::with_clock(ManualClock::at(t0()));

        let outcome = sync(&source, &FakeReference::failing()).await;

        assert_eq!(outcome, SyncOutcome::Unsynced);
        assert_eq!(source.offset(), TimeOffset::ZERO);
        assert_eq!(source.now(), t0());
    }

    #[tokio::test]
    async fn failure_keeps_last_good_offset() {
        let source = TimeSource::with_clock(ManualClock::at(t0()));
        sync(&source, &FakeReference::answering(t0() - TimeDelta::milliseconds(300))).await;

        let outcome = sync(&source, &FakeReference::failing()).await;

        assert_eq!(outcome, SyncOutcome::Unsynced);
        assert_eq!(source.offset().as_millis(), -300);
        assert_eq!(source.now(), t0() - TimeDelta::milliseconds(300));
    }

    // ── SyncTask ──────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn periodic_sync_runs_until_dropped() {
        let source = TimeSource::with_clock(ManualClock::at(t0()));
        let reference = FakeReference::failing();
        let calls = reference.calls.clone();

        let task = SyncTask::spawn(source, reference, Duration::from_secs(300));

        // Immediately, then at 300s and 600s.
        tokio::time::sleep(Duration::from_secs(601)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        task.stop();
        tokio::time::sleep(Duration::from_secs(900)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_runs_an_extra_attempt() {
        let source = TimeSource::with_clock(ManualClock::at(t0()));
        let reference = FakeReference::answering(t0() + TimeDelta::milliseconds(10));
        let calls = reference.calls.clone();

        let task = SyncTask::spawn(source.clone(), reference, Duration::from_secs(300));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        task.trigger();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.offset().as_millis(), 10);
    }
}
