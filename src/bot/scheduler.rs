use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::orchestrator::{Orchestrator, RunReport};
use crate::twitter::TwitterOAuth;

/// Result of one scheduled trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Completed(RunReport),
    /// A previous run still held the orchestrator
    Skipped,
    RefreshFailed,
    RunFailed,
}

/// Fires the orchestrator on a fixed interval.
///
/// Each tick runs in its own task; the orchestrator mutex makes overlapping
/// ticks skip instead of racing on the quarter markers and the token pair.
#[derive(Clone)]
pub struct Scheduler {
    orchestrator: Arc<Mutex<Orchestrator>>,
    /// Present when tokens should be refreshed before each run
    refresher: Option<Arc<TwitterOAuth>>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(
        orchestrator: Orchestrator,
        refresher: Option<Arc<TwitterOAuth>>,
        interval: Duration,
    ) -> Self {
        Scheduler {
            orchestrator: Arc::new(Mutex::new(orchestrator)),
            refresher,
            interval,
        }
    }

    /// Run once. Errors are logged here and never propagated.
    pub async fn trigger(&self) -> TriggerOutcome {
        let Ok(mut orchestrator) = self.orchestrator.try_lock() else {
            warn!("Previous tweetNBAScores run still in progress, skipping this tick");
            return TriggerOutcome::Skipped;
        };

        if let Some(oauth) = &self.refresher {
            if let Err(e) = oauth.refresh().await {
                error!("Token refresh before scheduled run failed: {}", e);
                return TriggerOutcome::RefreshFailed;
            }
        }

        match orchestrator.run().await {
            Ok(report) => {
                info!(
                    "Scheduled tweetNBAScores executed successfully: {} game(s), {} post(s), {} failed",
                    report.games,
                    report.posts,
                    report.failed_games.len()
                );
                TriggerOutcome::Completed(report)
            }
            Err(e) => {
                error!("Error in scheduled tweetNBAScores: {}", e);
                TriggerOutcome::RunFailed
            }
        }
    }

    /// Start ticking in the background. The first tick fires immediately.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("Scheduler started (interval={:?})", self.interval);
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let scheduler = self.clone();
                tokio::spawn(async move {
                    scheduler.trigger().await;
                });
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::orchestrator::tests::{FakePoster, FakeStats, FakeSummary};
    use crate::bot::tweets::tests::sample_game;
    use crate::db::Database;
    use crate::twitter::OAuthConfig;
    use std::sync::atomic::Ordering;

    fn scheduler(stats: FakeStats) -> Scheduler {
        let orchestrator = Orchestrator::new(
            Arc::new(stats),
            Arc::new(FakePoster::default()),
            Arc::new(FakeSummary::default()),
        );
        Scheduler::new(orchestrator, None, Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_trigger_completes_run() {
        let s = scheduler(FakeStats::with_games(vec![sample_game(1, 1, "live", 2, 0)]));
        match s.trigger().await {
            TriggerOutcome::Completed(report) => {
                assert_eq!(report.games, 1);
                assert_eq!(report.posts, 2);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_trigger_swallows_run_failure() {
        let s = scheduler(FakeStats {
            fail_listing: true,
            ..Default::default()
        });
        assert_eq!(s.trigger().await, TriggerOutcome::RunFailed);
        // Still usable afterwards.
        assert_eq!(s.trigger().await, TriggerOutcome::RunFailed);
    }

    #[tokio::test]
    async fn test_failed_refresh_skips_run() {
        let stats = Arc::new(FakeStats::with_games(vec![sample_game(1, 2, "live", 40, 38)]));
        let poster = Arc::new(FakePoster::default());
        let orchestrator = Orchestrator::new(
            stats.clone(),
            poster.clone(),
            Arc::new(FakeSummary::default()),
        );
        // An empty store has no refresh token, so refresh fails before any request.
        let oauth = TwitterOAuth::new(
            OAuthConfig {
                client_id: "client-123".into(),
                client_secret: None,
                callback_url: "http://localhost:8080/callback".into(),
                authorize_url: "https://twitter.com/i/oauth2/authorize".into(),
                api_url: "http://127.0.0.1:9".into(),
            },
            Arc::new(Database::open(":memory:").unwrap()),
        )
        .unwrap();
        let s = Scheduler::new(orchestrator, Some(Arc::new(oauth)), Duration::from_secs(300));

        assert_eq!(s.trigger().await, TriggerOutcome::RefreshFailed);
        assert_eq!(stats.stat_calls.load(Ordering::SeqCst), 0);
        assert!(poster.posts.lock().unwrap().is_empty());
        // The lock is released for the next tick.
        assert!(s.orchestrator.try_lock().is_ok());
    }

    #[tokio::test]
    async fn test_overlapping_trigger_is_skipped() {
        let s = scheduler(FakeStats::default());
        let _held = s.orchestrator.lock().await;
        assert_eq!(s.trigger().await, TriggerOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_quarter_markers_survive_between_triggers() {
        let s = scheduler(FakeStats::with_games(vec![sample_game(5, 2, "live", 40, 38)]));
        s.trigger().await;
        s.trigger().await;
        let orchestrator = s.orchestrator.lock().await;
        assert_eq!(orchestrator.tracker().last_announced(5), Some(2));
    }
}
