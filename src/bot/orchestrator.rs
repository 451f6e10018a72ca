use std::sync::Arc;
use tracing::{error, info};

use super::tracker::QuarterTracker;
use super::tweets;
use crate::db::models::LiveGame;
use crate::error::BotResult;
use crate::live_scores::StatsClient;
use crate::summary::SummaryGenerator;
use crate::twitter::Poster;

/// What a single poll did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Live games returned by the provider
    pub games: usize,
    /// Posts successfully published
    pub posts: usize,
    /// Games whose processing stopped on an error
    pub failed_games: Vec<i64>,
}

/// Turns one poll of live games into posts.
///
/// Games are handled in provider order. A failure abandons the remaining
/// posts of that game only; later games are still processed.
pub struct Orchestrator {
    stats: Arc<dyn StatsClient>,
    poster: Arc<dyn Poster>,
    summaries: Arc<dyn SummaryGenerator>,
    tracker: QuarterTracker,
}

impl Orchestrator {
    pub fn new(
        stats: Arc<dyn StatsClient>,
        poster: Arc<dyn Poster>,
        summaries: Arc<dyn SummaryGenerator>,
    ) -> Self {
        Orchestrator {
            stats,
            poster,
            summaries,
            tracker: QuarterTracker::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn tracker(&self) -> &QuarterTracker {
        &self.tracker
    }

    /// Poll once. Only a failure to list live games fails the whole run.
    pub async fn run(&mut self) -> BotResult<RunReport> {
        let games = self.stats.list_live_games().await?;
        if games.is_empty() {
            info!("No live NBA games to tweet about.");
            return Ok(RunReport::default());
        }
        info!("{} live NBA game(s) from {}", games.len(), self.stats.name());

        let mut report = RunReport {
            games: games.len(),
            ..Default::default()
        };
        for game in &games {
            let mut posts = 0;
            if let Err(e) = self.process_game(game, &mut posts).await {
                error!(
                    "Error tweeting game {} ({} vs {}): {}",
                    game.id, game.home_team.name, game.visitor_team.name, e
                );
                report.failed_games.push(game.id);
            }
            report.posts += posts;
        }
        Ok(report)
    }

    async fn process_game(&mut self, game: &LiveGame, posts: &mut usize) -> BotResult<()> {
        self.tracker.ensure(game.id);

        let live_post_id = self.poster.post(&tweets::live_update(game), None).await?;
        *posts += 1;

        // The marker only moves after the post went out, so a failed
        // announcement is retried on the next poll.
        if !game.is_final() && self.tracker.is_new_boundary(game.id, game.current_period) {
            self.poster.post(&tweets::quarter_end(game), None).await?;
            *posts += 1;
            self.tracker.mark_announced(game.id, game.current_period);
        }

        // The statistics endpoint only serves the current snapshot, so one
        // fetch backs every quarter's reply.
        if game.current_period >= 1 {
            let stats = self.stats.get_game_statistics(game.id).await?;
            for quarter in 1..=game.current_period {
                let text = tweets::leader_stats(game, quarter, &stats);
                self.poster.post(&text, Some(&live_post_id)).await?;
                *posts += 1;
            }
        }

        if game.is_final() {
            let summary = self
                .summaries
                .generate_summary(&game.home_team.name, &game.visitor_team.name)
                .await?;
            self.poster
                .post(&tweets::final_score(game, &summary), None)
                .await?;
            *posts += 1;
        }

        Ok(())
    }
}
