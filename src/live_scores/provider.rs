use async_trait::async_trait;

use crate::db::models::{GameStatSummary, LiveGame};
use crate::error::BotResult;

/// Trait every live-stats source must implement.
#[async_trait]
pub trait StatsClient: Send + Sync {
    /// Return every game the provider currently reports as live, unmodified.
    async fn list_live_games(&self) -> BotResult<Vec<LiveGame>>;

    /// Return the leading stat lines of both teams for a game.
    async fn get_game_statistics(&self, game_id: i64) -> BotResult<GameStatSummary>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
