use std::collections::HashMap;

/// Highest quarter announced per game, for this process lifetime only.
///
/// Values never decrease. A restarted process starts empty and may announce
/// a quarter a previous process already announced.
#[derive(Debug, Default)]
pub struct QuarterTracker {
    announced: HashMap<i64, u32>,
}

impl QuarterTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the game has an entry, starting at 0. Returns the current value.
    pub fn ensure(&mut self, game_id: i64) -> u32 {
        *self.announced.entry(game_id).or_insert(0)
    }

    pub fn last_announced(&self, game_id: i64) -> Option<u32> {
        self.announced.get(&game_id).copied()
    }

    /// Whether `period` is a quarter boundary not yet announced for the game.
    ///
    /// Boundaries are periods 2 through 4; overtime and the final buzzer are
    /// covered by the live and final posts.
    pub fn is_new_boundary(&self, game_id: i64, period: u32) -> bool {
        (2..=4).contains(&period) && period > self.last_announced(game_id).unwrap_or(0)
    }

    /// Record that `period` was announced. Lower values are ignored.
    pub fn mark_announced(&mut self, game_id: i64, period: u32) {
        let entry = self.announced.entry(game_id).or_insert(0);
        *entry = (*entry).max(period);
    }
}
