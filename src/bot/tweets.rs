use crate::db::models::{GameStatSummary, LiveGame};

/// Outcome of a finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Winner {
    Home(String),
    Visitor(String),
    Tie,
}

impl Winner {
    pub fn of(game: &LiveGame) -> Self {
        use std::cmp::Ordering::*;
        match game.home_score.cmp(&game.visitor_score) {
            Greater => Winner::Home(game.home_team.name.clone()),
            Less => Winner::Visitor(game.visitor_team.name.clone()),
            Equal => Winner::Tie,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Winner::Home(name) | Winner::Visitor(name) => name,
            Winner::Tie => "Tie",
        }
    }
}

fn scoreline(game: &LiveGame) -> String {
    format!(
        "{} {} - {} {}",
        game.home_team.name, game.home_score, game.visitor_team.name, game.visitor_score
    )
}

pub fn live_update(game: &LiveGame) -> String {
    format!(
        "🏀 Live NBA Game:\n{} - {} vs {}\nPeriod: {}/{}\nStatus: {}\n{}\n#NBA {}",
        game.date,
        game.home_team.name,
        game.visitor_team.name,
        game.current_period,
        game.total_periods,
        game.status_long,
        scoreline(game),
        game.matchup_hashtag(),
    )
}

pub fn quarter_end(game: &LiveGame) -> String {
    format!(
        "🏀 End of Q{}: {}\n#NBA {}",
        game.current_period,
        scoreline(game),
        game.matchup_hashtag(),
    )
}

pub fn leader_stats(game: &LiveGame, quarter: u32, stats: &GameStatSummary) -> String {
    let home = &game.home_team.name;
    let visitors = &game.visitor_team.name;
    format!(
        "Quarter {quarter} Stats:\n\
         {home} Leading Scorer: {}\n\
         {visitors} Leading Scorer: {}\n\
         {home} Leading Rebounder: {}\n\
         {visitors} Leading Rebounder: {}\n\
         {home} Leading Assister: {}\n\
         {visitors} Leading Assister: {}\n\
         #NBA {}",
        stats.max_points_team1,
        stats.max_points_team2,
        stats.max_tot_reb_team1,
        stats.max_tot_reb_team2,
        stats.max_assists_team1,
        stats.max_assists_team2,
        game.matchup_hashtag(),
    )
}

pub fn final_score(game: &LiveGame, summary: &str) -> String {
    format!(
        "🏀 Final Score: {}\nWinner: {}\n\nSummary:\n{}\n#NBA",
        scoreline(game),
        Winner::of(game).label(),
        summary,
    )
}
