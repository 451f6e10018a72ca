use serde_json::Value;

use super::nba::{as_i64, as_u32};
use crate::db::models::GameStatSummary;
use crate::error::{BotError, BotResult};

/// Reduce a `/games/statistics` response to the leading points, assists
/// and rebounds per team.
///
/// The first `response` record is the game. Each entry of its `team` array
/// counts towards the home side when its `id` equals the record's
/// `home_team`, otherwise towards the visitor side.
pub fn aggregate_leaders(raw: &Value, game_id: i64) -> BotResult<GameStatSummary> {
    let game = raw["response"]
        .as_array()
        .and_then(|records| records.first())
        .filter(|record| record.is_object())
        .ok_or(BotError::NoGameData(game_id))?;

    let home_team_id = as_i64(&game["home_team"]);
    let mut summary = GameStatSummary::default();

    for team in game["team"].as_array().into_iter().flatten() {
        let Some(line) = team["statistics"].as_array().and_then(|s| s.first()) else {
            continue;
        };
        let points = as_u32(&line["points"]).unwrap_or(0);
        let assists = as_u32(&line["assists"]).unwrap_or(0);
        let tot_reb = as_u32(&line["totReb"]).unwrap_or(0);

        let is_home = home_team_id.is_some() && as_i64(&team["id"]) == home_team_id;
        let (max_points, max_assists, max_tot_reb) = if is_home {
            (
                &mut summary.max_points_team1,
                &mut summary.max_assists_team1,
                &mut summary.max_tot_reb_team1,
            )
        } else {
            (
                &mut summary.max_points_team2,
                &mut summary.max_assists_team2,
                &mut summary.max_tot_reb_team2,
            )
        };
        *max_points = (*max_points).max(points);
        *max_assists = (*max_assists).max(assists);
        *max_tot_reb = (*max_tot_reb).max(tot_reb);
    }

    Ok(summary)
}
