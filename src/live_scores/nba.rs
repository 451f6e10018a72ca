use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::provider::StatsClient;
use super::stats::aggregate_leaders;
use crate::db::models::{GameStatSummary, LiveGame, Team};
use crate::error::{BotError, BotResult};

const SERVICE: &str = "API-NBA";

/// Live-stats provider backed by API-NBA on RapidAPI.
/// Docs: <https://rapidapi.com/api-sports/api/api-nba>
pub struct ApiNba {
    http: Client,
    api_key: String,
    api_host: String,
    /// Base URL for overriding in tests
    base_url: String,
}

impl ApiNba {
    pub fn new(api_key: &str, api_host: &str, base_url: &str) -> BotResult<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| BotError::upstream(SERVICE, format!("failed to build HTTP client: {}", e)))?;
        Ok(ApiNba {
            http,
            api_key: api_key.to_string(),
            api_host: api_host.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> BotResult<Value> {
        debug!("Fetching {} {:?}", url, query);
        let resp = self
            .http
            .get(url)
            .query(query)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host)
            .send()
            .await
            .map_err(|e| BotError::upstream(SERVICE, e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BotError::upstream(SERVICE, format!("{}: {}", status, body)));
        }

        resp.json()
            .await
            .map_err(|e| BotError::upstream(SERVICE, format!("invalid JSON: {}", e)))
    }
}

#[async_trait]
impl StatsClient for ApiNba {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn list_live_games(&self) -> BotResult<Vec<LiveGame>> {
        let url = format!("{}/games", self.base_url);
        let raw = self
            .get_json(&url, &[("live", "all".to_string())])
            .await
            .map_err(|e| {
                error!("Error getting live NBA games: {}", e);
                e
            })?;
        Ok(parse_live_games(&raw))
    }

    async fn get_game_statistics(&self, game_id: i64) -> BotResult<GameStatSummary> {
        let url = format!("{}/games/statistics", self.base_url);
        self.get_json(&url, &[("id", game_id.to_string())])
            .await
            .and_then(|raw| aggregate_leaders(&raw, game_id))
            .map_err(|e| {
                error!("Error getting stats for game {}: {}", game_id, e);
                e
            })
    }
}

/// Extract the game list from a `/games?live=all` response.
///
/// The current schema wraps games in `response`; the legacy v1 schema used
/// `api.games`. A missing list means no live games.
pub fn parse_live_games(raw: &Value) -> Vec<LiveGame> {
    let games = raw["response"]
        .as_array()
        .or_else(|| raw["api"]["games"].as_array());
    let Some(games) = games else {
        return vec![];
    };

    games
        .iter()
        .filter_map(|game| {
            let parsed = parse_game(game);
            if parsed.is_none() {
                warn!("Skipping unparseable game record: {}", game);
            }
            parsed
        })
        .collect()
}

fn parse_game(game: &Value) -> Option<LiveGame> {
    let id = as_i64(&game["id"])?;
    let home_team = parse_team(&game["teams"]["home"])?;
    let visitor_team = parse_team(&game["teams"]["visitors"])?;

    let date = game["date"]["start"]
        .as_str()
        .or_else(|| game["date"].as_str())
        .unwrap_or_default()
        .to_string();

    Some(LiveGame {
        id,
        date,
        home_team,
        visitor_team,
        home_score: as_u32(&game["scores"]["home"]["points"]).unwrap_or(0),
        visitor_score: as_u32(&game["scores"]["visitors"]["points"]).unwrap_or(0),
        current_period: as_u32(&game["periods"]["current"]).unwrap_or(0),
        total_periods: as_u32(&game["periods"]["total"]).unwrap_or(4),
        status_short: as_text(&game["status"]["short"]),
        status_long: as_text(&game["status"]["long"]),
    })
}

fn parse_team(team: &Value) -> Option<Team> {
    Some(Team {
        name: team["name"].as_str()?.to_string(),
        code: team["code"].as_str().unwrap_or_default().to_string(),
    })
}

// ── Loose JSON helpers ─────────────────────────────────────────────────────────
// API-NBA mixes numbers and numeric strings between endpoints.

pub(super) fn as_i64(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

pub(super) fn as_u32(v: &Value) -> Option<u32> {
    as_i64(v).and_then(|n| u32::try_from(n).ok())
}

fn as_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
