use serde::{Deserialize, Serialize};

/// One side of an NBA matchup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    /// Three-letter code, e.g. "LAL"
    pub code: String,
}

/// Live game state as fetched from the stats provider
#[derive(Debug, Clone, PartialEq)]
pub struct LiveGame {
    pub id: i64,
    /// Tip-off time as reported by the provider (ISO-8601)
    pub date: String,
    pub home_team: Team,
    pub visitor_team: Team,
    pub home_score: u32,
    pub visitor_score: u32,
    pub current_period: u32,
    pub total_periods: u32,
    pub status_short: String,
    pub status_long: String,
}

impl LiveGame {
    /// API-NBA reports finished games as `"final"` in the legacy schema and
    /// as status code 3 in the current one.
    pub fn is_final(&self) -> bool {
        self.status_short.eq_ignore_ascii_case("final") || self.status_short == "3"
    }

    /// `#LALvsBOS`
    pub fn matchup_hashtag(&self) -> String {
        format!("#{}vs{}", self.home_team.code, self.visitor_team.code)
    }
}

/// Leading per-team stat lines for a game. Team 1 is home, team 2 is visitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStatSummary {
    pub max_points_team1: u32,
    pub max_assists_team1: u32,
    pub max_tot_reb_team1: u32,
    pub max_points_team2: u32,
    pub max_assists_team2: u32,
    pub max_tot_reb_team2: u32,
}

/// The usable OAuth2 credential pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub access_token: String,
    pub refresh_token: String,
}

/// Transient PKCE values for an in-flight authorization attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeState {
    pub code_verifier: String,
    pub state: String,
}

/// The single stored credentials document.
///
/// Holds either a credential pair or a handshake state; each `set` replaces
/// the document wholesale so the two never coexist after a write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl CredentialDocument {
    pub fn credentials(&self) -> Option<CredentialRecord> {
        Some(CredentialRecord {
            access_token: self.access_token.clone()?,
            refresh_token: self.refresh_token.clone()?,
        })
    }

    pub fn handshake(&self) -> Option<HandshakeState> {
        Some(HandshakeState {
            code_verifier: self.code_verifier.clone()?,
            state: self.state.clone()?,
        })
    }
}

impl From<CredentialRecord> for CredentialDocument {
    fn from(record: CredentialRecord) -> Self {
        CredentialDocument {
            access_token: Some(record.access_token),
            refresh_token: Some(record.refresh_token),
            ..Default::default()
        }
    }
}

impl From<HandshakeState> for CredentialDocument {
    fn from(handshake: HandshakeState) -> Self {
        CredentialDocument {
            code_verifier: Some(handshake.code_verifier),
            state: Some(handshake.state),
            ..Default::default()
        }
    }
}
