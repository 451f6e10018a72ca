use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::error::{BotError, BotResult};

const SERVICE: &str = "OpenAI";

/// Produces the prose summary attached to final-score tweets.
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn generate_summary(&self, home_team: &str, visitor_team: &str) -> BotResult<String>;
}

/// Summary generator backed by the OpenAI text-completion endpoint
pub struct OpenAiSummary {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiSummary {
    pub fn new(api_url: &str, api_key: &str, model: &str, max_tokens: u32) -> BotResult<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| BotError::upstream(SERVICE, format!("failed to build HTTP client: {}", e)))?;
        Ok(OpenAiSummary {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
        })
    }
}

pub fn summary_prompt(home_team: &str, visitor_team: &str) -> String {
    format!(
        "Generate a summary for the NBA game between {} and {}.",
        home_team, visitor_team
    )
}

#[async_trait]
impl SummaryGenerator for OpenAiSummary {
    async fn generate_summary(&self, home_team: &str, visitor_team: &str) -> BotResult<String> {
        let url = format!("{}/completions", self.api_url);
        debug!("Requesting summary for {} vs {}", home_team, visitor_team);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "prompt": summary_prompt(home_team, visitor_team),
                "max_tokens": self.max_tokens,
            }))
            .send()
            .await
            .map_err(|e| {
                error!("Error generating game summary: {}", e);
                BotError::upstream(SERVICE, e)
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            error!("Error generating game summary ({}): {}", status, body);
            return Err(BotError::upstream(SERVICE, format!("{}: {}", status, body)));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| BotError::upstream(SERVICE, format!("invalid JSON: {}", e)))?;
        extract_completion(&data)
    }
}

fn extract_completion(data: &Value) -> BotResult<String> {
    data["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .and_then(|choice| choice["text"].as_str())
        .map(|text| text.trim().to_string())
        .ok_or_else(|| BotError::upstream(SERVICE, "no completions returned"))
}
