use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use crate::db::CredentialStore;
use crate::error::{BotError, BotResult};

const SERVICE: &str = "Twitter";

/// Publishes posts on behalf of the bot account.
#[async_trait]
pub trait Poster: Send + Sync {
    /// Post `text`, optionally as a reply, returning the new post id.
    async fn post(&self, text: &str, reply_to: Option<&str>) -> BotResult<String>;
}

/// Poster backed by the Twitter v2 `POST /2/tweets` endpoint.
///
/// The access token is read from the credential store on every call so a
/// refresh by the OAuth endpoints or the scheduler is picked up immediately.
pub struct TwitterPoster {
    http: Client,
    api_url: String,
    store: Arc<dyn CredentialStore>,
}

impl TwitterPoster {
    pub fn new(api_url: &str, store: Arc<dyn CredentialStore>) -> BotResult<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| BotError::upstream(SERVICE, format!("failed to build HTTP client: {}", e)))?;
        Ok(TwitterPoster {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            store,
        })
    }
}

#[async_trait]
impl Poster for TwitterPoster {
    async fn post(&self, text: &str, reply_to: Option<&str>) -> BotResult<String> {
        let access_token = self
            .store
            .get()?
            .credentials()
            .ok_or(BotError::MissingCredential("access token"))?
            .access_token;

        let body = tweet_body(text, reply_to);
        let url = format!("{}/2/tweets", self.api_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Error posting tweet: {}", e);
                BotError::upstream(SERVICE, e)
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            error!("Error posting tweet ({}): {}", status, detail);
            return Err(BotError::upstream(SERVICE, format!("{}: {}", status, detail)));
        }

        let raw: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| BotError::upstream(SERVICE, format!("invalid JSON: {}", e)))?;
        let id = raw["data"]["id"]
            .as_str()
            .ok_or_else(|| BotError::upstream(SERVICE, format!("response has no post id: {}", raw)))?
            .to_string();
        info!("Tweet posted successfully (id={}): {}", id, text);
        Ok(id)
    }
}

fn tweet_body(text: &str, reply_to: Option<&str>) -> serde_json::Value {
    match reply_to {
        Some(parent) => serde_json::json!({
            "text": text,
            "reply": { "in_reply_to_tweet_id": parent },
        }),
        None => serde_json::json!({ "text": text }),
    }
}

/// Logs posts instead of publishing them.
#[derive(Default)]
pub struct DryRunPoster {
    counter: AtomicU64,
}

#[async_trait]
impl Poster for DryRunPoster {
    async fn post(&self, text: &str, reply_to: Option<&str>) -> BotResult<String> {
        let id = format!("dry-run-{}", self.counter.fetch_add(1, Ordering::Relaxed) + 1);
        match reply_to {
            Some(parent) => info!("[DRY RUN] reply {} to {}:\n{}", id, parent, text),
            None => info!("[DRY RUN] post {}:\n{}", id, text),
        }
        Ok(id)
    }
}
