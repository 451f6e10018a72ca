use clap::Parser;

/// Scheduled bot that tweets live NBA game updates
#[derive(Parser, Debug, Clone)]
#[command(name = "nba-scores-bot", version, about)]
pub struct Config {
    /// Log posts instead of sending them to Twitter
    #[arg(long, env = "DRY_RUN", default_value = "false")]
    pub dry_run: bool,

    /// Listen address for the OAuth endpoints
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// SQLite database path (holds the OAuth credential document)
    #[arg(long, env = "DATABASE_PATH", default_value = "nba-bot.db")]
    pub database_path: String,

    /// API-NBA base URL
    #[arg(
        long,
        env = "NBA_API_URL",
        default_value = "https://api-nba-v1.p.rapidapi.com"
    )]
    pub nba_api_url: String,

    /// RapidAPI host header for API-NBA
    #[arg(long, env = "NBA_API_HOST", default_value = "api-nba-v1.p.rapidapi.com")]
    pub nba_api_host: String,

    /// RapidAPI key for API-NBA
    #[arg(long, env = "NBA_API_KEY")]
    pub nba_api_key: String,

    /// Twitter OAuth2 client ID (required unless --dry-run)
    #[arg(long, env = "TWITTER_CLIENT_ID")]
    pub twitter_client_id: Option<String>,

    /// Twitter OAuth2 client secret (confidential clients only)
    #[arg(long, env = "TWITTER_CLIENT_SECRET")]
    pub twitter_client_secret: Option<String>,

    /// Redirect URI registered for the OAuth2 app
    #[arg(
        long,
        env = "TWITTER_CALLBACK_URL",
        default_value = "http://localhost:8080/callback"
    )]
    pub twitter_callback_url: String,

    /// Twitter API base URL
    #[arg(long, env = "TWITTER_API_URL", default_value = "https://api.twitter.com")]
    pub twitter_api_url: String,

    /// Twitter OAuth2 authorization page
    #[arg(
        long,
        env = "TWITTER_AUTHORIZE_URL",
        default_value = "https://twitter.com/i/oauth2/authorize"
    )]
    pub twitter_authorize_url: String,

    /// OpenAI API base URL
    #[arg(long, env = "OPENAI_API_URL", default_value = "https://api.openai.com/v1")]
    pub openai_api_url: String,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY")]
    pub openai_api_key: String,

    /// Completion model used for final-game summaries
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo-instruct")]
    pub openai_model: String,

    /// Output token budget for a summary
    #[arg(long, env = "SUMMARY_MAX_TOKENS", default_value = "150")]
    pub summary_max_tokens: u32,

    /// Seconds between scheduled runs
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value = "300")]
    pub poll_interval_secs: u64,

    /// Refresh the OAuth2 token pair at the start of every scheduled run
    #[arg(
        long,
        env = "REFRESH_BEFORE_RUN",
        default_value = "true",
        action = clap::ArgAction::Set
    )]
    pub refresh_before_run: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.nba_api_key.trim().is_empty() {
            anyhow::bail!("NBA_API_KEY must not be empty");
        }
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY must not be empty");
        }
        if !self.dry_run
            && self
                .twitter_client_id
                .as_deref()
                .map_or(true, |id| id.trim().is_empty())
        {
            anyhow::bail!(
                "TWITTER_CLIENT_ID is required when posting. Use --dry-run to only log tweets."
            );
        }
        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be positive");
        }
        if self.summary_max_tokens == 0 {
            anyhow::bail!("summary_max_tokens must be positive");
        }
        url::Url::parse(&self.twitter_callback_url)
            .map_err(|e| anyhow::anyhow!("invalid TWITTER_CALLBACK_URL: {}", e))?;
        url::Url::parse(&self.twitter_authorize_url)
            .map_err(|e| anyhow::anyhow!("invalid TWITTER_AUTHORIZE_URL: {}", e))?;
        Ok(())
    }
}
