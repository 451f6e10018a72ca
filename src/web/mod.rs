use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::BotError;
use crate::twitter::TwitterOAuth;

#[derive(Clone)]
pub struct AppState {
    pub oauth: Arc<TwitterOAuth>,
}

/// Build the Axum router for the OAuth handshake endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth", get(auth_handler))
        .route("/callback", get(callback_handler))
        .route("/tweet", get(tweet_handler).post(tweet_handler))
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn error_response(err: BotError) -> Response {
    let status = match err {
        BotError::StateMismatch => {
            return (StatusCode::BAD_REQUEST, "Tokens do not match.").into_response()
        }
        BotError::MissingCredential(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!("OAuth endpoint failed: {}", err);
    (status, err.to_string()).into_response()
}

/// GET /auth → 302 to the Twitter consent page
async fn auth_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.oauth.authorize().await {
        Ok(url) => (StatusCode::FOUND, [(header::LOCATION, url)]).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
struct CallbackParams {
    state: String,
    code: String,
}

/// GET /callback?state=..&code=..
async fn callback_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Response {
    match state.oauth.callback(&params.state, &params.code).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => error_response(e),
    }
}

/// GET|POST /tweet: rotate the stored token pair
async fn tweet_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.oauth.refresh().await {
        Ok(_) => "Tweet credentials refreshed successfully".into_response(),
        Err(e) => error_response(e),
    }
}
