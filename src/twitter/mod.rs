pub mod client;
pub mod oauth;

pub use client::{DryRunPoster, Poster, TwitterPoster};
pub use oauth::{OAuthConfig, TwitterOAuth};
