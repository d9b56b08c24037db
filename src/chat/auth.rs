// Chat credentials — anonymous login or a validated user token.
//
// Twitch chat is readable without credentials via the shared justinfan
// nick family. When a token is configured we validate it against the
// Twitch OAuth endpoint first: a dead token would otherwise fail deep in
// the IRC handshake with an unhelpful server notice.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::config::{Settings, TOKEN_ENV_VAR};

/// Twitch OAuth token validation endpoint.
pub const TWITCH_VALIDATE_URL: &str = "https://id.twitch.tv/oauth2/validate";

/// How this session logs into chat.
#[derive(Debug, Clone)]
pub enum ChatAuth {
    /// Read-only justinfan login, no credentials required.
    Anonymous,
    /// Authenticated login with a user OAuth token.
    Token { username: String, token: String },
}

/// Subset of the validation response we care about.
#[derive(Debug, Deserialize)]
struct TokenValidation {
    /// Login name the token belongs to — doubles as the IRC nick.
    login: String,
}

/// Resolve chat credentials from the environment.
///
/// No token set means anonymous read-only access. A configured token is
/// validated up front and the IRC nick is taken from the validation
/// response, so a stale or mistyped token fails here with a clear message
/// instead of during the handshake.
pub async fn resolve_auth() -> Result<ChatAuth> {
    let Some(token) = Settings::chat_token() else {
        info!("No chat token configured, connecting anonymously (read-only)");
        return Ok(ChatAuth::Anonymous);
    };

    // Tokens are pasted with and without the IRC "oauth:" prefix; the
    // validation endpoint wants the bare token.
    let token = token.trim().trim_start_matches("oauth:").to_string();

    let validation = validate_token(&token)
        .await
        .context("Chat token validation failed")?;

    info!(login = %validation.login, "Chat token validated");
    Ok(ChatAuth::Token {
        username: validation.login,
        token,
    })
}

/// Ask Twitch whether the token is alive and who it belongs to.
async fn validate_token(token: &str) -> Result<TokenValidation> {
    let client = reqwest::Client::builder()
        .user_agent("yapmeter/0.1 (chat-statistics)")
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(TWITCH_VALIDATE_URL)
        .header("Authorization", format!("OAuth {token}"))
        .send()
        .await
        .context("Token validation request failed")?;

    if !response.status().is_success() {
        let status = response.status();
        anyhow::bail!(
            "Twitch rejected the chat token ({status}).\n\
             Generate a fresh token and update {TOKEN_ENV_VAR} in your .env file,\n\
             or unset it to connect anonymously."
        );
    }

    response
        .json::<TokenValidation>()
        .await
        .context("Failed to parse token validation response")
}
