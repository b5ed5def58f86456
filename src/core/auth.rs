//! Session adapter for the OIDC sign-in provider.
//!
//! Runs the authorization code flow with PKCE against the provider named in
//! [`ClientConfig`] and keeps the resulting session record in
//! `sessionStorage` under [`ClientConfig::session_key`]. Tokens are not
//! refreshed; an expired record means signed out.

use serde::{Deserialize, Serialize};

use crate::config::{CONFIG_URL, ClientConfig, FETCH_TIMEOUT_MS, TOKEN_CLOCK_SKEW_SECS};
use crate::core::error::{AuthError, ConfigError, ErrorClass};
use crate::core::oidc::{
    Callback, PendingLogin, Pkce, Profile, ProviderMetadata, TokenResponse, authorization_url,
    discovery_url, end_session_url, id_token_profile, match_pending, parse_callback, random_state,
    token_request_body,
};
use crate::models::AuthState;
use crate::utils::dom::{clear_query, location_search, log_failure, navigate, origin, session_storage};
use crate::utils::fetch::{RequestBody, fetch_json, response_json, send};

/// Where the PKCE verifier waits for the provider redirect.
const PENDING_LOGIN_KEY: &str = "webdrive.oidc.pending";

#[derive(Serialize, Deserialize)]
struct StoredUser {
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_token: Option<String>,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<u64>,
    #[serde(default)]
    profile: Profile,
}

impl StoredUser {
    fn from_token(token: TokenResponse, now_secs: u64) -> Self {
        let profile = token
            .id_token
            .as_deref()
            .and_then(id_token_profile)
            .unwrap_or_default();
        let expires_at = token.expires_in.map(|secs| now_secs.saturating_add(secs));
        Self {
            access_token: token.access_token,
            id_token: token.id_token,
            expires_at,
            profile,
        }
    }
}

/// Session record for a fresh token response.
fn session_record(token: TokenResponse, now_secs: u64) -> Result<String, AuthError> {
    serde_json::to_string(&StoredUser::from_token(token, now_secs)).map_err(|_| AuthError::Storage)
}

/// Decode a stored user record. Malformed, tokenless or expired records
/// mean signed out.
pub fn parse_session(raw: &str, now_secs: u64) -> AuthState {
    let Ok(user) = serde_json::from_str::<StoredUser>(raw) else {
        return AuthState::Unauthenticated;
    };
    if user.access_token.is_empty() {
        return AuthState::Unauthenticated;
    }
    if let Some(expires_at) = user.expires_at
        && now_secs > expires_at.saturating_add(TOKEN_CLOCK_SKEW_SECS)
    {
        return AuthState::Unauthenticated;
    }
    AuthState::Authenticated {
        token: user.access_token,
        user: user.profile.display_name(),
    }
}

fn stored_id_token(raw: &str) -> Option<String> {
    serde_json::from_str::<StoredUser>(raw).ok()?.id_token
}

fn now_secs() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

async fn discover(config: &ClientConfig) -> Result<ProviderMetadata, AuthError> {
    fetch_json(&discovery_url(&config.authority))
        .await
        .map_err(AuthError::Discovery)
}

/// Current session as seen from this page, completing a sign-in first when
/// the provider just redirected back.
pub async fn resolve_session(config: &ClientConfig) -> AuthState {
    match parse_callback(&location_search()) {
        Callback::None => {}
        Callback::Error(message) => {
            clear_query();
            return AuthState::Error(message);
        }
        Callback::Code { code, state } => {
            let result = complete_sign_in(config, &code, &state).await;
            clear_query();
            if let Err(e) = result {
                log_failure(e.class(), "Sign-in failed", &e);
                return AuthState::Error(e.to_string());
            }
        }
    }

    let raw = session_storage().and_then(|s| s.get_item(&config.session_key()).ok().flatten());
    match raw {
        Some(raw) => parse_session(&raw, now_secs()),
        None => AuthState::Unauthenticated,
    }
}

/// Exchange the authorization code and store the session record.
async fn complete_sign_in(config: &ClientConfig, code: &str, state: &str) -> Result<(), AuthError> {
    let storage = session_storage().ok_or(AuthError::Storage)?;
    let pending = storage
        .get_item(PENDING_LOGIN_KEY)
        .ok()
        .flatten()
        .and_then(|raw| serde_json::from_str::<PendingLogin>(&raw).ok());
    let _ = storage.remove_item(PENDING_LOGIN_KEY);
    let login = match_pending(pending, state)?;

    let provider = discover(config).await?;
    let body = RequestBody::UrlEncoded(token_request_body(config, &login, code));
    let response = send("POST", &provider.token_endpoint, None, body, FETCH_TIMEOUT_MS)
        .await
        .map_err(AuthError::TokenExchange)?;
    let token: TokenResponse = response_json(&response)
        .await
        .map_err(AuthError::TokenExchange)?;

    let record = session_record(token, now_secs())?;
    storage
        .set_item(&config.session_key(), &record)
        .map_err(|_| AuthError::Storage)
}

/// Remember a fresh PKCE verifier, then leave for the provider's
/// authorization endpoint.
pub async fn sign_in(config: &ClientConfig) -> Result<(), AuthError> {
    let provider = discover(config).await?;
    let pkce = Pkce::generate()?;
    let login = PendingLogin {
        state: random_state()?,
        verifier: pkce.verifier,
        redirect_uri: origin(),
    };
    let url = authorization_url(&provider.authorization_endpoint, config, &login, &pkce.challenge)?;

    let raw = serde_json::to_string(&login).map_err(|_| AuthError::Storage)?;
    session_storage()
        .ok_or(AuthError::Storage)?
        .set_item(PENDING_LOGIN_KEY, &raw)
        .map_err(|_| AuthError::Storage)?;
    navigate(&url);
    Ok(())
}

/// Forget the local session, then end the provider session if it has an
/// end-session endpoint. Otherwise just return to the sign-in screen.
pub async fn sign_out(config: &ClientConfig) {
    let key = config.session_key();
    let id_token = session_storage().and_then(|storage| {
        let raw = storage.get_item(&key).ok().flatten();
        let _ = storage.remove_item(&key);
        raw.and_then(|raw| stored_id_token(&raw))
    });

    let home = origin();
    let target = match discover(config).await {
        Ok(provider) => provider
            .end_session_endpoint
            .and_then(|endpoint| end_session_url(&endpoint, config, &home, id_token.as_deref()).ok()),
        Err(e) => {
            log_failure(ErrorClass::Transient, "Provider logout unavailable", &e);
            None
        }
    };
    navigate(target.as_deref().unwrap_or(&home));
}

/// Reject configs the provider could never work with.
pub fn validate_config(config: ClientConfig) -> Result<ClientConfig, ConfigError> {
    if config.authority.trim().is_empty() {
        return Err(ConfigError::Invalid("authority is empty".to_string()));
    }
    if config.client_id.trim().is_empty() {
        return Err(ConfigError::Invalid("client_id is empty".to_string()));
    }
    Ok(config)
}

/// Fetch the runtime configuration.
pub async fn load_config() -> Result<ClientConfig, ConfigError> {
    let config = fetch_json::<ClientConfig>(CONFIG_URL)
        .await
        .map_err(ConfigError::LoadFailed)?;
    validate_config(config)
}
