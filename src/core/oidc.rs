//! OpenID Connect authorization code flow with PKCE (RFC 7636).
//!
//! Everything here is pure: discovery and end-session URLs, the PKCE pair,
//! the authorization request, callback parsing, the token request body and
//! the ID token profile. [`crate::core::auth`] runs the flow in the browser.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::{Url, form_urlencoded};

use crate::config::ClientConfig;
use crate::core::error::AuthError;

/// OpenID provider configuration document for `authority`.
pub fn discovery_url(authority: &str) -> String {
    format!(
        "{}/.well-known/openid-configuration",
        authority.trim_end_matches('/')
    )
}

/// The endpoints this client uses from the discovery document.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProviderMetadata {
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    #[serde(default)]
    pub end_session_endpoint: Option<String>,
}

// =============================================================================
// PKCE
// =============================================================================

/// Code verifier and its S256 challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

impl Pkce {
    /// 32 random bytes give a 43-character verifier.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let verifier = URL_SAFE_NO_PAD.encode(seed);
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        Self { verifier, challenge }
    }

    pub fn generate() -> Result<Self, AuthError> {
        let mut seed = [0u8; 32];
        getrandom::getrandom(&mut seed).map_err(|e| AuthError::Random(e.to_string()))?;
        Ok(Self::from_seed(&seed))
    }
}

/// Opaque `state` value binding a callback to the request that caused it.
pub fn random_state() -> Result<String, AuthError> {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes).map_err(|e| AuthError::Random(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

// =============================================================================
// Authorization request
// =============================================================================

/// A sign-in started from this tab, kept across the provider redirect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    pub state: String,
    pub verifier: String,
    pub redirect_uri: String,
}

pub fn authorization_url(
    endpoint: &str,
    config: &ClientConfig,
    login: &PendingLogin,
    challenge: &str,
) -> Result<String, AuthError> {
    let mut url = Url::parse(endpoint).map_err(|e| AuthError::Endpoint(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", &login.redirect_uri)
        .append_pair("scope", &config.scope)
        .append_pair("state", &login.state)
        .append_pair("code_challenge", challenge)
        .append_pair("code_challenge_method", "S256");
    Ok(url.into())
}

/// Provider logout, returning to `post_logout_redirect_uri` afterwards.
pub fn end_session_url(
    endpoint: &str,
    config: &ClientConfig,
    post_logout_redirect_uri: &str,
    id_token: Option<&str>,
) -> Result<String, AuthError> {
    let mut url = Url::parse(endpoint).map_err(|e| AuthError::Endpoint(e.to_string()))?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("client_id", &config.client_id)
            .append_pair("post_logout_redirect_uri", post_logout_redirect_uri);
        if let Some(id_token) = id_token {
            query.append_pair("id_token_hint", id_token);
        }
    }
    Ok(url.into())
}

// =============================================================================
// Callback
// =============================================================================

/// What the provider put in the query string on the way back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Callback {
    /// Ordinary page load.
    None,
    Error(String),
    Code { code: String, state: String },
}

/// Parse `location.search` (leading `?` optional).
pub fn parse_callback(search: &str) -> Callback {
    let query = search.strip_prefix('?').unwrap_or(search);
    let (mut code, mut state, mut error, mut description) = (None, None, None, None);
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match &*key {
            "code" => &mut code,
            "state" => &mut state,
            "error" => &mut error,
            "error_description" => &mut description,
            _ => continue,
        };
        *slot = Some(value.into_owned());
    }

    if let Some(error) = error {
        return Callback::Error(match description {
            Some(description) => format!("{}: {}", error, description),
            None => error,
        });
    }
    match (code, state) {
        (Some(code), Some(state)) => Callback::Code { code, state },
        (Some(_), None) => Callback::Error("Sign-in response is missing state".to_string()),
        _ => Callback::None,
    }
}

/// The pending login, if the callback `state` belongs to it.
pub fn match_pending(pending: Option<PendingLogin>, state: &str) -> Result<PendingLogin, AuthError> {
    pending
        .filter(|login| login.state == state)
        .ok_or(AuthError::StateMismatch)
}

// =============================================================================
// Token exchange
// =============================================================================

/// `application/x-www-form-urlencoded` body of the code exchange.
pub fn token_request_body(config: &ClientConfig, login: &PendingLogin, code: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "authorization_code")
        .append_pair("code", code)
        .append_pair("redirect_uri", &login.redirect_uri)
        .append_pair("client_id", &config.client_id)
        .append_pair("code_verifier", &login.verifier)
        .finish()
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Display claims of the signed-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Profile {
    pub fn display_name(self) -> Option<String> {
        self.name.or(self.preferred_username).or(self.email)
    }
}

/// Profile claims from the ID token payload. The signature is not checked.
pub fn id_token_profile(id_token: &str) -> Option<Profile> {
    let payload = id_token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        serde_json::from_str(
            r#"{"authority":"https://id.example.com/realms/drive/","client_id":"web"}"#,
        )
        .unwrap()
    }

    fn login() -> PendingLogin {
        PendingLogin {
            state: "st4te".to_string(),
            verifier: "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk".to_string(),
            redirect_uri: "https://drive.example.com".to_string(),
        }
    }

    fn query(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_discovery_url() {
        assert_eq!(
            discovery_url(&config().authority),
            "https://id.example.com/realms/drive/.well-known/openid-configuration"
        );
    }

    #[test]
    fn test_provider_metadata_without_logout() {
        let metadata: ProviderMetadata = serde_json::from_str(
            r#"{
                "issuer": "https://id.example.com",
                "authorization_endpoint": "https://id.example.com/auth",
                "token_endpoint": "https://id.example.com/token"
            }"#,
        )
        .unwrap();
        assert_eq!(metadata.end_session_endpoint, None);
        assert_eq!(metadata.token_endpoint, "https://id.example.com/token");
    }

    #[test]
    fn test_pkce_s256_challenge() {
        let seed = [
            116, 24, 223, 180, 151, 153, 224, 37, 79, 250, 96, 125, 216, 173, 187, 186, 22, 212, 37,
            77, 105, 214, 191, 240, 91, 88, 5, 88, 83, 132, 141, 121,
        ];
        let pkce = Pkce::from_seed(&seed);
        assert_eq!(pkce.verifier, "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
        assert_eq!(pkce.challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
    }

    #[test]
    fn test_generated_pairs_differ() {
        let a = Pkce::generate().unwrap();
        let b = Pkce::generate().unwrap();
        assert_eq!(a.verifier.len(), 43);
        assert_ne!(a.verifier, b.verifier);
        assert_ne!(random_state().unwrap(), random_state().unwrap());
    }

    #[test]
    fn test_authorization_url_carries_code_flow_params() {
        let url = authorization_url(
            "https://id.example.com/realms/drive/protocol/openid-connect/auth",
            &config(),
            &login(),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM",
        )
        .unwrap();
        assert!(url.starts_with("https://id.example.com/realms/drive/protocol/openid-connect/auth?"));

        let pairs = query(&url);
        let get = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
        assert_eq!(get("response_type"), Some("code"));
        assert_eq!(get("client_id"), Some("web"));
        assert_eq!(get("redirect_uri"), Some("https://drive.example.com"));
        assert_eq!(get("scope"), Some("openid profile email"));
        assert_eq!(get("state"), Some("st4te"));
        assert_eq!(get("code_challenge"), Some("E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"));
        assert_eq!(get("code_challenge_method"), Some("S256"));
    }

    #[test]
    fn test_authorization_url_rejects_relative_endpoint() {
        let result = authorization_url("/auth", &config(), &login(), "c");
        assert!(matches!(result, Err(AuthError::Endpoint(_))));
    }

    #[test]
    fn test_end_session_url() {
        let url = end_session_url(
            "https://id.example.com/logout",
            &config(),
            "https://drive.example.com",
            Some("a.b.c"),
        )
        .unwrap();
        assert_eq!(
            query(&url),
            vec![
                ("client_id".to_string(), "web".to_string()),
                (
                    "post_logout_redirect_uri".to_string(),
                    "https://drive.example.com".to_string()
                ),
                ("id_token_hint".to_string(), "a.b.c".to_string()),
            ]
        );

        let url = end_session_url("https://id.example.com/logout", &config(), "https://d", None)
            .unwrap();
        assert!(!url.contains("id_token_hint"));
    }

    #[test]
    fn test_parse_callback() {
        assert_eq!(parse_callback(""), Callback::None);
        assert_eq!(parse_callback("?view=trash"), Callback::None);
        assert_eq!(
            parse_callback("?state=st4te&session_state=x&code=abc%2F123"),
            Callback::Code {
                code: "abc/123".to_string(),
                state: "st4te".to_string(),
            }
        );
        assert_eq!(
            parse_callback("error=access_denied&error_description=User+cancelled&state=s"),
            Callback::Error("access_denied: User cancelled".to_string())
        );
        assert_eq!(
            parse_callback("?error=login_required"),
            Callback::Error("login_required".to_string())
        );
        assert!(matches!(parse_callback("?code=abc"), Callback::Error(_)));
    }

    #[test]
    fn test_callback_must_match_pending_login() {
        assert_eq!(match_pending(Some(login()), "st4te"), Ok(login()));
        assert_eq!(
            match_pending(Some(login()), "other"),
            Err(AuthError::StateMismatch)
        );
        assert_eq!(match_pending(None, "st4te"), Err(AuthError::StateMismatch));
    }

    #[test]
    fn test_token_request_body() {
        let body = token_request_body(&config(), &login(), "abc/123");
        assert_eq!(
            body,
            "grant_type=authorization_code&code=abc%2F123\
             &redirect_uri=https%3A%2F%2Fdrive.example.com&client_id=web\
             &code_verifier=dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"
        );
    }

    #[test]
    fn test_token_response_optional_fields() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token":"at","token_type":"Bearer"}"#).unwrap();
        assert_eq!(token.expires_in, None);
        assert_eq!(token.id_token, None);
    }

    #[test]
    fn test_id_token_profile() {
        let claims = URL_SAFE_NO_PAD.encode(r#"{"sub":"42","preferred_username":"alice"}"#);
        let id_token = format!("eyJhbGciOiJSUzI1NiJ9.{}.sig", claims);
        let profile = id_token_profile(&id_token).unwrap();
        assert_eq!(profile.display_name(), Some("alice".to_string()));

        assert_eq!(id_token_profile("not-a-jwt"), None);
        assert_eq!(id_token_profile("a.%%%.c"), None);
    }
}
