// 🔐 OAuth helpers - consent URL, redirect parsing and token request descriptors
// No tokens are exchanged here; the caller's executor sends the descriptors.

use crate::config::ClientConfig;
use crate::error::AuthError;
use crate::request::Request;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub response_type: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Body returned by `/oauth2/token`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessResponse {
    pub access_token: String,
    pub client_id: String,
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    pub user_id: String,
}

impl AccessResponse {
    /// Token pair for storage; None when the grant did not include a refresh token
    pub fn token_pair(&self) -> Option<AuthTokenPair> {
        self.refresh_token.as_ref().map(|refresh| AuthTokenPair {
            access_token: self.access_token.clone(),
            refresh_token: refresh.clone(),
        })
    }
}

/// Body returned by `/ping/whoami`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub authenticated: bool,
    pub client_id: String,
    pub user_id: String,
}

/// URL of the consent page the user is sent to
pub fn auth_request_url(app: &AppInfo, config: &ClientConfig) -> Result<Url, AuthError> {
    debug!(client_id = %app.client_id, "building auth request url");

    let mut url = Url::parse(&config.auth_root)?;
    url.query_pairs_mut()
        .append_pair("client_id", &app.client_id)
        .append_pair("redirect_uri", &app.redirect_uri)
        .append_pair("response_type", &app.response_type)
        .append_pair("state", &app.state);

    Ok(url)
}

/// Extract the authorization code from the redirect URL, checking `state` when present
pub fn parse_auth_url(auth_url: &str, state: &str) -> Result<String, AuthError> {
    debug!("parsing auth redirect url");

    let url = Url::parse(auth_url)?;
    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    if let Some(found) = param("state").filter(|found| !found.is_empty()) {
        if found != state {
            return Err(AuthError::StateMismatch {
                expected: state.to_string(),
                found,
            });
        }
    }

    param("code")
        .filter(|code| !code.is_empty())
        .ok_or(AuthError::MissingCode)
}

/// Exchange an authorization code for an access token
pub fn access_token_request(app: &AppInfo, auth_code: &str) -> Request {
    debug!(client_id = %app.client_id, "building access token request");

    Request::post("/oauth2/token")
        .body("client_id", app.client_id.as_str())
        .body("client_secret", app.client_secret.as_str())
        .body("code", auth_code)
        .body("grant_type", "authorization_code")
        .body("redirect_uri", app.redirect_uri.as_str())
}

pub fn refresh_access_request(app: &AppInfo, refresh_token: &str) -> Request {
    debug!(client_id = %app.client_id, "building refresh access request");

    Request::post("/oauth2/token")
        .body("client_id", app.client_id.as_str())
        .body("client_secret", app.client_secret.as_str())
        .body("grant_type", "refresh_token")
        .body("refresh_token", refresh_token)
}

pub fn verify_access_request(access_token: &str) -> Request {
    debug!("building verify access request");

    Request::get("/ping/whoami").header("Authorization", format!("Bearer {}", access_token))
}
