use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::{HeaderValue, COOKIE, USER_AGENT};

use crate::error::{ConfigError, ProviderError, Result};

pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

// tokens are treated as expired this long before the provider's expiry time
const EXPIRY_MARGIN: Duration = Duration::from_secs(5 * 60);

/// The `sp_dc` cookie of a logged-in Spotify web session.
///
/// The value is kept as a sensitive header value so it never shows up in
/// `Debug` output or logs.
#[derive(Clone)]
pub struct SpDcCookie(HeaderValue);

impl SpDcCookie {
    /// Environment variable conventionally holding the cookie value.
    pub const ENV_VAR: &'static str = "SP_DC";

    /// Leading and trailing whitespace is stripped from `value` before use.
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(ConfigError::MissingSecret { var: Self::ENV_VAR }.into());
        }

        let mut header = HeaderValue::from_str(&format!("sp_dc={value}")).map_err(|_| {
            ConfigError::InvalidSecret {
                reason: "the cookie contains characters not allowed in an HTTP header".into(),
            }
        })?;
        header.set_sensitive(true);
        Ok(Self(header))
    }

    pub(crate) fn header(&self) -> &HeaderValue {
        &self.0
    }
}

impl fmt::Debug for SpDcCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SpDcCookie(<redacted>)")
    }
}

/// A short-lived access token for Spotify's web player APIs
pub struct Token {
    pub access_token: String,
    pub expires_at: SystemTime,
}

impl Token {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        SystemTime::now() >= self.expires_at
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl From<raw::TokenBody> for Token {
    fn from(body: raw::TokenBody) -> Self {
        Self {
            access_token: body.access_token,
            // `expires_at` time but earlier 5 min
            expires_at: (UNIX_EPOCH
                + Duration::from_millis(body.access_token_expiration_timestamp_ms))
            .checked_sub(EXPIRY_MARGIN)
            .unwrap_or(UNIX_EPOCH),
        }
    }
}

/// Exchanges the `sp_dc` cookie for an access token.
pub(crate) async fn request_token(
    http: &reqwest::Client,
    url: &str,
    cookie: &SpDcCookie,
) -> Result<Token> {
    log::debug!("requesting an access token from {url}");

    let response = http
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .header("app-platform", "WebPlayer")
        .header(COOKIE, cookie.header().clone())
        .send()
        .await?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ConfigError::InvalidSecret {
            reason: format!("token endpoint responded with status code: {status}"),
        }
        .into());
    }
    if !status.is_success() {
        return Err(ProviderError::Status {
            status,
            url: url.to_string(),
        }
        .into());
    }

    let body = response.text().await?;
    let token = parse_token(&body)?;
    log::debug!("got an access token: {token:?}");
    Ok(token)
}

fn parse_token(body: &str) -> Result<Token> {
    let body: raw::TokenBody = serde_json::from_str(body)
        .map_err(|err| ProviderError::Malformed(format!("invalid token response: {err}")))?;

    // the endpoint hands out an anonymous token instead of failing when the cookie is not valid
    if body.is_anonymous {
        return Err(ConfigError::InvalidSecret {
            reason: "got an anonymous session, the cookie is expired or invalid".into(),
        }
        .into());
    }

    Ok(body.into())
}

mod raw {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TokenBody {
        pub access_token: String,
        pub access_token_expiration_timestamp_ms: u64,
        #[serde(default)]
        pub is_anonymous: bool,
    }
}
