use parking_lot::Mutex;
use reqwest::{header::USER_AGENT, StatusCode, Url};
use serde_json::Value;

use crate::error::{ConfigError, Error, ProviderError, Result};
use crate::token::{self, SpDcCookie, Token};

const TOKEN_URL: &str = "https://open.spotify.com/get_access_token";
const LYRICS_BASE_URL: &str = "https://spclient.wg.spotify.com/color-lyrics/v2/track";

/// Endpoints the client talks to
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub token_url: String,
    pub lyrics_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_string(),
            lyrics_base_url: LYRICS_BASE_URL.to_string(),
        }
    }
}

/// An authenticated session against Spotify's lyrics endpoint
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    cookie: SpDcCookie,
    token: Mutex<Token>,
}

impl Client {
    /// creates a new session by exchanging the `sp_dc` cookie for an access token
    pub async fn new(cookie: SpDcCookie) -> Result<Self> {
        Self::with_config(reqwest::Client::new(), ClientConfig::default(), cookie).await
    }

    /// Same as [`Client::new`] but with a custom HTTP client and endpoints.
    ///
    /// Requests always carry a browser `User-Agent`, overriding the one set on `http`.
    pub async fn with_config(
        http: reqwest::Client,
        config: ClientConfig,
        cookie: SpDcCookie,
    ) -> Result<Self> {
        let token = token::request_token(&http, &config.token_url, &cookie).await?;
        Ok(Self {
            http,
            config,
            cookie,
            token: Mutex::new(token),
        })
    }

    /// Gets the access token, requesting a new one if the current one has expired.
    async fn access_token(&self) -> Result<String> {
        let current = {
            let token = self.token.lock();
            (!token.is_expired()).then(|| token.access_token.clone())
        };
        if let Some(access_token) = current {
            return Ok(access_token);
        }

        log::debug!("access token expired, requesting a new one...");
        let token = token::request_token(&self.http, &self.config.token_url, &self.cookie).await?;
        let access_token = token.access_token.clone();
        *self.token.lock() = token;
        Ok(access_token)
    }

    fn lyrics_url(&self, track_id: &str) -> Result<Url> {
        let invalid = |reason: &str| ConfigError::InvalidEndpoint {
            url: self.config.lyrics_base_url.clone(),
            reason: reason.to_string(),
        };

        let mut url = Url::parse(&self.config.lyrics_base_url)
            .map_err(|err| invalid(&err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base"))?
            .pop_if_empty()
            .push(track_id);
        Ok(url)
    }

    /// Gets the synced lyrics of a track.
    ///
    /// The response body is returned as-is, only parsed into a JSON value.
    /// Exactly one lookup request is sent, failures are never retried.
    pub async fn get_lyrics(&self, track_id: &str) -> Result<Value> {
        if track_id.is_empty() {
            return Err(Error::Usage("track id must not be empty".into()));
        }

        let url = self.lyrics_url(track_id)?;
        let access_token = self.access_token().await?;

        log::debug!("get lyrics for track {track_id} from {url}");
        let response = self
            .http
            .get(url.clone())
            .query(&[
                ("format", "json"),
                ("vocalRemoval", "false"),
                ("market", "from_token"),
            ])
            .bearer_auth(access_token)
            .header(USER_AGENT, token::BROWSER_USER_AGENT)
            .header("app-platform", "WebPlayer")
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT => {
                return Err(not_found(track_id));
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ProviderError::Unauthorized(status).into());
            }
            s if !s.is_success() => {
                return Err(ProviderError::Status {
                    status,
                    url: url.to_string(),
                }
                .into());
            }
            _ => {}
        }

        let body = response.text().await?;
        // an empty body with a success status means the track has no lyrics
        if body.trim().is_empty() {
            return Err(not_found(track_id));
        }

        let lyrics = serde_json::from_str::<Value>(&body)
            .map_err(|err| ProviderError::Malformed(format!("invalid lyrics response: {err}")))?;
        Ok(lyrics)
    }
}

fn not_found(track_id: &str) -> Error {
    ProviderError::NotFound {
        track_id: track_id.to_string(),
    }
    .into()
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("cookie", &self.cookie)
            .field("token", &*self.token.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    fn client(lyrics_base_url: &str) -> Client {
        Client {
            http: reqwest::Client::new(),
            config: ClientConfig {
                token_url: "http://127.0.0.1:1/token".into(),
                lyrics_base_url: lyrics_base_url.into(),
            },
            cookie: SpDcCookie::new("cookie").unwrap(),
            token: Mutex::new(Token {
                access_token: "token".into(),
                expires_at: SystemTime::now() + Duration::from_secs(3600),
            }),
        }
    }

    #[test]
    fn lyrics_url_appends_the_track_id() {
        let default_client = client(LYRICS_BASE_URL);
        assert_eq!(
            default_client.lyrics_url("0VjIjW4GlUZAMYd2vXMi3b").unwrap().as_str(),
            "https://spclient.wg.spotify.com/color-lyrics/v2/track/0VjIjW4GlUZAMYd2vXMi3b"
        );

        let client = client("http://localhost:1234/track/");
        assert_eq!(
            client.lyrics_url("abc").unwrap().as_str(),
            "http://localhost:1234/track/abc"
        );
    }

    #[test]
    fn lyrics_url_escapes_path_characters() {
        let client = client(LYRICS_BASE_URL);
        let url = client.lyrics_url("a/b?c").unwrap();
        assert_eq!(url.path_segments().unwrap().last(), Some("a%2Fb%3Fc"));
    }

    #[test]
    fn invalid_endpoint_is_a_config_error() {
        let client = client("not a url");
        assert!(matches!(
            client.lyrics_url("abc").unwrap_err(),
            Error::Config(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[tokio::test]
    async fn empty_track_id_is_a_usage_error() {
        let client = client(LYRICS_BASE_URL);
        assert!(matches!(
            client.get_lyrics("").await.unwrap_err(),
            Error::Usage(_)
        ));
    }

    #[test]
    fn debug_does_not_leak_secrets() {
        let client = client(LYRICS_BASE_URL);
        let debug = format!("{client:?}");
        assert!(!debug.contains("sp_dc=cookie"));
        assert!(!debug.contains("\"token\""));
    }
}
