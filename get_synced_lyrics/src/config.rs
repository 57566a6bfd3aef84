use synced_lyrics::{ConfigError, SpDcCookie};

/// Application configurations, read once at startup
#[derive(Debug)]
pub struct Configs {
    pub sp_dc: SpDcCookie,
}

impl Configs {
    /// reads the `sp_dc` cookie from the `SP_DC` environment variable
    pub fn from_env() -> synced_lyrics::Result<Self> {
        let value = std::env::var(SpDcCookie::ENV_VAR).map_err(|_| ConfigError::MissingSecret {
            var: SpDcCookie::ENV_VAR,
        })?;
        Ok(Self {
            sp_dc: SpDcCookie::new(value)?,
        })
    }
}
