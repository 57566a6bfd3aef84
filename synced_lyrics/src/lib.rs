//! Get synced lyrics for Spotify tracks.
//!
//! This crate provides Rust APIs to retrieve the time-aligned lyrics of a track
//! from Spotify's web player lyrics endpoint, authenticated with the `sp_dc`
//! cookie of a logged-in browser session.
//!
//! ```no_run
//! # async fn run() -> synced_lyrics::Result<()> {
//! let lyrics = synced_lyrics::fetch_lyrics("<sp_dc cookie>", "0VjIjW4GlUZAMYd2vXMi3b").await?;
//! println!("{lyrics}");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod lyrics;
mod token;

use serde_json::Value;

pub use client::{Client, ClientConfig};
pub use error::{ConfigError, Error, ProviderError, Result};
pub use lyrics::{LyricLine, SyncType, SyncedLyrics};
pub use token::{SpDcCookie, Token};

/// Something that can look up the lyrics of a track.
#[async_trait::async_trait]
pub trait LyricsProvider: Send + Sync {
    async fn get_lyrics(&self, track_id: &str) -> Result<Value>;
}

#[async_trait::async_trait]
impl LyricsProvider for Client {
    async fn get_lyrics(&self, track_id: &str) -> Result<Value> {
        Client::get_lyrics(self, track_id).await
    }
}

/// Creates a session from the `sp_dc` cookie and gets the synced lyrics of a track.
pub async fn fetch_lyrics(sp_dc: &str, track_id: &str) -> Result<Value> {
    if track_id.is_empty() {
        return Err(Error::Usage("track id must not be empty".into()));
    }

    let client = Client::new(SpDcCookie::new(sp_dc)?).await?;
    client.get_lyrics(track_id).await
}
