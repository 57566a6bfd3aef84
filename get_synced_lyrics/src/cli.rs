use std::io::Write;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use synced_lyrics::LyricsProvider;

/// Print the synced lyrics of a Spotify track as JSON.
///
/// The `sp_dc` cookie of a logged-in Spotify web session is read from the
/// `SP_DC` environment variable.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct Args {
    /// Spotify track id, e.g. 0VjIjW4GlUZAMYd2vXMi3b
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub track_id: String,
}

/// Looks up the lyrics of `track_id` once and writes them to `out` as a single line of JSON.
///
/// Nothing is written if the lookup or the serialization fails.
pub async fn run<P, W>(provider: &P, track_id: &str, out: &mut W) -> Result<()>
where
    P: LyricsProvider + ?Sized,
    W: Write,
{
    let lyrics = provider.get_lyrics(track_id).await?;
    tracing::debug!("got lyrics for track {track_id}");

    let mut json = serde_json::to_string(&lyrics).map_err(synced_lyrics::Error::Serialization)?;
    json.push('\n');

    out.write_all(json.as_bytes())
        .and_then(|()| out.flush())
        .context("failed to write lyrics to stdout")?;
    Ok(())
}
