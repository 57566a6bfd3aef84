//! A typed view over the raw lyrics response.
//!
//! The client itself hands back the response untouched; this module is for
//! callers that want to display lyrics line by line.

use serde::Deserialize as _;
use serde_json::Value;

use crate::error::{ProviderError, Result};

/// Shown in place of an empty (instrumental) line.
pub const PLACEHOLDER: &str = "♪";

// a leading placeholder line is inserted if the first line starts later than this
const LEADING_GAP_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncType {
    LineSynced,
    Unsynced,
    Other(String),
}

impl From<&str> for SyncType {
    fn from(s: &str) -> Self {
        match s {
            "LINE_SYNCED" => Self::LineSynced,
            "UNSYNCED" => Self::Unsynced,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    pub words: String,
    pub start_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedLyrics {
    pub sync_type: SyncType,
    pub lines: Vec<LyricLine>,
}

impl SyncedLyrics {
    pub fn from_value(value: &Value) -> Result<Self> {
        let body = raw::Body::deserialize(value)
            .map_err(|err| ProviderError::Malformed(format!("invalid lyrics response: {err}")))?;

        let mut lines = body
            .lyrics
            .lines
            .into_iter()
            .map(|line| -> Result<LyricLine> {
                let start_time_ms = line.start_time_ms.parse::<u64>().map_err(|err| {
                    ProviderError::Malformed(format!(
                        "invalid startTimeMs `{}`: {err}",
                        line.start_time_ms
                    ))
                })?;
                Ok(LyricLine {
                    words: if line.words.is_empty() {
                        PLACEHOLDER.to_string()
                    } else {
                        line.words
                    },
                    start_time_ms,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if lines
            .first()
            .is_some_and(|line| line.start_time_ms > LEADING_GAP_MS)
        {
            lines.insert(
                0,
                LyricLine {
                    words: PLACEHOLDER.to_string(),
                    start_time_ms: 0,
                },
            );
        }

        Ok(Self {
            sync_type: body.lyrics.sync_type.as_deref().unwrap_or_default().into(),
            lines,
        })
    }

    /// returns the index of the line being sung at `position_ms`
    #[must_use]
    pub fn line_at(&self, position_ms: u64) -> Option<usize> {
        self.lines
            .partition_point(|line| line.start_time_ms <= position_ms)
            .checked_sub(1)
    }
}

mod raw {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct Body {
        pub lyrics: Lyrics,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Lyrics {
        pub sync_type: Option<String>,
        #[serde(default)]
        pub lines: Vec<Line>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Line {
        pub start_time_ms: String,
        pub words: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn response(lines: &Value) -> Value {
        json!({
            "lyrics": {
                "syncType": "LINE_SYNCED",
                "lines": lines,
                "provider": "MusixMatch",
                "language": "en"
            },
            "colors": { "background": -1 },
            "hasVocalRemoval": false
        })
    }

    #[test]
    fn parse_lines() {
        let value = response(&json!([
            { "startTimeMs": "0", "words": "first", "syllables": [], "endTimeMs": "0" },
            { "startTimeMs": "1500", "words": "", "syllables": [], "endTimeMs": "0" },
            { "startTimeMs": "3200", "words": "third", "syllables": [], "endTimeMs": "0" }
        ]));
        let lyrics = SyncedLyrics::from_value(&value).unwrap();

        assert_eq!(lyrics.sync_type, SyncType::LineSynced);
        assert_eq!(
            lyrics.lines,
            vec![
                LyricLine { words: "first".into(), start_time_ms: 0 },
                LyricLine { words: PLACEHOLDER.into(), start_time_ms: 1500 },
                LyricLine { words: "third".into(), start_time_ms: 3200 },
            ]
        );
    }

    #[test]
    fn late_first_line_gets_a_leading_placeholder() {
        let value = response(&json!([
            { "startTimeMs": "12000", "words": "late start" }
        ]));
        let lyrics = SyncedLyrics::from_value(&value).unwrap();

        assert_eq!(lyrics.lines.len(), 2);
        assert_eq!(lyrics.lines[0].words, PLACEHOLDER);
        assert_eq!(lyrics.lines[0].start_time_ms, 0);
        assert_eq!(lyrics.lines[1].words, "late start");
    }

    #[test]
    fn empty_lines_are_allowed() {
        let lyrics = SyncedLyrics::from_value(&response(&json!([]))).unwrap();
        assert!(lyrics.lines.is_empty());
        assert_eq!(lyrics.line_at(5000), None);
    }

    #[test]
    fn unsynced_lyrics() {
        let mut value = response(&json!([{ "startTimeMs": "0", "words": "a" }]));
        value["lyrics"]["syncType"] = json!("UNSYNCED");
        let lyrics = SyncedLyrics::from_value(&value).unwrap();
        assert_eq!(lyrics.sync_type, SyncType::Unsynced);
    }

    #[test]
    fn invalid_start_time_is_malformed() {
        let value = response(&json!([{ "startTimeMs": "soon", "words": "a" }]));
        let err = SyncedLyrics::from_value(&value).unwrap_err();
        assert!(matches!(err, Error::Provider(ProviderError::Malformed(_))));
    }

    #[test]
    fn missing_lyrics_object_is_malformed() {
        let err = SyncedLyrics::from_value(&json!({ "lines": [] })).unwrap_err();
        assert!(matches!(err, Error::Provider(ProviderError::Malformed(_))));
    }

    #[test]
    fn line_at_position() {
        let value = response(&json!([
            { "startTimeMs": "0", "words": "a" },
            { "startTimeMs": "1000", "words": "b" },
            { "startTimeMs": "2000", "words": "c" }
        ]));
        let lyrics = SyncedLyrics::from_value(&value).unwrap();

        assert_eq!(lyrics.line_at(0), Some(0));
        assert_eq!(lyrics.line_at(999), Some(0));
        assert_eq!(lyrics.line_at(1000), Some(1));
        assert_eq!(lyrics.line_at(60_000), Some(2));
    }
}
