//! Output renderings for normalized Genius records.
//!
//! Every record renders either as pretty-printed JSON (its `Serialize` shape)
//! or as a labelled plain-text narrative. Missing data in the narrative form
//! uses fixed fallback tokens so that readers can tell "absent" apart from
//! "empty".

use std::fmt::Write as _;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::normalize::{
    Artist, ArtistSongsOutcome, Credit, SearchHit, SearchOutcome, Song, SongWithLyrics,
};

const UNKNOWN: &str = "Unknown";
const NONE: &str = "None";
const NO_PRODUCERS: &str = "No producers listed";
const NO_WRITERS: &str = "No writers listed";
const NO_LYRICS: &str = "No lyrics available";

/// The shape a payload is rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[schemars(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured, nested JSON document.
    #[default]
    Json,
    /// Flattened, human-readable text block.
    Text,
}

impl OutputFormat {
    /// Render a record in this format.
    pub fn render<R: Render>(self, record: &R) -> Result<String, serde_json::Error> {
        match self {
            Self::Json => serde_json::to_string_pretty(record),
            Self::Text => Ok(record.narrative()),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Text => "text/plain",
        }
    }

    /// Parse a format name, as found in configuration.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" | "txt" | "plain" => Some(Self::Text),
            _ => None,
        }
    }
}

/// A record that can be rendered in both output formats.
pub trait Render: Serialize {
    /// The labelled plain-text rendering.
    fn narrative(&self) -> String;
}

fn or_unknown(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(UNKNOWN)
}

fn credit_list(credits: &[Credit], empty: &str) -> String {
    if credits.is_empty() {
        return empty.to_string();
    }
    credits
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Render for Song {
    fn narrative(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Title: {}", self.title);
        let _ = writeln!(out, "Artists: {}", self.artist_names);
        let _ = writeln!(out, "Full title: {}", self.full_title);
        let _ = writeln!(out, "Genius ID: {}", self.id);
        let _ = writeln!(out, "URL: {}", self.url);
        let _ = writeln!(out, "Release date: {}", or_unknown(self.release_date.as_deref()));
        let _ = writeln!(out, "Lyrics state: {}", self.lyrics_state);
        let _ = writeln!(
            out,
            "Primary artist: {} ({})",
            self.primary_artist.name, self.primary_artist.url
        );

        match &self.album {
            Some(album) => {
                let _ = writeln!(
                    out,
                    "Album: {} by {} ({})",
                    album.name,
                    or_unknown(album.artist_names.as_deref()),
                    album.url
                );
            }
            None => {
                let _ = writeln!(out, "Album: {NONE}");
            }
        }

        let pageviews = self
            .stats
            .as_ref()
            .and_then(|s| s.pageviews)
            .map(|p| p.to_string());
        let _ = writeln!(out, "Pageviews: {}", or_unknown(pageviews.as_deref()));
        let _ = writeln!(out, "Producers: {}", credit_list(&self.producers, NO_PRODUCERS));
        let _ = writeln!(out, "Writers: {}", credit_list(&self.writers, NO_WRITERS));

        if self.samples.is_empty() {
            let _ = write!(out, "Samples: {NONE}");
        } else {
            let _ = write!(out, "Samples:");
            for sample in &self.samples {
                let _ = write!(out, "\n  - {} by {}", sample.title, sample.artist_names);
                if let Some(url) = &sample.url {
                    let _ = write!(out, " ({url})");
                }
            }
        }

        out
    }
}

impl Render for SongWithLyrics {
    fn narrative(&self) -> String {
        let lyrics = self.lyrics.as_deref().unwrap_or(NO_LYRICS);
        format!("{}\n\nLyrics:\n{}", self.song.narrative(), lyrics)
    }
}

impl Render for Artist {
    fn narrative(&self) -> String {
        format!(
            "Name: {}\nGenius ID: {}\nURL: {}\nDescription: {}",
            self.name,
            self.id,
            self.url,
            self.description
                .plain
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(NONE)
        )
    }
}

fn hit_line(hit: &SearchHit) -> String {
    match hit {
        SearchHit::Song(song) => format!(
            "[song] {} by {} (ID {}) {}",
            or_unknown(song.title.as_deref()),
            or_unknown(song.artist_names.as_deref()),
            song.id,
            or_unknown(song.url.as_deref())
        ),
        SearchHit::Artist(artist) => format!(
            "[artist] {} (ID {}) {}",
            or_unknown(artist.name.as_deref()),
            artist.id,
            or_unknown(artist.url.as_deref())
        ),
        SearchHit::WebPage(page) => format!(
            "[web_page] {} (ID {}) {}",
            or_unknown(page.title.as_deref()),
            page.id,
            or_unknown(page.url.as_deref())
        ),
        SearchHit::Other(other) => format!("[{}] (ID {})", other.kind.as_str(), other.id),
    }
}

impl Render for SearchOutcome {
    fn narrative(&self) -> String {
        if self.results.is_empty() {
            return self.empty_message();
        }

        let mut out = format!(
            "Search results for \"{}\" ({}):",
            self.query,
            self.results.len()
        );
        for (index, hit) in self.results.iter().enumerate() {
            let _ = write!(out, "\n{}. {}", index + 1, hit_line(hit));
        }
        out
    }
}

impl Render for ArtistSongsOutcome {
    fn narrative(&self) -> String {
        if self.songs.is_empty() {
            return self.empty_message();
        }

        let mut out = format!(
            "Songs for artist {} ({}):",
            self.artist_id,
            self.songs.len()
        );
        let _ = write!(
            out,
            "\nSort: {} | Page: {} | Per page: {}",
            self.sort.map(|s| s.as_str()).unwrap_or(NONE),
            self.page.map(|p| p.to_string()).as_deref().unwrap_or(NONE),
            self.per_page.map(|p| p.to_string()).as_deref().unwrap_or(NONE),
        );
        for song in &self.songs {
            let _ = write!(
                out,
                "\n- {} [{}] (ID {}, lyrics {}) {}",
                song.full_title,
                or_unknown(song.release_date.as_deref()),
                song.id,
                song.lyrics_state,
                song.url
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::genius::normalize::{
        Album, ArtistDescription, ArtistRef, ArtistSongSummary, SampledSong,
    };

    fn song() -> Song {
        Song {
            id: 378195,
            title: "Sorry".to_string(),
            artist_names: "Justin Bieber".to_string(),
            full_title: "Sorry by Justin Bieber".to_string(),
            url: "https://genius.com/Justin-bieber-sorry-lyrics".to_string(),
            release_date: None,
            lyrics_state: "complete".to_string(),
            primary_artist: ArtistRef {
                id: 357,
                name: "Justin Bieber".to_string(),
                url: "https://genius.com/artists/Justin-bieber".to_string(),
            },
            album: None,
            stats: None,
            producers: vec![],
            writers: vec![],
            samples: vec![],
        }
    }

    #[test]
    fn test_song_narrative_fallback_tokens() {
        let text = song().narrative();
        assert!(text.contains("Release date: Unknown"));
        assert!(text.contains("Album: None"));
        assert!(text.contains("Pageviews: Unknown"));
        assert!(text.contains("Producers: No producers listed"));
        assert!(text.contains("Writers: No writers listed"));
        assert!(text.contains("Samples: None"));
    }

    #[test]
    fn test_song_narrative_with_data() {
        let mut song = song();
        song.album = Some(Album {
            name: "Purpose".to_string(),
            artist_names: None,
            url: "https://genius.com/albums/Justin-bieber/Purpose".to_string(),
        });
        song.producers = vec![
            Credit { name: "Skrillex".to_string(), url: None },
            Credit { name: "BloodPop".to_string(), url: None },
        ];
        song.samples = vec![SampledSong {
            id: 7,
            title: "Original".to_string(),
            artist_names: "Someone".to_string(),
            url: None,
        }];

        let text = song.narrative();
        assert!(text.contains("Album: Purpose by Unknown"));
        assert!(text.contains("Producers: Skrillex, BloodPop"));
        assert!(text.contains("  - Original by Someone"));
    }

    #[test]
    fn test_both_formats_carry_the_same_content() {
        let record = SongWithLyrics {
            song: song(),
            lyrics: Some("Is it too late now to say sorry?".to_string()),
        };
        let json = OutputFormat::Json.render(&record).unwrap();
        let text = OutputFormat::Text.render(&record).unwrap();

        for needle in ["Sorry by Justin Bieber", "378195", "Is it too late now to say sorry?"] {
            assert!(json.contains(needle), "json missing {needle}");
            assert!(text.contains(needle), "text missing {needle}");
        }
    }

    #[test]
    fn test_missing_lyrics_token() {
        let record = SongWithLyrics { song: song(), lyrics: None };
        assert!(record.narrative().ends_with("Lyrics:\nNo lyrics available"));

        let json: serde_json::Value =
            serde_json::from_str(&OutputFormat::Json.render(&record).unwrap()).unwrap();
        assert_eq!(json["lyrics"], serde_json::Value::Null);
    }

    #[test]
    fn test_artist_narrative_without_description() {
        let artist = Artist {
            id: 21964,
            name: "Foo Fighters".to_string(),
            url: "https://genius.com/artists/Foo-fighters".to_string(),
            description: ArtistDescription::default(),
        };
        assert!(artist.narrative().ends_with("Description: None"));
    }

    #[test]
    fn test_empty_listings_use_message() {
        let search = SearchOutcome::new("zzz", vec![]);
        assert_eq!(search.narrative(), "No results found in Genius for \"zzz\".");

        let songs = ArtistSongsOutcome {
            artist_id: 1,
            songs: Vec::<ArtistSongSummary>::new(),
            sort: None,
            page: None,
            per_page: None,
        };
        assert!(songs.narrative().starts_with("No songs found for artist with ID 1"));
    }

    #[test]
    fn test_output_format_parse_and_mime() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert_eq!(OutputFormat::Text.mime_type(), "text/plain");
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }
}
