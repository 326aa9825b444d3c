//! Normalized Genius records.
//!
//! Every record here is produced by a total function over the raw API
//! structures in [`super::models`]: absent optional data becomes `None` or an
//! empty list, never an error. Both output renderings (see [`super::render`])
//! are derived from these records.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use super::models::{
    RawArtist, RawArtistRef, RawCredit, RawHitResult, RawSearchHit, RawSong, RawSongRelationship,
};
use super::{GeniusError, SongSort};

/// Relationship tag identifying songs that a song samples.
pub const SAMPLES_RELATIONSHIP: &str = "samples";

// ============================================================================
// Search
// ============================================================================

/// Discriminant of a search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitKind {
    Song,
    Artist,
    WebPage,
    /// Any tag this server does not know, kept verbatim.
    Other(String),
}

impl HitKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "song" => Self::Song,
            "artist" => Self::Artist,
            "web_page" => Self::WebPage,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Song => "song",
            Self::Artist => "artist",
            Self::WebPage => "web_page",
            Self::Other(tag) => tag,
        }
    }
}

impl Serialize for HitKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistRef {
    pub id: u64,
    pub name: String,
    pub url: String,
}

impl From<RawArtistRef> for ArtistRef {
    fn from(raw: RawArtistRef) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            url: raw.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongHit {
    #[serde(rename = "type")]
    pub kind: HitKind,
    pub id: u64,
    pub title: Option<String>,
    pub artist_names: Option<String>,
    pub url: Option<String>,
    pub primary_artist: Option<ArtistRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistHit {
    #[serde(rename = "type")]
    pub kind: HitKind,
    pub id: u64,
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebPageHit {
    #[serde(rename = "type")]
    pub kind: HitKind,
    pub id: u64,
    pub title: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OtherHit {
    #[serde(rename = "type")]
    pub kind: HitKind,
    pub id: u64,
}

/// One normalized search hit. Each variant serializes with its own shape and
/// a `type` field carrying the discriminant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchHit {
    Song(SongHit),
    Artist(ArtistHit),
    WebPage(WebPageHit),
    Other(OtherHit),
}

impl SearchHit {
    pub fn kind(&self) -> &HitKind {
        match self {
            Self::Song(hit) => &hit.kind,
            Self::Artist(hit) => &hit.kind,
            Self::WebPage(hit) => &hit.kind,
            Self::Other(hit) => &hit.kind,
        }
    }
}

impl From<RawSearchHit> for SearchHit {
    fn from(hit: RawSearchHit) -> Self {
        let RawHitResult {
            id,
            title,
            name,
            artist_names,
            url,
            primary_artist,
        } = hit.result;

        match HitKind::parse(&hit.kind) {
            HitKind::Song => Self::Song(SongHit {
                kind: HitKind::Song,
                id,
                title,
                artist_names,
                url,
                primary_artist: primary_artist.map(ArtistRef::from),
            }),
            HitKind::Artist => Self::Artist(ArtistHit {
                kind: HitKind::Artist,
                id,
                name,
                url,
            }),
            HitKind::WebPage => Self::WebPage(WebPageHit {
                kind: HitKind::WebPage,
                id,
                // Web pages frequently have no title; the URL stands in for it.
                title: title.filter(|t| !t.is_empty()).or_else(|| url.clone()),
                url,
            }),
            kind @ HitKind::Other(_) => Self::Other(OtherHit { kind, id }),
        }
    }
}

/// The outcome of a search: the query and its normalized hits.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub query: String,
    pub results: Vec<SearchHit>,
}

impl SearchOutcome {
    pub fn new(query: impl Into<String>, hits: Vec<RawSearchHit>) -> Self {
        Self {
            query: query.into(),
            results: hits.into_iter().map(SearchHit::from).collect(),
        }
    }

    pub fn empty_message(&self) -> String {
        format!("No results found in Genius for \"{}\".", self.query)
    }
}

impl Serialize for SearchOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SearchOutcome", 3)?;
        state.serialize_field("query", &self.query)?;
        state.serialize_field("results", &self.results)?;
        if self.results.is_empty() {
            state.serialize_field("message", &self.empty_message())?;
        } else {
            state.serialize_field("count", &self.results.len())?;
        }
        state.end()
    }
}

// ============================================================================
// Songs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Album {
    pub name: String,
    pub artist_names: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongStats {
    pub pageviews: Option<u64>,
}

/// A producer or writer credit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credit {
    pub name: String,
    pub url: Option<String>,
}

impl From<RawCredit> for Credit {
    fn from(raw: RawCredit) -> Self {
        Self {
            name: raw.name,
            url: raw.url,
        }
    }
}

/// A song sampled by another song.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledSong {
    pub id: u64,
    pub title: String,
    pub artist_names: String,
    pub url: Option<String>,
}

/// Full details of a song.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
    pub id: u64,
    pub title: String,
    pub artist_names: String,
    pub full_title: String,
    pub url: String,
    pub release_date: Option<String>,
    pub lyrics_state: String,
    pub primary_artist: ArtistRef,
    pub album: Option<Album>,
    pub stats: Option<SongStats>,
    pub producers: Vec<Credit>,
    pub writers: Vec<Credit>,
    pub samples: Vec<SampledSong>,
}

impl Song {
    /// Normalize a raw song. The primary artist is the only nested entity a
    /// full song must carry; without it the payload is not a usable song.
    pub fn from_raw(raw: RawSong) -> Result<Self, GeniusError> {
        let primary_artist = raw.primary_artist.ok_or_else(|| {
            GeniusError::decode(format!("song {} has no primary artist", raw.id))
        })?;

        Ok(Self {
            id: raw.id,
            title: raw.title,
            artist_names: raw.artist_names,
            full_title: raw.full_title,
            url: raw.url,
            release_date: raw.release_date_for_display,
            lyrics_state: raw.lyrics_state,
            primary_artist: primary_artist.into(),
            album: raw.album.map(|album| Album {
                name: album.name,
                artist_names: album.artist_names,
                url: album.url,
            }),
            stats: raw.stats.map(|stats| SongStats {
                pageviews: stats.pageviews,
            }),
            producers: credits(raw.producer_artists),
            writers: credits(raw.writer_artists),
            samples: samples(raw.song_relationships.unwrap_or_default()),
        })
    }
}

fn credits(raw: Option<Vec<RawCredit>>) -> Vec<Credit> {
    raw.unwrap_or_default().into_iter().map(Credit::from).collect()
}

/// Songs from every `samples` relationship, flattened in source order.
pub fn samples(relationships: Vec<RawSongRelationship>) -> Vec<SampledSong> {
    relationships
        .into_iter()
        .filter(|rel| rel.kind == SAMPLES_RELATIONSHIP)
        .flat_map(|rel| rel.songs)
        .map(|song| SampledSong {
            id: song.id,
            title: song.title,
            artist_names: song.artist_names,
            url: song.url,
        })
        .collect()
}

/// A song together with the outcome of scraping its lyrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongWithLyrics {
    #[serde(flatten)]
    pub song: Song,
    pub lyrics: Option<String>,
}

// ============================================================================
// Artist songs
// ============================================================================

/// The abbreviated song shape used by artist song listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistSongSummary {
    pub id: u64,
    pub title: String,
    pub artist_names: String,
    pub url: String,
    pub full_title: String,
    pub release_date: Option<String>,
    pub lyrics_state: String,
}

impl From<RawSong> for ArtistSongSummary {
    fn from(raw: RawSong) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            artist_names: raw.artist_names,
            url: raw.url,
            full_title: raw.full_title,
            release_date: raw.release_date_for_display,
            lyrics_state: raw.lyrics_state,
        }
    }
}

/// One page of an artist's songs, echoing the paging options used.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistSongsOutcome {
    pub artist_id: u64,
    pub songs: Vec<ArtistSongSummary>,
    pub sort: Option<SongSort>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ArtistSongsOutcome {
    pub fn empty_message(&self) -> String {
        format!(
            "No songs found for artist with ID {} (or the ID is invalid).",
            self.artist_id
        )
    }
}

impl Serialize for ArtistSongsOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.songs.is_empty() {
            let mut state = serializer.serialize_struct("ArtistSongsOutcome", 3)?;
            state.serialize_field("artist_id", &self.artist_id)?;
            state.serialize_field("songs", &self.songs)?;
            state.serialize_field("message", &self.empty_message())?;
            return state.end();
        }

        let mut state = serializer.serialize_struct("ArtistSongsOutcome", 6)?;
        state.serialize_field("artist_id", &self.artist_id)?;
        state.serialize_field("songs", &self.songs)?;
        state.serialize_field("count", &self.songs.len())?;
        state.serialize_field("sort", &self.sort)?;
        state.serialize_field("page", &self.page)?;
        state.serialize_field("per_page", &self.per_page)?;
        state.end()
    }
}

// ============================================================================
// Artists
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArtistDescription {
    pub plain: Option<String>,
    pub html: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artist {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub description: ArtistDescription,
}

impl From<RawArtist> for Artist {
    fn from(raw: RawArtist) -> Self {
        let description = raw
            .description
            .map(|d| ArtistDescription {
                plain: d.plain.filter(|s| !s.is_empty()),
                html: d.html.filter(|s| !s.is_empty()),
            })
            .unwrap_or_default();

        Self {
            id: raw.id,
            name: raw.name,
            url: raw.url,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::genius::models::{RawRelatedSong, RawSearchHit};
    use serde_json::json;

    fn raw_song(value: serde_json::Value) -> RawSong {
        serde_json::from_value(value).unwrap()
    }

    fn minimal_song() -> serde_json::Value {
        json!({
            "id": 378195,
            "title": "Sorry",
            "artist_names": "Justin Bieber",
            "full_title": "Sorry by Justin Bieber",
            "url": "https://genius.com/Justin-bieber-sorry-lyrics",
            "lyrics_state": "complete",
            "primary_artist": {
                "id": 357,
                "name": "Justin Bieber",
                "url": "https://genius.com/artists/Justin-bieber"
            }
        })
    }

    fn related(id: u64, title: &str) -> RawRelatedSong {
        RawRelatedSong {
            id,
            title: title.to_string(),
            artist_names: "Someone".to_string(),
            url: None,
        }
    }

    #[test]
    fn test_song_missing_optionals_normalize_to_empty() {
        let song = Song::from_raw(raw_song(minimal_song())).unwrap();
        assert_eq!(song.album, None);
        assert_eq!(song.stats, None);
        assert_eq!(song.release_date, None);
        assert!(song.producers.is_empty());
        assert!(song.writers.is_empty());
        assert!(song.samples.is_empty());

        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["album"], serde_json::Value::Null);
        assert_eq!(value["stats"], serde_json::Value::Null);
        assert_eq!(value["producers"], json!([]));
        assert_eq!(value["writers"], json!([]));
        assert_eq!(value["samples"], json!([]));
    }

    #[test]
    fn test_song_explicit_nulls_normalize_to_empty() {
        let mut value = minimal_song();
        value["album"] = serde_json::Value::Null;
        value["stats"] = serde_json::Value::Null;
        value["producer_artists"] = serde_json::Value::Null;
        value["writer_artists"] = serde_json::Value::Null;
        value["song_relationships"] = serde_json::Value::Null;

        let song = Song::from_raw(raw_song(value)).unwrap();
        assert!(song.producers.is_empty());
        assert!(song.writers.is_empty());
        assert!(song.samples.is_empty());
    }

    #[test]
    fn test_song_relationship_with_null_songs_normalizes() {
        let mut value = minimal_song();
        value["song_relationships"] = json!([
            { "type": "samples", "songs": null },
            { "type": "sampled_in", "songs": [{ "id": 9, "title": "Later", "artist_names": "Other" }] }
        ]);

        let song = Song::from_raw(raw_song(value)).unwrap();
        assert!(song.samples.is_empty());
    }

    #[test]
    fn test_song_full_fields() {
        let mut value = minimal_song();
        value["release_date_for_display"] = json!("November 13, 2015");
        value["album"] = json!({
            "name": "Purpose",
            "artist_names": "Justin Bieber",
            "url": "https://genius.com/albums/Justin-bieber/Purpose"
        });
        value["stats"] = json!({ "pageviews": 4_200_000 });
        value["producer_artists"] = json!([{ "name": "Skrillex", "url": "https://genius.com/artists/Skrillex" }]);
        value["writer_artists"] = json!([{ "name": "Julia Michaels" }]);

        let song = Song::from_raw(raw_song(value)).unwrap();
        assert_eq!(song.release_date.as_deref(), Some("November 13, 2015"));
        assert_eq!(song.album.as_ref().unwrap().name, "Purpose");
        assert_eq!(song.stats.as_ref().unwrap().pageviews, Some(4_200_000));
        assert_eq!(song.producers[0].name, "Skrillex");
        assert_eq!(song.writers[0].url, None);
    }

    #[test]
    fn test_song_without_primary_artist_is_decode_error() {
        let mut value = minimal_song();
        value.as_object_mut().unwrap().remove("primary_artist");
        let err = Song::from_raw(raw_song(value)).unwrap_err();
        assert!(matches!(err, GeniusError::Decode(_)));
    }

    #[test]
    fn test_samples_filter_then_flatten_keeps_source_order() {
        let relationships = vec![
            RawSongRelationship {
                kind: "samples".to_string(),
                songs: vec![related(1, "a"), related(2, "b")],
            },
            RawSongRelationship {
                kind: "sampled_in".to_string(),
                songs: vec![related(3, "c")],
            },
            RawSongRelationship {
                kind: "samples".to_string(),
                songs: vec![related(4, "d")],
            },
        ];

        // Flatten first, keep each song's parent tag, then filter.
        let expected: Vec<u64> = relationships
            .iter()
            .flat_map(|rel| rel.songs.iter().map(move |s| (rel.kind.as_str(), s.id)))
            .filter(|(kind, _)| *kind == SAMPLES_RELATIONSHIP)
            .map(|(_, id)| id)
            .collect();

        let ids: Vec<u64> = samples(relationships).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(ids, expected);
    }

    fn hit(kind: &str, result: serde_json::Value) -> RawSearchHit {
        serde_json::from_value(json!({ "type": kind, "result": result })).unwrap()
    }

    #[test]
    fn test_song_hit_shape() {
        let normalized = SearchHit::from(hit(
            "song",
            json!({
                "id": 1,
                "title": "All My Life",
                "artist_names": "Foo Fighters",
                "url": "https://genius.com/Foo-fighters-all-my-life-lyrics",
                "primary_artist": { "id": 9, "name": "Foo Fighters", "url": "https://genius.com/artists/Foo-fighters" }
            }),
        ));
        let value = serde_json::to_value(&normalized).unwrap();
        assert_eq!(value["type"], "song");
        assert_eq!(value["title"], "All My Life");
        assert_eq!(value["primary_artist"]["id"], 9);
    }

    #[test]
    fn test_artist_hit_shape() {
        let normalized = SearchHit::from(hit(
            "artist",
            json!({ "id": 2, "name": "Foo Fighters", "url": "https://genius.com/artists/Foo-fighters" }),
        ));
        let value = serde_json::to_value(&normalized).unwrap();
        assert_eq!(
            value,
            json!({ "type": "artist", "id": 2, "name": "Foo Fighters", "url": "https://genius.com/artists/Foo-fighters" })
        );
    }

    #[test]
    fn test_web_page_hit_falls_back_to_url_for_title() {
        let normalized = SearchHit::from(hit(
            "web_page",
            json!({ "id": 3, "url": "https://example.com/page" }),
        ));
        let value = serde_json::to_value(&normalized).unwrap();
        assert_eq!(value["type"], "web_page");
        assert_eq!(value["title"], "https://example.com/page");

        let untitled = SearchHit::from(hit(
            "web_page",
            json!({ "id": 5, "title": "", "url": "https://example.com/blank" }),
        ));
        let value = serde_json::to_value(&untitled).unwrap();
        assert_eq!(value["title"], "https://example.com/blank");
    }

    #[test]
    fn test_unknown_hit_keeps_id_and_type_only() {
        let normalized = SearchHit::from(hit(
            "album",
            json!({ "id": 4, "title": "Purpose", "url": "https://genius.com/albums/x" }),
        ));
        assert_eq!(normalized.kind(), &HitKind::Other("album".to_string()));
        let value = serde_json::to_value(&normalized).unwrap();
        assert_eq!(value, json!({ "type": "album", "id": 4 }));
    }

    #[test]
    fn test_search_outcome_payloads() {
        let empty = SearchOutcome::new("nothing", vec![]);
        let value = serde_json::to_value(&empty).unwrap();
        assert_eq!(value["results"], json!([]));
        assert_eq!(value["message"], "No results found in Genius for \"nothing\".");
        assert!(value.get("count").is_none());

        let one = SearchOutcome::new("x", vec![hit("artist", json!({ "id": 2 }))]);
        let value = serde_json::to_value(&one).unwrap();
        assert_eq!(value["count"], 1);
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_artist_songs_payload_echoes_paging() {
        let outcome = ArtistSongsOutcome {
            artist_id: 21964,
            songs: vec![ArtistSongSummary::from(raw_song(minimal_song()))],
            sort: Some(SongSort::Popularity),
            page: Some(2),
            per_page: None,
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["sort"], "popularity");
        assert_eq!(value["page"], 2);
        assert_eq!(value["per_page"], serde_json::Value::Null);
    }

    #[test]
    fn test_artist_description_defaults_to_nulls() {
        let raw: RawArtist = serde_json::from_value(json!({
            "id": 21964,
            "name": "Foo Fighters",
            "url": "https://genius.com/artists/Foo-fighters"
        }))
        .unwrap();
        let value = serde_json::to_value(Artist::from(raw)).unwrap();
        assert_eq!(value["description"], json!({ "plain": null, "html": null }));
    }
}
