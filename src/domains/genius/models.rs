//! Raw Genius API response structures.
//!
//! These mirror the upstream JSON. Anything Genius may leave out is an
//! `Option` or a defaulted `Vec`; unknown fields are ignored.

use serde::{Deserialize, Deserializer};

/// Read a list that Genius may send as `null`, treating it like a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `{ meta, response }` envelope wrapping every API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub meta: Meta,
    pub response: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Search
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hits: Vec<RawSearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSearchHit {
    #[serde(rename = "type")]
    pub kind: String,
    pub result: RawHitResult,
}

/// The `result` object of a hit. Its fields depend on the hit type, so only
/// the id is required here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHitResult {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist_names: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub primary_artist: Option<RawArtistRef>,
}

// ============================================================================
// Songs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SongResponse {
    #[serde(default)]
    pub song: Option<RawSong>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistSongsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub songs: Vec<RawSong>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSong {
    pub id: u64,
    pub title: String,
    pub artist_names: String,
    pub full_title: String,
    pub url: String,
    #[serde(default)]
    pub release_date_for_display: Option<String>,
    pub lyrics_state: String,
    /// Listing endpoints return abbreviated songs, so this is optional here
    /// and required only when a full song is normalized.
    #[serde(default)]
    pub primary_artist: Option<RawArtistRef>,
    #[serde(default)]
    pub album: Option<RawAlbum>,
    #[serde(default)]
    pub stats: Option<RawStats>,
    #[serde(default)]
    pub producer_artists: Option<Vec<RawCredit>>,
    #[serde(default)]
    pub writer_artists: Option<Vec<RawCredit>>,
    #[serde(default)]
    pub song_relationships: Option<Vec<RawSongRelationship>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawArtistRef {
    pub id: u64,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAlbum {
    pub name: String,
    #[serde(default)]
    pub artist_names: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStats {
    #[serde(default)]
    pub pageviews: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCredit {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSongRelationship {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub songs: Vec<RawRelatedSong>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRelatedSong {
    pub id: u64,
    pub title: String,
    pub artist_names: String,
    #[serde(default)]
    pub url: Option<String>,
}

// ============================================================================
// Artists
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistResponse {
    #[serde(default)]
    pub artist: Option<RawArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawArtist {
    pub id: u64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<RawDescription>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDescription {
    #[serde(default)]
    pub plain: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_response() {
        let json = r#"{"meta": {"status": 404, "message": "Not found"}}"#;
        let envelope: ApiEnvelope<SongResponse> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.meta.status, 404);
        assert!(envelope.response.is_none());
    }

    #[test]
    fn test_song_optional_fields_default() {
        let json = r#"{
            "id": 1,
            "title": "T",
            "artist_names": "A",
            "full_title": "T by A",
            "url": "https://genius.com/a-t-lyrics",
            "lyrics_state": "complete",
            "some_unknown_field": {"nested": true}
        }"#;
        let song: RawSong = serde_json::from_str(json).unwrap();
        assert!(song.album.is_none());
        assert!(song.producer_artists.is_none());
        assert!(song.song_relationships.is_none());
    }

    #[test]
    fn test_relationship_tag_read_from_type() {
        let json = r#"{"relationship_type": "samples", "type": "samples", "songs": []}"#;
        let rel: RawSongRelationship = serde_json::from_str(json).unwrap();
        assert_eq!(rel.kind, "samples");
        assert!(rel.songs.is_empty());
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let rel: RawSongRelationship =
            serde_json::from_str(r#"{"type": "samples", "songs": null}"#).unwrap();
        assert!(rel.songs.is_empty());

        let search: SearchResponse = serde_json::from_str(r#"{"hits": null}"#).unwrap();
        assert!(search.hits.is_empty());

        let listing: ArtistSongsResponse = serde_json::from_str(r#"{"songs": null}"#).unwrap();
        assert!(listing.songs.is_empty());
    }
}
