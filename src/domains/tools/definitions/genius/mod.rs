//! Genius tools module.
//!
//! This module provides the tools backed by the Genius API:
//! - `search`: Search songs, artists and web pages
//! - `song_lyrics`: Song details with scraped lyrics
//! - `artist_songs`: Paginated listing of an artist's songs
//!
//! Each tool has handlers for both HTTP and STDIO transports.

pub mod artist_songs;
pub mod common;
pub mod search;
pub mod song_lyrics;

pub use artist_songs::{ListArtistSongsParams, ListArtistSongsTool};
pub use search::{SearchSongParams, SearchSongTool};
pub use song_lyrics::{SongLyricsParams, SongLyricsTool};
