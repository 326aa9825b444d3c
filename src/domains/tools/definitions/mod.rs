//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod genius;

pub use genius::{
    ListArtistSongsParams, ListArtistSongsTool, SearchSongParams, SearchSongTool,
    SongLyricsParams, SongLyricsTool,
};
