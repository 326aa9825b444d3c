//! Resource definitions module.
//!
//! Each resource is defined in its own file and implements
//! [`ResourceHandler`](super::handlers::ResourceHandler).
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `album.rs`)
//! 2. Implement the `ResourceHandler` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

pub mod artist;
pub mod song;
pub mod song_lyrics;

pub use artist::ArtistResource;
pub use song::SongResource;
pub use song_lyrics::SongLyricsResource;
