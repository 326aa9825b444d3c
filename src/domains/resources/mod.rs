//! Resources domain module.
//!
//! This module handles all resource-related functionality for the MCP server.
//! Resources are Genius entities addressed by URI templates such as
//! `genius://songs/{id}` and read on demand.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `handlers.rs` - The `ResourceHandler` trait and URI template matching
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Resource service for listing and reading
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file in `definitions/` (e.g., `album.rs`)
//! 2. Implement the `ResourceHandler` trait
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs`
//!
//! **No need to modify `service.rs`!**

pub mod definitions;
mod error;
mod handlers;
mod registry;
mod service;

pub use error::ResourceError;
pub use handlers::{ResourceHandler, match_template};
pub use registry::{get_all_resource_handlers, resource_uri_templates};
pub use service::ResourceService;
