//! Genius MCP Server Library
//!
//! Exposes the Genius music knowledge base (song search, song details with
//! scraped lyrics, artist details and artist song listings) over the Model
//! Context Protocol.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **genius**: API client, lyrics scraper, normalization and rendering
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: Genius entities addressable by URI
//!   - **prompts**: prompt templates for consistent interactions
//!
//! # Example
//!
//! ```rust,no_run
//! use genius_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
