//! Domains module containing business logic organized by bounded contexts.
//!
//! `genius` holds everything that talks to Genius; the MCP-facing domains
//! (`tools`, `resources`, `prompts`) only render what it returns.

pub mod genius;
pub mod prompts;
pub mod resources;
pub mod tools;
