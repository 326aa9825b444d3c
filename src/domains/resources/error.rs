//! Resource-specific error types.

use thiserror::Error;

use crate::domains::genius::GeniusError;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource template matches the URI.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The URI matches a template but its parameter is unusable.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Genius could not provide the entity behind the resource.
    #[error("Could not read the {entity} resource {id}: {source}")]
    Upstream {
        entity: &'static str,
        id: u64,
        #[source]
        source: GeniusError,
    },
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    /// Create a new "invalid URI" error.
    pub fn invalid_uri(msg: impl Into<String>) -> Self {
        Self::InvalidUri(msg.into())
    }

    /// Wrap a Genius failure for the given entity.
    pub fn upstream(entity: &'static str, id: u64, source: GeniusError) -> Self {
        Self::Upstream { entity, id, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_wraps_source() {
        let err = ResourceError::upstream("song", 7, GeniusError::api(404, "Not found"));
        assert_eq!(
            err.to_string(),
            "Could not read the song resource 7: Error calling Genius API [404]: Not found"
        );
    }
}
