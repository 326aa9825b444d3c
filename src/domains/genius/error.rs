//! Genius-specific error types.

use thiserror::Error;

/// Errors raised while talking to the Genius API or scraping song pages.
///
/// Lyrics that are structurally missing from a page are not an error; the
/// scraper reports them as `None`.
#[derive(Debug, Error)]
pub enum GeniusError {
    /// No access token is configured. Raised before any network call.
    #[error("Authentication required: no Genius access token configured for the endpoint {endpoint}")]
    Authentication { endpoint: String },

    /// The API reported a failure, either through the HTTP status or through
    /// the `meta.status` field embedded in the response body.
    #[error("Error calling Genius API [{status}]: {message}")]
    Api { status: u16, message: String },

    /// The response was successful but did not contain the requested entity.
    #[error("No {entity} details found for the ID {id} or unexpected response from the API")]
    NotFound { entity: &'static str, id: u64 },

    /// A song page could not be fetched.
    #[error("Failed to fetch URL: {status} {reason}")]
    Fetch { status: u16, reason: String },

    /// The request never produced an HTTP status (connection, timeout, TLS...).
    #[error("Error calling Genius API: {0}")]
    Transport(String),

    /// The body did not have the expected shape.
    #[error("Unexpected response from Genius API: {0}")]
    Decode(String),
}

impl GeniusError {
    /// Create a new authentication error for the given endpoint.
    pub fn authentication(endpoint: impl Into<String>) -> Self {
        Self::Authentication {
            endpoint: endpoint.into(),
        }
    }

    /// Create a new API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a new "not found" error.
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Create a new page fetch error.
    pub fn fetch(status: u16, reason: impl Into<String>) -> Self {
        Self::Fetch {
            status,
            reason: reason.into(),
        }
    }

    /// Create a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}
