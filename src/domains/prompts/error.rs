//! Prompt errors.

use thiserror::Error;

/// Errors raised while resolving or rendering a prompt.
#[derive(Debug, Error)]
pub enum PromptError {
    /// No prompt is registered under the name.
    #[error("Prompt not found: {0}")]
    NotFound(String),

    /// A required argument was not supplied.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// The template itself is malformed.
    #[error("Template error: {0}")]
    TemplateError(String),
}

impl PromptError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn missing_argument(arg: impl Into<String>) -> Self {
        Self::MissingArgument(arg.into())
    }

    pub fn template(msg: impl Into<String>) -> Self {
        Self::TemplateError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            PromptError::not_found("genius-lyrics-prompt").to_string(),
            "Prompt not found: genius-lyrics-prompt"
        );
    }
}
