//! Genius search prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Primes the model to search Genius, optionally seeded with a term.
pub struct GeniusSearchPrompt;

impl PromptDefinition for GeniusSearchPrompt {
    const NAME: &'static str = "genius-search-prompt";
    const DESCRIPTION: &'static str = "Prepare a query to search for content in Genius.";
    const RESULT_DESCRIPTION: &'static str = "This prompt helps you search in Genius.";

    fn template() -> &'static str {
        "Please help me find information in Genius{{#if initialQuery}} about \"{{initialQuery}}\"{{/if}}. What do you want to search for?"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![PromptArgument {
            name: "initialQuery".to_string(),
            title: Some("Initial query".to_string()),
            description: Some("An initial search term to include in the prompt.".to_string()),
            required: Some(false),
        }]
    }
}
