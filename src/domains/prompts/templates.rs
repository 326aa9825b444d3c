//! Prompt templates module.
//!
//! This module contains the PromptTemplate struct and the small
//! `{{variable}}` / `{{#if variable}}` rendering engine behind it.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

const IF_OPEN: &str = "{{#if ";
const ELSE_TAG: &str = "{{else}}";
const ENDIF_TAG: &str = "{{/if}}";

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// Description attached to the rendered result.
    pub result_description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template string with placeholders.
    pub template: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            result_description: None,
            arguments,
            template: template.into(),
        }
    }

    /// Render the template with the given arguments.
    ///
    /// - `{{variable}}` is replaced with the value of `variable`, or removed
    ///   when the variable is not supplied
    /// - `{{#if variable}}content{{/if}}` keeps content only if variable is
    ///   set and non-empty
    /// - `{{#if variable}}content{{else}}alternative{{/if}}` with else support
    ///
    /// Argument values are inserted verbatim and never re-scanned.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let resolved = self.process_conditionals(&self.template, arguments)?;
        Ok(substitute(&resolved, arguments))
    }

    /// Resolve conditional blocks in the template.
    fn process_conditionals(
        &self,
        template: &str,
        arguments: &HashMap<String, String>,
    ) -> Result<String, PromptError> {
        let mut result = template.to_string();

        while let Some(if_start) = result.find(IF_OPEN) {
            let var_end = if_start
                + result[if_start..]
                    .find("}}")
                    .ok_or_else(|| PromptError::template("Unclosed {{#if}} tag"))?;
            let var_name = result[if_start + IF_OPEN.len()..var_end].trim();

            let endif_pos = var_end
                + result[var_end..]
                    .find(ENDIF_TAG)
                    .ok_or_else(|| PromptError::template("Missing {{/if}} tag"))?;

            let block = &result[var_end + 2..endif_pos];
            let (when_set, when_unset) = match block.find(ELSE_TAG) {
                Some(else_pos) => (&block[..else_pos], &block[else_pos + ELSE_TAG.len()..]),
                None => (block, ""),
            };

            let is_set = arguments.get(var_name).is_some_and(|v| !v.is_empty());
            let replacement = if is_set { when_set } else { when_unset };

            result = format!(
                "{}{}{}",
                &result[..if_start],
                replacement,
                &result[endif_pos + ENDIF_TAG.len()..]
            );
        }

        Ok(result)
    }
}

/// Replace every `{{name}}` placeholder in one left-to-right pass.
fn substitute(template: &str, arguments: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let Some(close) = rest[open..].find("}}") else {
            break;
        };
        out.push_str(&rest[..open]);

        let name = rest[open + 2..open + close].trim();
        if let Some(value) = arguments.get(name) {
            out.push_str(value);
        }
        rest = &rest[open + close + 2..];
    }

    out.push_str(rest);
    out
}
