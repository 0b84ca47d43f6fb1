//! Interactive input.

use crate::error::CliResult;
use dialoguer::Input;

/// Source of answers for command prompts.
pub trait Prompter {
    /// Asks one free-text question. An empty answer is allowed.
    fn text(&mut self, prompt: &str) -> CliResult<String>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn text(&mut self, prompt: &str) -> CliResult<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }
}

/// Trimmed answer, `None` when blank.
pub fn optional(answer: String) -> Option<String> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
