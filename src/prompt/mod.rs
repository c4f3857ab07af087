//! Interactive prompts
//!
//! [`Selector`] holds the prompt flow (what is asked, how answers are
//! parsed and validated). The terminal I/O sits behind [`PromptBackend`] so
//! the flow can be driven by scripted answers.

mod selector;

pub use selector::{Selector, EMPTY_SELECTION_MESSAGE, EXCLUDES_PROMPT, SELECT_PROMPT};

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use miette::{IntoDiagnostic, Result};

/// Terminal operations the selector needs
pub trait PromptBackend {
    /// Ask for a line of free text; empty input is allowed
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Show a checklist and return the indices of the checked items
    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>>;

    /// Tell the user why their last answer was rejected
    fn notify_invalid(&mut self, message: &str);
}

/// Prompts rendered with dialoguer's colorful theme
pub struct DialoguerBackend {
    theme: ColorfulTheme,
}

impl DialoguerBackend {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBackend for DialoguerBackend {
    fn input(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()
    }

    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        println!("{}", style("(Space to toggle, Enter to confirm)").dim());

        MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .interact()
            .into_diagnostic()
    }

    fn notify_invalid(&mut self, message: &str) {
        eprintln!("{} {}", style(">>").red().bold(), style(message).red());
    }
}
