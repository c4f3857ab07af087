use super::PromptBackend;
use crate::discovery::ExclusionList;
use miette::Result;
use tracing::debug;

pub const EXCLUDES_PROMPT: &str =
    "Additional file/directory names to exclude (comma separated string)";
pub const SELECT_PROMPT: &str = "Select modules to remove";
pub const EMPTY_SELECTION_MESSAGE: &str = "You must choose at least one module.";

/// The two questions asked during a run
pub struct Selector<B> {
    backend: B,
}

impl<B: PromptBackend> Selector<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Ask for extra entry names to leave out of the scan
    pub fn additional_excludes(&mut self) -> Result<Vec<String>> {
        let answer = self.backend.input(EXCLUDES_PROMPT)?;
        let names = ExclusionList::parse_comma_separated(&answer);
        debug!("Additional excludes: {:?}", names);
        Ok(names)
    }

    /// Ask which surviving candidates to remove, re-asking until at least one is checked
    pub fn select_modules(&mut self, candidates: &[String]) -> Result<Vec<String>> {
        loop {
            let indices = self.backend.multi_select(SELECT_PROMPT, candidates)?;
            if indices.is_empty() {
                self.backend.notify_invalid(EMPTY_SELECTION_MESSAGE);
                continue;
            }

            return Ok(indices
                .into_iter()
                .filter_map(|i| candidates.get(i).cloned())
                .collect());
        }
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
