use miette::{IntoDiagnostic, Result, WrapErr};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Read an ignore-list file.
///
/// Every non-empty line that does not start with `#` is one entry, taken
/// verbatim apart from a trailing `\r`. Invalid UTF-8 is decoded lossily.
/// A missing file is an error.
pub fn read_ignore_file(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read ignore file: {}", path.display()))?;
    let contents = String::from_utf8_lossy(&bytes);

    let entries: Vec<String> = contents
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    debug!("Read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Entry names that are never descended into or read.
///
/// Matching is by exact file name at any depth, never by relative path.
#[derive(Debug, Clone, Default)]
pub struct ExclusionList {
    names: Vec<String>,
    lookup: HashSet<String>,
}

impl ExclusionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name, ignoring duplicates
    pub fn insert(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.lookup.insert(name.clone()) {
            self.names.push(name);
        }
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.insert(name);
        }
    }

    /// Check whether an entry with this file name is excluded
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    /// Names in insertion order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Split comma-separated user input into names, trimmed, blanks dropped
    pub fn parse_comma_separated(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}
