mod terminal;
mod json;

pub use terminal::TerminalReporter;
pub use json::JsonReporter;

use miette::Result;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl ReportFormat {
    /// Parse a config-file format name, falling back to terminal
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "json" => ReportFormat::Json,
            _ => ReportFormat::Terminal,
        }
    }
}

/// Reporter for outputting dependency names
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    /// Report the given dependency names
    pub fn report(&self, names: &[String]) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new();
                reporter.report(names)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone());
                reporter.report(names)
            }
        }
    }
}
