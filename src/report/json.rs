use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;

/// JSON reporter: a pretty-printed array of dependency names
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, names: &[String]) -> Result<()> {
        let json = Self::render(names)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, format!("{}\n", json))
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write report: {}", path.display()))?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }

    /// Two-space indented JSON array
    pub fn render(names: &[String]) -> Result<String> {
        serde_json::to_string_pretty(names).into_diagnostic()
    }
}
