use super::Manifest;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Temporary copy of the manifest without its dependency fields.
///
/// Scanning it makes names mentioned in scripts or tool config blocks count
/// as used. The file is deleted by [`StrippedManifest::remove`], or on drop
/// if the run bails out before that.
#[derive(Debug)]
pub struct StrippedManifest {
    path: PathBuf,
    removed: bool,
}

impl StrippedManifest {
    /// Write the stripped manifest into `dir` under a per-process name
    pub fn create(dir: &Path, manifest: &Manifest, dependency_fields: &[String]) -> Result<Self> {
        let path = dir.join(format!(".depsweep-manifest-{}.json", std::process::id()));
        let stripped = manifest.without_fields(dependency_fields);

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        stripped.serialize(&mut ser).into_diagnostic()?;
        buf.push(b'\n');

        std::fs::write(&path, &buf)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write temporary manifest: {}", path.display()))?;

        debug!("Wrote stripped manifest to {}", path.display());

        Ok(Self {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the temporary file
    pub fn remove(mut self) -> Result<()> {
        self.removed = true;
        std::fs::remove_file(&self.path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to remove temporary manifest: {}", self.path.display()))
    }
}

impl Drop for StrippedManifest {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Could not remove {}: {}", self.path.display(), e);
        }
    }
}
