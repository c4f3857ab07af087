//! Dependency manifest loading
//!
//! The manifest is a JSON object (`package.json` by default) whose
//! dependency fields map package names to version requirements. Everything
//! else in it is metadata that still counts as "source" for the scan, which
//! is what [`StrippedManifest`] is for.

mod stripped;

pub use stripped::StrippedManifest;

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Manifest {0} is not a JSON object")]
    NotAnObject(PathBuf),
    #[error("Manifest field `{field}` must be an object mapping names to versions")]
    InvalidField { field: String },
}

/// A parsed dependency manifest
#[derive(Debug, Clone)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value =
            serde_json::from_str(&contents).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_value(path, value)
    }

    /// Build a manifest from an already parsed JSON value
    pub fn from_value(path: &Path, value: Value) -> Result<Self, ManifestError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ManifestError::NotAnObject(path.to_path_buf())),
        }
    }

    /// Names declared under the given dependency fields, in declaration order.
    ///
    /// An absent or `null` field counts as empty. Names declared in more
    /// than one field are returned once per field.
    pub fn dependency_names(&self, dependency_fields: &[String]) -> Result<Vec<String>, ManifestError> {
        let mut names = Vec::new();

        for field in dependency_fields {
            match self.fields.get(field) {
                None | Some(Value::Null) => {}
                Some(Value::Object(deps)) => names.extend(deps.keys().cloned()),
                Some(_) => {
                    return Err(ManifestError::InvalidField {
                        field: field.clone(),
                    })
                }
            }
        }

        Ok(names)
    }

    /// The manifest with the dependency fields removed
    pub fn without_fields(&self, dependency_fields: &[String]) -> Value {
        let stripped: Map<String, Value> = self
            .fields
            .iter()
            .filter(|(key, _)| !dependency_fields.iter().any(|field| field == *key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Value::Object(stripped)
    }
}
