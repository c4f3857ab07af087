use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Entry names excluded from every scan, whatever the config says
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git", "package.json", "package-lock.json"];

/// Configuration for a depsweep run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest file name, relative to the project root
    pub manifest: PathBuf,

    /// Ignore-list file name, relative to the project root
    pub ignore_file: PathBuf,

    /// Manifest fields whose keys are dependency names
    pub dependency_fields: Vec<String>,

    /// Extra entry names never descended into or read, on top of [`DEFAULT_EXCLUDES`]
    pub exclude: Vec<String>,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format for `--list`: terminal, json
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("package.json"),
            ignore_file: PathBuf::from(".gitignore"),
            dependency_fields: vec![
                "dependencies".to_string(),
                "devDependencies".to_string(),
            ],
            exclude: vec![],
            report: ReportConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
        }
    }
}

/// Config file names looked up in the project root, first match wins
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".depsweep.yml",
    ".depsweep.yaml",
    ".depsweep.toml",
    "depsweep.yml",
    "depsweep.yaml",
    "depsweep.toml",
];

/// Syntax of a config file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Toml,
    /// No recognised extension: YAML, then TOML
    Unknown,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => ConfigFormat::Yaml,
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Unknown,
        }
    }

    fn parse(self, contents: &str) -> Result<Config> {
        match self {
            ConfigFormat::Yaml => serde_yaml::from_str(contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            ConfigFormat::Toml => toml::from_str(contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            ConfigFormat::Unknown => serde_yaml::from_str(contents).or_else(|_| {
                toml::from_str(contents)
                    .into_diagnostic()
                    .wrap_err("Config file is neither valid YAML nor valid TOML")
            }),
        }
    }
}

impl Config {
    /// Load configuration from a YAML or TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let config = ConfigFormat::from_path(path)
            .parse(&contents)
            .wrap_err_with(|| format!("Invalid config file: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// First config file present in the project root
    pub fn find_file(project_root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| path.is_file())
    }

    /// Load the project's config file if it has one, defaults otherwise
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        match Self::find_file(project_root) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Absolute path of the manifest for a project root
    pub fn manifest_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.manifest)
    }

    /// Absolute path of the ignore file for a project root
    pub fn ignore_file_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.ignore_file)
    }

    /// File name of the manifest, which is never scanned as part of the tree
    pub fn manifest_file_name(&self) -> Option<String> {
        self.manifest
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Every configured exclusion: the fixed names, the manifest's own name,
    /// then `exclude`. Ignore-file entries are added separately.
    pub fn exclusion_names(&self) -> Vec<String> {
        let mut names: Vec<String> = DEFAULT_EXCLUDES.iter().map(|name| name.to_string()).collect();
        names.extend(self.manifest_file_name());
        names.extend(self.exclude.iter().cloned());
        names
    }
}
