mod loader;

pub use loader::{Config, ReportConfig, CONFIG_FILE_NAMES, DEFAULT_EXCLUDES};
