//! depsweep - find declared dependencies that nothing in the project uses
//!
//! # Architecture
//!
//! A run is a single linear pipeline:
//! 1. **Manifest loading** - Read `package.json` and the ignore file
//! 2. **Candidate building** - Merge runtime and dev dependency names
//! 3. **Tree scanning** - Walk the project, reading every file line by line
//! 4. **Elimination** - Drop a candidate once any line contains its name
//! 5. **Selection** - Let the user pick which survivors to remove
//! 6. **Reporting** - Print the selection as JSON

pub mod config;
pub mod discovery;
pub mod manifest;
pub mod prompt;
pub mod report;
pub mod scan;
pub mod sweep;

pub use config::Config;
pub use discovery::ExclusionList;
pub use manifest::{Manifest, ManifestError, StrippedManifest};
pub use prompt::{DialoguerBackend, PromptBackend, Selector};
pub use report::{Reporter, ReportFormat};
pub use scan::{CandidateSet, ScanStats, TreeScanner};
pub use sweep::{RunOutcome, ScanOutcome, Sweep};
