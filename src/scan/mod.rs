//! Candidate elimination by walking the project tree
//!
//! A dependency name is "used" as soon as any line of any scanned file
//! contains it. There is no tokenizing: `lodash` is used by a line that
//! mentions `lodash-es`.

mod candidates;
mod tree;

pub use candidates::CandidateSet;
pub use tree::{ScanStats, TreeScanner};
