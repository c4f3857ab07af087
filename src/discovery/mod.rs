mod exclusions;

pub use exclusions::{read_ignore_file, ExclusionList};
