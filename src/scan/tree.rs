use super::CandidateSet;
use crate::discovery::ExclusionList;
use indicatif::ProgressBar;
use miette::{IntoDiagnostic, Result, WrapErr};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

/// Counters collected during a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub directories_visited: usize,
    pub entries_pruned: usize,
    pub candidates_eliminated: usize,
}

#[derive(Debug, Default)]
struct Counters {
    files_scanned: AtomicUsize,
    directories_visited: AtomicUsize,
    entries_pruned: AtomicUsize,
    candidates_eliminated: AtomicUsize,
}

/// Walks a project tree and eliminates every candidate it finds in a line.
///
/// Files in one directory are read in parallel. Subdirectories are entered
/// only once all of those files are done, and are then walked in parallel
/// with each other.
pub struct TreeScanner<'a> {
    exclusions: &'a ExclusionList,
    candidates: &'a CandidateSet,
    counters: Counters,
    progress: Option<ProgressBar>,
}

impl<'a> TreeScanner<'a> {
    pub fn new(exclusions: &'a ExclusionList, candidates: &'a CandidateSet) -> Self {
        Self {
            exclusions,
            candidates,
            counters: Counters::default(),
            progress: None,
        }
    }

    /// Tick a progress bar once per scanned file
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Walk the tree rooted at `root`. The root itself is never pruned.
    pub fn scan_tree(&self, root: &Path) -> Result<()> {
        debug!("Scanning tree at {}", root.display());
        self.scan_directory(root)
    }

    fn scan_directory(&self, dir: &Path) -> Result<()> {
        self.counters.directories_visited.fetch_add(1, Ordering::Relaxed);

        let entries = std::fs::read_dir(dir)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read directory: {}", dir.display()))?;

        let mut files: Vec<PathBuf> = Vec::new();
        let mut subdirectories: Vec<PathBuf> = Vec::new();

        for entry in entries {
            let entry = entry
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to read directory: {}", dir.display()))?;

            let file_name = entry.file_name();
            if file_name.to_str().is_some_and(|name| self.exclusions.contains(name)) {
                trace!("Excluding: {}", entry.path().display());
                self.counters.entries_pruned.fetch_add(1, Ordering::Relaxed);
                continue;
            }

            // Does not follow symlinks
            let file_type = entry.file_type().into_diagnostic()?;
            if file_type.is_file() {
                files.push(entry.path());
            } else if file_type.is_dir() {
                subdirectories.push(entry.path());
            }
        }

        debug!(
            "{}: {} files, {} subdirectories",
            dir.display(),
            files.len(),
            subdirectories.len()
        );

        files.par_iter().try_for_each(|file| self.scan_file(file))?;

        subdirectories
            .par_iter()
            .try_for_each(|subdirectory| self.scan_directory(subdirectory))
    }

    /// Scan a single file line by line.
    ///
    /// Every file is opened and read to the end even when no candidates are
    /// left, so an unreadable file fails the scan regardless of scan order.
    pub fn scan_file(&self, path: &Path) -> Result<()> {
        trace!("Scanning {}", path.display());

        let file = File::open(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to open file: {}", path.display()))?;
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to read file: {}", path.display()))?;
            if read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(trim_line_ending(&buf));
            let removed = self.candidates.eliminate_matches(&line);
            if removed > 0 {
                self.counters
                    .candidates_eliminated
                    .fetch_add(removed, Ordering::Relaxed);
            }
        }

        self.counters.files_scanned.fetch_add(1, Ordering::Relaxed);
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }

        Ok(())
    }

    pub fn stats(&self) -> ScanStats {
        ScanStats {
            files_scanned: self.counters.files_scanned.load(Ordering::Relaxed),
            directories_visited: self.counters.directories_visited.load(Ordering::Relaxed),
            entries_pruned: self.counters.entries_pruned.load(Ordering::Relaxed),
            candidates_eliminated: self.counters.candidates_eliminated.load(Ordering::Relaxed),
        }
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
