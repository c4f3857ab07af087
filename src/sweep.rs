//! One depsweep run, from manifest to surviving candidates

use crate::config::Config;
use crate::discovery::{read_ignore_file, ExclusionList};
use crate::manifest::{Manifest, StrippedManifest};
use crate::prompt::{PromptBackend, Selector};
use crate::report::JsonReporter;
use crate::scan::{CandidateSet, ScanStats, TreeScanner};
use colored::Colorize;
use indicatif::ProgressBar;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Result of scanning a project
#[derive(Debug)]
pub struct ScanOutcome {
    /// Declared names no scanned line mentions, sorted
    pub unused: Vec<String>,
    pub stats: ScanStats,
    /// Still on disk; the caller removes it once reporting is done
    pub stripped_manifest: StrippedManifest,
}

/// How an interactive run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Names the user picked; they were reported
    Selected(Vec<String>),
    /// Every declared dependency is referenced somewhere
    NothingUnused,
}

/// A project whose manifest and ignore file have been loaded
pub struct Sweep {
    root: PathBuf,
    config: Config,
    manifest: Manifest,
    declared: Vec<String>,
    exclusions: ExclusionList,
}

impl Sweep {
    /// Load the manifest and ignore file and build the candidate list
    pub fn prepare(root: &Path, config: Config) -> Result<Self> {
        let manifest = Manifest::load(&config.manifest_path(root)).into_diagnostic()?;
        let ignored = read_ignore_file(&config.ignore_file_path(root))?;

        let declared = declared_candidates(&manifest, &config.dependency_fields)?;
        info!("{} declared dependencies", declared.len());

        let mut exclusions: ExclusionList = config.exclusion_names().into_iter().collect();
        exclusions.extend(ignored);
        debug!("Excluding: {:?}", exclusions.names());

        Ok(Self {
            root: root.to_path_buf(),
            config,
            manifest,
            declared,
            exclusions,
        })
    }

    /// Declared dependency names, sorted and deduplicated
    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    pub fn exclusions(&self) -> &ExclusionList {
        &self.exclusions
    }

    /// Walk the project and return the names nothing refers to.
    ///
    /// `extra_excludes` are added to the exclusion list for this scan only.
    /// The stripped manifest is written to `stripped_dir` and scanned after
    /// the tree.
    pub fn scan(
        &self,
        extra_excludes: &[String],
        stripped_dir: &Path,
        progress: Option<ProgressBar>,
    ) -> Result<ScanOutcome> {
        let mut exclusions = self.exclusions.clone();
        exclusions.extend(extra_excludes.iter().cloned());

        let stripped_manifest =
            StrippedManifest::create(stripped_dir, &self.manifest, &self.config.dependency_fields)?;

        let candidates = CandidateSet::new(self.declared.iter().cloned());
        let mut scanner = TreeScanner::new(&exclusions, &candidates);
        if let Some(progress) = progress {
            scanner = scanner.with_progress(progress);
        }

        scanner.scan_tree(&self.root)?;
        scanner.scan_file(stripped_manifest.path())?;

        let stats = scanner.stats();
        drop(scanner);

        debug!(
            "Scanned {} files in {} directories, pruned {} entries",
            stats.files_scanned, stats.directories_visited, stats.entries_pruned
        );

        Ok(ScanOutcome {
            unused: candidates.into_remaining(),
            stats,
            stripped_manifest,
        })
    }

    /// The interactive flow: ask for extra excludes, scan, ask which
    /// survivors to remove and report them.
    ///
    /// Selection is skipped when nothing survives the scan. The stripped
    /// manifest is gone from `stripped_dir` when this returns.
    pub fn run<B: PromptBackend>(
        &self,
        selector: &mut Selector<B>,
        stripped_dir: &Path,
        reporter: &JsonReporter,
        progress: Option<ProgressBar>,
    ) -> Result<RunOutcome> {
        println!("Processing files...");

        let additional_excludes = selector.additional_excludes()?;

        let start_time = Instant::now();
        let outcome = self.scan(&additional_excludes, stripped_dir, progress.clone())?;
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        info!(
            "{} of {} dependencies unused ({} files in {:.2?})",
            outcome.unused.len(),
            self.declared.len(),
            outcome.stats.files_scanned,
            start_time.elapsed()
        );

        let result = if outcome.unused.is_empty() {
            println!("{}", "No unused dependencies found!".green().bold());
            RunOutcome::NothingUnused
        } else {
            let selected = selector.select_modules(&outcome.unused)?;
            reporter.report(&selected)?;
            RunOutcome::Selected(selected)
        };

        outcome.stripped_manifest.remove()?;
        println!("Finished processing files.");

        Ok(result)
    }
}

/// Deduplicated, sorted names declared under the dependency fields
pub fn declared_candidates(manifest: &Manifest, dependency_fields: &[String]) -> Result<Vec<String>> {
    let names = manifest.dependency_names(dependency_fields).into_diagnostic()?;
    Ok(CandidateSet::new(names).into_remaining())
}

/// Directory holding the running executable, where the stripped manifest goes
pub fn default_stripped_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .into_diagnostic()
        .wrap_err("Failed to locate the depsweep executable")?;

    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| miette::miette!("Executable has no parent directory: {}", exe.display()))
}
