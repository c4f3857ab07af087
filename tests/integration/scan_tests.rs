//! Integration tests for the scan pipeline
//!
//! These drive `Sweep` directly against throwaway project trees.

use depsweep::sweep::Sweep;
use depsweep::{CandidateSet, Config, ExclusionList, TreeScanner};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project(manifest: &str, gitignore: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write(dir.path(), "package.json", manifest);
    write(dir.path(), ".gitignore", gitignore);
    dir
}

/// Prepare and scan a project, cleaning up the stripped manifest
fn unused(root: &Path, extra_excludes: &[&str]) -> Vec<String> {
    let stripped_dir = TempDir::new().unwrap();
    let extra: Vec<String> = extra_excludes.iter().map(|s| s.to_string()).collect();

    let sweep = Sweep::prepare(root, Config::default()).expect("prepare should succeed");
    let outcome = sweep.scan(&extra, stripped_dir.path(), None).expect("scan should succeed");
    outcome.stripped_manifest.remove().unwrap();
    outcome.unused
}

#[test]
fn test_reference_example() {
    let dir = project(
        r#"{"name": "demo", "dependencies": {"lodash": "^4", "chalk": "^5"}}"#,
        "node_modules\n",
    );
    write(dir.path(), "src/index.js", "const _ = require('lodash');\n");

    assert_eq!(unused(dir.path(), &[]), vec!["chalk"]);
}

#[test]
fn test_survivor_iff_no_line_contains_name() {
    let dir = project(
        r#"{"dependencies": {"axios": "1", "dayjs": "1", "uuid": "9", "zod": "3"}}"#,
        "",
    );
    write(dir.path(), "a.ts", "import axios from 'axios'\n");
    write(dir.path(), "docs/notes.md", "We replaced moment with dayjs.\n");
    write(dir.path(), "deep/er/still/c.ts", "// nothing here\n");

    let survivors = unused(dir.path(), &[]);
    assert_eq!(survivors, vec!["uuid", "zod"]);
}

#[test]
fn test_excluded_subtree_never_affects_result() {
    let dir = project(r#"{"dependencies": {"express": "4"}}"#, "build\n");
    write(dir.path(), "build/server.js", "require('express')\n");
    write(dir.path(), "build/nested/more.js", "require('express')\n");
    write(dir.path(), "fixtures/app.js", "require('express')\n");

    assert!(unused(dir.path(), &[]).is_empty());
    assert_eq!(unused(dir.path(), &["fixtures"]), vec!["express"]);
}

#[test]
fn test_survivors_are_sorted_subset_of_declared() {
    let dir = project(
        r#"{"dependencies": {"zod": "3", "@types/node": "20", "axios": "1"}, "devDependencies": {"axios": "1", "Babel": "7"}}"#,
        "",
    );

    let sweep = Sweep::prepare(dir.path(), Config::default()).unwrap();
    let declared = sweep.declared().to_vec();
    assert_eq!(declared, vec!["@types/node", "Babel", "axios", "zod"]);

    let survivors = unused(dir.path(), &[]);
    assert!(survivors.windows(2).all(|w| w[0] < w[1]));
    assert!(survivors.iter().all(|name| declared.contains(name)));
}

#[test]
fn test_substring_match_keeps_similar_names() {
    let dir = project(r#"{"dependencies": {"lodash": "4"}}"#, "");
    write(dir.path(), "index.js", "import { debounce } from 'lodash-es';\n");

    assert!(unused(dir.path(), &[]).is_empty());
}

#[test]
fn test_repeated_scans_agree() {
    let dir = project(r#"{"dependencies": {"a-lib": "1", "b-lib": "1", "c-lib": "1"}}"#, "");
    for i in 0..20 {
        write(dir.path(), &format!("src/file{}.js", i), "require('b-lib')\n");
    }

    let first = unused(dir.path(), &[]);
    let second = unused(dir.path(), &[]);
    assert_eq!(first, second);
    assert_eq!(first, vec!["a-lib", "c-lib"]);
}

#[test]
fn test_stripped_manifest_lifecycle() {
    let dir = project(r#"{"dependencies": {"lodash": "4"}}"#, "");
    let stripped_dir = TempDir::new().unwrap();

    let sweep = Sweep::prepare(dir.path(), Config::default()).unwrap();
    let outcome = sweep.scan(&[], stripped_dir.path(), None).unwrap();

    let path = outcome.stripped_manifest.path().to_path_buf();
    assert!(path.starts_with(stripped_dir.path()));
    assert!(path.exists(), "stripped manifest should exist until reporting is done");

    outcome.stripped_manifest.remove().unwrap();
    assert!(!path.exists());
}

#[test]
fn test_scanner_with_shared_set_across_threads() {
    let dir = TempDir::new().unwrap();
    let names: Vec<String> = (0..50).map(|i| format!("pkg-{:02}", i)).collect();
    for (i, name) in names.iter().enumerate().filter(|(i, _)| i % 2 == 0) {
        write(dir.path(), &format!("dir{}/uses{}.js", i % 5, i), &format!("require('{}')\n", name));
    }

    let exclusions = ExclusionList::new();
    let candidates = CandidateSet::new(names.clone());
    TreeScanner::new(&exclusions, &candidates)
        .scan_tree(dir.path())
        .unwrap();

    let expected: Vec<String> = names
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % 2 == 1)
        .map(|(_, name)| name)
        .collect();
    assert_eq!(candidates.remaining(), expected);
}
