//! Recursive fragment discovery
//!
//! Walks the lookup tree depth-first and groups fragment paths by language.
//! Everything under the save directory is excluded so the aggregator never
//! consumes its own output as input.
//!
//! Per-language ordering follows `fs::read_dir` traversal order, which is
//! not guaranteed stable across file systems. Within one session it is
//! consistent, which is all the merge fold requires.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::{classify, matches_language};
use crate::error::{CollectorError, CollectorResult};
use crate::paths::absolutize;

/// Mapping from language identifier to its discovered fragment paths.
///
/// Every configured language has an entry, possibly empty.
pub type FragmentTree = HashMap<String, Vec<PathBuf>>;

/// Discover fragments for all configured languages under `lookup_dir`.
///
/// Discovery errors (unlistable directory, failed stat) propagate and abort
/// the scan; they are never recovered here.
pub fn scan(
    lookup_dir: &Path,
    save_dir: &Path,
    languages: &[String],
) -> CollectorResult<FragmentTree> {
    // The exclusion below is a lexical starts_with, so both directories
    // must be in the same absolute normalized form.
    let lookup_dir = absolutize(lookup_dir);
    let save_dir = absolutize(save_dir);

    if !lookup_dir.is_dir() {
        return Err(CollectorError::LookupDirNotFound { path: lookup_dir });
    }

    let mut tree: FragmentTree = languages
        .iter()
        .map(|language| (language.clone(), Vec::new()))
        .collect();

    scan_recursive(&lookup_dir, &save_dir, &mut |path, file_name| {
        if let Some(language) = classify(file_name, languages) {
            if let Some(files) = tree.get_mut(language) {
                files.push(path);
            }
        }
    })?;

    Ok(tree)
}

/// Discover fragments for a single language under `lookup_dir`.
///
/// Used by the incremental path when one language needs a full re-merge.
pub fn scan_language(
    lookup_dir: &Path,
    save_dir: &Path,
    language: &str,
) -> CollectorResult<Vec<PathBuf>> {
    let lookup_dir = absolutize(lookup_dir);
    let save_dir = absolutize(save_dir);

    if !lookup_dir.is_dir() {
        return Err(CollectorError::LookupDirNotFound { path: lookup_dir });
    }

    let mut files = Vec::new();
    scan_recursive(&lookup_dir, &save_dir, &mut |path, file_name| {
        if matches_language(file_name, language) {
            files.push(path);
        }
    })?;

    Ok(files)
}

fn scan_recursive(
    current: &Path,
    save_dir: &Path,
    visit: &mut impl FnMut(PathBuf, &str),
) -> CollectorResult<()> {
    let entries = fs::read_dir(current).map_err(|source| CollectorError::Discovery {
        path: current.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| CollectorError::Discovery {
            path: current.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        // Never descend into or classify the output directory.
        if path.starts_with(save_dir) {
            continue;
        }

        let file_type = entry
            .file_type()
            .map_err(|source| CollectorError::Discovery {
                path: path.clone(),
                source,
            })?;

        if file_type.is_dir() {
            scan_recursive(&path, save_dir, visit)?;
        } else if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            let file_name = file_name.to_string();
            visit(path, &file_name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn languages(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_scan_groups_fragments_by_language() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pages/home")).unwrap();
        fs::write(root.join("en.json"), "{}").unwrap();
        fs::write(root.join("pages/common.en.json"), "{}").unwrap();
        fs::write(root.join("pages/home/home-de.json"), "{}").unwrap();
        fs::write(root.join("pages/readme.md"), "nope").unwrap();

        let tree = scan(root, &root.join("generated"), &languages(&["en", "de"])).unwrap();

        assert_eq!(tree["en"].len(), 2);
        assert_eq!(tree["de"].len(), 1);
        assert!(tree["de"][0].ends_with("pages/home/home-de.json"));
    }

    #[test]
    fn test_scan_keeps_empty_entry_for_unmatched_language() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("en.json"), "{}").unwrap();

        let tree = scan(root, &root.join("generated"), &languages(&["en", "fr"])).unwrap();

        assert_eq!(tree["en"].len(), 1);
        assert!(tree["fr"].is_empty(), "fr must be present but empty");
    }

    #[test]
    fn test_scan_excludes_save_dir_decoy() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let save_dir = root.join("generated");
        fs::create_dir_all(save_dir.join("nested")).unwrap();
        fs::write(root.join("en.json"), "{}").unwrap();
        // Decoys whose names match the language pattern
        fs::write(save_dir.join("en.json"), "{}").unwrap();
        fs::write(save_dir.join("nested/common.en.json"), "{}").unwrap();

        let tree = scan(root, &save_dir, &languages(&["en"])).unwrap();

        assert_eq!(tree["en"].len(), 1);
        assert!(tree["en"][0].ends_with("en.json"));
        assert!(!tree["en"][0].starts_with(&save_dir));
    }

    #[test]
    fn test_scan_excludes_save_dir_given_in_dotted_form() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let save_dir = root.join("generated");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::create_dir_all(&save_dir).unwrap();
        fs::write(root.join("en.json"), "{}").unwrap();
        fs::write(save_dir.join("en.json"), "{}").unwrap();

        // Same directory spelled through an intermediate component
        let dotted = root.join("sub/../generated");
        let tree = scan(root, &dotted, &languages(&["en"])).unwrap();

        assert_eq!(tree["en"].len(), 1);
        assert!(!tree["en"][0].starts_with(&save_dir));
    }

    #[test]
    fn test_scan_missing_root_is_discovery_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = scan(&missing, &dir.path().join("generated"), &languages(&["en"]))
            .expect_err("missing lookup dir must fail the scan");
        assert!(matches!(err, CollectorError::LookupDirNotFound { .. }));
    }

    #[test]
    fn test_scan_language_restricts_to_one_language() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("en.json"), "{}").unwrap();
        fs::write(root.join("sub/menu.de.json"), "{}").unwrap();
        fs::write(root.join("sub/menu.en.json"), "{}").unwrap();

        let files = scan_language(root, &root.join("generated"), "de").unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("sub/menu.de.json"));
    }

    #[test]
    fn test_scan_language_excludes_save_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let save_dir = root.join("generated");
        fs::create_dir_all(&save_dir).unwrap();
        fs::write(save_dir.join("en.json"), "{}").unwrap();

        let files = scan_language(root, &save_dir, "en").unwrap();
        assert!(files.is_empty());
    }
}
