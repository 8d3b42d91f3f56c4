//! Path normalization helpers
//!
//! The save_dir exclusion compares paths with `Path::starts_with`, which is
//! purely lexical: `/project/generated` does not start with `generated` or
//! `/project/x/../generated`. Both sides of the guard must therefore be
//! brought into one form first: absolute, resolved against the working
//! directory, with `.` and `..` components removed.
//!
//! Resolution is lexical, without touching the file system: save_dir may
//! not exist yet, and following symlinks could make the guard disagree with
//! the paths the configuration actually names.

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against the working directory and normalize `.` and `..`
/// components lexically. Idempotent; absolute input stays absolute.
pub(crate) fn absolutize(path: &Path) -> PathBuf {
    let joined = match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    };
    normalize(&joined)
}

fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push(Component::ParentDir);
                }
            }
            other => result.push(other),
        }
    }
    result
}
