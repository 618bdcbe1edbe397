//! Repository discovery: which configured repositories exist under the base.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One existing repository root selected for scanning.
pub struct ScanTarget {
    pub name: String,
    pub root: PathBuf,
}

/// Return the repositories from `names` that exist as directories under
/// `base`, in input order. Missing entries and repeated names are dropped
/// without error.
pub fn locate_repos(base: &Path, names: &[String]) -> Vec<ScanTarget> {
    let mut targets: Vec<ScanTarget> = Vec::new();
    for name in names {
        if targets.iter().any(|t| &t.name == name) {
            continue;
        }
        let root = base.join(name);
        if root.is_dir() {
            targets.push(ScanTarget {
                name: name.clone(),
                root,
            });
        } else {
            log::debug!("repository '{}' not found at {}", name, root.display());
        }
    }
    targets
}
