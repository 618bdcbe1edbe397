//! Candidate file discovery inside one repository.
//!
//! Walks the configured roots of a `ScanTarget` with `walkdir`, keeping
//! files whose extension is allowed and pruning anything matched by an
//! exclude glob. Symlinks are followed only while they resolve inside the
//! repository, so every file belongs to exactly one target. Missing roots,
//! unreadable directories, and symlink loops contribute no files and never
//! fail the walk.

use crate::error::ConfigError;
use crate::locate::ScanTarget;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A file selected for scanning.
pub struct SourceFile {
    /// Location on disk.
    pub path: PathBuf,
    /// Path inside the repository, `/`-separated.
    pub relative: String,
    /// Path used in reports: `<repo>/<relative>`.
    pub display: String,
}

impl SourceFile {
    fn new(target: &ScanTarget, path: PathBuf) -> Option<Self> {
        let rel = pathdiff::diff_paths(&path, &target.root)?;
        let relative = to_slash(&rel);
        let display = format!("{}/{}", target.name, relative);
        Some(Self {
            path,
            relative,
            display,
        })
    }
}

/// Symlinks must resolve under the canonical repository root; anything
/// else (including a dangling link) is pruned.
fn link_stays_inside(canon_root: &Path, entry: &DirEntry) -> bool {
    if !entry.path_is_symlink() {
        return true;
    }
    match fs::canonicalize(entry.path()) {
        Ok(resolved) if resolved.starts_with(canon_root) => true,
        Ok(resolved) => {
            log::debug!(
                "skipping link {} pointing outside the repository to {}",
                entry.path().display(),
                resolved.display()
            );
            false
        }
        Err(e) => {
            log::debug!("skipping unresolvable link {}: {}", entry.path().display(), e);
            false
        }
    }
}

fn to_slash(p: &Path) -> String {
    p.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, Clone)]
pub struct FileWalker {
    roots: Vec<String>,
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
}

impl FileWalker {
    /// Build a walker. `roots` empty (or `"."`) means the whole repository;
    /// `extensions` empty allows every file. Fails on a malformed glob.
    pub fn new(
        roots: &[String],
        extensions: &[String],
        exclude: &[String],
    ) -> Result<Self, ConfigError> {
        let exclude = exclude
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| ConfigError::InvalidGlob {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            roots: roots.to_vec(),
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            exclude,
        })
    }

    /// Lazily yield candidate files of `target`, ordered by file name within
    /// each root. Calling again restarts the walk from scratch.
    pub fn walk<'a>(&'a self, target: &'a ScanTarget) -> impl Iterator<Item = SourceFile> + 'a {
        let canon_root = fs::canonicalize(&target.root).unwrap_or_else(|_| target.root.clone());
        self.root_dirs(target).into_iter().flat_map(move |dir| {
            let canon_root = canon_root.clone();
            WalkDir::new(dir)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(move |e| {
                    !self.is_excluded(&target.root, e.path()) && link_stays_inside(&canon_root, e)
                })
                .filter_map(|res| match res {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::debug!("skipping unwalkable entry: {}", e);
                        None
                    }
                })
                .filter(|e| e.file_type().is_file())
                .filter(move |e| self.extension_allowed(e.path()))
                .filter_map(move |e| SourceFile::new(target, e.into_path()))
        })
    }

    fn root_dirs(&self, target: &ScanTarget) -> Vec<PathBuf> {
        if self.roots.is_empty() {
            return vec![target.root.clone()];
        }
        self.roots
            .iter()
            .filter_map(|r| {
                let dir = if r.is_empty() || r == "." {
                    target.root.clone()
                } else {
                    target.root.join(r)
                };
                if dir.is_dir() {
                    Some(dir)
                } else {
                    log::debug!("root '{}' missing in {}", r, target.name);
                    None
                }
            })
            .collect()
    }

    fn extension_allowed(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }

    /// Patterns containing `/` match the repository-relative path; bare
    /// patterns match any single path component by name.
    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        let Ok(rel) = path.strip_prefix(root) else {
            return false;
        };
        if rel.as_os_str().is_empty() {
            return false;
        }
        let name = rel.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let rel_str = to_slash(rel);
        self.exclude.iter().any(|p| {
            if p.as_str().contains('/') {
                p.matches(&rel_str)
            } else {
                p.matches(name)
            }
        })
    }
}
