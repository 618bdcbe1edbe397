//! Scan pipeline: Locator → Walker → Matcher → Aggregator.
//!
//! `Scanner::new` compiles rules and exclude globs before anything is read,
//! so a bad configuration fails without partial output. Each repository is
//! processed independently; its files may be matched in parallel and the
//! per-file results are merged and sorted by the aggregator.

use crate::aggregate::{Aggregator, FileScan};
use crate::config::ScanConfig;
use crate::error::ConfigError;
use crate::locate::locate_repos;
use crate::matcher::{compile_rules, scan_file, PatternRule};
use crate::models::ScanReport;
use crate::walk::{FileWalker, SourceFile};
use rayon::prelude::*;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Scanner {
    repos: Vec<String>,
    walker: FileWalker,
    rules: Vec<PatternRule>,
    noun: String,
    parallel: bool,
}

impl Scanner {
    pub fn new(cfg: &ScanConfig) -> Result<Self, ConfigError> {
        let rules = compile_rules(&cfg.rules)?;
        let walker = FileWalker::new(&cfg.roots, &cfg.extensions, &cfg.exclude)?;
        Ok(Self {
            repos: cfg.repos.clone(),
            walker,
            rules,
            noun: cfg.noun.clone(),
            parallel: cfg.parallel,
        })
    }

    /// Scan every configured repository that exists under `base`.
    pub fn run(&self, base: &Path) -> ScanReport {
        let mut agg = Aggregator::new();
        for target in locate_repos(base, &self.repos) {
            agg.add_repo(&target.name);
            // overlapping roots may reach the same file twice
            let mut files: Vec<SourceFile> = self.walker.walk(&target).collect();
            files.sort_by(|a, b| a.relative.cmp(&b.relative));
            files.dedup_by(|a, b| a.relative == b.relative);

            let scans: Vec<FileScan> = if self.parallel {
                files.par_iter().filter_map(|f| self.scan_one(f)).collect()
            } else {
                files.iter().filter_map(|f| self.scan_one(f)).collect()
            };
            log::debug!(
                "{}: {} candidate files, {} readable",
                target.name,
                files.len(),
                scans.len()
            );
            for s in scans {
                agg.add_file(s);
            }
        }
        let report = agg.finish(&self.noun);
        log::info!(
            "scan finished: {} files, {} items, status {}",
            report.details.files_checked,
            report.details.items_count,
            report.status.as_str()
        );
        report
    }

    fn scan_one(&self, file: &SourceFile) -> Option<FileScan> {
        let matches = scan_file(&file.path, &file.display, &self.rules)?;
        Some(FileScan {
            file: file.display.clone(),
            matches,
        })
    }
}

/// Compile `cfg` and scan the repositories under `base`.
pub fn run_scan(base: &Path, cfg: &ScanConfig) -> Result<ScanReport, ConfigError> {
    Ok(Scanner::new(cfg)?.run(base))
}
