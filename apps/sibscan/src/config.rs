//! Configuration discovery and effective settings resolution.
//!
//! Sibscan reads `sibscan.toml|yaml|yml` from the working directory (or the
//! closest ancestor that has one) and merges it with CLI flags and the
//! built-in profile to produce an `Effective` config.
//! Defaults:
//! - `base`: parent of the working directory
//! - `output`: `json`
//! - everything else: the selected profile (see `profiles`)
//!
//! Overrides precedence: CLI > config file > profile defaults.
//!
//! A config file that exists but cannot be read or parsed is an error;
//! a missing one is not.

use crate::error::ConfigError;
use crate::models::rule::RuleSpec;
use crate::output::OutputMode;
use crate::profiles::Profile;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: &[&str] = &["sibscan.toml", "sibscan.yaml", "sibscan.yml"];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything one scan needs, passed explicitly into the engine.
pub struct ScanConfig {
    /// Repository names looked up under the base directory, in order.
    pub repos: Vec<String>,
    /// Sub-directories searched inside each repository; empty means all.
    pub roots: Vec<String>,
    /// Allowed file extensions; empty means every file.
    pub extensions: Vec<String>,
    /// Glob patterns pruned from the walk.
    pub exclude: Vec<String>,
    pub rules: Vec<RuleSpec>,
    /// Word for one item in the summary line.
    pub noun: String,
    /// Scan files of a repository in parallel.
    pub parallel: bool,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Per-profile section (`[features]` or `[markers]`); unset fields keep
/// the profile defaults.
pub struct ProfileCfg {
    pub repos: Option<Vec<String>>,
    pub roots: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub rules: Option<Vec<RuleSpec>>,
    pub noun: Option<String>,
    pub parallel: Option<bool>,
}

impl ProfileCfg {
    fn apply(self, cfg: &mut ScanConfig) {
        if let Some(v) = self.repos {
            cfg.repos = v;
        }
        if let Some(v) = self.roots {
            cfg.roots = v;
        }
        if let Some(v) = self.extensions {
            cfg.extensions = v;
        }
        if let Some(v) = self.exclude {
            cfg.exclude = v;
        }
        if let Some(v) = self.rules {
            cfg.rules = v;
        }
        if let Some(v) = self.noun {
            cfg.noun = v;
        }
        if let Some(v) = self.parallel {
            cfg.parallel = v;
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `sibscan.toml|yaml`.
pub struct SibscanConfig {
    /// Directory holding the repositories, relative to the config file.
    pub base: Option<String>,
    pub output: Option<String>,
    pub features: Option<ProfileCfg>,
    pub markers: Option<ProfileCfg>,
}

#[derive(Debug, Default, Clone)]
/// Values supplied on the command line.
pub struct Overrides {
    pub base: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub output: Option<String>,
    pub sequential: bool,
    pub repos: Vec<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub base: PathBuf,
    pub scan: ScanConfig,
    pub output: OutputMode,
    pub config_path: Option<PathBuf>,
}

/// Walk upward from `start` to the first directory containing a config file.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut cur = Some(start);
    while let Some(dir) = cur {
        for name in CONFIG_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
        cur = dir.parent();
    }
    None
}

/// Load a config file, choosing YAML or TOML by extension.
pub fn load_config(path: &Path) -> Result<SibscanConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&s).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            format: "YAML",
            message: e.to_string(),
        })
    } else {
        toml::from_str(&s).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            format: "TOML",
            message: e.to_string(),
        })
    }
}

/// Resolve `Effective` by merging CLI overrides, the discovered config
/// file, and the profile defaults. `cwd` anchors discovery and the
/// default base directory.
pub fn resolve_effective(
    profile: Profile,
    cwd: &Path,
    cli: &Overrides,
) -> Result<Effective, ConfigError> {
    let config_path = match &cli.config {
        Some(p) => Some(cwd.join(p)),
        None => find_config(cwd),
    };
    let file_cfg = match &config_path {
        Some(p) => {
            log::info!("using config {}", p.display());
            load_config(p)?
        }
        None => SibscanConfig::default(),
    };

    let mut scan = profile.defaults();
    let section = match profile {
        Profile::Features => file_cfg.features,
        Profile::Markers => file_cfg.markers,
    };
    if let Some(section) = section {
        section.apply(&mut scan);
    }
    if !cli.repos.is_empty() {
        scan.repos = cli.repos.clone();
    }
    if cli.sequential {
        scan.parallel = false;
    }
    if scan.rules.is_empty() {
        return Err(ConfigError::NoRules(profile.name().to_string()));
    }

    let base = if let Some(b) = &cli.base {
        cwd.join(b)
    } else if let (Some(b), Some(p)) = (&file_cfg.base, &config_path) {
        p.parent().unwrap_or(cwd).join(b)
    } else {
        cwd.parent().unwrap_or(cwd).to_path_buf()
    };

    let output = match cli.output.as_deref().or(file_cfg.output.as_deref()) {
        Some(s) => s.parse()?,
        None => OutputMode::Json,
    };

    Ok(Effective {
        base,
        scan,
        output,
        config_path,
    })
}
