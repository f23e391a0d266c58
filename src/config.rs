use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata keys left out of every report. Matched as substrings of the flattened path.
pub const DEFAULT_IGNORE_KEYS: &[&str] = &[
    "id",
    "lastModifiedDateTime",
    "createdDateTime",
    "version",
    "@odata.context",
    "@odata.type",
    "lastModifiedBy",
    "generatedId",
    "groupId",
    "policyId",
    "roleScopeTagIds",
    "supportsScopeTags",
];

pub fn default_ignore_keys() -> Vec<String> {
    DEFAULT_IGNORE_KEYS.iter().map(|k| k.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory whose subfolders hold the exported policy JSON files
    pub input_root: PathBuf,
    /// Where the HTML report is written
    pub output_path: PathBuf,
    /// Banner shown at the top of the report
    pub title: String,
    pub ignore_keys: Vec<String>,
    /// Open the finished report in the system's default handler
    pub open_report: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_root: PathBuf::from("IntuneBackup"),
            output_path: PathBuf::from("IntuneDocs").join("ITGlue_Report.html"),
            title: "Intune Configuration Audit".to_string(),
            ignore_keys: default_ignore_keys(),
            open_report: true,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file.
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// read when present and the defaults are used otherwise.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => match Self::user_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// `<config dir>/policy-audit/config.toml`, e.g. `~/.config/policy-audit/config.toml` on Linux
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("policy-audit").join("config.toml"))
    }
}
