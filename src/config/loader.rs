use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;

pub const CONFIG_FILE_NAME: &str = "fetchcurl.json";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct HeaderRules {
    #[serde(rename = "includeHeaders")]
    pub include_headers: Option<Vec<String>>,
    #[serde(rename = "excludeHeaders")]
    pub exclude_headers: Option<Vec<String>>,
    #[serde(rename = "appendHeaders")]
    pub append_headers: HashMap<String, String>,
}

impl HeaderRules {
    /// Layers `other` on top of `self`: filters in `other` replace ours,
    /// appended headers are merged with `other` winning on conflicts.
    pub fn merged_with(&self, other: &HeaderRules) -> HeaderRules {
        let mut append_headers = self.append_headers.clone();
        append_headers.extend(other.append_headers.clone());
        HeaderRules {
            include_headers: other
                .include_headers
                .clone()
                .or_else(|| self.include_headers.clone()),
            exclude_headers: other
                .exclude_headers
                .clone()
                .or_else(|| self.exclude_headers.clone()),
            append_headers,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProfileConfig {
    pub headers: HeaderRules,
    #[serde(flatten)]
    pub extras: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FetchcurlConfig {
    pub headers: HeaderRules,
    pub profiles: HashMap<String, ProfileConfig>,
    #[serde(rename = "defaultProfile")]
    pub default_profile: Option<String>,
    #[serde(flatten)]
    pub extras: HashMap<String, Value>,
}

impl FetchcurlConfig {
    /// Header rules for `profile`, falling back to the default profile and
    /// then to the top-level rules alone.
    pub fn header_rules(&self, profile: Option<&str>) -> Result<HeaderRules> {
        let Some(name) = profile.or(self.default_profile.as_deref()) else {
            return Ok(self.headers.clone());
        };
        let selected = self
            .profiles
            .get(name)
            .ok_or_else(|| anyhow!("Unknown profile: {name}"))?;
        Ok(self.headers.merged_with(&selected.headers))
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: FetchcurlConfig,
    pub path: PathBuf,
}

/// Loads `fetchcurl.json` from `target`, which may be the file itself or the
/// directory holding it. Returns `None` when no config file exists.
pub fn load_config(target: &Path) -> Result<Option<LoadedConfig>> {
    let resolved = if target.is_absolute() {
        target.to_path_buf()
    } else {
        std::env::current_dir()?.join(target)
    };

    let file_path = if resolved.is_dir() {
        resolved.join(CONFIG_FILE_NAME)
    } else {
        resolved
    };

    if !file_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&file_path)
        .with_context(|| format!("reading config {}", file_path.display()))?;

    let config: FetchcurlConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config {}", file_path.display()))?;

    Ok(Some(LoadedConfig {
        config,
        path: file_path,
    }))
}
