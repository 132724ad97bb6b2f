use anyhow::{Context, anyhow};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::models::MappingConfig;

/// Path of a TOML or JSON mapping file
pub const CONFIG_PATH_VAR: &str = "SORTMAP_CONFIG_PATH";
/// Inline JSON mapping configuration
pub const CONFIG_JSON_VAR: &str = "SORTMAP_CONFIG_JSON";

const DEFAULT_CANDIDATES: &[&str] = &[
    "mappings.toml",
    "mappings.json",
    "config/mappings.toml",
    "config/mappings.json",
];

/// Source that produced the mapping configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MappingConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Serialization format of a mapping document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    /// Unknown extension: TOML is attempted before JSON
    Detect,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            Some("toml" | "tml") => ConfigFormat::Toml,
            _ => ConfigFormat::Detect,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl MappingConfig {
    /// Load mapping configuration using environment variables.
    /// Evaluation order:
    /// 1) `$SORTMAP_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$SORTMAP_CONFIG_JSON` (inline JSON),
    /// 3) the first default file found in the working directory,
    /// 4) an empty configuration.
    pub fn load_from_env() -> anyhow::Result<(Self, MappingConfigSource)> {
        Self::load_with(|key| env::var(key).ok(), Path::new("."))
    }

    /// Same evaluation order as [`load_from_env`](Self::load_from_env), reading
    /// variables through `lookup` and default files relative to `base_dir`.
    /// Blank variables count as unset.
    pub fn load_with<F>(lookup: F, base_dir: &Path) -> anyhow::Result<(Self, MappingConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = non_blank(lookup(CONFIG_PATH_VAR)).map(PathBuf::from) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, MappingConfigSource::EnvPath(path)));
        }

        if let Some(raw) = non_blank(lookup(CONFIG_JSON_VAR)) {
            let config = Self::parse(&raw, ConfigFormat::Json)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((config, MappingConfigSource::EnvInline));
        }

        let default_file = DEFAULT_CANDIDATES
            .iter()
            .map(|candidate| base_dir.join(candidate))
            .find(|path| path.is_file());
        if let Some(path) = default_file {
            let config = Self::load_from_file(&path)?;
            return Ok((config, MappingConfigSource::File(path)));
        }

        debug!("no mapping configuration found, starting empty");
        Ok((Self::default(), MappingConfigSource::Default))
    }

    /// Read a mapping file, choosing the format from its extension
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read mapping config from {}", path.display()))?;
        let format = ConfigFormat::from_path(path);
        debug!(path = %path.display(), ?format, "loading mapping config");

        Self::parse(&contents, format)
            .with_context(|| format!("invalid mapping config {}", path.display()))
    }

    /// Parse a mapping document in `format`
    pub fn parse(contents: &str, format: ConfigFormat) -> anyhow::Result<Self> {
        match format {
            ConfigFormat::Toml => Ok(toml::from_str(contents)?),
            ConfigFormat::Json => Ok(serde_json::from_str(contents)?),
            ConfigFormat::Detect => match toml::from_str(contents) {
                Ok(config) => Ok(config),
                Err(toml_err) => serde_json::from_str(contents).map_err(|json_err| {
                    anyhow!("neither format matched; toml error: {toml_err}; json error: {json_err}")
                }),
            },
        }
    }
}
