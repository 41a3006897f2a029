use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::filter::FilterDefaults;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub service: Option<ServiceConfig>,
    pub filters: Option<FiltersConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiltersConfig {
    pub impact_factor: Option<f64>,
    pub decision_time: Option<u32>,
    pub llm_model: Option<String>,
    pub publishers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/journal-finder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("journal-finder").join("config.toml"))
}

/// Load config by cascading CWD `.journal-finder.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".journal-finder.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_service = base.service.unwrap_or_default();
    let over_service = overlay.service.unwrap_or_default();
    let base_filters = base.filters.unwrap_or_default();
    let over_filters = overlay.filters.unwrap_or_default();
    let base_display = base.display.unwrap_or_default();
    let over_display = overlay.display.unwrap_or_default();

    ConfigFile {
        service: Some(ServiceConfig {
            endpoint: over_service.endpoint.or(base_service.endpoint),
            timeout_secs: over_service.timeout_secs.or(base_service.timeout_secs),
        }),
        filters: Some(FiltersConfig {
            impact_factor: over_filters.impact_factor.or(base_filters.impact_factor),
            decision_time: over_filters.decision_time.or(base_filters.decision_time),
            llm_model: over_filters.llm_model.or(base_filters.llm_model),
            publishers: over_filters.publishers.or(base_filters.publishers),
        }),
        display: Some(DisplayConfig {
            theme: over_display.theme.or(base_display.theme),
        }),
    }
}

/// Replace the `[filters]` section with the given defaults, keeping the rest.
pub fn with_filter_defaults(mut config: ConfigFile, defaults: &FilterDefaults) -> ConfigFile {
    config.filters = Some(FiltersConfig {
        impact_factor: Some(defaults.impact_factor),
        decision_time: Some(defaults.decision_time),
        llm_model: Some(defaults.llm_model.id().to_string()),
        publishers: Some(defaults.publishers.clone()),
    });
    config
}

/// Save the config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, CoreError> {
    let path = config_path()
        .ok_or_else(|| CoreError::Config("could not determine config directory".to_string()))?;
    save_to_path(config, &path)?;
    Ok(path)
}

/// Save the config to `path`, creating parent directories as needed.
pub fn save_to_path(config: &ConfigFile, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| CoreError::Config(format!("failed to serialize config: {e}")))?;
    std::fs::write(path, content)?;
    Ok(())
}
