// LogLens - platform/config.rs
//
// Platform path resolution and config.toml loading with startup
// validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::PlanTier;
use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogLens data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/loglens/ or %APPDATA%\LogLens\)
    pub config_dir: PathBuf,

    /// Data directory: saved queries and the default backend data root.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Default backend data root: `<data_dir>/logs/`.
    pub fn backend_data_dir(&self) -> PathBuf {
        self.data_dir.join(constants::DATA_SUBDIR_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[backend]` section.
    pub backend: BackendSection,
    /// `[retention]` section.
    pub retention: RetentionSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[backend]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct BackendSection {
    /// Backend data directory (overrides the platform default).
    pub data_dir: Option<String>,
    /// Rows requested per run.
    pub row_limit: Option<usize>,
}

/// `[retention]` config section. Allowances are an external policy
/// input; these overrides stand in for the hosted plan service.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RetentionSection {
    /// Active plan tier: "free", "pro", "team", "enterprise".
    pub plan: Option<String>,
    /// Free tier allowance in days.
    pub free_days: Option<i64>,
    /// Pro tier allowance in days.
    pub pro_days: Option<i64>,
    /// Team tier allowance in days.
    pub team_days: Option<i64>,
    /// Enterprise tier allowance in days.
    pub enterprise_days: Option<i64>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Backend --
    /// Backend data directory override.
    pub data_dir: Option<PathBuf>,
    /// Rows requested per run.
    pub row_limit: usize,

    // -- Retention --
    /// Active plan tier.
    pub plan: PlanTier,
    /// Per-tier allowances in days (free, pro, team, enterprise).
    pub retention_days: [i64; 4],

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            row_limit: constants::DEFAULT_ROW_LIMIT,
            plan: PlanTier::Free,
            retention_days: [
                constants::RETENTION_FREE_DAYS,
                constants::RETENTION_PRO_DAYS,
                constants::RETENTION_TEAM_DAYS,
                constants::RETENTION_ENTERPRISE_DAYS,
            ],
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. A missing file yields defaults with no warnings
/// (first-run); an unparseable file yields defaults with a warning so
/// the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let mut config = AppConfig::default();

    // -- Backend: data_dir --
    if let Some(ref dir) = raw.backend.data_dir {
        if !dir.is_empty() {
            config.data_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Backend: row_limit --
    if let Some(limit) = raw.backend.row_limit {
        if (constants::MIN_ROW_LIMIT..=constants::MAX_ROW_LIMIT).contains(&limit) {
            config.row_limit = limit;
        } else {
            warnings.push(format!(
                "[backend] row_limit = {limit} is out of range ({}-{}). Using default ({}).",
                constants::MIN_ROW_LIMIT,
                constants::MAX_ROW_LIMIT,
                constants::DEFAULT_ROW_LIMIT,
            ));
        }
    }

    // -- Retention: plan --
    if let Some(ref plan) = raw.retention.plan {
        match PlanTier::from_name(plan) {
            Some(tier) => config.plan = tier,
            None => {
                warnings.push(format!(
                    "[retention] plan = \"{plan}\" is not recognised. \
                     Expected free, pro, team, or enterprise. Using default (free).",
                ));
            }
        }
    }

    // -- Retention: per-tier day overrides --
    let overrides = [
        ("free_days", raw.retention.free_days, 0),
        ("pro_days", raw.retention.pro_days, 1),
        ("team_days", raw.retention.team_days, 2),
        ("enterprise_days", raw.retention.enterprise_days, 3),
    ];
    for (field, value, slot) in overrides {
        if let Some(days) = value {
            if (1..=constants::MAX_RETENTION_DAYS).contains(&days) {
                config.retention_days[slot] = days;
            } else {
                warnings.push(format!(
                    "[retention] {field} = {days} is out of range (1-{}). Using default ({}).",
                    constants::MAX_RETENTION_DAYS,
                    config.retention_days[slot],
                ));
            }
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. \
                     Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(format!(
                "[ui] font_size = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_FONT_SIZE,
                constants::MAX_FONT_SIZE,
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_config(dir: &Path, content: &str) {
        let mut f = std::fs::File::create(dir.join(constants::CONFIG_FILE_NAME)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(tmp.path());
        assert!(warnings.is_empty());
        assert_eq!(config.plan, PlanTier::Free);
        assert_eq!(config.row_limit, constants::DEFAULT_ROW_LIMIT);
    }

    #[test]
    fn test_valid_config_is_applied() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(
            tmp.path(),
            r#"
[backend]
row_limit = 250

[retention]
plan = "team"
free_days = 2

[ui]
theme = "light"
"#,
        );
        let (config, warnings) = load_config(tmp.path());
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.row_limit, 250);
        assert_eq!(config.plan, PlanTier::Team);
        assert_eq!(config.retention_days[0], 2);
        assert!(!config.dark_mode);
    }

    #[test]
    fn test_out_of_range_values_warn_and_fall_back() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(
            tmp.path(),
            r#"
[backend]
row_limit = 999999

[retention]
plan = "platinum"
"#,
        );
        let (config, warnings) = load_config(tmp.path());
        assert_eq!(warnings.len(), 2);
        assert_eq!(config.row_limit, constants::DEFAULT_ROW_LIMIT);
        assert_eq!(config.plan, PlanTier::Free);
    }

    #[test]
    fn test_unparseable_file_warns_and_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "this is not toml [[[");
        let (config, warnings) = load_config(tmp.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.row_limit, constants::DEFAULT_ROW_LIMIT);
    }
}
