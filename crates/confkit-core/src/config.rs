//! Location configuration for confkit.
//!
//! Decides where configuration files live: the application name used to
//! derive default file names, the platform directories behind each
//! [`StorageLocation`], and the environment overrides used by tests and
//! sandboxed deployments.

use crate::error::{ConfigError, ConfigResult};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Process-wide location settings.
///
/// Installed once (or lazily built from the environment) and consulted every
/// time a storage location is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Application name, used for `<app>rc` and per-application directories
    pub application_name: String,
    /// Organization name, used for per-application directories
    pub organization: String,
    /// Root that replaces every platform directory when set
    pub home_override: Option<PathBuf>,
    /// Resolve everything under a throwaway root in the temp directory
    pub test_mode: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        let application_name = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "confkit".to_string());

        Self {
            application_name,
            organization: String::new(),
            home_override: None,
            test_mode: false,
        }
    }
}

impl LocationConfig {
    /// Build settings from defaults with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `CONFKIT_APP_NAME`: Override the application name
    /// - `CONFKIT_HOME`: Resolve every location under this directory
    /// - `CONFKIT_TEST_MODE`: Enable test mode (true/false/1/0)
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("CONFKIT_APP_NAME") {
            if !name.is_empty() {
                tracing::debug!("Override application_name from env: {}", name);
                config.application_name = name;
            }
        }

        if let Ok(home) = std::env::var("CONFKIT_HOME") {
            if !home.is_empty() {
                tracing::debug!("Override home from env: {}", home);
                config.home_override = Some(PathBuf::from(home));
            }
        }

        if let Ok(val) = std::env::var("CONFKIT_TEST_MODE") {
            config.test_mode = matches!(val.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
            tracing::debug!("Override test_mode from env: {}", config.test_mode);
        }

        config
    }

    /// Parse settings from a TOML document. Missing fields keep their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.application_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "application_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Install these settings process-wide.
    pub fn install(self) -> ConfigResult<()> {
        self.validate()?;
        tracing::debug!(
            application = %self.application_name,
            test_mode = self.test_mode,
            "installing location config"
        );
        *global().write().unwrap_or_else(PoisonError::into_inner) = self;
        Ok(())
    }

    /// The currently installed settings.
    #[must_use]
    pub fn current() -> Self {
        global()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// File name of the application's main configuration (`<app>rc`).
    #[must_use]
    pub fn main_config_name(&self) -> String {
        format!("{}rc", self.application_name)
    }

    /// File name of the application's state configuration (`<app>staterc`).
    #[must_use]
    pub fn state_config_name(&self) -> String {
        format!("{}staterc", self.application_name)
    }

    /// Root used while test mode is on.
    #[must_use]
    pub fn test_root(&self) -> PathBuf {
        std::env::temp_dir().join("confkit-test")
    }
}

fn global() -> &'static RwLock<LocationConfig> {
    static CURRENT: OnceLock<RwLock<LocationConfig>> = OnceLock::new();
    CURRENT.get_or_init(|| RwLock::new(LocationConfig::from_env()))
}

/// Toggle test mode on the installed settings.
pub fn set_test_mode(enabled: bool) {
    let mut config = global().write().unwrap_or_else(PoisonError::into_inner);
    if config.test_mode != enabled {
        tracing::debug!(enabled, "switching test mode");
        config.test_mode = enabled;
    }
}

/// Whether test mode is on.
#[must_use]
pub fn is_test_mode() -> bool {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .test_mode
}

/// Kind of directory a configuration file is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageLocation {
    /// Shared configuration directory (`~/.config`)
    GenericConfig,
    /// Per-application configuration directory
    AppConfig,
    /// Shared data directory (`~/.local/share`)
    GenericData,
    /// Per-application data directory
    AppData,
    /// Per-application cache directory
    Cache,
}

impl StorageLocation {
    /// Resolve the directory using the installed settings.
    pub fn directory(self) -> ConfigResult<PathBuf> {
        self.directory_for(&LocationConfig::current())
    }

    /// Resolve the directory using explicit settings.
    pub fn directory_for(self, config: &LocationConfig) -> ConfigResult<PathBuf> {
        if config.test_mode {
            return Ok(config.test_root().join(self.relative_dir(config)));
        }

        if let Some(home) = &config.home_override {
            return Ok(home.join(self.relative_dir(config)));
        }

        match self {
            Self::GenericConfig => Ok(self.base_dirs()?.config_dir().to_path_buf()),
            Self::GenericData => Ok(self.base_dirs()?.data_dir().to_path_buf()),
            Self::AppConfig => Ok(self.project_dirs(config)?.config_dir().to_path_buf()),
            Self::AppData => Ok(self.project_dirs(config)?.data_dir().to_path_buf()),
            Self::Cache => Ok(self.project_dirs(config)?.cache_dir().to_path_buf()),
        }
    }

    /// Short name used in errors and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenericConfig => "generic config",
            Self::AppConfig => "app config",
            Self::GenericData => "generic data",
            Self::AppData => "app data",
            Self::Cache => "cache",
        }
    }

    fn relative_dir(self, config: &LocationConfig) -> PathBuf {
        let app = &config.application_name;
        match self {
            Self::GenericConfig => PathBuf::from("config"),
            Self::AppConfig => PathBuf::from("config").join(app),
            Self::GenericData => PathBuf::from("data"),
            Self::AppData => PathBuf::from("data").join(app),
            Self::Cache => PathBuf::from("cache").join(app),
        }
    }

    fn base_dirs(self) -> ConfigResult<BaseDirs> {
        BaseDirs::new().ok_or_else(|| ConfigError::NoConfigDir {
            location: self.as_str().to_string(),
        })
    }

    fn project_dirs(self, config: &LocationConfig) -> ConfigResult<ProjectDirs> {
        ProjectDirs::from("", &config.organization, &config.application_name).ok_or_else(|| {
            ConfigError::NoConfigDir {
                location: self.as_str().to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn named(app: &str) -> LocationConfig {
        LocationConfig {
            application_name: app.to_string(),
            ..LocationConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = LocationConfig::default();
        assert!(!config.application_name.is_empty());
        assert!(config.home_override.is_none());
        assert!(!config.test_mode);
    }

    #[test]
    fn test_config_file_names() {
        let config = named("kwrite");
        assert_eq!(config.main_config_name(), "kwriterc");
        assert_eq!(config.state_config_name(), "kwritestaterc");
    }

    #[test]
    fn test_home_override() {
        let tmp = TempDir::new().expect("create temp dir");
        let config = LocationConfig {
            home_override: Some(tmp.path().to_path_buf()),
            ..named("demo")
        };

        assert_eq!(
            StorageLocation::GenericConfig
                .directory_for(&config)
                .expect("resolve generic config"),
            tmp.path().join("config")
        );
        assert_eq!(
            StorageLocation::AppData
                .directory_for(&config)
                .expect("resolve app data"),
            tmp.path().join("data").join("demo")
        );
    }

    #[test]
    fn test_test_mode_wins_over_override() {
        let config = LocationConfig {
            home_override: Some(PathBuf::from("/nonexistent")),
            test_mode: true,
            ..named("demo")
        };

        let dir = StorageLocation::Cache
            .directory_for(&config)
            .expect("resolve cache");
        assert!(dir.starts_with(std::env::temp_dir().join("confkit-test")));
        assert!(dir.ends_with("cache/demo"));
    }

    #[test]
    fn test_partial_toml() {
        let config = LocationConfig::from_toml_str(
            r#"
application_name = "okular"
test_mode = true
"#,
        )
        .expect("parse partial config");
        assert_eq!(config.application_name, "okular");
        assert!(config.test_mode);
        assert!(config.organization.is_empty());
    }

    #[test]
    fn test_poisoned_lock_still_serves_settings() {
        let result = std::thread::spawn(|| {
            let _guard = global().write().unwrap_or_else(PoisonError::into_inner);
            panic!("poison the location lock");
        })
        .join();
        assert!(result.is_err());
        assert!(global().is_poisoned());

        named("poisoned").install().expect("install after poisoning");
        assert_eq!(LocationConfig::current().application_name, "poisoned");
        set_test_mode(false);
        assert!(!is_test_mode());
    }

    #[test]
    fn test_empty_application_name_rejected() {
        let result = LocationConfig::from_toml_str(r#"application_name = "  ""#);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
