//! Environment configuration for the CLI.
//!
//! # Responsibility
//! - Resolve database path and logging settings from `METAKV_*` variables.
//! - Reject unusable values before any connection is attempted.
//!
//! # Invariants
//! - Unset variables fall back to defaults; set-but-blank variables are errors.
//! - Paths are taken as raw OS strings; only the log level must be UTF-8.

use log::LevelFilter;
use metakv_core::default_log_level;
use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const DB_PATH_VAR: &str = "METAKV_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "METAKV_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "METAKV_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "metakv.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyValue(&'static str),
    NotUnicode(&'static str),
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(var) => write!(f, "environment variable {var} is set but empty"),
            Self::NotUnicode(var) => write!(f, "environment variable {var} is not valid UTF-8"),
            Self::InvalidLogLevel(level) => write!(
                f,
                "{LOG_LEVEL_VAR} `{level}` is not one of off|error|warn|info|debug|trace"
            ),
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_VAR} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Settings the CLI needs before opening the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_level: LevelFilter,
    /// File logging is enabled only when a directory is configured.
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Reads configuration through `lookup`, which maps a variable name to its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self, ConfigError> {
        let db_path = non_blank(&lookup, DB_PATH_VAR)?
            .map_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME), PathBuf::from);

        let log_level = match non_blank(&lookup, LOG_LEVEL_VAR)? {
            Some(raw) => {
                let text = raw
                    .into_string()
                    .map_err(|_| ConfigError::NotUnicode(LOG_LEVEL_VAR))?;
                LevelFilter::from_str(text.trim())
                    .map_err(|_| ConfigError::InvalidLogLevel(text.trim().to_string()))?
            }
            None => default_log_level(),
        };

        let log_dir = match non_blank(&lookup, LOG_DIR_VAR)? {
            Some(raw) => {
                let dir = PathBuf::from(raw);
                if !dir.is_absolute() {
                    return Err(ConfigError::RelativeLogDir(dir));
                }
                Some(dir)
            }
            None => None,
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    /// Human-readable settings summary printed at startup.
    pub fn describe(&self) -> String {
        let log_dir = self
            .log_dir
            .as_ref()
            .map_or_else(|| "(disabled)".to_string(), |dir| dir.display().to_string());
        format!(
            "Database settings:\n  Path: {}\n  Log level: {}\n  Log dir: {}",
            self.db_path.display(),
            self.log_level,
            log_dir
        )
    }
}

fn non_blank(
    lookup: &impl Fn(&str) -> Option<OsString>,
    var: &'static str,
) -> Result<Option<OsString>, ConfigError> {
    match lookup(var) {
        Some(value) if value.to_string_lossy().trim().is_empty() => {
            Err(ConfigError::EmptyValue(var))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, ConfigError, DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR};
    use log::LevelFilter;
    use std::collections::HashMap;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn lookup(vars: Vec<(&'static str, OsString)>) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<&'static str, OsString> = vars.into_iter().collect();
        move |name| map.get(name).cloned()
    }

    fn text(vars: &[(&'static str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        lookup(
            vars.iter()
                .map(|(name, value)| (*name, OsString::from(*value)))
                .collect(),
        )
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = CliConfig::from_lookup(text(&[])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("metakv.sqlite3"));
        assert_eq!(config.log_level, metakv_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_are_used() {
        let log_dir = std::env::temp_dir().join("metakv-logs");
        let config = CliConfig::from_lookup(text(&[
            (DB_PATH_VAR, "/var/lib/metakv/store.sqlite3"),
            (LOG_LEVEL_VAR, " WARN "),
            (LOG_DIR_VAR, log_dir.to_str().unwrap()),
        ]))
        .unwrap();

        assert_eq!(
            config.db_path,
            PathBuf::from("/var/lib/metakv/store.sqlite3")
        );
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert_eq!(config.log_dir, Some(log_dir));
    }

    #[test]
    fn blank_values_are_rejected() {
        let err = CliConfig::from_lookup(text(&[(DB_PATH_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::EmptyValue(DB_PATH_VAR));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = CliConfig::from_lookup(text(&[(LOG_LEVEL_VAR, "verbose")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("verbose".to_string()));
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = CliConfig::from_lookup(text(&[(LOG_DIR_VAR, "logs")])).unwrap_err();
        assert!(matches!(err, ConfigError::RelativeLogDir(_)));
        assert!(err.to_string().contains("absolute"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_db_path_is_kept_verbatim() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"/tmp/meta\xffkv.sqlite3".to_vec());
        let config = CliConfig::from_lookup(lookup(vec![(DB_PATH_VAR, raw.clone())])).unwrap();
        assert_eq!(config.db_path, PathBuf::from(raw));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_log_level_is_rejected() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"inf\xffo".to_vec());
        let err = CliConfig::from_lookup(lookup(vec![(LOG_LEVEL_VAR, raw)])).unwrap_err();
        assert_eq!(err, ConfigError::NotUnicode(LOG_LEVEL_VAR));
    }

    #[test]
    fn describe_lists_every_setting() {
        let config = CliConfig::from_lookup(text(&[(DB_PATH_VAR, "kv.sqlite3")])).unwrap();
        let summary = config.describe();
        assert!(summary.contains("Path: kv.sqlite3"));
        assert!(summary.contains("Log dir: (disabled)"));
    }
}
