use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

const APP_DIR: &str = "leakscan";
const CONFIG_FILENAME: &str = "config.toml";

pub const CONFIG_ENV: &str = "LEAKSCAN_CONFIG";
pub const FEED_URL_ENV: &str = "LEAKSCAN_FEED_URL";
pub const DB_PATH_ENV: &str = "LEAKSCAN_DB_PATH";

pub const DEFAULT_FEED_URL: &str = "https://www.google.com/m8/feeds/contacts/default/full";
pub const DEFAULT_USER_AGENT: &str = "leakscan";
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub url: String,
    pub user_agent: String,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `None` means the default location under the data directory.
    pub path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig {
                url: DEFAULT_FEED_URL.to_string(),
                user_agent: DEFAULT_USER_AGENT.to_string(),
                page_size: None,
            },
            database: DatabaseConfig { path: None },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid feed url {url}: {reason}")]
    InvalidFeedUrl { url: String, reason: String },
    #[error("invalid feed page_size value: {0}")]
    InvalidPageSize(u32),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    feed: Option<FeedFile>,
    database: Option<DatabaseFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FeedFile {
    url: Option<String>,
    user_agent: Option<String>,
    page_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatabaseFile {
    path: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct EnvOverrides {
    feed_url: Option<String>,
    db_path: Option<PathBuf>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            feed_url: non_empty_var(FEED_URL_ENV),
            db_path: non_empty_var(DB_PATH_ENV).map(PathBuf::from),
        }
    }
}

/// Loads the config file (explicit via `LEAKSCAN_CONFIG`, otherwise the
/// default location) and applies environment overrides.
pub fn load() -> Result<AppConfig> {
    load_from(explicit_config_path(), EnvOverrides::from_env())
}

/// The config file `load` reads, whether or not it exists.
pub fn active_config_path() -> Result<PathBuf> {
    resolve_config_path(explicit_config_path())
}

fn explicit_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV).map(PathBuf::from)
}

fn load_from(config_path: Option<PathBuf>, overrides: EnvOverrides) -> Result<AppConfig> {
    let required = config_path.is_some();
    let parsed = match resolve_config_path(config_path) {
        Ok(path) => read_config_file(&path, required)?.unwrap_or_default(),
        Err(ConfigError::MissingHomeDir) if !required => ConfigFile::default(),
        Err(ConfigError::InvalidConfigPath(_)) if !required => ConfigFile::default(),
        Err(err) => return Err(err),
    };
    merge_config(parsed, overrides)
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn read_config_file(path: &Path, required: bool) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(parsed))
}

fn merge_config(parsed: ConfigFile, overrides: EnvOverrides) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(feed) = parsed.feed {
        if let Some(url) = feed.url {
            config.feed.url = url;
        }
        if let Some(user_agent) = feed.user_agent {
            let trimmed = user_agent.trim();
            if !trimmed.is_empty() {
                config.feed.user_agent = trimmed.to_string();
            }
        }
        if let Some(page_size) = feed.page_size {
            if page_size == 0 || page_size > MAX_PAGE_SIZE {
                return Err(ConfigError::InvalidPageSize(page_size));
            }
            config.feed.page_size = Some(page_size);
        }
    }

    if let Some(database) = parsed.database {
        config.database.path = database.path;
    }

    if let Some(url) = overrides.feed_url {
        config.feed.url = url;
    }
    if let Some(path) = overrides.db_path {
        config.database.path = Some(path);
    }

    validate_feed_url(&config.feed.url)?;
    Ok(config)
}

fn validate_feed_url(raw: &str) -> Result<()> {
    let invalid = |reason: &str| ConfigError::InvalidFeedUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(raw).map_err(|err| invalid(&err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(invalid("scheme must be http or https")),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
