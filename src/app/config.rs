use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use super::interval::{DEFAULT_POLL_SECS, PollInterval};
use super::status::DEFAULT_STATUS_LIFETIME;
use crate::{Result, WatcherError};

const DEFAULT_CONFIG_FILENAME: &str = ".dog-watcher.toml";
const DEFAULT_SERVER: &str = "http://localhost:5820";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MIN_TIMEOUT_SECS: u64 = 1;
const MIN_STATUS_LIFETIME_SECS: u64 = 1;

/// Command line flags. Every flag can also come from a `DOG_WATCHER_*`
/// environment variable; explicit flags win.
#[derive(Debug, Default, Parser)]
#[command(name = "dog-watcher", version, about = "a TUI to manage processes in Stardog")]
pub struct Cli {
    /// Stardog username
    #[arg(short, long, env = "DOG_WATCHER_USERNAME")]
    pub username: Option<String>,

    /// Stardog password
    #[arg(short, long, env = "DOG_WATCHER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Stardog server URL
    #[arg(short, long, env = "DOG_WATCHER_SERVER")]
    pub server: Option<String>,

    /// Bearer token; takes precedence over username/password
    #[arg(short, long, env = "DOG_WATCHER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Initial poll interval in seconds (min 2)
    #[arg(long, env = "DOG_WATCHER_INTERVAL", value_name = "SECS")]
    pub interval: Option<u64>,

    /// Config file (default: ~/.dog-watcher.toml)
    #[arg(long, env = "DOG_WATCHER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file; logging is off without it
    #[arg(long, env = "DOG_WATCHER_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Runtime configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server: String,
    pub username: String,
    pub password: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub poll_interval: PollInterval,
    pub status_lifetime: Duration,
    pub rearm_on_error: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: PollInterval::default(),
            status_lifetime: DEFAULT_STATUS_LIFETIME,
            rearm_on_error: true,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

/// File-based configuration (TOML).
///
/// Top-level `server`, `username`, `password` and `token` keys share their
/// names with the flags, so `server = "http://..."` works as well as a
/// `[server]` table. Top-level keys win over the table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    server: ServerEntry,
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
    display: DisplayConfig,
    logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ServerEntry {
    Url(String),
    Section(ServerConfig),
}

impl Default for ServerEntry {
    fn default() -> Self {
        ServerEntry::Section(ServerConfig::default())
    }
}

impl ServerEntry {
    fn into_config(self) -> ServerConfig {
        match self {
            ServerEntry::Url(url) => ServerConfig {
                url: Some(url),
                ..ServerConfig::default()
            },
            ServerEntry::Section(section) => section,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ServerConfig {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
    timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            password: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DisplayConfig {
    poll_interval_secs: u64,
    status_lifetime_secs: u64,
    rearm_on_error: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_SECS,
            status_lifetime_secs: DEFAULT_STATUS_LIFETIME.as_secs(),
            rearm_on_error: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LoggingConfig {
    log_file: Option<PathBuf>,
    log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_args() -> Result<Self> {
        let cli = Cli::parse();
        let file_config = match cli.config.as_deref() {
            Some(path) => load_config_file(path, true)?,
            None => match default_config_path() {
                Some(path) => load_config_file(&path, false)?,
                None => FileConfig::default(),
            },
        };
        Ok(Self::resolve(cli, file_config))
    }

    /// Layer flags and environment (already merged by clap) over the file.
    fn resolve(cli: Cli, file: FileConfig) -> Self {
        let defaults = Config::default();
        let server = file.server.into_config();
        let token = cli
            .token
            .or(file.token)
            .or(server.token)
            .filter(|token| !token.trim().is_empty());
        let poll_secs = cli.interval.unwrap_or(file.display.poll_interval_secs);

        Self {
            server: cli.server.or(server.url).unwrap_or(defaults.server),
            username: cli
                .username
                .or(file.username)
                .or(server.username)
                .unwrap_or(defaults.username),
            password: cli
                .password
                .or(file.password)
                .or(server.password)
                .unwrap_or(defaults.password),
            token,
            timeout: Duration::from_secs(server.timeout_secs.max(MIN_TIMEOUT_SECS)),
            poll_interval: PollInterval::from_secs(poll_secs),
            status_lifetime: Duration::from_secs(
                file.display
                    .status_lifetime_secs
                    .max(MIN_STATUS_LIFETIME_SECS),
            ),
            rearm_on_error: file.display.rearm_on_error,
            log_file: cli.log_file.or(file.logging.log_file),
            log_level: file.logging.log_level,
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_FILENAME))
}

fn load_config_file(path: &Path, required: bool) -> Result<FileConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(FileConfig::default());
        }
        Err(err) => return Err(WatcherError::config_invalid(path.to_path_buf(), err.to_string())),
    };
    toml::from_str(&content)
        .map_err(|err| WatcherError::config_invalid(path.to_path_buf(), err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["dog-watcher"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn file_config_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.display.poll_interval_secs, DEFAULT_POLL_SECS);
        assert_eq!(config.display.status_lifetime_secs, 15);
        assert!(config.display.rearm_on_error);
        assert_eq!(config.server.into_config().timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.logging.log_level, "info");
    }

    #[test]
    fn file_config_partial() {
        let config: FileConfig = toml::from_str(
            r#"
            [server]
            url = "https://stardog.internal:5820"

            [display]
            rearm_on_error = false
            "#,
        )
        .unwrap();
        assert!(!config.display.rearm_on_error);
        assert_eq!(config.display.poll_interval_secs, DEFAULT_POLL_SECS);
        assert_eq!(
            config.server.into_config().url.as_deref(),
            Some("https://stardog.internal:5820")
        );
    }

    #[test]
    fn flag_named_top_level_keys() {
        let file: FileConfig = toml::from_str(
            r#"
            server = "http://prod:5820"
            username = "bob"
            password = "hunter2"
            token = "tok"
            "#,
        )
        .unwrap();
        let config = Config::resolve(Cli::default(), file);
        assert_eq!(config.server, "http://prod:5820");
        assert_eq!(config.username, "bob");
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.token.as_deref(), Some("tok"));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn top_level_keys_win_over_server_table() {
        let file: FileConfig = toml::from_str(
            r#"
            username = "bob"

            [server]
            url = "http://table:5820"
            username = "table-user"
            timeout_secs = 3
            "#,
        )
        .unwrap();
        let config = Config::resolve(cli(&["-p", "flag-pass"]), file);
        assert_eq!(config.server, "http://table:5820");
        assert_eq!(config.username, "bob");
        assert_eq!(config.password, "flag-pass");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn resolve_uses_defaults_without_input() {
        let config = Config::resolve(Cli::default(), FileConfig::default());
        assert_eq!(config.server, DEFAULT_SERVER);
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "admin");
        assert_eq!(config.token, None);
        assert_eq!(config.poll_interval.secs(), 5);
        assert_eq!(config.status_lifetime, Duration::from_secs(15));
    }

    #[test]
    fn flags_override_file_values() {
        let file: FileConfig = toml::from_str(
            r#"
            [server]
            url = "http://from-file:5820"
            username = "file-user"
            "#,
        )
        .unwrap();
        let config = Config::resolve(cli(&["-s", "http://from-flag:5820"]), file);
        assert_eq!(config.server, "http://from-flag:5820");
        assert_eq!(config.username, "file-user");
    }

    #[test]
    fn blank_token_is_ignored() {
        let config = Config::resolve(cli(&["--token", "  "]), FileConfig::default());
        assert_eq!(config.token, None);
        let config = Config::resolve(cli(&["-t", "abc"]), FileConfig::default());
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn interval_and_lifetime_are_clamped() {
        let file: FileConfig = toml::from_str(
            r#"
            [display]
            status_lifetime_secs = 0
            "#,
        )
        .unwrap();
        let config = Config::resolve(cli(&["--interval", "1"]), file);
        assert_eq!(config.poll_interval.secs(), 2);
        assert_eq!(config.status_lifetime, Duration::from_secs(1));
    }

    #[test]
    fn missing_optional_file_is_fine() {
        let path = std::env::temp_dir().join("dog-watcher-does-not-exist.toml");
        assert!(load_config_file(&path, false).is_ok());
        assert!(matches!(
            load_config_file(&path, true),
            Err(WatcherError::ConfigInvalid { .. })
        ));
    }
}
