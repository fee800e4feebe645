use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Static configuration, loaded once at startup.
///
/// Sections:
/// - server: bind address, port, worker count
/// - database: connection settings
/// - cache: rendered-page memoization
/// - logging: log level, format, file output
/// - auth: JWT validation settings
/// - scoreboard: freeze window
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub scoreboard: ScoreboardConfig,
}

impl StaticConfig {
    /// Load configuration from `config.toml` and environment variables.
    ///
    /// Priority: ENV > config.toml > defaults.
    /// ENV prefix: CTFA, separator: __
    /// Example: CTFA__SERVER__PORT=9999
    pub fn load() -> Self {
        use config::{Config, Environment, File};

        let path = "config.toml";

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("CTFA")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

/// Rendered-page cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL of the memoized achievements page, in seconds.
    #[serde(default = "default_page_ttl")]
    pub page_ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            page_ttl: default_page_ttl(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

/// JWT validation configuration
///
/// Tokens are minted by the scoring platform with the shared secret;
/// this service only validates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_minutes: default_access_token_minutes(),
        }
    }
}

/// Scoreboard freeze configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoreboardConfig {
    /// Force the frozen page regardless of `freeze_at`.
    #[serde(default)]
    pub frozen: bool,
    /// Scoring freezes once this instant passes.
    #[serde(default)]
    pub freeze_at: Option<DateTime<Utc>>,
}

impl ScoreboardConfig {
    pub fn is_frozen(&self, now: DateTime<Utc>) -> bool {
        self.frozen || self.freeze_at.is_some_and(|at| now >= at)
    }
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "achievements.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_page_ttl() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    7
}

fn default_enable_rotation() -> bool {
    true
}

fn default_access_token_minutes() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn defaults_are_sane() {
        let config = StaticConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.page_ttl, 60);
        assert_eq!(config.logging.level, "info");
        assert!(!config.scoreboard.frozen);
        assert!(config.scoreboard.freeze_at.is_none());
    }

    #[test]
    fn freeze_flag_wins() {
        let scoreboard = ScoreboardConfig {
            frozen: true,
            freeze_at: None,
        };
        assert!(scoreboard.is_frozen(Utc::now()));
    }

    #[test]
    fn freeze_at_compares_against_now() {
        let now = Utc::now();
        let scoreboard = ScoreboardConfig {
            frozen: false,
            freeze_at: Some(now + Duration::hours(1)),
        };
        assert!(!scoreboard.is_frozen(now));

        let scoreboard = ScoreboardConfig {
            frozen: false,
            freeze_at: Some(now - Duration::hours(1)),
        };
        assert!(scoreboard.is_frozen(now));
    }
}
