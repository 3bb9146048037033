use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{RankPoints, ScoringConfig};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub email: EmailSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Scoring table used when a request doesn't carry its own
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_toucher_points")]
    pub toucher_points: f64,
    #[serde(default = "default_crossover_bonus")]
    pub crossover_bonus: f64,
    #[serde(default)]
    pub rank_points: RankPointsConfig,
    /// Planned number of ends per match
    #[serde(default = "default_ends")]
    pub ends: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            toucher_points: default_toucher_points(),
            crossover_bonus: default_crossover_bonus(),
            rank_points: RankPointsConfig::default(),
            ends: default_ends(),
        }
    }
}

impl ScoringSettings {
    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig {
            toucher_points: self.toucher_points,
            crossover_bonus: self.crossover_bonus,
            rank_points: RankPoints {
                first: self.rank_points.first,
                second: self.rank_points.second,
                third: self.rank_points.third,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankPointsConfig {
    #[serde(default = "default_first_points")]
    pub first: f64,
    #[serde(default = "default_second_points")]
    pub second: f64,
    #[serde(default = "default_third_points")]
    pub third: f64,
}

impl Default for RankPointsConfig {
    fn default() -> Self {
        Self {
            first: default_first_points(),
            second: default_second_points(),
            third: default_third_points(),
        }
    }
}

fn default_toucher_points() -> f64 { 3.0 }
fn default_crossover_bonus() -> f64 { 3.0 }
fn default_first_points() -> f64 { 10.0 }
fn default_second_points() -> f64 { 5.0 }
fn default_third_points() -> f64 { 3.0 }
fn default_ends() -> u32 { 10 }

/// Outbound email relay settings
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    #[serde(default = "default_from")]
    pub from: String,
    /// Used when a relay request names no recipient
    #[serde(default)]
    pub default_recipients: Vec<String>,
    #[serde(default = "default_subject")]
    pub default_subject: String,
    #[serde(default = "default_lite_subject")]
    pub lite_subject: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Taken from `RESEND_API_KEY`; sends fail without it
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            from: default_from(),
            default_recipients: Vec::new(),
            default_subject: default_subject(),
            lite_subject: default_lite_subject(),
            api_base_url: default_api_base_url(),
            api_key: None,
        }
    }
}

fn default_from() -> String { "Jack Attack Scorer <onboarding@resend.dev>".to_string() }
fn default_subject() -> String { "Jack Attack results".to_string() }
fn default_lite_subject() -> String { "Jack Attack Test (lite)".to_string() }
fn default_api_base_url() -> String { "https://api.resend.com".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with JACK_ATTACK__)
    /// 5. `RESEND_API_KEY` for the email credential
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., JACK_ATTACK__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        apply_credentials(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        apply_credentials(settings)?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("JACK_ATTACK")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("email.default_recipients")
        .try_parsing(true)
}

/// Pull the provider credential from its conventional variable
fn apply_credentials(settings: Config) -> Result<Config, ConfigError> {
    let api_key = std::env::var("RESEND_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());

    let mut builder = Config::builder().add_source(settings);
    if let Some(key) = api_key {
        builder = builder.set_override("email.api_key", key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_scoring_table() {
        let scoring = ScoringSettings::default().scoring_config();
        assert_eq!(scoring, ScoringConfig::default());
        assert_eq!(ScoringSettings::default().ends, 10);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file_with_partial_sections() {
        let path = std::env::temp_dir().join(format!(
            "jack-attack-settings-{}.toml",
            uuid::Uuid::new_v4()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[scoring]\ntoucher_points = 2\n\n[scoring.rank_points]\nfirst = 12\n\n[email]\ndefault_recipients = [\"club@example.com\"]"
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        let scoring = settings.scoring.scoring_config();
        assert_eq!(scoring.toucher_points, 2.0);
        assert_eq!(scoring.crossover_bonus, 3.0);
        assert_eq!(scoring.rank_points.first, 12.0);
        assert_eq!(scoring.rank_points.second, 5.0);
        assert_eq!(settings.email.default_recipients, vec!["club@example.com"]);
        assert_eq!(settings.email.api_base_url, "https://api.resend.com");
    }
}
