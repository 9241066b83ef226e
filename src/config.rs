use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::Scorer;
use crate::models::{MatchingRules, ScoreCompression, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub appwrite: AppwriteSettings,
    #[serde(default)]
    pub collection: CollectionSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Which profile store backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Appwrite,
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
    pub seed_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppwriteSettings {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub database_id: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_user_profiles")]
    pub user_profiles: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            user_profiles: default_user_profiles(),
        }
    }
}

fn default_user_profiles() -> String { "users".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_graph_threshold")]
    pub graph_threshold: u8,
    #[serde(default = "default_skill_bonus")]
    pub skill_bonus: u8,
    #[serde(default = "default_high_score")]
    pub high_score: u8,
    #[serde(default = "default_medium_score")]
    pub medium_score: u8,
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            graph_threshold: default_graph_threshold(),
            skill_bonus: default_skill_bonus(),
            high_score: default_high_score(),
            medium_score: default_medium_score(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl MatchingSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.medium_score > self.high_score {
            return Err(ConfigError::Message(format!(
                "matching.medium_score ({}) must not exceed matching.high_score ({})",
                self.medium_score, self.high_score
            )));
        }
        Ok(())
    }

    pub fn rules(&self) -> MatchingRules {
        MatchingRules {
            graph_threshold: self.graph_threshold,
            skill_bonus: self.skill_bonus,
            high_score: self.high_score,
            medium_score: self.medium_score,
        }
    }
}

fn default_graph_threshold() -> u8 { 65 }
fn default_skill_bonus() -> u8 { 10 }
fn default_high_score() -> u8 { 80 }
fn default_medium_score() -> u8 { 60 }
fn default_limit() -> u16 { 50 }
fn default_max_limit() -> u16 { 200 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_complementary_saturation")]
    pub complementary_saturation: f64,
    #[serde(default)]
    pub compression: CompressionConfig,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            complementary_saturation: default_complementary_saturation(),
            compression: CompressionConfig::default(),
        }
    }
}

impl ScoringSettings {
    pub fn scorer(&self) -> Scorer {
        Scorer::new(
            ScoringWeights {
                department: self.weights.department,
                skills: self.weights.skills,
                interests: self.weights.interests,
                complementary: self.weights.complementary,
            },
            self.complementary_saturation,
            ScoreCompression {
                floor: self.compression.floor,
                slope: self.compression.slope,
            },
        )
    }

    /// Reject weights and compression that break the 0..=100 score scale
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        let weights = [w.department, w.skills, w.interests, w.complementary];

        if weights.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::Message(
                "scoring.weights must be finite and non-negative".to_string(),
            ));
        }
        let total: f64 = weights.iter().sum();
        if (total - 100.0).abs() > 1e-6 {
            return Err(ConfigError::Message(format!(
                "scoring.weights must sum to 100, got {}",
                total
            )));
        }

        if !self.complementary_saturation.is_finite() || self.complementary_saturation < 1.0 {
            return Err(ConfigError::Message(format!(
                "scoring.complementary_saturation must be at least 1, got {}",
                self.complementary_saturation
            )));
        }

        let c = &self.compression;
        if !c.floor.is_finite() || !c.slope.is_finite() || c.floor < 0.0 || c.slope < 0.0 {
            return Err(ConfigError::Message(
                "scoring.compression floor and slope must be finite and non-negative".to_string(),
            ));
        }
        if c.floor + 100.0 * c.slope > 100.0 {
            return Err(ConfigError::Message(format!(
                "scoring.compression maps a perfect match to {}, above 100",
                c.floor + 100.0 * c.slope
            )));
        }

        Ok(())
    }
}

fn default_complementary_saturation() -> f64 { 5.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_department_weight")]
    pub department: f64,
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_complementary_weight")]
    pub complementary: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            department: default_department_weight(),
            skills: default_skills_weight(),
            interests: default_interests_weight(),
            complementary: default_complementary_weight(),
        }
    }
}

fn default_department_weight() -> f64 { 10.0 }
fn default_skills_weight() -> f64 { 40.0 }
fn default_interests_weight() -> f64 { 30.0 }
fn default_complementary_weight() -> f64 { 20.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct CompressionConfig {
    #[serde(default = "default_compression_floor")]
    pub floor: f64,
    #[serde(default = "default_compression_slope")]
    pub slope: f64,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            floor: default_compression_floor(),
            slope: default_compression_slope(),
        }
    }
}

fn default_compression_floor() -> f64 { 60.0 }
fn default_compression_slope() -> f64 { 0.35 }

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
    /// 4. Environment variables (prefixed with CAMPUS_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CAMPUS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CAMPUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        let settings: Self = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CAMPUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field constraints the types cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.matching.validate()
    }
}

/// Apply the conventional unprefixed variables on top of the layered config
///
/// `DATABASE_URL` wins over `database.url`; the Appwrite credentials can be
/// injected as `CAMPUS_APPWRITE__*` by deployment tooling that cannot emit the
/// double-underscore prefix.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }

    for key in ["endpoint", "api_key", "project_id", "database_id"] {
        let var = format!("CAMPUS_APPWRITE__{}", key.to_uppercase());
        if let Ok(value) = env::var(&var) {
            builder = builder.set_override(format!("appwrite.{}", key), value)?;
        }
    }

    builder.build()
}
