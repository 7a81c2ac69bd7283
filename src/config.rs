use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use strum::{AsRefStr, Display, EnumString};
use wastenot_planner::fill_policy::DEFAULT_FALLBACK_POOL_SIZE;
use wastenot_planner::{FillPolicy, LeaveUnfilled, SeededRandomFill, TopListedRotation};
use wastenot_recipe::DEFAULT_CACHE_CAPACITY;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which strategy fills slots no expiring ingredient claimed
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FillPolicyKind {
    #[default]
    TopListed,
    SeededRandom,
    LeaveUnfilled,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    #[serde(default)]
    pub fill_policy: FillPolicyKind,
    #[serde(default = "default_fallback_pool_size")]
    pub fallback_pool_size: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_expiring_window_days")]
    pub expiring_window_days: i64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            fill_policy: FillPolicyKind::default(),
            fallback_pool_size: default_fallback_pool_size(),
            seed: None,
            expiring_window_days: default_expiring_window_days(),
        }
    }
}

fn default_fallback_pool_size() -> usize {
    DEFAULT_FALLBACK_POOL_SIZE
}

fn default_expiring_window_days() -> i64 {
    3
}

impl PlannerConfig {
    /// Build the configured fill policy.
    ///
    /// A seeded policy without a seed falls back to seed 0; `validate` rejects
    /// that combination before this is reached in the binary.
    pub fn fill_policy(&self) -> Box<dyn FillPolicy> {
        match self.fill_policy {
            FillPolicyKind::TopListed => Box::new(TopListedRotation {
                pool_size: self.fallback_pool_size,
            }),
            FillPolicyKind::SeededRandom => Box::new(SeededRandomFill {
                pool_size: self.fallback_pool_size,
                seed: self.seed.unwrap_or_default(),
            }),
            FillPolicyKind::LeaveUnfilled => Box::new(LeaveUnfilled),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_ttl_hours() -> u64 {
    24
}

fn default_max_entries() -> usize {
    DEFAULT_CACHE_CAPACITY.get()
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(60 * 60))
    }
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (WASTENOT__PLANNER__FILL_POLICY, etc.)
    /// 2. Config file specified by path, `CONFIG_PATH`, or `config/default.toml`
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("observability.log_level", default_log_level())?
            .set_default("planner.fill_policy", FillPolicyKind::default().as_ref())?
            .set_default(
                "planner.fallback_pool_size",
                default_fallback_pool_size() as u64,
            )?
            .set_default(
                "planner.expiring_window_days",
                default_expiring_window_days(),
            )?
            .set_default("cache.ttl_hours", default_ttl_hours())?
            .set_default("cache.max_entries", default_max_entries() as u64)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional: a missing file just means defaults plus environment
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("WASTENOT")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.planner.fallback_pool_size == 0 {
            return Err("Planner fallback_pool_size must be at least 1".to_string());
        }
        if self.planner.expiring_window_days < 0 {
            return Err("Planner expiring_window_days must not be negative".to_string());
        }
        if self.planner.fill_policy == FillPolicyKind::SeededRandom && self.planner.seed.is_none()
        {
            return Err("Planner fill_policy seeded_random requires a seed".to_string());
        }
        if self.cache.ttl_hours == 0 {
            return Err("Cache ttl_hours must be greater than 0".to_string());
        }
        if self.cache.max_entries == 0 {
            return Err("Cache max_entries must be at least 1".to_string());
        }
        Ok(())
    }
}
