//! Layered configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`fablecast.toml` shipped with the crate)
//! 2. `~/.config/fablecast/fablecast.toml`
//! 3. `./fablecast.toml`
//! 4. `FABLECAST__<SECTION>__<KEY>` environment variables
//!
//! Credentials never live here; they are read from the environment (with
//! `.env` support) when clients are built.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use fablecast_error::{ConfigError, FablecastResult};
use fablecast_rate_limit::{BackendThrottle, RateLimiter};
use fablecast_social::Scheduler;
use fablecast_tasks::{RetryOrchestrator, TaskPool};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../fablecast.toml");

/// Generative backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct GenerationConfig {
    /// Chat model name
    model: String,
    /// OpenAI-compatible API root
    base_url: String,
    /// Sampling temperature
    temperature: f32,
    /// Completion token budget
    max_tokens: u32,
    /// Outbound request ceiling
    requests_per_minute: u32,
}

impl GenerationConfig {
    /// Per-minute throttle for backend calls.
    pub fn throttle(&self) -> FablecastResult<BackendThrottle> {
        Ok(BackendThrottle::per_minute(non_zero(
            "generation.requests_per_minute",
            self.requests_per_minute,
        )?))
    }
}

/// Publishing platform settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct PlatformSettings {
    /// Business account id; empty defers to `INSTAGRAM_BUSINESS_ACCOUNT_ID`
    #[serde(default)]
    account_id: String,
    /// Graph API root
    base_url: String,
    /// Graph API version segment
    api_version: String,
    /// Hourly request ceiling shared by every publishing call
    requests_per_hour: u32,
}

impl PlatformSettings {
    /// Hourly window limiter.
    pub fn limiter(&self) -> FablecastResult<RateLimiter> {
        Ok(RateLimiter::per_hour(non_zero(
            "platform.requests_per_hour",
            self.requests_per_hour,
        )?))
    }
}

/// Posting-time settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ScheduleConfig {
    /// Maximum random offset either side of a slot
    jitter_minutes: u32,
}

impl ScheduleConfig {
    /// Scheduler with the configured jitter.
    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(self.jitter_minutes)
    }
}

/// Retry settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct RetryConfig {
    /// Total attempts per operation
    max_attempts: u32,
    /// Operations allowed in their retry lifetime at once
    workers: usize,
}

impl RetryConfig {
    /// Worker pool sleeping on the tokio timer.
    pub fn pool(&self) -> TaskPool {
        TaskPool::new(
            self.workers,
            RetryOrchestrator::new().with_max_attempts(self.max_attempts),
        )
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    level: String,
    /// Emit JSON lines instead of text
    json: bool,
}

/// Complete configuration.
///
/// # Example
///
/// ```no_run
/// use fablecast::FablecastConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FablecastConfig::load()?;
/// println!("model: {}", config.generation().model());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct FablecastConfig {
    /// `[generation]`
    generation: GenerationConfig,
    /// `[platform]`
    platform: PlatformSettings,
    /// `[schedule]`
    schedule: ScheduleConfig,
    /// `[retry]`
    retry: RetryConfig,
    /// `[logging]`
    logging: LoggingConfig,
}

impl FablecastConfig {
    /// Load with precedence: environment > current dir > home dir > bundled defaults.
    #[instrument]
    pub fn load() -> FablecastResult<Self> {
        debug!("Loading configuration");
        let _ = dotenvy::dotenv();

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("fablecast/fablecast.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("fablecast").required(false))
            .add_source(env_source());

        deserialize(builder)
    }

    /// Load bundled defaults overlaid with a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or does not parse.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> FablecastResult<Self> {
        debug!("Loading configuration from file");
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        deserialize(builder)
    }

    /// Bundled defaults only.
    pub fn bundled() -> FablecastResult<Self> {
        deserialize(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("FABLECAST")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn deserialize(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> FablecastResult<FablecastConfig> {
    let config = builder
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
        .try_deserialize()
        .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
    Ok(config)
}

fn non_zero(key: &str, value: u32) -> Result<NonZeroU32, ConfigError> {
    NonZeroU32::new(value).ok_or_else(|| ConfigError::new(format!("{key} must be positive")))
}
