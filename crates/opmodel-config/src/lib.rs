//! `opmodel.toml`: resolver and logging settings.
//!
//! ```toml
//! [resolver]
//! seed = 0
//! selection = "random"
//! max_tuples = 100000
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;
use std::sync::Once;

use opmodel_resolve::{Randomness, Resolver, ResolverOptions, SelectionMode, DEFAULT_MAX_TUPLES};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod schema;

pub use schema::{json_schema, json_schema_string};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct ModelConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Uniformly random among all valid instantiations.
    #[default]
    Random,
    /// The first valid instantiation, regardless of the seed.
    First,
}

impl From<Selection> for SelectionMode {
    fn from(value: Selection) -> Self {
        match value {
            Selection::Random => SelectionMode::Random,
            Selection::First => SelectionMode::First,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Seed for the random choice between valid instantiations.
    #[serde(default)]
    pub seed: u64,

    #[serde(default)]
    pub selection: Selection,

    /// Maximum number of partial type tuples kept while instantiating one class.
    ///
    /// `0` disables the limit.
    #[serde(default = "ResolverConfig::default_max_tuples")]
    pub max_tuples: usize,
}

impl ResolverConfig {
    fn default_max_tuples() -> usize {
        DEFAULT_MAX_TUPLES
    }

    pub fn options(&self) -> ResolverOptions {
        ResolverOptions {
            selection: self.selection.into(),
            max_tuples: (self.max_tuples != 0).then_some(self.max_tuples),
        }
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.options(), Randomness::seeded(self.seed))
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            seed: Randomness::DEFAULT_SEED,
            selection: Selection::default(),
            max_tuples: Self::default_max_tuples(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr. When disabled, logging is silent.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    /// The configured directives; a blank level means the default.
    fn directives(&self) -> &str {
        match self.level.trim() {
            "" => "info",
            level => level,
        }
    }

    /// The effective filter: the configured directives with `RUST_LOG` appended when set. The
    /// first candidate that parses wins; `info` if none does.
    pub fn env_filter(&self) -> EnvFilter {
        let config = self.directives();
        let env = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let mut candidates = Vec::with_capacity(3);
        if let Some(env) = &env {
            candidates.push(format!("{config},{env}"));
            candidates.push(env.clone());
        }
        candidates.push(config.to_owned());

        candidates
            .iter()
            .find_map(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err.message().to_owned())
    }
}

impl ModelConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global `tracing` subscriber.
///
/// Safe to call more than once; only the first call has an effect, and a subscriber installed by
/// someone else is left in place.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let writer = if !config.stderr {
            BoxMakeWriter::new(std::io::sink)
        } else if cfg!(debug_assertions) {
            // Keeps `cargo test` output capture working.
            BoxMakeWriter::new(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
        } else {
            BoxMakeWriter::new(std::io::stderr)
        };

        let layer = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .boxed()
        };

        let _ = tracing_subscriber::registry()
            .with(layer)
            .with(filter)
            .try_init();
        tracing::debug!(level = %config.level, json = config.json, "tracing initialized");
    });
}
