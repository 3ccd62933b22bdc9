//! Container configuration. By default, the config is created with opinionated default values,
//! which can then be overwritten by environment variables prefixed with `KEYSTONE_` or
//! `keystone.json` file.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV_PREFIX: &str = "KEYSTONE";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "keystone.json";

/// Configuration used when building a [Container](crate::container::Container).
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContainerConfig {
    /// Should registering a class definition with an already known identifier replace the
    /// previous definition, instead of failing.
    pub allow_definition_overriding: bool,
    /// Should definitions submitted by `#[derive(Component)]` be collected automatically.
    pub collect_static_definitions: bool,
    /// Should a default tracing logger be installed when building from the environment.
    pub install_tracing_logger: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            allow_definition_overriding: true,
            collect_static_definitions: true,
            install_tracing_logger: false,
        }
    }
}

impl From<OptionalContainerConfig> for ContainerConfig {
    fn from(value: OptionalContainerConfig) -> Self {
        let default = Self::default();
        Self {
            allow_definition_overriding: value
                .allow_definition_overriding
                .unwrap_or(default.allow_definition_overriding),
            collect_static_definitions: value
                .collect_static_definitions
                .unwrap_or(default.collect_static_definitions),
            install_tracing_logger: value
                .install_tracing_logger
                .unwrap_or(default.install_tracing_logger),
        }
    }
}

impl ContainerConfig {
    /// Reads the configuration from the config file and the environment.
    pub fn init_from_environment() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()
            .and_then(|config| config.try_deserialize::<OptionalContainerConfig>())
            .map(|config| config.into())
    }

    pub fn with_definition_overriding(mut self, allow_definition_overriding: bool) -> Self {
        self.allow_definition_overriding = allow_definition_overriding;
        self
    }

    pub fn with_static_definitions(mut self, collect_static_definitions: bool) -> Self {
        self.collect_static_definitions = collect_static_definitions;
        self
    }

    pub fn with_tracing_logger(mut self, install_tracing_logger: bool) -> Self {
        self.install_tracing_logger = install_tracing_logger;
        self
    }

    /// Installs a global `fmt` subscriber filtered by `RUST_LOG`, if requested. Returns `false`
    /// when nothing was installed, including when another subscriber is already set.
    pub fn init_tracing_logger(&self) -> bool {
        self.install_tracing_logger
            && tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .try_init()
                .is_ok()
    }
}

#[derive(Deserialize, Default)]
struct OptionalContainerConfig {
    allow_definition_overriding: Option<bool>,
    collect_static_definitions: Option<bool>,
    install_tracing_logger: Option<bool>,
}
