#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, Command};
pub use crate::config::toml_config::AppConfig;
