#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use env::{BackendConfig, ProbeConfig};
pub use toml_config::SiteConfig;
