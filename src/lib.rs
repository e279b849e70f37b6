pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::{BackendConfig, ProbeConfig, SiteConfig};

pub use adapters::mongo::MongoConnector;
pub use core::{backend::BackendClient, probe::Probe, ProbeOutcome, Record};
pub use utils::error::{Result, SiteError};
