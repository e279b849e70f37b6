pub mod backend;
pub mod probe;
pub mod site;

pub use crate::domain::model::{ProbeOutcome, Record, RobotsDescriptor, RobotsRule};
pub use crate::domain::ports::{DocumentConnector, DocumentSession};
pub use crate::utils::error::Result;
