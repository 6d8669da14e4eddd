// src/health/mod.rs
mod aggregator;
mod probes;
mod registry;
mod report;
mod status;

pub use aggregator::HealthAggregator;
pub use probes::{FnProbe, HttpProbe, Probe, ProbeOutcome, TcpProbe};
pub use registry::{CheckDefinition, CheckRegistry, RegistryError};
pub use report::{CheckResult, HealthReport};
pub use status::{CheckScope, CheckStatus};
