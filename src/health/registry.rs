// src/health/registry.rs
use super::probes::{HttpProbe, Probe, TcpProbe};
use super::status::CheckScope;
use crate::config::{CheckConfig, HealthCheckConfig, ProbeConfig};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("check '{0}' is already registered")]
    DuplicateCheck(String),
}

/// A named probe tagged with the scope it evaluates under.
#[derive(Clone)]
pub struct CheckDefinition {
    pub name: String,
    pub scope: CheckScope,
    pub probe: Arc<dyn Probe>,
}

/// Mapping from check name to probe, built once at startup. After it is
/// wrapped in an `Arc` and handed to the aggregator it is never mutated,
/// so concurrent evaluations read it without synchronization.
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<CheckDefinition>,
    names: HashSet<String>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the `checks` section of the config file.
    /// Any duplicate name aborts startup.
    pub fn from_config(checks: &[CheckConfig], health: &HealthCheckConfig) -> Result<Self> {
        let mut registry = Self::new();

        for check in checks {
            let probe: Arc<dyn Probe> = match &check.probe {
                ProbeConfig::Http { url } => Arc::new(
                    HttpProbe::new(url.clone(), health.timeout())
                        .with_context(|| format!("failed to build http probe '{}'", check.name))?,
                ),
                ProbeConfig::Tcp { addr } => Arc::new(TcpProbe::new(addr.clone())),
            };

            registry.register(&check.name, check.scope, probe)?;
        }

        Ok(registry)
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        scope: CheckScope,
        probe: Arc<dyn Probe>,
    ) -> Result<(), RegistryError> {
        let name = name.into();

        if !self.names.insert(name.clone()) {
            return Err(RegistryError::DuplicateCheck(name));
        }

        tracing::debug!("registered {} check '{}'", scope, name);
        self.checks.push(CheckDefinition { name, scope, probe });
        Ok(())
    }

    /// Checks tagged with `scope`, in registration order.
    pub fn checks_for(&self, scope: CheckScope) -> Vec<CheckDefinition> {
        self.checks
            .iter()
            .filter(|c| c.scope == scope)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
