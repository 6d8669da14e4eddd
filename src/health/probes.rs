// src/health/probes.rs
use super::status::CheckStatus;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::future::Future;
use tokio::net::TcpStream;
use tokio::time::Duration;
use url::Url;

/// What a probe reports when it completes on its own. A probe may report
/// DOWN as data; returning `Err` instead means the probe itself broke,
/// which the aggregator also folds into a DOWN result.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub status: CheckStatus,
    pub message: String,
}

impl ProbeOutcome {
    pub fn up(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Up,
            message: message.into(),
        }
    }

    pub fn down(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Down,
            message: message.into(),
        }
    }
}

/// A single named health-check function. Implementations must be
/// side-effect-free and safe to invoke concurrently.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn run(&self) -> Result<ProbeOutcome>;
}

/// Probe an HTTP endpoint: 2xx is UP, anything else is DOWN, transport
/// errors bubble up as probe failures.
pub struct HttpProbe {
    url: Url,
    client: Client,
}

impl HttpProbe {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn run(&self) -> Result<ProbeOutcome> {
        let response = self.client.get(self.url.as_str()).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(ProbeOutcome::up(format!("HTTP {}", status)))
        } else {
            Ok(ProbeOutcome::down(format!("HTTP {}", status)))
        }
    }
}

/// Probe a TCP endpoint by opening a connection. The stream is dropped
/// immediately; this only answers "is something listening".
pub struct TcpProbe {
    addr: String,
}

impl TcpProbe {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn run(&self) -> Result<ProbeOutcome> {
        TcpStream::connect(&self.addr).await?;
        Ok(ProbeOutcome::up(format!("connected to {}", self.addr)))
    }
}

/// Adapter so embedders and tests can register plain async closures.
pub struct FnProbe<F> {
    f: F,
}

impl<F> FnProbe<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Probe for FnProbe<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<ProbeOutcome>> + Send,
{
    async fn run(&self) -> Result<ProbeOutcome> {
        (self.f)().await
    }
}
