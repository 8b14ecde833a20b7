use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Url;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::sources::ConnectivityProbe;

/// Considers the network available when the feed host accepts a TCP connection.
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self { host: host.into(), port, timeout }
    }

    pub fn from_url(url: &Url, timeout: Duration) -> Result<Self> {
        let host = url.host_str().ok_or_else(|| anyhow!("Base URL {url} has no host"))?;
        let port = url.port_or_known_default().ok_or_else(|| anyhow!("Base URL {url} has no known port"))?;

        Ok(Self::new(host, port, timeout))
    }
}

#[async_trait]
impl ConnectivityProbe for TcpProbe {
    async fn is_network_available(&self) -> bool {
        let address = (self.host.as_str(), self.port);

        match timeout(self.timeout, TcpStream::connect(address)).await {
            Ok(Ok(_)) => true,
            Ok(Err(error)) => {
                debug!("Connectivity probe to {}:{} failed: {error}", self.host, self.port);
                false
            }
            Err(_) => {
                debug!("Connectivity probe to {}:{} timed out after {:?}", self.host, self.port, self.timeout);
                false
            }
        }
    }
}

/// Offline counterpart of [`TcpProbe`]: the feeds are reachable when their directory exists.
pub struct DirectoryProbe {
    directory: PathBuf
}

impl DirectoryProbe {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl ConnectivityProbe for DirectoryProbe {
    async fn is_network_available(&self) -> bool {
        tokio::fs::metadata(&self.directory)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false)
    }
}
