use std::net::SocketAddr;

use tokio::net::lookup_host;

use crate::error::HarnessError;

/// SLP's registered UDP port.
pub const SLP_PORT: u16 = 427;

/// Target host used when nothing else is configured.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Where the cases are sent.
///
/// ```text
/// ┌──────┬──────────────────────────────────────────────────────┐
/// │ Field│ Source                                               │
/// ├──────┼──────────────────────────────────────────────────────┤
/// │ host │ `--host`, else `$ADDRESS`, else 127.0.0.1            │
/// │ port │ always 427 from the CLI; settable for local tests    │
/// └──────┴──────────────────────────────────────────────────────┘
/// ```
///
/// The address is resolved once, before the first case is sent, and is
/// not re-resolved during a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: SLP_PORT,
        }
    }
}

impl HarnessConfig {
    /// Target `host` on the SLP port.
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: SLP_PORT,
        }
    }

    /// Resolve the target to a single socket address.
    ///
    /// IP literals resolve without a lookup. For names, the first address
    /// returned by the resolver is used.
    ///
    /// # Errors
    ///
    /// - [`HarnessError::Resolve`] if the lookup fails.
    /// - [`HarnessError::NoAddress`] if it returns nothing.
    pub async fn resolve(&self) -> Result<SocketAddr, HarnessError> {
        let mut addrs = lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|source| HarnessError::Resolve {
                host: self.host.clone(),
                source,
            })?;
        addrs.next().ok_or_else(|| HarnessError::NoAddress {
            host: self.host.clone(),
        })
    }
}
