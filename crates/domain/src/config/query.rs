use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Certificate checking for the TLS and DoH transports.
///
/// Defaults to `Disabled`: this is a diagnostic tool and must be able to
/// reach servers presenting self-signed or mismatched certificates. Set
/// `query.verify_certificates = true` to validate against the webpki roots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsVerification {
    #[default]
    Disabled,
    Enabled,
}

impl TlsVerification {
    pub fn is_enabled(&self) -> bool {
        matches!(self, TlsVerification::Enabled)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub verify_certificates: bool,
}

impl QueryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn tls_verification(&self) -> TlsVerification {
        if self.verify_certificates {
            TlsVerification::Enabled
        } else {
            TlsVerification::Disabled
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            verify_certificates: false,
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}
