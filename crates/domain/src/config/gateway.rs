use crate::server_catalog::default_gateway_upstreams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Ordered fallback chain used when a DoH request names no upstream.
    /// Unset means every remote entry of the built-in catalog.
    #[serde(default)]
    pub upstreams: Option<Vec<String>>,
}

impl GatewayConfig {
    pub fn fallback_chain(&self) -> Vec<String> {
        match &self.upstreams {
            Some(list) if !list.is_empty() => list.clone(),
            _ => default_gateway_upstreams(),
        }
    }
}
