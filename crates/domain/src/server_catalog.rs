use crate::server_spec::TransportKind;
use serde::Serialize;

/// Number of catalog entries queried when a caller names no servers.
pub const DEFAULT_QUERY_SERVER_COUNT: usize = 5;

/// A well-known public resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub kind: TransportKind,
    pub address: &'static str,
    pub name: &'static str,
}

impl CatalogEntry {
    const fn new(kind: TransportKind, address: &'static str, name: &'static str) -> Self {
        Self {
            kind,
            address,
            name,
        }
    }

    /// The `kind://address` string accepted by `ServerSpec::from_str`.
    pub fn spec(&self) -> String {
        match self.kind {
            TransportKind::Local => "local".to_string(),
            TransportKind::Doh => self.address.to_string(),
            kind => format!("{}://{}", kind.scheme(), self.address),
        }
    }
}

pub const SERVER_CATALOG: &[CatalogEntry] = &[
    CatalogEntry::new(
        TransportKind::Doh,
        "https://cloudflare-dns.com/dns-query",
        "Cloudflare DoH",
    ),
    CatalogEntry::new(
        TransportKind::Doh,
        "https://dns.google/dns-query",
        "Google DoH",
    ),
    CatalogEntry::new(
        TransportKind::Doh,
        "https://dns.quad9.net/dns-query",
        "Quad9 DoH",
    ),
    CatalogEntry::new(
        TransportKind::Doh,
        "https://dns.adguard-dns.com/dns-query",
        "AdGuard DoH",
    ),
    CatalogEntry::new(TransportKind::Udp, "1.1.1.1", "Cloudflare"),
    CatalogEntry::new(TransportKind::Udp, "8.8.8.8", "Google"),
    CatalogEntry::new(
        TransportKind::Doh,
        "https://doh.opendns.com/dns-query",
        "OpenDNS DoH",
    ),
    CatalogEntry::new(TransportKind::Tls, "1.1.1.1:853", "Cloudflare DoT"),
    CatalogEntry::new(TransportKind::Tls, "dns.google:853", "Google DoT"),
    CatalogEntry::new(TransportKind::Udp, "9.9.9.9", "Quad9"),
    CatalogEntry::new(TransportKind::Udp, "208.67.222.222", "OpenDNS"),
    CatalogEntry::new(TransportKind::Local, "local", "System resolver"),
];

/// Servers queried by a multi-server run that names none.
pub fn default_query_servers() -> Vec<String> {
    SERVER_CATALOG
        .iter()
        .take(DEFAULT_QUERY_SERVER_COUNT)
        .map(CatalogEntry::spec)
        .collect()
}

/// Fallback chain of the DoH gateway: every remote catalog entry, in order.
pub fn default_gateway_upstreams() -> Vec<String> {
    SERVER_CATALOG
        .iter()
        .filter(|entry| entry.kind != TransportKind::Local)
        .map(CatalogEntry::spec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServerSpec;

    #[test]
    fn test_every_entry_parses() {
        for entry in SERVER_CATALOG {
            let spec: ServerSpec = entry.spec().parse().unwrap();
            assert_eq!(spec.kind(), entry.kind, "kind mismatch for {}", entry.name);
        }
    }

    #[test]
    fn test_default_query_servers_are_first_five() {
        let servers = default_query_servers();
        assert_eq!(servers.len(), DEFAULT_QUERY_SERVER_COUNT);
        assert_eq!(servers[0], "https://cloudflare-dns.com/dns-query");
    }

    #[test]
    fn test_gateway_upstreams_skip_local() {
        assert!(default_gateway_upstreams()
            .iter()
            .all(|s| !s.eq_ignore_ascii_case("local")));
    }
}
