use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use crate::DomainError;
use serde::Serialize;

pub const DEFAULT_UDP_PORT: u16 = 53;
pub const DEFAULT_TLS_PORT: u16 = 853;

/// Represents an upstream server address that may or may not be resolved to an IP.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl UpstreamAddr {
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self {
            UpstreamAddr::Resolved(addr) => Some(*addr),
            UpstreamAddr::Unresolved { .. } => None,
        }
    }

    /// Returns (hostname, port) if this address is unresolved.
    pub fn unresolved_parts(&self) -> Option<(&str, u16)> {
        match self {
            UpstreamAddr::Unresolved { hostname, port } => Some((hostname, *port)),
            UpstreamAddr::Resolved(_) => None,
        }
    }

    fn host_string(&self) -> String {
        match self {
            UpstreamAddr::Resolved(addr) => addr.ip().to_string(),
            UpstreamAddr::Unresolved { hostname, .. } => hostname.to_string(),
        }
    }
}

impl fmt::Display for UpstreamAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAddr::Resolved(addr) => write!(f, "{}", addr),
            UpstreamAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    Udp,
    Tls,
    Doh,
    Local,
}

impl TransportKind {
    pub fn scheme(&self) -> &'static str {
        match self {
            TransportKind::Udp => "udp",
            TransportKind::Tls => "dot",
            TransportKind::Doh => "doh",
            TransportKind::Local => "local",
        }
    }

    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "udp" => Some(TransportKind::Udp),
            "dot" | "tls" => Some(TransportKind::Tls),
            "doh" | "https" => Some(TransportKind::Doh),
            "local" => Some(TransportKind::Local),
            _ => None,
        }
    }
}

impl Serialize for TransportKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.scheme())
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// Where and how one query is sent, parsed once from a `kind://address` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServerSpec {
    Udp { addr: UpstreamAddr },
    Tls { addr: UpstreamAddr, hostname: Arc<str> },
    Doh { url: Arc<str> },
    Local,
}

impl ServerSpec {
    pub fn kind(&self) -> TransportKind {
        match self {
            ServerSpec::Udp { .. } => TransportKind::Udp,
            ServerSpec::Tls { .. } => TransportKind::Tls,
            ServerSpec::Doh { .. } => TransportKind::Doh,
            ServerSpec::Local => TransportKind::Local,
        }
    }

    /// Transport-specific address, as reported in query results.
    pub fn address(&self) -> String {
        match self {
            ServerSpec::Udp { addr } => addr.to_string(),
            ServerSpec::Tls { addr, hostname } => match addr {
                UpstreamAddr::Resolved(sock) => sock.to_string(),
                UpstreamAddr::Unresolved { port, .. } => format!("{}:{}", hostname, port),
            },
            ServerSpec::Doh { url } => url.to_string(),
            ServerSpec::Local => "local".to_string(),
        }
    }

    /// Parses a spec string, combining it with a separately supplied transport
    /// kind when the string itself carries no scheme.
    pub fn parse_with_kind(kind: TransportKind, s: &str) -> Result<Self, DomainError> {
        let cleaned = strip_fragment(s);
        if cleaned.contains("://") || cleaned.eq_ignore_ascii_case("local") {
            return cleaned.parse();
        }
        format!("{}://{}", kind.scheme(), cleaned).parse()
    }
}

fn strip_fragment(s: &str) -> &str {
    s.split('#').next().unwrap_or(s).trim()
}

fn parse_host_port(s: &str) -> Option<(&str, Option<u16>)> {
    if let Some(rest) = s.strip_prefix('[') {
        let end = rest.find(']')?;
        let host = &rest[..end];
        let tail = &rest[end + 1..];
        if tail.is_empty() {
            return Some((host, None));
        }
        let port = tail.strip_prefix(':')?.parse::<u16>().ok()?;
        return Some((host, Some(port)));
    }

    match s.rsplit_once(':') {
        // More than one colon without brackets: a bare IPv6 address.
        Some((host, _)) if host.contains(':') => Some((s, None)),
        Some((host, port_str)) => Some((host, Some(port_str.parse::<u16>().ok()?))),
        None => Some((s, None)),
    }
}

fn parse_upstream_addr(addr_str: &str, default_port: u16) -> Result<UpstreamAddr, String> {
    if let Ok(addr) = addr_str.parse::<SocketAddr>() {
        return Ok(UpstreamAddr::Resolved(addr));
    }

    let (host, port) =
        parse_host_port(addr_str).ok_or_else(|| format!("Invalid address '{}'", addr_str))?;
    if host.is_empty() || host.contains('/') {
        return Err(format!("Invalid address '{}'", addr_str));
    }
    let port = port.unwrap_or(default_port);

    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(UpstreamAddr::Resolved(SocketAddr::new(ip, port)));
    }
    Ok(UpstreamAddr::Unresolved {
        hostname: host.into(),
        port,
    })
}

fn parse_doh_url(rest: &str) -> Result<Arc<str>, String> {
    let url = ["https://", "http://"]
        .iter()
        .find_map(|scheme| {
            rest.get(..scheme.len())
                .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
                .map(|_| format!("{}{}", scheme, &rest[scheme.len()..]))
        })
        .unwrap_or_else(|| format!("https://{}", rest));

    let host = url
        .split_once("://")
        .map(|(_, after)| after)
        .and_then(|after| after.split(['/', '?']).next())
        .unwrap_or("");
    if host.is_empty() {
        return Err(format!("Invalid DoH URL '{}'", url));
    }
    Ok(url.into())
}

impl FromStr for ServerSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = strip_fragment(s);
        if s.is_empty() {
            return Err(DomainError::InvalidServerSpec("empty server spec".into()));
        }
        if s.eq_ignore_ascii_case("local") {
            return Ok(ServerSpec::Local);
        }

        let (kind, rest) = match s.split_once("://") {
            Some((scheme, rest)) => {
                let kind = TransportKind::from_scheme(scheme).ok_or_else(|| {
                    DomainError::InvalidServerSpec(format!(
                        "Unknown transport '{}' in '{}'. Expected udp://, dot://, doh:// or local://",
                        scheme, s
                    ))
                })?;
                // A bare `https://URL` keeps its scheme as part of the DoH address.
                if scheme.eq_ignore_ascii_case("https") {
                    (kind, s)
                } else {
                    (kind, rest)
                }
            }
            None => (TransportKind::Udp, s),
        };

        match kind {
            TransportKind::Local => Ok(ServerSpec::Local),
            TransportKind::Udp => {
                let addr = parse_upstream_addr(rest, DEFAULT_UDP_PORT).map_err(|e| {
                    DomainError::InvalidServerSpec(format!("Invalid UDP address: {}", e))
                })?;
                Ok(ServerSpec::Udp { addr })
            }
            TransportKind::Tls => {
                let addr = parse_upstream_addr(rest, DEFAULT_TLS_PORT).map_err(|e| {
                    DomainError::InvalidServerSpec(format!(
                        "Invalid TLS address: {}. Expected 'dot://IP[:PORT]' or 'dot://HOSTNAME[:PORT]'",
                        e
                    ))
                })?;
                let hostname: Arc<str> = addr.host_string().into();
                Ok(ServerSpec::Tls { addr, hostname })
            }
            TransportKind::Doh => {
                let url = parse_doh_url(rest).map_err(DomainError::InvalidServerSpec)?;
                Ok(ServerSpec::Doh { url })
            }
        }
    }
}

impl fmt::Display for ServerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerSpec::Local => write!(f, "local://"),
            other => write!(f, "{}://{}", other.kind().scheme(), other.address()),
        }
    }
}
