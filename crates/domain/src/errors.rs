use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid server spec: {0}")]
    InvalidServerSpec(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Invalid base64url payload: {0}")]
    InvalidBase64(String),

    #[error("Invalid answer '{0}'")]
    InvalidAnswer(String),

    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("TLS handshake failed with {server}: {reason}")]
    TlsHandshake { server: String, reason: String },

    #[error("DoH server {server} returned HTTP {status}")]
    HttpStatus { server: String, status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("All nameservers failed: {0}")]
    AllNameserversFailed(String),

    #[error("All upstream servers failed to answer {domain}")]
    UpstreamExhausted { domain: String },
}

impl DomainError {
    /// Errors caused by what the client sent rather than by an upstream.
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidDomainName(_)
                | DomainError::InvalidServerSpec(_)
                | DomainError::MalformedMessage(_)
                | DomainError::InvalidBase64(_)
                | DomainError::InvalidAnswer(_)
                | DomainError::UnknownRecordType(_)
        )
    }
}
