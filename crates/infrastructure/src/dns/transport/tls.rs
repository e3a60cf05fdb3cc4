//! DNS-over-TLS transport (RFC 7858).
//!
//! Every query opens its own TCP connection and TLS session; nothing is
//! pooled between calls. Messages use the two-byte length framing.
//!
//! Certificate checking follows [`TlsVerification`]. With the default
//! (`Disabled`) any chain and any hostname is accepted, but handshake
//! signatures are still checked against the presented key.

use super::framing::{read_with_length_prefix, send_with_length_prefix};
use super::resolver::resolve_upstream;
use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use dnsprobe_domain::{DomainError, TlsVerification, UpstreamAddr};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, SignatureScheme};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio_rustls::client::TlsStream;
use tracing::debug;

/// DNS-over-TLS transport (RFC 7858)
pub struct TlsTransport {
    upstream_addr: UpstreamAddr,
    hostname: String,
    verification: TlsVerification,
}

impl TlsTransport {
    pub fn new(upstream_addr: UpstreamAddr, hostname: String, verification: TlsVerification) -> Self {
        Self {
            upstream_addr,
            hostname,
            verification,
        }
    }

    async fn connect(
        &self,
        server_addr: SocketAddr,
        deadline: Instant,
    ) -> Result<TlsStream<TcpStream>, DomainError> {
        let config = client_config(self.verification)?;
        let connector = tokio_rustls::TlsConnector::from(config);

        let server_name = ServerName::try_from(self.hostname.clone()).map_err(|e| {
            DomainError::InvalidServerSpec(format!(
                "Invalid TLS hostname '{}': {}",
                self.hostname, e
            ))
        })?;

        let tcp_stream = tokio::time::timeout_at(deadline, TcpStream::connect(server_addr))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server_addr.to_string(),
            })?
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
                    server: server_addr.to_string(),
                },
                _ => DomainError::Transport(format!(
                    "Failed to connect to TLS server {}: {}",
                    server_addr, e
                )),
            })?;

        let tls_stream = tokio::time::timeout_at(deadline, connector.connect(server_name, tcp_stream))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server_addr.to_string(),
            })?
            .map_err(|e| DomainError::TlsHandshake {
                server: server_addr.to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            server = %server_addr,
            hostname = %self.hostname,
            verify = self.verification.is_enabled(),
            "TLS connection established"
        );
        Ok(tls_stream)
    }
}

#[async_trait]
impl DnsTransport for TlsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let deadline = Instant::now() + timeout;
        let server_addr = resolve_upstream(&self.upstream_addr, timeout).await?;
        let mut stream = self.connect(server_addr, deadline).await?;

        let timed_out = || DomainError::TransportTimeout {
            server: server_addr.to_string(),
        };

        tokio::time::timeout_at(deadline, send_with_length_prefix(&mut stream, message_bytes))
            .await
            .map_err(|_| timed_out())??;

        let response_bytes = tokio::time::timeout_at(deadline, read_with_length_prefix(&mut stream))
            .await
            .map_err(|_| timed_out())??;

        debug!(
            server = %server_addr,
            response_len = response_bytes.len(),
            "TLS response received"
        );

        Ok(TransportResponse {
            bytes: Bytes::from(response_bytes),
            protocol_used: "TLS",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TLS"
    }
}

/// Client configuration for one TLS transport, built with an explicit crypto
/// provider so it does not depend on a process-wide default being installed.
pub(crate) fn client_config(
    verification: TlsVerification,
) -> Result<Arc<rustls::ClientConfig>, DomainError> {
    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());

    let builder = rustls::ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()
        .map_err(|e| DomainError::Transport(format!("Failed to build TLS config: {}", e)))?;

    let config = match verification {
        TlsVerification::Enabled => {
            let mut root_store = rustls::RootCertStore::empty();
            root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            builder
                .with_root_certificates(root_store)
                .with_no_client_auth()
        }
        TlsVerification::Disabled => builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate { provider }))
            .with_no_client_auth(),
    };

    Ok(Arc::new(config))
}

/// Accepts any certificate chain for any server name.
#[derive(Debug)]
struct AcceptAnyCertificate {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for AcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}
