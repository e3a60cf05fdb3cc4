//! Host stub resolver transport.
//!
//! Hands the question to `hickory-resolver` built from the host's resolver
//! configuration (`/etc/resolv.conf` search, ndots, timeout and attempts on
//! Unix, the registry on Windows) and re-encodes what it returns as a wire
//! reply, so the driver decodes LOCAL answers like any other transport.
//!
//! NXDOMAIN and empty NOERROR answers come back as replies carrying that
//! response code. Every other failure, SERVFAIL or REFUSED from all
//! nameservers included, is an error.
//!
//! The resolver speaks through its own `hickory_resolver::proto` types; only
//! wire bytes cross into the rest of the crate.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use dnsprobe_domain::DomainError;
use hickory_resolver::config::{NameServerConfig, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_resolver::proto::rr::Record;
use hickory_resolver::proto::serialize::binary::BinEncodable;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{ResolveError, Resolver, TokioResolver};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// Where the LOCAL transport takes its nameservers from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocalResolver {
    /// The host's resolver configuration.
    #[default]
    System,
    /// A fixed list queried over UDP with default resolver options.
    Nameservers(Vec<SocketAddr>),
}

pub struct LocalTransport {
    source: LocalResolver,
}

impl LocalTransport {
    pub fn new(source: LocalResolver) -> Self {
        Self { source }
    }

    pub fn from_system() -> Self {
        Self::new(LocalResolver::System)
    }

    pub fn with_nameservers(nameservers: Vec<SocketAddr>) -> Self {
        Self::new(LocalResolver::Nameservers(nameservers))
    }

    /// A fresh resolver per exchange: no cache survives between queries.
    fn build_resolver(&self, timeout: Duration) -> Result<TokioResolver, DomainError> {
        let mut builder = match &self.source {
            LocalResolver::System => TokioResolver::builder_tokio().map_err(|e| {
                DomainError::Transport(format!("Cannot load system resolver configuration: {}", e))
            })?,
            LocalResolver::Nameservers(nameservers) => {
                let mut config = ResolverConfig::new();
                for nameserver in nameservers {
                    config.add_name_server(NameServerConfig::new(*nameserver, Protocol::Udp));
                }
                Resolver::builder_with_config(config, TokioConnectionProvider::default())
            }
        };

        let options = builder.options_mut();
        options.timeout = options.timeout.min(timeout);

        Ok(builder.build())
    }
}

#[async_trait]
impl DnsTransport for LocalTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let request = Message::from_vec(message_bytes)
            .map_err(|e| DomainError::MalformedMessage(e.to_string()))?;
        let question = request
            .queries()
            .first()
            .cloned()
            .ok_or_else(|| DomainError::MalformedMessage("query without a question".into()))?;

        // Relative name, so the host's search list and ndots apply.
        let absolute = question.name().to_utf8();
        let name = match absolute.trim_end_matches('.') {
            "" => ".",
            relative => relative,
        };

        if let LocalResolver::Nameservers(list) = &self.source {
            if list.is_empty() {
                return Err(DomainError::AllNameserversFailed(
                    "no nameservers configured".to_string(),
                ));
            }
        }
        let resolver = self.build_resolver(timeout)?;

        let lookup = tokio::time::timeout(timeout, resolver.lookup(name, question.query_type()))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: "local".to_string(),
            })?;

        let (response_code, answers) = match lookup {
            Ok(lookup) => (ResponseCode::NoError, lookup.records().to_vec()),
            Err(e) => match negative_response_code(&e) {
                Some(code) => {
                    debug!(name = %name, rcode = %code, "Local resolver returned no records");
                    (code, Vec::new())
                }
                None => {
                    warn!(name = %name, error = %e, "Local resolver failed");
                    return Err(DomainError::AllNameserversFailed(e.to_string()));
                }
            },
        };

        let bytes = encode_reply(&request, question, response_code, answers)?;
        Ok(TransportResponse {
            bytes: Bytes::from(bytes),
            protocol_used: "LOCAL",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "LOCAL"
    }
}

/// NXDOMAIN or NOERROR/NODATA when the resolver failed only because the
/// name or type has no records; `None` for every real failure.
fn negative_response_code(e: &ResolveError) -> Option<ResponseCode> {
    match e.proto().map(|proto| proto.kind()) {
        Some(ProtoErrorKind::NoRecordsFound { response_code, .. })
            if matches!(response_code, ResponseCode::NoError | ResponseCode::NXDomain) =>
        {
            Some(*response_code)
        }
        _ => None,
    }
}

fn encode_reply(
    request: &Message,
    question: Query,
    response_code: ResponseCode,
    answers: Vec<Record>,
) -> Result<Vec<u8>, DomainError> {
    let mut reply = Message::new();
    reply.set_id(request.id());
    reply.set_message_type(MessageType::Response);
    reply.set_op_code(OpCode::Query);
    reply.set_recursion_desired(request.recursion_desired());
    reply.set_recursion_available(true);
    reply.set_response_code(response_code);
    reply.add_query(question);
    reply.add_answers(answers);

    reply
        .to_vec()
        .map_err(|e| DomainError::MalformedMessage(format!("Failed to encode local reply: {}", e)))
}
