use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::local::LocalResolver;
use super::transport::{create_transport, Transport};
use async_trait::async_trait;
use dnsprobe_application::ports::DnsQueryDriver;
use dnsprobe_domain::{
    DomainError, QueryResult, RecordType, RecordTypeSet, ServerSpec, TlsVerification,
};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Budget for each concrete-type exchange.
    pub timeout: Duration,
    pub tls_verification: TlsVerification,
    /// Nameservers behind the `local` server spec.
    pub local_resolver: LocalResolver,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_QUERY_TIMEOUT,
            tls_verification: TlsVerification::Disabled,
            local_resolver: LocalResolver::System,
        }
    }
}

/// Resolves a record-type set against one server through the transport its
/// spec names. Every failure ends up in the returned `QueryResult`.
pub struct TransportDriver {
    options: QueryOptions,
}

impl TransportDriver {
    pub fn new(options: QueryOptions) -> Self {
        Self { options }
    }

    async fn query_type(
        &self,
        transport: &Transport,
        domain: &str,
        record_type: RecordType,
        record_types: &RecordTypeSet,
    ) -> Result<(Vec<String>, f64), DomainError> {
        let (id, query_bytes) = MessageBuilder::build_query_with_id(domain, &record_type)?;

        let start = Instant::now();
        let response = transport.send(&query_bytes, self.options.timeout).await?;
        let message = ResponseParser::parse(&response.bytes)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        if message.id() != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response ID {} does not match query ID {}",
                message.id(),
                id
            )));
        }

        debug!(
            domain = %domain,
            record_type = %record_type,
            protocol = response.protocol_used,
            rcode = ResponseParser::rcode_to_status(message.response_code()),
            elapsed_ms = elapsed_ms,
            "Query answered"
        );

        let answers = ResponseParser::format_answers(&message, record_type, record_types);
        Ok((answers, elapsed_ms))
    }
}

impl Default for TransportDriver {
    fn default() -> Self {
        Self::new(QueryOptions::default())
    }
}

#[async_trait]
impl DnsQueryDriver for TransportDriver {
    async fn query(
        &self,
        server: &ServerSpec,
        domain: &str,
        record_types: &RecordTypeSet,
        proxy: Option<&str>,
    ) -> QueryResult {
        let address = server.address();

        let transport = match create_transport(
            server,
            self.options.tls_verification,
            proxy,
            &self.options.local_resolver,
        ) {
            Ok(transport) => transport,
            Err(e) => return QueryResult::failure(address, e.to_string()),
        };

        let mut answers = Vec::new();
        let mut latency_ms = 0.0;

        for &record_type in record_types.types() {
            match self
                .query_type(&transport, domain, record_type, record_types)
                .await
            {
                Ok((mut type_answers, elapsed_ms)) => {
                    answers.append(&mut type_answers);
                    latency_ms += elapsed_ms;
                }
                Err(e) => {
                    warn!(
                        server = %address,
                        domain = %domain,
                        record_type = %record_type,
                        error = %e,
                        "Query failed"
                    );
                    return QueryResult::failure(address, e.to_string());
                }
            }
        }

        QueryResult::success(address, latency_ms, answers)
    }
}
