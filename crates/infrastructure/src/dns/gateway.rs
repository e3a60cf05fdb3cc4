//! DoH forwarding gateway.
//!
//! Takes one wire-format query, resolves its single question through the
//! query driver and answers with a wire-format response built from the
//! driver's answer strings. Whatever goes wrong after the header has been
//! read is reported to the client as SERVFAIL carrying its query ID.

use super::forwarding::message_builder::DNS_HEADER_LEN;
use super::forwarding::{AnswerParser, MessageBuilder, RecordTypeMapper};
use async_trait::async_trait;
use dnsprobe_application::ports::{DnsMessageForwarder, DnsQueryDriver};
use dnsprobe_domain::{DomainError, QueryResult, RecordType, RecordTypeSet, ServerSpec};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{Name, Record};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// TTL of every record the gateway synthesizes.
pub const GATEWAY_ANSWER_TTL: u32 = 60;

pub struct DohGateway {
    driver: Arc<dyn DnsQueryDriver>,
    fallback_chain: Vec<String>,
}

impl DohGateway {
    pub fn new(driver: Arc<dyn DnsQueryDriver>, fallback_chain: Vec<String>) -> Self {
        Self {
            driver,
            fallback_chain,
        }
    }

    /// Answers one wire query. Only input too short to carry a header is an
    /// `Err`; every other failure becomes a SERVFAIL or NOTIMP response.
    pub async fn handle(
        &self,
        request_bytes: &[u8],
        upstream: Option<&str>,
        proxy: Option<&str>,
    ) -> Result<Vec<u8>, DomainError> {
        let request = match Message::from_vec(request_bytes) {
            Ok(message) => message,
            Err(e) if request_bytes.len() >= DNS_HEADER_LEN => {
                warn!(error = %e, len = request_bytes.len(), "Undecodable DoH query");
                return MessageBuilder::build_header_only_response(
                    request_bytes,
                    ResponseCode::ServFail,
                );
            }
            Err(e) => {
                return Err(DomainError::MalformedMessage(e.to_string()));
            }
        };

        let Some(question) = request.queries().first() else {
            debug!(id = request.id(), "DoH query without a question");
            return Self::respond(&request, ResponseCode::ServFail, Vec::new());
        };

        let owner = question.name().clone();
        let record_type = match RecordTypeMapper::from_hickory(question.query_type()) {
            // ANY answers are rebuilt record by record from their own labels.
            Some(rt) if rt == RecordType::ANY || AnswerParser::supports(rt) => rt,
            _ => {
                debug!(qtype = %question.query_type(), "Unsupported query type");
                return Self::respond(&request, ResponseCode::NotImp, Vec::new());
            }
        };

        let domain = owner.to_utf8();
        let record_types = RecordTypeSet::single(record_type);

        info!(
            id = request.id(),
            domain = %domain,
            record_type = %record_type,
            upstream = upstream.unwrap_or("fallback"),
            "Forwarding DoH query"
        );

        let result = match upstream {
            Some(spec) => self.query_upstream(spec, &domain, &record_types, proxy).await,
            None => self.query_fallback(&domain, &record_types, proxy).await,
        };

        if !result.has_answers() {
            debug!(
                domain = %domain,
                server = %result.server,
                error = ?result.error,
                "No usable answer, replying SERVFAIL"
            );
            return Self::respond(&request, ResponseCode::ServFail, Vec::new());
        }

        match Self::synthesize_records(&result.answers, &owner) {
            Ok(records) => Self::respond(&request, ResponseCode::NoError, records),
            Err(e) => {
                warn!(domain = %domain, error = %e, "Cannot rebuild answer records");
                Self::respond(&request, ResponseCode::ServFail, Vec::new())
            }
        }
    }

    async fn query_upstream(
        &self,
        spec: &str,
        domain: &str,
        record_types: &RecordTypeSet,
        proxy: Option<&str>,
    ) -> QueryResult {
        match spec.parse::<ServerSpec>() {
            Ok(server) => {
                self.driver
                    .query(&server, domain, record_types, proxy)
                    .await
            }
            Err(e) => QueryResult::failure(spec, e.to_string()),
        }
    }

    /// Walks the fallback chain in order and stops at the first server that
    /// answers successfully with at least one record.
    async fn query_fallback(
        &self,
        domain: &str,
        record_types: &RecordTypeSet,
        proxy: Option<&str>,
    ) -> QueryResult {
        for spec in &self.fallback_chain {
            let result = self.query_upstream(spec, domain, record_types, proxy).await;
            if result.has_answers() {
                debug!(domain = %domain, server = %spec, "Fallback upstream answered");
                return result;
            }
            warn!(
                domain = %domain,
                server = %spec,
                error = ?result.error,
                "Fallback upstream gave no answer"
            );
        }

        QueryResult::failure(
            "fallback",
            DomainError::UpstreamExhausted {
                domain: domain.to_string(),
            }
            .to_string(),
        )
    }

    fn synthesize_records(answers: &[String], owner: &Name) -> Result<Vec<Record>, DomainError> {
        answers
            .iter()
            .map(|answer| AnswerParser::parse(answer, owner, GATEWAY_ANSWER_TTL))
            .collect()
    }

    fn respond(
        request: &Message,
        response_code: ResponseCode,
        answers: Vec<Record>,
    ) -> Result<Vec<u8>, DomainError> {
        let response = MessageBuilder::build_response(request, response_code, answers);
        MessageBuilder::serialize(&response)
    }
}

#[async_trait]
impl DnsMessageForwarder for DohGateway {
    async fn forward(
        &self,
        request: &[u8],
        upstream: Option<&str>,
        proxy: Option<&str>,
    ) -> Result<Vec<u8>, DomainError> {
        self.handle(request, upstream, proxy).await
    }
}
