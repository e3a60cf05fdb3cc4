//! DNS Message Builder
//!
//! Constructs DNS query and response messages in wire format using
//! `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use dnsprobe_domain::{DomainError, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Length of the fixed DNS header (RFC 1035 §4.1.1)
pub const DNS_HEADER_LEN: usize = 12;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query (random ID, RD set, class IN, one question)
    /// and serialize it to wire format.
    pub fn build_query(domain: &str, record_type: &RecordType) -> Result<Vec<u8>, DomainError> {
        Self::build_query_with_id(domain, record_type).map(|(_, bytes)| bytes)
    }

    /// Same as [`build_query`](Self::build_query), also returning the
    /// message ID for response matching.
    pub fn build_query_with_id(
        domain: &str,
        record_type: &RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize(&message)?;
        Ok((id, bytes))
    }

    /// Response to `request`: same ID and opcode, RD copied, RA set and the
    /// question section echoed.
    pub fn build_response(
        request: &Message,
        response_code: ResponseCode,
        answers: Vec<Record>,
    ) -> Message {
        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        response.set_response_code(response_code);

        for query in request.queries() {
            response.add_query(query.clone());
        }
        for answer in answers {
            response.add_answer(answer);
        }

        response
    }

    /// Header-only response for a request that could not be decoded past its
    /// header. The ID and RD bit are taken from the raw bytes.
    pub fn build_header_only_response(
        request_bytes: &[u8],
        response_code: ResponseCode,
    ) -> Result<Vec<u8>, DomainError> {
        if request_bytes.len() < DNS_HEADER_LEN {
            return Err(DomainError::MalformedMessage(format!(
                "{} bytes is shorter than a DNS header",
                request_bytes.len()
            )));
        }

        let id = u16::from_be_bytes([request_bytes[0], request_bytes[1]]);
        let recursion_desired = request_bytes[2] & 0x01 != 0;

        let mut response = Message::new(id, MessageType::Response, OpCode::Query);
        response.set_recursion_desired(recursion_desired);
        response.set_recursion_available(true);
        response.set_response_code(response_code);

        Self::serialize(&response)
    }

    /// Serialize a Message to wire format bytes
    pub fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::MalformedMessage(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
