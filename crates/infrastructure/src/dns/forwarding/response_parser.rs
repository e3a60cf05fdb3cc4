use super::record_type_map::RecordTypeMapper;
use dnsprobe_domain::{DomainError, RecordType, RecordTypeSet};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{Name, RData, Record};
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<Message, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        debug!(
            id = message.id(),
            rcode = ?message.response_code(),
            answers = message.answers().len(),
            truncated = message.truncated(),
            "DNS response parsed"
        );

        Ok(message)
    }

    /// Answer records of `message` as `"[TYPE] value"` strings, keeping only
    /// the records `record_types` accepts for a query of `queried`.
    pub fn format_answers(
        message: &Message,
        queried: RecordType,
        record_types: &RecordTypeSet,
    ) -> Vec<String> {
        message
            .answers()
            .iter()
            .filter(|record| match RecordTypeMapper::from_hickory(record.record_type()) {
                Some(answer_type) => record_types.accepts(queried, answer_type),
                None => record_types.keeps_all_answers(),
            })
            .map(Self::format_record)
            .collect()
    }

    pub fn format_record(record: &Record) -> String {
        let label = match RecordTypeMapper::from_hickory(record.record_type()) {
            Some(rt) => rt.as_str().to_string(),
            None => record.record_type().to_string(),
        };
        format!("[{}] {}", label, Self::format_rdata(record.data()))
    }

    /// Presentation text for one record's data.
    pub fn format_rdata(rdata: &RData) -> String {
        match rdata {
            RData::A(a) => a.0.to_string(),
            RData::AAAA(aaaa) => aaaa.0.to_string(),
            RData::CNAME(name) => absolute(&name.0),
            RData::NS(name) => absolute(&name.0),
            RData::PTR(name) => absolute(&name.0),
            RData::MX(mx) => format!("{} {}", mx.preference(), absolute(mx.exchange())),
            RData::SRV(srv) => format!(
                "{} {} {} {}",
                srv.priority(),
                srv.weight(),
                srv.port(),
                absolute(srv.target())
            ),
            RData::TXT(txt) => txt
                .txt_data()
                .iter()
                .map(|chunk| quote_character_string(chunk))
                .collect::<Vec<_>>()
                .join(" "),
            RData::SOA(soa) => format!(
                "{} {} {} {} {} {} {}",
                absolute(soa.mname()),
                absolute(soa.rname()),
                soa.serial(),
                soa.refresh(),
                soa.retry(),
                soa.expire(),
                soa.minimum()
            ),
            other => other.to_string(),
        }
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}

fn absolute(name: &Name) -> String {
    let text = name.to_utf8();
    if text.ends_with('.') {
        text
    } else {
        format!("{}.", text)
    }
}

/// Double-quotes one TXT character-string, escaping `"` and `\`. Bytes
/// that are not UTF-8 are written as `\DDD`.
fn quote_character_string(bytes: &[u8]) -> String {
    let mut quoted = String::with_capacity(bytes.len() + 2);
    quoted.push('"');
    for chunk in bytes.utf8_chunks() {
        for c in chunk.valid().chars() {
            if c == '"' || c == '\\' {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        for byte in chunk.invalid() {
            quoted.push_str(&format!("\\{:03}", byte));
        }
    }
    quoted.push('"');
    quoted
}
