//! Turns `"[TYPE] value"` answer strings back into resource records.
//!
//! Only the types listed in `AnswerParser::SUPPORTED` can be rebuilt.
//! Anything else, or a value that does not parse, is
//! `DomainError::InvalidAnswer`.

use dnsprobe_domain::{DomainError, RecordType};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, PTR, SOA, SRV, TXT};
use hickory_proto::rr::{Name, RData, Record};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

pub struct AnswerParser;

impl AnswerParser {
    pub const SUPPORTED: &'static [RecordType] = &[
        RecordType::A,
        RecordType::AAAA,
        RecordType::CNAME,
        RecordType::NS,
        RecordType::PTR,
        RecordType::MX,
        RecordType::TXT,
        RecordType::SOA,
        RecordType::SRV,
    ];

    pub fn supports(record_type: RecordType) -> bool {
        Self::SUPPORTED.contains(&record_type)
    }

    /// Builds a record owned by `owner` with the given TTL.
    pub fn parse(answer: &str, owner: &Name, ttl: u32) -> Result<Record, DomainError> {
        let invalid = || DomainError::InvalidAnswer(answer.to_string());

        let (label, value) = answer
            .strip_prefix('[')
            .and_then(|rest| rest.split_once(']'))
            .ok_or_else(invalid)?;
        let record_type = RecordType::from_str(label.trim()).map_err(|_| invalid())?;
        let value = value.trim();

        let rdata = match record_type {
            RecordType::A => RData::A(A(value.parse::<Ipv4Addr>().map_err(|_| invalid())?)),
            RecordType::AAAA => {
                RData::AAAA(AAAA(value.parse::<Ipv6Addr>().map_err(|_| invalid())?))
            }
            RecordType::CNAME => RData::CNAME(CNAME(parse_name(value).ok_or_else(invalid)?)),
            RecordType::NS => RData::NS(NS(parse_name(value).ok_or_else(invalid)?)),
            RecordType::PTR => RData::PTR(PTR(parse_name(value).ok_or_else(invalid)?)),
            RecordType::MX => {
                let (preference, exchange) = value.split_once(' ').ok_or_else(invalid)?;
                let preference = preference.parse::<u16>().map_err(|_| invalid())?;
                let exchange = parse_name(exchange.trim()).ok_or_else(invalid)?;
                RData::MX(MX::new(preference, exchange))
            }
            RecordType::TXT => {
                let strings = parse_character_strings(value).ok_or_else(invalid)?;
                RData::TXT(TXT::from_bytes(strings.iter().map(Vec::as_slice).collect()))
            }
            RecordType::SOA => RData::SOA(parse_soa(value).ok_or_else(invalid)?),
            RecordType::SRV => RData::SRV(parse_srv(value).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };

        Ok(Record::from_rdata(owner.clone(), ttl, rdata))
    }
}

fn parse_name(value: &str) -> Option<Name> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return None;
    }
    Name::from_str(value).ok()
}

fn parse_soa(value: &str) -> Option<SOA> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    let [mname, rname, serial, refresh, retry, expire, minimum] = fields.as_slice() else {
        return None;
    };

    Some(SOA::new(
        parse_name(mname)?,
        parse_name(rname)?,
        serial.parse().ok()?,
        refresh.parse().ok()?,
        retry.parse().ok()?,
        expire.parse().ok()?,
        minimum.parse().ok()?,
    ))
}

fn parse_srv(value: &str) -> Option<SRV> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    let [priority, weight, port, target] = fields.as_slice() else {
        return None;
    };

    Some(SRV::new(
        priority.parse().ok()?,
        weight.parse().ok()?,
        port.parse().ok()?,
        parse_name(target)?,
    ))
}

/// Splits space-separated character-strings. Quoted strings may contain
/// spaces; inside or outside quotes `\DDD` is one byte given in decimal and
/// `\X` is `X` itself.
fn parse_character_strings(value: &str) -> Option<Vec<Vec<u8>>> {
    let mut strings = Vec::new();
    let mut bytes = value.bytes().peekable();

    loop {
        while bytes.next_if(u8::is_ascii_whitespace).is_some() {}
        let Some(&first) = bytes.peek() else {
            break;
        };

        let quoted = first == b'"';
        if quoted {
            bytes.next();
        }

        let mut current = Vec::new();
        loop {
            let byte = match bytes.peek().copied() {
                None if quoted => return None,
                None => break,
                Some(b) if !quoted && b.is_ascii_whitespace() => break,
                Some(_) => bytes.next()?,
            };
            match byte {
                b'"' if quoted => break,
                b'\\' => {
                    let escaped = bytes.next()?;
                    if escaped.is_ascii_digit() {
                        let hundreds = escaped - b'0';
                        let tens = bytes.next().filter(u8::is_ascii_digit)? - b'0';
                        let units = bytes.next().filter(u8::is_ascii_digit)? - b'0';
                        let decimal =
                            u16::from(hundreds) * 100 + u16::from(tens) * 10 + u16::from(units);
                        current.push(u8::try_from(decimal).ok()?);
                    } else {
                        current.push(escaped);
                    }
                }
                b => current.push(b),
            }
        }
        strings.push(current);
    }

    if strings.is_empty() {
        return None;
    }
    Some(strings)
}
