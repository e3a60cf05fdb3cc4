use crate::DomainError;
use std::fmt;
use std::str::FromStr;

macro_rules! record_types {
    ($($variant:ident = $code:literal),+ $(,)?) => {
        /// Concrete query types, each with its IANA code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum RecordType {
            $($variant,)+
        }

        impl RecordType {
            pub const ALL_KNOWN: &'static [RecordType] = &[$(RecordType::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(RecordType::$variant => stringify!($variant),)+
                }
            }

            pub fn to_u16(&self) -> u16 {
                match self {
                    $(RecordType::$variant => $code,)+
                }
            }

            pub fn from_u16(code: u16) -> Option<Self> {
                match code {
                    $($code => Some(RecordType::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

record_types! {
    A = 1,
    NS = 2,
    CNAME = 5,
    SOA = 6,
    NULL = 10,
    PTR = 12,
    HINFO = 13,
    MX = 15,
    TXT = 16,
    AAAA = 28,
    SRV = 33,
    NAPTR = 35,
    DNAME = 39,
    DS = 43,
    SSHFP = 44,
    RRSIG = 46,
    NSEC = 47,
    DNSKEY = 48,
    NSEC3 = 50,
    NSEC3PARAM = 51,
    TLSA = 52,
    CDS = 59,
    CDNSKEY = 60,
    OPENPGPKEY = 61,
    SVCB = 64,
    HTTPS = 65,
    ANY = 255,
    CAA = 257,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a concrete type name. Symbolic sets such as `BOTH` or `ALL` are
/// not record types; see `RecordTypeSet::resolve`.
impl FromStr for RecordType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL_KNOWN
            .iter()
            .copied()
            .find(|rt| rt.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownRecordType(s.to_string()))
    }
}
