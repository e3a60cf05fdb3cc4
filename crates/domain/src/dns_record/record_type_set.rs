use super::RecordType;

/// Concrete query types issued for one symbolic record-type request.
///
/// `BOTH` expands to A + AAAA and `ALL` to A, AAAA, CNAME, MX, TXT, NS.
/// SOA is only reachable by asking for it explicitly. Unknown symbols
/// resolve to a plain A lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTypeSet {
    types: Vec<RecordType>,
    keep_all_answers: bool,
}

impl RecordTypeSet {
    pub fn resolve(name: &str) -> Self {
        use RecordType::*;

        let symbol = name.trim().to_uppercase();
        let types = match symbol.as_str() {
            "A" => vec![A],
            "AAAA" => vec![AAAA],
            "CNAME" => vec![CNAME],
            "MX" => vec![MX],
            "TXT" => vec![TXT],
            "NS" => vec![NS],
            "SOA" => vec![SOA],
            "BOTH" => vec![A, AAAA],
            "ALL" => vec![A, AAAA, CNAME, MX, TXT, NS],
            _ => vec![A],
        };

        Self {
            types,
            keep_all_answers: symbol == "ALL",
        }
    }

    /// A set holding exactly one concrete type, as asked in a wire question.
    pub fn single(record_type: RecordType) -> Self {
        Self {
            types: vec![record_type],
            keep_all_answers: false,
        }
    }

    pub fn types(&self) -> &[RecordType] {
        &self.types
    }

    /// Whether an answer record of `answer_type`, returned for a query of
    /// `queried`, belongs in the result.
    pub fn accepts(&self, queried: RecordType, answer_type: RecordType) -> bool {
        self.keep_all_answers || queried == answer_type
    }

    pub fn keeps_all_answers(&self) -> bool {
        self.keep_all_answers
    }
}

impl Default for RecordTypeSet {
    fn default() -> Self {
        Self::resolve("A")
    }
}
