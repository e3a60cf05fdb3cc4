use dnsprobe_domain::{CatalogEntry, TransportKind};
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct ServerEntryResponse {
    #[serde(rename = "type")]
    pub kind: TransportKind,
    pub address: &'static str,
    pub name: &'static str,
    /// Ready-to-use spec string for `/api/query` and `/api/test`.
    pub spec: String,
}

impl From<&CatalogEntry> for ServerEntryResponse {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            kind: entry.kind,
            address: entry.address,
            name: entry.name,
            spec: entry.spec(),
        }
    }
}
