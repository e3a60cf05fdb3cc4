//! dnsprobe domain layer: server specs, record types and query results.
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod query_result;
pub mod server_catalog;
pub mod server_spec;

pub use config::{CliOverrides, Config, TlsVerification};
pub use dns_record::{RecordType, RecordTypeSet};
pub use errors::DomainError;
pub use query_result::{QueryResult, QueryStatus, ServerQueryResult};
pub use server_catalog::{CatalogEntry, SERVER_CATALOG};
pub use server_spec::{ServerSpec, TransportKind, UpstreamAddr};
