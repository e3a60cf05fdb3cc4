pub mod doh;
pub mod health;
pub mod query;
pub mod server;

pub use doh::DohParams;
pub use health::HealthResponse;
pub use query::{render_text, OutputFormat, QueryRequest, SimpleResult};
pub use server::ServerEntryResponse;
pub use test::TestRequest;
