pub mod doh;
pub mod health;
pub mod query;
pub mod servers;

pub use doh::{dns_query_get, dns_query_post};
pub use health::health_check;
pub use query::run_query;
pub use servers::list_servers;
pub use test::test_server;
