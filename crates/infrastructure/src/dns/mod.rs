pub mod driver;
pub mod forwarding;
pub mod gateway;
pub mod transport;

pub use driver::{QueryOptions, TransportDriver};
pub use gateway::DohGateway;
