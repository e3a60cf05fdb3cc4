pub mod errors;
pub mod gateway;
pub mod logging;
pub mod query;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use gateway::GatewayConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use query::{QueryConfig, TlsVerification};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
