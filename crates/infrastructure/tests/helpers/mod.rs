pub mod dns_server_mock;
pub mod mock_driver;

pub use dns_server_mock::{MockDnsServer, MockMode, MOCK_AAAA_ADDRESS, MOCK_A_ADDRESS};
pub use mock_driver::ScriptedDriver;
