pub mod mock_driver;

pub use mock_driver::{MockBehavior, MockDriver};
