//! Console abstraction for the device under test.
//!
//! Provides a trait and implementations for line-oriented access to the
//! DUT's serial log, enabling dependency injection and testing via mocks.

pub mod error;
pub mod mock;
pub mod serial;
pub mod traits;

pub use error::ConsoleError;
pub use mock::MockConsole;
pub use serial::SerialConsole;
pub use traits::{ConsoleSource, SerialSettings};
