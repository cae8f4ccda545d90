//! HTTP plumbing for talking to the device's web server.

pub mod error;
pub mod probe;
pub mod readiness;

pub use error::ProbeError;
pub use probe::HttpProbe;
pub use readiness::{wait_for_server, READINESS_DEADLINE, READINESS_INTERVAL};
