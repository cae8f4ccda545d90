//! Hardware-specific tests requiring a real flashed device.
//!
//! These tests are ignored by default and require actual hardware to run.
//! They should be run manually with the `--ignored` flag and appropriate
//! environment variables set.

pub mod device_suite;
pub mod utils;
