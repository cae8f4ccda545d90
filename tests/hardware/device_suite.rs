//! Tests requiring an actual flashed device.
//!
//! These tests are skipped if no hardware is available.
//!
//! # Running Hardware Tests
//!
//! ```bash
//! # Set environment variables
//! export DUT_PORT=/dev/ttyUSB0            # or COM3 on Windows
//! export DUT_BAUD=115200                  # optional, default: 115200
//! export DUT_TARGET=esp32                 # optional, default: esp32
//!
//! # For the size budget test
//! export DUT_BIN_WITH_SOFTAP=build_softap/app.bin
//! export DUT_BIN_WITHOUT_SOFTAP=build/app.bin
//!
//! # Run tests
//! cargo test -- --ignored
//! ```
//!
//! # Hardware Requirements
//!
//! - A device flashed with the LED and String Control demo firmware
//! - Wi-Fi credentials baked into the build so the device can join the
//!   test network

use serial_test::serial;

use dut_harness::checks::{run_suite, ConnectSettings, ConnectedDevice};
use dut_harness::dut::SerialConsole;
use dut_harness::metrics::MetricsSink;
use dut_harness::size::{check_softap_size_delta, verify_softap_variant, ThresholdTable};

use super::utils::{skip_without_device, skip_without_images, DutTestConfig};

#[tokio::test]
#[serial]
#[ignore] // Run with --ignored flag
async fn test_device_connects_and_passes_suite() {
    let config = match skip_without_device() {
        Some(c) => c,
        None => return,
    };

    println!(
        "Testing device on: {} at {} baud",
        config.port_name, config.baud_rate
    );

    let console = SerialConsole::open(&config.port_name, config.serial_settings())
        .expect("Failed to open device console");

    let device = ConnectedDevice::connect(Box::new(console), &ConnectSettings::default())
        .await
        .expect("Device did not come up");

    println!("✅ Device reported IP: {}", device.ip());

    let report = run_suite(&device).await;
    for result in &report.results {
        match &result.outcome {
            Ok(()) => println!("✅ {}", result.name),
            Err(e) => println!("❌ {}: {}", result.name, e),
        }
    }

    assert!(
        report.passed(),
        "failed checks: {:?}",
        report.failed_checks()
    );
}

#[test]
#[serial]
#[ignore]
fn test_softap_size_budget() {
    let images = match skip_without_images() {
        Some(c) => c,
        None => return,
    };
    let target = DutTestConfig::from_env()
        .map(|c| c.target)
        .unwrap_or_else(|| "esp32".to_string());

    println!("Checking SoftAP size budget for target: {target}");

    if let Some(path) = &images.sdkconfig_with {
        verify_softap_variant(path, true).expect("SoftAP build variant mismatch");
    }
    if let Some(path) = &images.sdkconfig_without {
        verify_softap_variant(path, false).expect("SoftAP-free build variant mismatch");
    }

    let delta = check_softap_size_delta(
        &images.with_softap,
        &images.without_softap,
        &target,
        &ThresholdTable::default(),
        &MetricsSink::new(),
    )
    .expect("Size budget not met");

    println!(
        "✅ SoftAP saves {} bytes (threshold {})",
        delta.delta_bytes, delta.threshold_bytes
    );
}
