//! Endpoint checks for the demo firmware's HTTP surface.
//!
//! Each check is a linear sequence of probe calls followed by substring
//! assertions on the returned bodies, matching what the firmware's web
//! server actually sends.

use tracing::info;

use super::CheckError;
use crate::net::HttpProbe;

/// Confirmation phrase for `GET /led?state=on`.
pub const LED_ON_CONFIRMATION: &str = "LED turned ON";

/// Confirmation phrase for `GET /led?state=off`.
pub const LED_OFF_CONFIRMATION: &str = "LED turned OFF";

/// What `GET /string` reports when nothing is stored.
pub const EMPTY_STORAGE_MARKER: &str = "(empty)";

/// Title on the root status page identifying the demo application.
pub const ROOT_PAGE_TITLE: &str = "ESP32 LED and String Control";

/// Value written and read back by the storage check.
pub const STORAGE_TEST_VALUE: &str = "hello-from-test";

/// Toggle the LED on and off, verifying the confirmation phrases.
pub async fn check_led(probe: &HttpProbe) -> Result<(), CheckError> {
    let on_body = probe.get("/led?state=on").await?;
    expect_contains("GET /led?state=on", &on_body, LED_ON_CONFIRMATION)?;

    let off_body = probe.get("/led?state=off").await?;
    expect_contains("GET /led?state=off", &off_body, LED_OFF_CONFIRMATION)?;

    Ok(())
}

/// Exercise the stored-string CRUD cycle: reset, read empty, write, read
/// back, cleanup.
pub async fn check_storage(probe: &HttpProbe) -> Result<(), CheckError> {
    probe.delete("/string").await?;

    let empty_body = probe.get("/string").await?;
    expect_contains("GET /string", &empty_body, EMPTY_STORAGE_MARKER)?;

    probe
        .post_form("/string", &[("value", STORAGE_TEST_VALUE)])
        .await?;

    let read_back = probe.get("/string").await?;
    expect_contains("GET /string", &read_back, STORAGE_TEST_VALUE)?;

    probe.delete("/string").await?;

    Ok(())
}

/// Fetch the root page and verify the demo application's title.
pub async fn check_root_page(probe: &HttpProbe) -> Result<(), CheckError> {
    let html = probe.get("/").await?;
    expect_contains("GET /", &html, ROOT_PAGE_TITLE)
}

/// Assert that `body` contains `expected`, inlining the observed body in
/// the failure.
fn expect_contains(request: &str, body: &str, expected: &str) -> Result<(), CheckError> {
    if body.contains(expected) {
        info!(request, expected, "response ok");
        Ok(())
    } else {
        Err(CheckError::MissingSubstring {
            request: request.to_string(),
            expected: expected.to_string(),
            body: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_contains_passes_on_substring() {
        assert!(expect_contains("GET /led?state=on", "LED turned ON\n", LED_ON_CONFIRMATION).is_ok());
    }

    #[test]
    fn test_expect_contains_inlines_body_on_failure() {
        let err = expect_contains("GET /", "<html>something else</html>", ROOT_PAGE_TITLE)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ESP32 LED and String Control"));
        assert!(msg.contains("something else"));
    }
}
