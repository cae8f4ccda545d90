//! IP-address discovery from the device's serial log.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use super::CheckError;
use crate::dut::ConsoleSource;

/// How long to wait for the device to join Wi-Fi and report its address.
pub const IP_WAIT_TIMEOUT: Duration = Duration::from_secs(90);

/// The firmware logs `Got IP: <addr>` once DHCP completes.
static GOT_IP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Got IP: (\d+\.\d+\.\d+\.\d+)").unwrap());

/// Scan the console until the device reports its IPv4 address.
///
/// Returns the dotted-quad string exactly as logged. Propagates the
/// console's timeout error if the pattern does not appear within `timeout`.
pub fn wait_for_ip(
    console: &mut dyn ConsoleSource,
    timeout: Duration,
) -> Result<String, CheckError> {
    let groups = console.expect(&GOT_IP_PATTERN, timeout)?;
    // Group 1 always exists when the pattern matches.
    Ok(groups.into_iter().nth(1).unwrap_or_default())
}

/// Check that a discovered address is a well-formed dotted quad.
pub fn check_ip_format(ip: &str) -> Result<(), CheckError> {
    let dots = ip.chars().filter(|c| *c == '.').count();
    if dots == 3 && !ip.is_empty() {
        Ok(())
    } else {
        Err(CheckError::BadIp { ip: ip.to_string() })
    }
}
