use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dut_harness::checks::{self, ConnectedDevice};
use dut_harness::config::{Config, ConfigError, ConfigLoader, LogFormat};
use dut_harness::dut::SerialConsole;
use dut_harness::metrics::MetricsSink;
use dut_harness::size;

// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Hardware-in-the-loop test harness for the ESP32 LED and String Control demo firmware.",
    long_about = "Drives a flashed device over its serial console and HTTP surface: waits for the \
                  device to join Wi-Fi, polls its web server up, exercises the LED and stored-string \
                  endpoints, and enforces the SoftAP binary size budget."
)]
struct Args {
    /// Path to an explicit TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the connectivity and endpoint suite against a connected device.
    Run {
        /// Serial port the device console is attached to (e.g. /dev/ttyUSB0).
        #[arg(short, long)]
        port: Option<String>,

        /// Console baud rate override.
        #[arg(short, long)]
        baud: Option<u32>,
    },

    /// Enforce the SoftAP binary size budget on two firmware images.
    SizeCheck {
        /// Firmware image built with SoftAP support.
        #[arg(long)]
        with_softap: PathBuf,

        /// Firmware image built without SoftAP support.
        #[arg(long)]
        without_softap: PathBuf,

        /// Chip target the images were built for.
        #[arg(short, long, default_value = "esp32")]
        target: String,

        /// sdkconfig of the SoftAP build, to confirm the variant.
        #[arg(long)]
        sdkconfig_with: Option<PathBuf>,

        /// sdkconfig of the SoftAP-free build, to confirm the variant.
        #[arg(long)]
        sdkconfig_without: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loader = match &args.config {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load()?,
    };
    let config = loader.into_config();

    init_tracing(&config);

    match args.command {
        Command::Run { port, baud } => run_device_suite(&config, port, baud).await,
        Command::SizeCheck {
            with_softap,
            without_softap,
            target,
            sdkconfig_with,
            sdkconfig_without,
        } => run_size_check(
            &config,
            &with_softap,
            &without_softap,
            &target,
            sdkconfig_with.as_deref(),
            sdkconfig_without.as_deref(),
        ),
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

async fn run_device_suite(
    config: &Config,
    port: Option<String>,
    baud: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let port = port
        .or_else(|| config.serial.port.clone())
        .ok_or_else(|| ConfigError::MissingRequired("serial.port (or --port)".to_string()))?;

    let mut settings = config.serial.settings();
    if let Some(baud) = baud {
        settings.baud_rate = baud;
    }

    info!(%port, baud = settings.baud_rate, "opening device console");
    let console = SerialConsole::open(&port, settings)?;

    let device = ConnectedDevice::connect(Box::new(console), &config.connect_settings()).await?;
    info!(ip = device.ip(), "device connected, running checks");

    let report = checks::run_suite(&device).await;
    if report.passed() {
        info!("all checks passed");
        Ok(())
    } else {
        Err(format!("checks failed: {}", report.failed_checks().join(", ")).into())
    }
}

fn run_size_check(
    config: &Config,
    with_softap: &std::path::Path,
    without_softap: &std::path::Path,
    target: &str,
    sdkconfig_with: Option<&std::path::Path>,
    sdkconfig_without: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = sdkconfig_with {
        size::verify_softap_variant(path, true)?;
    }
    if let Some(path) = sdkconfig_without {
        size::verify_softap_variant(path, false)?;
    }

    let metrics = match &config.size_check.metrics_file {
        Some(path) => MetricsSink::with_file(path)?,
        None => MetricsSink::new(),
    };

    let delta = size::check_softap_size_delta(
        with_softap,
        without_softap,
        target,
        &config.size_check.threshold_table(),
        &metrics,
    )?;

    info!(
        target = delta.target.as_str(),
        delta_bytes = delta.delta_bytes,
        threshold_bytes = delta.threshold_bytes,
        "size budget satisfied"
    );
    Ok(())
}
