//! TRSim command line interface.

use std::net::TcpListener;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use trsim_device::{DeviceConfig, EmulatedDevice};
use trsim_runner::client::run_script;
use trsim_runner::error::{RunnerError, RunnerResult};
use trsim_runner::tcp::{serve_device, TcpTransport};

/// Thermostat simulator: serve an emulated TR-series device over TCP, or
/// drive a serving device with the scripted controller.
#[derive(Parser, Debug)]
#[command(name = "trsim", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the emulated device on a TCP listener.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:7020")]
        listen: String,

        /// Device configuration file (YAML).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Power-on setpoint in degrees Celsius.
        #[arg(long)]
        setpoint: Option<f64>,

        /// Drop data frames whose checksum does not verify.
        #[arg(long)]
        strict_checksum: bool,

        /// Delay after each handled record, in milliseconds.
        #[arg(long)]
        pace_ms: Option<u64>,

        /// Jitter applied to internal sensor readings, in degrees.
        #[arg(long)]
        sensor_jitter: Option<f64>,
    },
    /// Run the scripted controller against a serving device.
    Client {
        /// Address of the serving device.
        #[arg(long, default_value = "127.0.0.1:7020")]
        connect: String,

        /// Setpoint written by the script, in degrees Celsius.
        #[arg(long, default_value_t = 30.0)]
        setpoint: f64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> RunnerResult<()> {
    match cli.command {
        Commands::Serve {
            listen,
            config,
            setpoint,
            strict_checksum,
            pace_ms,
            sensor_jitter,
        } => {
            let mut device_config: DeviceConfig = match config {
                Some(path) => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
                None => DeviceConfig::default(),
            };
            if let Some(setpoint) = setpoint {
                device_config.initial_setpoint = setpoint;
            }
            if strict_checksum {
                device_config.strict_checksum = true;
            }
            if let Some(pace_ms) = pace_ms {
                device_config.pace_ms = pace_ms;
            }
            if let Some(jitter) = sensor_jitter {
                device_config.sensor_jitter = jitter;
            }
            validate_setpoint(device_config.initial_setpoint)?;

            if let Err(err) = ctrlc::set_handler(|| {
                info!("shutting down");
                std::process::exit(0);
            }) {
                warn!("could not install shutdown handler: {}", err);
            }

            let listener = TcpListener::bind(&listen)?;
            let mut device = EmulatedDevice::new(device_config);
            serve_device(listener, &mut device)
        }
        Commands::Client { connect, setpoint } => {
            validate_setpoint(setpoint)?;
            let mut transport = TcpTransport::connect(&connect)?;
            info!("connected to {}", connect);
            let report = run_script(&mut transport, setpoint)?;
            for line in &report.lines {
                println!("{}", line);
            }
            if report.checksum_mismatches > 0 {
                info!(
                    "{} replies failed checksum verification",
                    report.checksum_mismatches
                );
            }
            Ok(())
        }
    }
}

fn validate_setpoint(value: f64) -> RunnerResult<()> {
    if (0.0..100.0).contains(&value) {
        Ok(())
    } else {
        Err(RunnerError::InvalidArgument(format!(
            "setpoint {} out of range (0.00 to 99.99)",
            value
        )))
    }
}
