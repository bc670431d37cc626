use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use common::Environment;
use std::path::PathBuf;
use std::time::Duration;

pub mod commands;

use crate::config::{resolve_client_config, DEFAULT_REQUEST_TIMEOUT_SECS};
use commands::{predict, serve, Readings};

#[derive(Parser)]
#[command(name = "solar-forecast")]
#[command(about = "Solar power forecast client and dashboard host")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the prediction service lives
#[derive(Args, Debug)]
pub struct ServiceArgs {
    /// Deployment environment (development or production)
    ///
    /// Selects the default service address when no base URL is given.
    #[arg(long, env = "SOLAR_ENV", default_value = "development")]
    pub environment: Environment,

    /// Base URL of the prediction service
    ///
    /// Examples:
    ///   http://localhost:5000
    ///   https://solar-api.example.com
    #[arg(long, env = "SOLAR_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Seconds to wait for the service before giving up
    #[arg(long, env = "SOLAR_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit sensor readings and print the hourly forecast summary
    ///
    /// Values are sent as typed; the prediction service validates them.
    Predict {
        /// Ambient temperature (°C)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        ambient_temp: String,

        /// Module temperature (°C)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        module_temp: String,

        /// Solar irradiation (W/m²)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        irradiation: String,

        #[command(flatten)]
        service: ServiceArgs,

        /// Write the hourly forecast as CSV to this path
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
    /// Host the compiled dashboard
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        /// Directory holding the built dashboard (index.html and wasm bundle)
        #[arg(long, env = "STATIC_DIR", default_value = "workspace/frontend/dist")]
        static_dir: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Predict { ambient_temp, module_temp, irradiation, service, export } => {
                let config = resolve_client_config(
                    service.environment,
                    service.api_base_url,
                    Duration::from_secs(service.timeout_secs),
                )?;
                let readings = Readings { ambient_temp, module_temp, irradiation };
                predict(&config, readings, export.as_deref()).await?;
            }
            Commands::Serve { bind_address, static_dir } => {
                serve(&bind_address, &static_dir).await?;
            }
        }
        Ok(())
    }
}
