use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use commands::{forecast, serve};
use crate::config::{AppConfig, ConfigOverrides};

#[derive(Parser)]
#[command(name = "gridcast")]
#[command(about = "Hourly electricity consumption forecast dashboard backend")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML)
    ///
    /// Values from the file override the built-in defaults and an optional
    /// gridcast.toml in the working directory. GRIDCAST_* environment
    /// variables and command line flags override the file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path of the precomputed prediction CSV
    #[arg(short, long, global = true)]
    pub data_path: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,
    },
    /// Compute a forecast once and print its aggregates
    ///
    /// Examples:
    ///   gridcast forecast --end-date 2024-01-31
    ///   gridcast forecast --start-date 2024-03-01 --end-date 2024-03-31 --json
    Forecast {
        /// Last day of the window (YYYY-MM-DD)
        #[arg(short, long)]
        end_date: NaiveDate,

        /// First day of the window (YYYY-MM-DD), defaults to the configured range start
        #[arg(short, long)]
        start_date: Option<NaiveDate>,

        /// Print the full response as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut overrides = ConfigOverrides {
            config_file: self.config,
            data_path: self.data_path,
            ..Default::default()
        };

        match self.command {
            Commands::Serve { bind_address } => {
                overrides.bind_address = bind_address;
                let config = AppConfig::load(&overrides)?;
                serve(&config).await?;
            }
            Commands::Forecast { end_date, start_date, json } => {
                let config = AppConfig::load(&overrides)?;
                forecast(&config, start_date, end_date, json)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_forecast_command() {
        let cli = Cli::try_parse_from([
            "gridcast",
            "--data-path",
            "/data/pred.csv",
            "forecast",
            "--end-date",
            "2024-02-01",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.data_path.as_deref(), Some("/data/pred.csv"));
        match cli.command {
            Commands::Forecast { end_date, start_date, json } => {
                assert_eq!(end_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
                assert_eq!(start_date, None);
                assert!(json);
            }
            Commands::Serve { .. } => panic!("Expected forecast command"),
        }
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result = Cli::try_parse_from(["gridcast", "forecast", "--end-date", "01/02/2024"]);
        assert!(result.is_err());
    }
}
