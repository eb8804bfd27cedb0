use anyhow::{Context, Result};
use chrono::NaiveDate;
use common::ForecastDefaults;
use compute::loader::{CsvColumns, CsvForecastLoader};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::schemas::AppState;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_DATA_PATH: &str = "data/pred_data_2024.csv";
/// Fixed first day of every forecast window.
pub const DEFAULT_RANGE_START: &str = "2024-01-01";

/// Application configuration.
///
/// Layered from built-in defaults, an optional `gridcast.toml` in the working
/// directory, an explicit config file, `GRIDCAST_*` environment variables and
/// finally command line flags.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Bind address for the web server (IP:PORT)
    pub bind_address: String,
    /// Path of the precomputed prediction CSV
    pub data_path: PathBuf,
    /// Start of every query window
    pub range_start: NaiveDate,
    /// Name of the timestamp column
    pub date_column: String,
    /// Name of the power column
    pub power_column: String,
}

/// Values given on the command line; they win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub data_path: Option<String>,
}

impl AppConfig {
    /// Load configuration from all sources
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("data_path", DEFAULT_DATA_PATH)?
            .set_default("range_start", DEFAULT_RANGE_START)?
            .set_default("date_column", "Date")?
            .set_default("power_column", "Power")?
            .add_source(File::with_name("gridcast").required(false));

        if let Some(path) = &overrides.config_file {
            debug!("Reading configuration file {}", path.display());
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix("GRIDCAST"))
            .set_override_option("bind_address", overrides.bind_address.clone())?
            .set_override_option("data_path", overrides.data_path.clone())?
            .build()
            .context("Failed to assemble configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Invalid configuration")?;
        debug!("Loaded configuration: {:?}", app_config);
        Ok(app_config)
    }

    /// End date preselected in the date picker: the day after the range start.
    pub fn default_end(&self) -> NaiveDate {
        ForecastDefaults::from_start(self.range_start).default_end
    }

    pub fn columns(&self) -> CsvColumns {
        CsvColumns {
            date: self.date_column.clone(),
            power: self.power_column.clone(),
        }
    }

    pub fn loader(&self) -> CsvForecastLoader {
        CsvForecastLoader::with_columns(&self.data_path, self.columns())
    }
}

/// Initialize application state from configuration
pub fn initialize_app_state(config: &AppConfig) -> AppState {
    info!("Serving forecasts from {}", config.data_path.display());
    if !Path::new(&config.data_path).is_file() {
        tracing::warn!(
            "Forecast file {} does not exist yet, requests will fail until it is provided",
            config.data_path.display()
        );
    }

    AppState {
        loader: Arc::new(config.loader()),
        range_start: config.range_start,
    }
}
