//! Core library for the `weather` tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - Report formatting and the JSON lookup history
//!
//! It is used by `weather-cli` for both the command line and the dashboard.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod provider;
pub mod report;

pub use config::Config;
pub use error::WeatherError;
pub use history::{HistoryEntry, HistoryStore};
pub use model::CurrentWeather;
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use report::{NO_DATA, format_report};
