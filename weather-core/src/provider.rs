use crate::{Config, CurrentWeather, WeatherError};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current weather for a city name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<CurrentWeather, WeatherError>;
}

/// Construct the OpenWeather provider from config and an already resolved API key.
pub fn provider_from_config(
    config: &Config,
    api_key: String,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::builder(api_key)
        .base_url(config.base_url())
        .timeout(config.timeout())
        .build()?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_default_config_builds() {
        let cfg = Config::default();
        let provider = provider_from_config(&cfg, "KEY".to_string());
        assert!(provider.is_ok());
    }

    #[test]
    fn provider_honours_configured_base_url() {
        let cfg = Config {
            base_url: Some("http://127.0.0.1:9".into()),
            ..Config::default()
        };

        let provider = provider_from_config(&cfg, "KEY".to_string()).expect("provider");
        assert!(format!("{provider:?}").contains("http://127.0.0.1:9"));
    }
}
