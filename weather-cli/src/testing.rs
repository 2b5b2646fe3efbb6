use async_trait::async_trait;
use std::sync::Mutex;
use weather_core::{CurrentWeather, WeatherError, WeatherProvider};

/// In-memory provider: "Atlantis" is unknown, every other city is mild and cloudy.
#[derive(Debug, Default)]
pub struct FakeProvider {
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        self.calls.lock().unwrap().push(city.to_string());

        if city.eq_ignore_ascii_case("atlantis") {
            return Err(WeatherError::CityNotFound { city: city.to_string() });
        }

        let mut chars = city.chars();
        let name = chars
            .next()
            .map(|first| first.to_uppercase().chain(chars).collect())
            .unwrap_or_default();

        Ok(CurrentWeather {
            city: name,
            country: Some("GB".into()),
            temperature_c: 14.5,
            description: "broken clouds".into(),
            humidity_pct: 77,
            wind_speed_mps: 4.0,
        })
    }
}
