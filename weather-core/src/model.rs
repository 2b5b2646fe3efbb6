use serde::{Deserialize, Serialize};

/// Current conditions for one city, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub country: Option<String>,
    pub temperature_c: f64,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

impl CurrentWeather {
    /// "City, CC", or just the city when the API gave no country.
    pub fn location(&self) -> String {
        match &self.country {
            Some(country) if !country.is_empty() => format!("{}, {}", self.city, country),
            _ => self.city.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(country: Option<&str>) -> CurrentWeather {
        CurrentWeather {
            city: "Oslo".into(),
            country: country.map(str::to_string),
            temperature_c: 3.5,
            description: "light snow".into(),
            humidity_pct: 90,
            wind_speed_mps: 4.1,
        }
    }

    #[test]
    fn location_includes_country() {
        assert_eq!(sample(Some("NO")).location(), "Oslo, NO");
    }

    #[test]
    fn location_without_country() {
        assert_eq!(sample(None).location(), "Oslo");
        assert_eq!(sample(Some("")).location(), "Oslo");
    }
}
