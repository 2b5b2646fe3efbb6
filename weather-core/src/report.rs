//! Human-readable weather reports.

use std::fmt::Write;

use crate::model::CurrentWeather;

/// Shown in place of a report when a lookup produced nothing.
pub const NO_DATA: &str = "No data to display.";

const RULE_WIDTH: usize = 40;

/// Render the boxed report for one city.
///
/// Starts with a blank line and ends with the closing rule plus a newline,
/// so `writeln!` of the result leaves one blank line after the box.
pub fn format_report(weather: &CurrentWeather) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "    Weather in {}:", weather.location());
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Temperature: {}°C", weather.temperature_c);
    let _ = writeln!(out, "Description: {}", weather.description);
    let _ = writeln!(out, "Humidity: {}%", weather.humidity_pct);
    let _ = writeln!(out, "Wind Speed: {} m/s", weather.wind_speed_mps);
    let _ = writeln!(out, "{rule}");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> CurrentWeather {
        CurrentWeather {
            city: "London".into(),
            country: Some("GB".into()),
            temperature_c: 15.0,
            description: "light rain".into(),
            humidity_pct: 72,
            wind_speed_mps: 3.6,
        }
    }

    #[test]
    fn report_layout() {
        let expected = "\n\
            ========================================\n    \
            Weather in London, GB:\n\
            ========================================\n\
            Temperature: 15°C\n\
            Description: light rain\n\
            Humidity: 72%\n\
            Wind Speed: 3.6 m/s\n\
            ========================================\n";

        assert_eq!(format_report(&london()), expected);
    }

    #[test]
    fn fractional_temperature_is_kept() {
        let mut w = london();
        w.temperature_c = -2.35;

        assert!(format_report(&w).contains("Temperature: -2.35°C\n"));
    }

    #[test]
    fn header_without_country() {
        let mut w = london();
        w.country = None;

        assert!(format_report(&w).contains("    Weather in London:\n"));
    }
}
