//! Batch and interactive lookups on the command line.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};
use weather_core::{
    CurrentWeather, HistoryEntry, HistoryStore, NO_DATA, WeatherProvider, format_report,
};

/// One command-line run: a provider plus an optional history sink.
#[derive(Debug)]
pub struct Session<'a> {
    provider: &'a dyn WeatherProvider,
    history: Option<HistoryStore>,
}

impl<'a> Session<'a> {
    pub fn new(provider: &'a dyn WeatherProvider, history: Option<HistoryStore>) -> Self {
        Self { provider, history }
    }

    /// Fetch, print and record a single city.
    pub async fn lookup<W: Write>(
        &self,
        city: &str,
        out: &mut W,
    ) -> io::Result<Option<CurrentWeather>> {
        let weather = match self.provider.current(city).await {
            Ok(weather) => weather,
            Err(err) => {
                warn!(city, error = %err, "weather lookup failed");
                writeln!(out, "{err}")?;
                if let Some(hint) = err.hint() {
                    writeln!(out, "{hint}")?;
                }
                writeln!(out, "{NO_DATA}")?;
                return Ok(None);
            }
        };

        writeln!(out, "{}", format_report(&weather))?;

        if let Some(history) = &self.history {
            match history.append(HistoryEntry::from_weather(city, &weather)) {
                Ok(()) => writeln!(out, "Weather data for {city} saved to history.")?,
                Err(err) => {
                    warn!(city, error = %format!("{err:#}"), "could not save history");
                    writeln!(out, "Could not save history: {err:#}")?;
                }
            }
        }

        Ok(Some(weather))
    }

    pub async fn run_batch<W: Write>(&self, cities: &[String], out: &mut W) -> io::Result<()> {
        info!(count = cities.len(), "batch lookup");
        writeln!(out, "Fetching weather for provided cities...\n")?;

        for city in cities {
            writeln!(out, "Fetching weather data for {city}...")?;
            self.lookup(city, out).await?;
        }

        writeln!(out, "\nAll done! Goodbye!")
    }

    /// Prompt loop; ends on `quit` (any case) or end of input.
    pub async fn run_interactive<R: BufRead, W: Write>(
        &self,
        mut input: R,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(out, "Welcome to Weather Dashboard!\n")?;
        writeln!(out, "Enter city names one at a time. Type 'quit' to exit.\n")?;

        let mut line = String::new();
        loop {
            write!(out, "Enter city name (or 'quit' to exit): ")?;
            out.flush()?;

            line.clear();
            let eof = input.read_line(&mut line)? == 0;
            let city = line.trim();

            if eof || city.eq_ignore_ascii_case("quit") {
                if eof {
                    writeln!(out)?;
                }
                writeln!(out, "\nThanks for using the weather app! Goodbye!")?;
                return Ok(());
            }

            if city.is_empty() {
                writeln!(out, "Please enter a valid city name.\n")?;
                continue;
            }

            writeln!(out, "Fetching weather data for {city}...\n")?;
            self.lookup(city, out).await?;
        }
    }
}
