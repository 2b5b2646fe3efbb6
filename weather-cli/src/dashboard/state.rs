use chrono::NaiveTime;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::style::Color;
use weather_core::{CurrentWeather, WeatherError, format_report};

use super::theme;

const PAGE: u16 = 10;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Fetch(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    Warning(String),
    Fetching,
    Loaded { city: String, at: NaiveTime },
    Failed,
}

impl Status {
    pub fn text(&self) -> String {
        match self {
            Status::Ready => "Ready".to_string(),
            Status::Warning(msg) => msg.clone(),
            Status::Fetching => "Fetching weather...".to_string(),
            Status::Loaded { city, at } => {
                format!("Weather for {city} loaded • {}", at.format("%H:%M:%S"))
            }
            Status::Failed => "Error fetching data".to_string(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Status::Ready => theme::TEXT,
            Status::Warning(_) => theme::STATUS_WARNING,
            Status::Fetching => theme::STATUS_PENDING,
            Status::Loaded { .. } => theme::STATUS_SUCCESS,
            Status::Failed => theme::STATUS_ERROR,
        }
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub input: String,
    pub result: String,
    pub status: Status,
    pub scroll: u16,
}

impl DashboardState {
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }

        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
                Action::None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                Action::None
            }
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll_by(1);
                Action::None
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(PAGE);
                Action::None
            }
            KeyCode::PageDown => {
                self.scroll_by(PAGE);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn submit(&mut self) -> Action {
        let city = self.input.trim();
        if city.is_empty() {
            self.status = Status::Warning("Please enter a city name!".to_string());
            return Action::None;
        }
        Action::Fetch(city.to_string())
    }

    fn scroll_by(&mut self, lines: u16) {
        let max = u16::try_from(self.result.lines().count()).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(lines).min(max);
    }

    pub fn begin_fetch(&mut self) {
        self.status = Status::Fetching;
    }

    pub fn finish(
        &mut self,
        city: &str,
        result: Result<CurrentWeather, WeatherError>,
        now: NaiveTime,
    ) {
        self.scroll = 0;
        match result {
            Ok(weather) => {
                self.result = format_report(&weather);
                self.status = Status::Loaded { city: city.to_string(), at: now };
            }
            Err(err) => {
                let mut text = format!(
                    "❌ Could not fetch weather for '{city}'.\n\
                     Check the city name or your internet connection.\n\n{err}\n"
                );
                if let Some(hint) = err.hint() {
                    text.push_str(hint);
                    text.push('\n');
                }
                self.result = text;
                self.status = Status::Failed;
            }
        }
    }

    pub fn note(&mut self, line: &str) {
        self.result.push('\n');
        self.result.push_str(line);
        self.result.push('\n');
    }
}
