//! Full-screen terminal dashboard.
//!
//! One city input, a scrollable report and a status bar. Rendering uses
//! ratatui over crossterm.

mod state;
mod theme;
mod ui;

use std::{io, time::Duration};

use chrono::Local;
use crossterm::{
    cursor::Show,
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tracing::{info, warn};
use weather_core::{HistoryEntry, HistoryStore, WeatherProvider};

use state::{Action, DashboardState};

/// Take over the terminal until the user quits.
pub async fn run(
    provider: &dyn WeatherProvider,
    history: Option<HistoryStore>,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    // Restores the terminal on every exit path, including failed setup below.
    let _restore = RestoreGuard::new(restore_terminal);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    event_loop(&mut terminal, provider, history.as_ref()).await
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        warn!(error = %e, "failed to leave alternate screen");
    }
}

/// Runs its closure once when dropped.
struct RestoreGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore: Some(restore) }
    }
}

impl<F: FnOnce()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    provider: &dyn WeatherProvider,
    history: Option<&HistoryStore>,
) -> anyhow::Result<()> {
    let mut state = DashboardState::default();

    loop {
        terminal.draw(|f| ui::render(f, &state))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match state.handle_key(key) {
            Action::None => {}
            Action::Quit => break,
            Action::Fetch(city) => {
                state.begin_fetch();
                terminal.draw(|f| ui::render(f, &state))?;

                info!(%city, "dashboard lookup");
                let result = provider.current(&city).await;

                let saved = match (&result, history) {
                    (Ok(weather), Some(store)) => {
                        Some(store.append(HistoryEntry::from_weather(&city, weather)))
                    }
                    _ => None,
                };

                state.finish(&city, result, Local::now().time());

                match saved {
                    Some(Ok(())) => {
                        state.note(&format!("Weather data for {city} saved to history."));
                    }
                    Some(Err(err)) => {
                        warn!(%city, error = %format!("{err:#}"), "could not save history");
                        state.note(&format!("Could not save history: {err:#}"));
                    }
                    None => {}
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn enter_screen_unavailable() -> io::Result<()> {
        Err(io::Error::other("alternate screen unavailable"))
    }

    fn failing_setup(restored: &Cell<u32>) -> io::Result<()> {
        let _restore = RestoreGuard::new(|| restored.set(restored.get() + 1));
        enter_screen_unavailable()?;
        Ok(())
    }

    #[test]
    fn restore_runs_when_setup_fails() {
        let restored = Cell::new(0);

        assert!(failing_setup(&restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn restore_runs_once_on_normal_exit() {
        let restored = Cell::new(0);
        {
            let _restore = RestoreGuard::new(|| restored.set(restored.get() + 1));
            assert_eq!(restored.get(), 0);
        }
        assert_eq!(restored.get(), 1);
    }
}
