//! Catppuccin Mocha colors for the dashboard.

use ratatui::style::Color;

pub const SURFACE0: Color = Color::Rgb(49, 50, 68); // #313244
pub const SURFACE1: Color = Color::Rgb(69, 71, 90); // #45475a
pub const TEXT: Color = Color::Rgb(205, 214, 244); // #cdd6f4
pub const SUBTEXT0: Color = Color::Rgb(166, 173, 200); // #a6adc8
pub const MAUVE: Color = Color::Rgb(203, 166, 247); // #cba6f7
pub const RED: Color = Color::Rgb(243, 139, 168); // #f38ba8
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // #f9e2af
pub const GREEN: Color = Color::Rgb(166, 227, 161); // #a6e3a1
pub const BLUE: Color = Color::Rgb(137, 180, 250); // #89b4fa

pub const PANEL_BORDER: Color = SURFACE1;
pub const PANEL_BORDER_ACTIVE: Color = MAUVE;
pub const STATUS_SUCCESS: Color = GREEN;
pub const STATUS_WARNING: Color = YELLOW;
pub const STATUS_ERROR: Color = RED;
pub const STATUS_PENDING: Color = BLUE;
