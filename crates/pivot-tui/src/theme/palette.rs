//! Color palette for the console.

use ratatui::style::Color;

use pivot_core::Rgb;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Rgb(10, 12, 16); // Terminal background
pub const CARD_BG: Color = Color::Rgb(18, 21, 28); // Panel backgrounds
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43); // Modal backgrounds
pub const SELECTED_BG: Color = Color::Rgb(36, 44, 58); // Selected list row

// --- Borders ---
pub const BORDER_DIM: Color = Color::Rgb(45, 51, 59);
pub const BORDER_ACTIVE: Color = Color::Rgb(88, 166, 255);

// --- Accent ---
pub const ACCENT: Color = Color::Rgb(88, 166, 255);

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::Rgb(201, 209, 217);
pub const TEXT_SECONDARY: Color = Color::Rgb(125, 133, 144);
pub const TEXT_MUTED: Color = Color::Rgb(72, 79, 88);
pub const TEXT_BRIGHT: Color = Color::Rgb(240, 246, 252);

// --- Status ---
pub const STATUS_GREEN: Color = Color::Rgb(16, 185, 129);
pub const STATUS_RED: Color = Color::Rgb(244, 63, 94);
pub const STATUS_AMBER: Color = Color::Rgb(245, 158, 11);
pub const STATUS_BLUE: Color = Color::Rgb(56, 189, 248);

// --- Effects ---
pub const SHADOW: Color = Color::Rgb(5, 6, 8);

// --- Form inputs ---
pub const INPUT_BG: Color = Color::Rgb(40, 40, 50);
pub const INPUT_FOCUSED_BG: Color = Color::Rgb(60, 60, 80);

/// Terminal color for a topology color
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Color for a methodology risk level
pub fn risk(level: &str) -> Color {
    match level.to_ascii_lowercase().as_str() {
        "critical" => STATUS_RED,
        "high" => STATUS_AMBER,
        "medium" => STATUS_BLUE,
        "low" => STATUS_GREEN,
        _ => TEXT_SECONDARY,
    }
}
