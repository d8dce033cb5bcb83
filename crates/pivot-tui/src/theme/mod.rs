//! Centralized theme for the console.
//!
//! This module provides:
//! - `palette`: raw color constants
//! - `styles`: semantic style builder functions
//! - `icons`: glyphs with Nerd Font and plain Unicode variants

pub mod icons;
pub mod palette;
pub mod styles;
