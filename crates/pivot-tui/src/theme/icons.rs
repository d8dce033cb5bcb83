//! Icon set for the TUI.
//!
//! Provides `IconSet` which resolves icons at runtime based on `IconMode`.
//! - `IconMode::Unicode`: safe characters that work in all terminals
//! - `IconMode::NerdFonts`: Nerd Font glyphs (requires a patched font)

use pivot_app::config::IconMode;
use pivot_core::{style_for_type, AssetKind};

/// Runtime icon resolver.
///
/// Created from `IconMode`, returns the appropriate icon string for each
/// icon slot based on the configured mode.
#[derive(Debug, Clone, Copy)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Icon for an asset type.
    ///
    /// Unicode mode uses the topology style icon so the list and the
    /// diagram agree.
    pub fn asset(&self, asset_type: &str) -> &'static str {
        match self.mode {
            IconMode::Unicode => style_for_type(asset_type).icon,
            IconMode::NerdFonts => match AssetKind::parse(asset_type) {
                AssetKind::NetworkSegment => "\u{f0e8}", // nf-fa-sitemap
                AssetKind::NetworkInterface => "\u{f1eb}", // nf-fa-wifi
                AssetKind::Firewall => "\u{f3ed}",       // nf-fa-shield
                AssetKind::Router => "\u{f0ec}",         // nf-fa-exchange
                AssetKind::Host => "\u{f108}",           // nf-fa-desktop
                AssetKind::Service => "\u{f013}",        // nf-fa-cog
                AssetKind::WebApplication => "\u{f0ac}", // nf-fa-globe
                AssetKind::Database => "\u{f1c0}",       // nf-fa-database
                AssetKind::DomainController => "\u{f19c}", // nf-fa-university
                AssetKind::Credential => "\u{f084}",     // nf-fa-key
                AssetKind::UserAccount => "\u{f007}",    // nf-fa-user
                AssetKind::Group => "\u{f0c0}",          // nf-fa-users
                AssetKind::Vulnerability => "\u{f188}",  // nf-fa-bug
                _ => style_for_type(asset_type).icon,
            },
        }
    }

    pub fn check(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f00c}", // nf-fa-check
            IconMode::Unicode => "✓",
        }
    }

    pub fn cross(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f00d}", // nf-fa-times
            IconMode::Unicode => "✗",
        }
    }

    pub fn alert(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f071}", // nf-fa-warning
            IconMode::Unicode => "\u{26a0}",   // ⚠
        }
    }

    pub fn info(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f05a}", // nf-fa-info_circle
            IconMode::Unicode => "ℹ",
        }
    }

    pub fn terminal(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f120}", // nf-fa-terminal
            IconMode::Unicode => "\u{276f}",   // ❯
        }
    }

    pub fn batch(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f0c5}", // nf-fa-copy
            IconMode::Unicode => "⧉",
        }
    }

    pub fn filter(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f0b0}", // nf-fa-filter
            IconMode::Unicode => "⌕",
        }
    }

    pub fn refresh(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f021}", // nf-fa-refresh
            IconMode::Unicode => "↻",
        }
    }
}
