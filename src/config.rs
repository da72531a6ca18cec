//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! Specifically, we try to find a tocsin.toml, and if present we load settings
//! from there. This provides the dashboard link target, the narrow-terminal
//! breakpoint, and the scroll-tracking offsets.

use facet::Facet;
use std::fs;

#[derive(Facet, Clone)]
/// User preferences loaded from tocsin.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "http://localhost:8000".to_string())]
    /// Link target shown in the footer, injected at startup.
    pub dashboard_url: String,
    #[facet(default = 80)]
    /// Terminal width (columns) at or below which the sidebar becomes an
    /// overlay behind a menu toggle.
    pub narrow_width: u16,
    #[facet(default = 4)]
    /// Lines of lead before a section top counts as scrolled-to when
    /// deriving the active TOC entry.
    pub active_threshold: u16,
    #[facet(default = 1)]
    /// Lines of margin left above a heading when jumping to it from the TOC.
    pub scroll_margin: u16,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Config {
    #[must_use]
    /// Load configuration from tocsin.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("tocsin.toml") {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        facet_toml::from_str::<Self>("").unwrap()
    }
}
