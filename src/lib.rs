//! Scroll-synced terminal viewing for markdown manuals.
//!
//! tocsin renders a manual as a documentation page: a collapsible sidebar
//! table of contents, an expandable-section content pane with scroll-synced
//! active-entry highlighting, and viewport-triggered reveal of subsections.
//! On narrow terminals the sidebar becomes an overlay behind a menu toggle.

pub mod config;
pub mod controller;
pub mod outline;
pub mod section;
pub mod ui;
