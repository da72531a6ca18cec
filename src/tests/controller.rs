use super::{Fade, PageController};
use crate::config::Config;
use crate::outline::{self, Outline};
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = "# Guide\n\nWelcome to the guide.\n\n## Install\n\nInstall body one.\nInstall body two.\n\n### Linux\n\nLinux steps here.\n\n## Usage\n\nUsage body.\n\n### Basics\n\nBasic usage notes.\n\n## FAQ\n\nNothing yet.\n";

fn sample_outline() -> Outline {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{SAMPLE}").unwrap();
    outline::extract_outline(file.path()).unwrap()
}

fn defaults() -> Config {
    facet_toml::from_str::<Config>("").unwrap()
}

fn wide_app() -> PageController {
    PageController::new(sample_outline(), &defaults(), 120, 40)
}

fn narrow_app() -> PageController {
    PageController::new(sample_outline(), &defaults(), 50, 40)
}

#[test]
fn test_first_section_starts_expanded_rest_collapsed() {
    let app = wide_app();
    assert_eq!(app.expanded.len(), 4);
    assert!(app.expanded[0], "first section should start expanded");
    assert!(
        app.expanded[1..].iter().all(|&e| !e),
        "all later sections should start collapsed"
    );
}

#[test]
fn test_sidebar_toggle_parity() {
    for n in [1_usize, 2, 5, 8] {
        let mut app = wide_app();
        let initial = app.sidebar_collapsed;
        for _ in 0..n {
            app.toggle_sidebar();
        }
        assert_eq!(
            app.sidebar_collapsed,
            initial ^ (n % 2 == 1),
            "{n} toggles should land on initial XOR (n mod 2)"
        );
    }
}

#[test]
fn test_narrow_toggle_sidebar_drives_overlay() {
    let mut app = narrow_app();
    assert!(!app.sidebar_visible);
    app.toggle_sidebar();
    assert!(app.sidebar_visible, "narrow toggle should open the overlay");
    assert!(!app.sidebar_collapsed, "wide collapse flag should be untouched");
}

#[test]
fn test_select_toc_entry_marks_exactly_one_active() {
    let mut app = wide_app();
    app.select_toc_entry("usage");
    assert_eq!(app.active_entry, Some(2));
    app.select_toc_entry("install");
    assert_eq!(app.active_entry, Some(1), "previous active must be cleared");
}

#[test]
fn test_select_toc_entry_expands_collapsed_target() {
    let mut app = wide_app();
    assert!(!app.expanded[2]);
    app.select_toc_entry("usage");
    assert!(app.expanded[2], "jumping to a collapsed section must expand it");
    // Other sections keep their state.
    assert!(app.expanded[0]);
    assert!(!app.expanded[1]);
    assert!(!app.expanded[3]);
}

#[test]
fn test_select_unknown_slug_is_noop() {
    let mut app = wide_app();
    app.select_toc_entry("usage");
    let scroll = app.scroll;
    let active = app.active_entry;
    let expanded = app.expanded.clone();

    app.select_toc_entry("no-such-anchor");

    assert_eq!(app.scroll, scroll);
    assert_eq!(app.active_entry, active);
    assert_eq!(app.expanded, expanded);
}

#[test]
fn test_scroll_near_section_top_activates_it() {
    // Height 14 leaves a 6-line pane, so the layout is scrollable.
    let mut app = PageController::new(sample_outline(), &defaults(), 120, 14);
    app.toggle_section(1);
    app.toggle_section(2);

    // Usage heading sits at layout line 13; stopping 2 lines short is
    // within the 4-line activation threshold.
    let usage_top = app.section_tops[2];
    app.scroll_to(usage_top - 2);
    assert_eq!(app.active_entry, Some(2));

    app.scroll_to(0);
    assert!(
        app.active_entry.is_some_and(|i| i < 2),
        "back at the top an earlier section is active again"
    );
}

#[test]
fn test_toggle_section_is_local_and_reversible() {
    let mut app = wide_app();
    let initial_len = app.layout.len();

    app.toggle_section(1);
    assert!(app.expanded[1]);
    assert!(app.layout.len() > initial_len, "expanding adds body lines");

    app.toggle_section(1);
    assert!(!app.expanded[1]);
    assert_eq!(app.layout.len(), initial_len);

    app.toggle_section(99);
    assert_eq!(app.layout.len(), initial_len, "out of range is a no-op");
}

#[test]
fn test_menu_toggle_present_only_below_breakpoint() {
    assert!(narrow_app().menu_toggle_present());
    assert!(!wide_app().menu_toggle_present());

    let mut app = wide_app();
    app.handle_resize(50, 40);
    assert!(app.menu_toggle_present(), "resize below breakpoint adds it");
    app.handle_resize(120, 40);
    assert!(!app.menu_toggle_present(), "resize above removes it");
}

#[test]
fn test_click_outside_closes_open_overlay() {
    let mut app = narrow_app();
    app.toggle_menu();
    assert!(app.sidebar_visible);
    app.click_outside();
    assert!(!app.sidebar_visible);

    // Wide layout ignores it.
    let mut app = wide_app();
    app.click_outside();
    assert!(!app.sidebar_collapsed);
}

#[test]
fn test_select_in_narrow_mode_closes_overlay() {
    let mut app = narrow_app();
    app.toggle_menu();
    assert!(app.sidebar_visible);
    app.select_toc_entry("usage");
    assert!(!app.sidebar_visible, "jumping from the TOC closes the overlay");
}

#[test]
fn test_subsection_reveal_is_permanent() {
    // 4-line pane: the Linux subsection starts outside the viewport.
    let mut app = PageController::new(sample_outline(), &defaults(), 120, 12);
    assert_eq!(app.fades, vec![Fade::Hidden, Fade::Hidden]);

    app.select_toc_entry("linux");
    assert!(
        matches!(app.fades[0], Fade::Fading(_)),
        "scrolling a subsection into view starts its fade"
    );
    assert!(app.is_dim(0));

    while app.tick_fades() {}
    assert_eq!(app.fades[0], Fade::Shown);
    assert!(!app.is_dim(0));

    app.scroll_to(0);
    assert_eq!(
        app.fades[0],
        Fade::Shown,
        "scrolling away must not hide a revealed subsection"
    );
}

#[test]
fn test_scroll_clamps_to_layout() {
    let mut app = PageController::new(sample_outline(), &defaults(), 120, 12);
    app.scroll_to(10_000);
    assert_eq!(app.scroll, app.max_scroll());
    app.scroll_by(-10_000);
    assert_eq!(app.scroll, 0);
}
