//! The core state machine wiring reader input to page state transitions.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated
//! as the reader navigates. The controller owns every transient UI state the
//! page has: sidebar collapse, per-section expansion, the derived active TOC
//! entry, the scroll offset, and the reveal lifecycle of subsections. It also
//! owns the flattened layout of the content pane, the line-offset analog of
//! document flow, which every scroll-synced derivation is defined against.
//!
//! All state lives for exactly one viewing session; dropping the controller
//! discards it.

use crate::config::Config;
use crate::outline::Outline;
use ratatui::layout::Rect;

/// Rows reserved for the bordered header above the panes.
pub const HEADER_HEIGHT: u16 = 3;
/// Rows reserved for the bordered footer below the panes.
pub const FOOTER_HEIGHT: u16 = 3;
/// Columns the sidebar occupies when expanded in the wide layout.
pub const SIDEBAR_WIDTH: u16 = 30;
/// Ticks a subsection spends fading before it is fully shown.
pub const FADE_STEPS: u8 = 4;

/// Tracks the reveal lifecycle of one subsection.
///
/// ```text
/// Hidden -> Fading(FADE_STEPS) -> ... -> Fading(0) -> Shown
/// ```
///
/// A subsection starts fading the first time any of its lines enters the
/// viewport and never returns to `Hidden`; scrolling away leaves prior state
/// untouched.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Fade {
    /// Not yet scrolled into view; rendered fully dim.
    Hidden,
    /// Mid-reveal; rendered dim until the countdown reaches zero.
    Fading(u8),
    /// Fully revealed; rendered normally from here on.
    Shown,
}

/// One line of the flattened content pane.
#[derive(Clone)]
pub struct RenderLine {
    /// Text to display (heading title or raw body line).
    pub text: String,
    /// What the line is, for styling and hit dispatch.
    pub kind: LineKind,
}

/// Role of a render line within the page.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineKind {
    /// Heading row of a section; clicking it toggles the body.
    SectionHeading(usize),
    /// Heading row of a subsection.
    SubsectionHeading(usize),
    /// Body text, tagged with the enclosing subsection if any.
    Body(Option<usize>),
}

/// Screen regions recorded by the last draw, consulted for mouse dispatch.
#[derive(Default, Clone)]
pub struct HitRegions {
    /// The menu toggle button, present only in the narrow layout.
    pub menu_button: Option<Rect>,
    /// The sidebar pane or overlay, when visible.
    pub sidebar: Option<Rect>,
    /// Screen row to TOC entry index, for rows inside the sidebar.
    pub toc_rows: Vec<(u16, usize)>,
    /// Screen row to section index, for heading rows in the content pane.
    pub heading_rows: Vec<(u16, usize)>,
}

/// Owns all transient page state and applies the interaction rules.
#[allow(clippy::struct_excessive_bools)]
pub struct PageController {
    /// Parsed manual the page displays.
    pub outline: Outline,
    /// Wide-layout sidebar collapse flag.
    pub sidebar_collapsed: bool,
    /// Narrow-layout overlay visibility flag.
    pub sidebar_visible: bool,
    /// Whether the terminal is at or below the narrow breakpoint.
    pub narrow: bool,
    /// Per-section expansion flags; initialised to first-only.
    pub expanded: Vec<bool>,
    /// Derived: the TOC entry currently marked active, at most one.
    pub active_entry: Option<usize>,
    /// Content pane scroll offset in layout lines.
    pub scroll: usize,
    /// Per-subsection reveal state.
    pub fades: Vec<Fade>,
    /// Flattened content pane lines.
    pub layout: Vec<RenderLine>,
    /// Layout offset of each section heading, the offsetTop analog.
    pub section_tops: Vec<usize>,
    /// Layout span of each subsection, `None` while its section is collapsed.
    pub subsection_spans: Vec<Option<(usize, usize)>>,
    /// Regions recorded by the last draw for mouse dispatch.
    pub hits: HitRegions,
    /// Footer link target, injected from configuration at startup.
    pub dashboard_url: String,
    width: u16,
    height: u16,
    narrow_width: u16,
    active_threshold: usize,
    scroll_margin: usize,
}

impl PageController {
    #[must_use]
    /// Builds a controller for one manual at the given terminal size.
    ///
    /// Exactly the first section starts expanded; subsections already inside
    /// the initial viewport begin their reveal immediately, matching a page
    /// that animates on load.
    pub fn new(outline: Outline, cfg: &Config, width: u16, height: u16) -> Self {
        let mut expanded = vec![false; outline.sections.len()];
        if let Some(first) = expanded.first_mut() {
            *first = true;
        }
        let fades = vec![Fade::Hidden; outline.subsections.len()];

        let mut controller = Self {
            outline,
            sidebar_collapsed: false,
            sidebar_visible: false,
            narrow: width <= cfg.narrow_width,
            expanded,
            active_entry: None,
            scroll: 0,
            fades,
            layout: Vec::new(),
            section_tops: Vec::new(),
            subsection_spans: Vec::new(),
            hits: HitRegions::default(),
            dashboard_url: cfg.dashboard_url.clone(),
            width,
            height,
            narrow_width: cfg.narrow_width,
            active_threshold: usize::from(cfg.active_threshold),
            scroll_margin: usize::from(cfg.scroll_margin),
        };
        controller.rebuild_layout();
        controller.sync_active_entry();
        controller.reveal_in_viewport();
        controller
    }

    /// Lines of the content pane visible at once.
    #[must_use]
    pub fn content_height(&self) -> usize {
        usize::from(
            self.height
                .saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT)
                // Bordered content block eats one row top and bottom.
                .saturating_sub(2),
        )
    }

    /// Whether the narrow-layout menu toggle is part of the page.
    #[must_use]
    pub fn menu_toggle_present(&self) -> bool {
        self.narrow
    }

    /// Flips the sidebar between collapsed and expanded in the wide layout;
    /// the content pane widens and narrows in step. In the narrow layout the
    /// sidebar is an overlay, so this delegates to the menu toggle.
    pub fn toggle_sidebar(&mut self) {
        if self.narrow {
            self.toggle_menu();
        } else {
            self.sidebar_collapsed = !self.sidebar_collapsed;
        }
    }

    /// Flips the narrow-layout overlay sidebar. No effect in the wide layout,
    /// where the sidebar is a fixed pane.
    pub fn toggle_menu(&mut self) {
        if self.narrow {
            self.sidebar_visible = !self.sidebar_visible;
        }
    }

    /// Closes the overlay when the reader clicks outside it.
    pub fn click_outside(&mut self) {
        if self.narrow {
            self.sidebar_visible = false;
        }
    }

    /// Jumps to the anchor with the given slug: marks its TOC entry active,
    /// scrolls the target heading to `scroll_margin` lines below the pane
    /// top, and force-expands the enclosing section if collapsed. In the
    /// narrow layout the overlay closes. Unknown slugs are a no-op.
    pub fn select_toc_entry(&mut self, slug: &str) {
        let Some(anchor) = self.outline.resolve(slug) else {
            return;
        };
        if !self.expanded[anchor.section_index] {
            self.expanded[anchor.section_index] = true;
            self.rebuild_layout();
        }
        if self.narrow {
            self.sidebar_visible = false;
        }
        self.active_entry = Some(anchor.section_index);

        if let Some(top) = self.layout_line_of(anchor.line) {
            self.scroll = self.clamp_scroll(top.saturating_sub(self.scroll_margin));
        }
        self.reveal_in_viewport();
    }

    /// Flips one section's collapsed state. Purely local: other sections are
    /// untouched. Out-of-range indices are a no-op.
    pub fn toggle_section(&mut self, index: usize) {
        let Some(flag) = self.expanded.get_mut(index) else {
            return;
        };
        *flag = !*flag;
        self.rebuild_layout();
        self.scroll = self.clamp_scroll(self.scroll);
        self.sync_active_entry();
        self.reveal_in_viewport();
    }

    /// Scrolls to an absolute layout offset and rederives scroll-dependent
    /// state.
    pub fn scroll_to(&mut self, offset: usize) {
        self.scroll = self.clamp_scroll(offset);
        self.sync_active_entry();
        self.reveal_in_viewport();
    }

    /// Scrolls by a signed number of lines.
    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll.saturating_add_signed(delta);
        self.scroll_to(target);
    }

    /// Applies a terminal resize: recomputes the narrow breakpoint and
    /// re-clamps scroll-dependent state. Entering the narrow layout hides
    /// the sidebar behind the menu toggle; leaving it restores the pane.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let was_narrow = self.narrow;
        self.narrow = width <= self.narrow_width;
        if self.narrow != was_narrow {
            self.sidebar_visible = false;
        }
        self.scroll = self.clamp_scroll(self.scroll);
        self.sync_active_entry();
        self.reveal_in_viewport();
    }

    /// Recomputes the active TOC entry from the scroll offset: the last
    /// section in layout order whose top, less the activation threshold, is
    /// at or above the offset. Above the first section no entry is active.
    pub fn sync_active_entry(&mut self) {
        let reference = self.scroll + self.active_threshold;
        self.active_entry = self
            .section_tops
            .iter()
            .rposition(|&top| top <= reference);
    }

    /// Starts the reveal of every subsection with any line inside the
    /// current viewport. Already-revealed subsections are untouched, so
    /// scrolling away never hides anything.
    pub fn reveal_in_viewport(&mut self) {
        let view_top = self.scroll;
        let view_bottom = self.scroll + self.content_height();
        for (i, span) in self.subsection_spans.iter().enumerate() {
            let Some((top, end)) = span else { continue };
            if self.fades[i] == Fade::Hidden && *top < view_bottom && *end > view_top {
                self.fades[i] = Fade::Fading(FADE_STEPS);
            }
        }
    }

    /// Advances in-flight fades by one tick. Returns true if anything moved,
    /// so the caller knows a redraw is worthwhile.
    pub fn tick_fades(&mut self) -> bool {
        let mut changed = false;
        for fade in &mut self.fades {
            match *fade {
                Fade::Fading(0) => {
                    *fade = Fade::Shown;
                    changed = true;
                }
                Fade::Fading(n) => {
                    *fade = Fade::Fading(n - 1);
                    changed = true;
                }
                Fade::Hidden | Fade::Shown => {}
            }
        }
        changed
    }

    /// Whether a subsection currently renders dim.
    #[must_use]
    pub fn is_dim(&self, subsection_index: usize) -> bool {
        !matches!(self.fades.get(subsection_index), Some(Fade::Shown))
    }

    /// Furthest the pane can scroll while keeping content on screen.
    #[must_use]
    pub fn max_scroll(&self) -> usize {
        self.layout.len().saturating_sub(self.content_height())
    }

    fn clamp_scroll(&self, offset: usize) -> usize {
        offset.min(self.max_scroll())
    }

    /// Layout offset of the render line for a source heading line.
    fn layout_line_of(&self, source_line: usize) -> Option<usize> {
        if let Some(i) = self
            .outline
            .sections
            .iter()
            .position(|s| s.line_start == source_line)
        {
            return self.section_tops.get(i).copied();
        }
        self.outline
            .subsections
            .iter()
            .position(|s| s.line_start == source_line)
            .and_then(|i| self.subsection_spans[i].map(|(top, _)| top))
    }

    /// Flattens the outline into content pane lines, honouring collapsed
    /// sections, and records every heading's layout offset.
    fn rebuild_layout(&mut self) {
        let mut lines: Vec<RenderLine> = Vec::new();
        let mut section_tops = vec![0; self.outline.sections.len()];
        let mut subsection_spans = vec![None; self.outline.subsections.len()];

        for (i, section) in self.outline.sections.iter().enumerate() {
            section_tops[i] = lines.len();
            lines.push(RenderLine {
                text: section.title.clone(),
                kind: LineKind::SectionHeading(i),
            });
            if !self.expanded[i] {
                continue;
            }

            // A section's own body runs to the next section heading; nested
            // sections render as their own blocks.
            let own_end = self
                .outline
                .sections
                .get(i + 1)
                .map_or(self.outline.lines.len(), |s| s.line_start);

            for line_no in (section.line_start + 1)..own_end {
                if let Some(si) = self
                    .outline
                    .subsections
                    .iter()
                    .position(|s| s.line_start == line_no)
                {
                    subsection_spans[si] = Some((lines.len(), 0));
                    lines.push(RenderLine {
                        text: self.outline.subsections[si].title.clone(),
                        kind: LineKind::SubsectionHeading(si),
                    });
                } else {
                    let enclosing = self
                        .outline
                        .subsections
                        .iter()
                        .position(|s| s.line_start < line_no && line_no < s.line_end);
                    lines.push(RenderLine {
                        text: self
                            .outline
                            .lines
                            .get(line_no)
                            .cloned()
                            .unwrap_or_default(),
                        kind: LineKind::Body(enclosing),
                    });
                }
            }

            for (si, sub) in self.outline.subsections.iter().enumerate() {
                if let Some((top, _)) = subsection_spans[si] {
                    if sub.section_index == i {
                        let len = sub.line_end.saturating_sub(sub.line_start).max(1);
                        subsection_spans[si] = Some((top, top + len));
                    }
                }
            }
        }

        self.layout = lines;
        self.section_tops = section_tops;
        self.subsection_spans = subsection_spans;
    }
}

#[cfg(test)]
#[path = "tests/controller.rs"]
mod tests;
