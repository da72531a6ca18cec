//! The UI renders the controller state into header, sidebar, and content.
//!
//! The draw function picks the wide two-pane layout or the narrow overlay
//! layout from the controller's breakpoint state. While drawing it records
//! the screen regions of everything clickable (menu button, TOC rows,
//! section headings) so the event loop can dispatch mouse clicks without
//! re-deriving geometry.

use crate::controller::{
    HitRegions, LineKind, PageController, FOOTER_HEIGHT, HEADER_HEIGHT, SIDEBAR_WIDTH,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Renders one frame and refreshes the controller's hit regions.
pub fn draw(f: &mut Frame, app: &mut PageController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(f.area());

    let mut hits = HitRegions::default();

    draw_header(f, app, chunks[0], &mut hits);

    if app.narrow {
        draw_content(f, app, chunks[1], &mut hits);
        if app.sidebar_visible {
            let overlay = Rect {
                width: SIDEBAR_WIDTH.min(chunks[1].width),
                ..chunks[1]
            };
            f.render_widget(Clear, overlay);
            draw_sidebar(f, app, overlay, &mut hits);
        }
    } else if app.sidebar_collapsed {
        draw_content(f, app, chunks[1], &mut hits);
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(SIDEBAR_WIDTH.min(chunks[1].width / 2)),
                Constraint::Min(0),
            ])
            .split(chunks[1]);
        draw_sidebar(f, app, cols[0], &mut hits);
        draw_content(f, app, cols[1], &mut hits);
    }

    draw_footer(f, app, chunks[2]);

    app.hits = hits;
}

fn draw_header(f: &mut Frame, app: &PageController, area: Rect, hits: &mut HitRegions) {
    let title = app.outline.title();
    let mut spans = vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if app.menu_toggle_present() {
        let label = " [≡ menu] ";
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            label,
            Style::default().add_modifier(Modifier::REVERSED),
        ));
        // Button sits right after the title inside the border.
        let title_width = u16::try_from(app.outline.title().chars().count()).unwrap_or(u16::MAX);
        let label_width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
        let x = (area.x + 1 + title_width + 2).min(area.right().saturating_sub(1));
        hits.menu_button = Some(Rect {
            x,
            y: area.y + 1,
            width: label_width.min(area.right().saturating_sub(x)),
            height: 1,
        });
    }

    let header =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_sidebar(f: &mut Frame, app: &PageController, area: Rect, hits: &mut HitRegions) {
    let block = Block::default().borders(Borders::ALL).title("Contents");
    let inner = block.inner(area);

    let items: Vec<ListItem> = app
        .outline
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let indent = "  ".repeat(section.level.saturating_sub(1));
            let style = if app.active_entry == Some(i) {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(indent),
                Span::styled(section.title.clone(), style),
            ]))
        })
        .collect();

    let visible_rows = app.outline.sections.len().min(usize::from(inner.height));
    for i in 0..visible_rows {
        let y = inner.y + u16::try_from(i).unwrap_or(u16::MAX);
        hits.toc_rows.push((y, i));
    }
    hits.sidebar = Some(area);

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

fn draw_content(f: &mut Frame, app: &PageController, area: Rect, hits: &mut HitRegions) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);

    let visible = app
        .layout
        .iter()
        .skip(app.scroll)
        .take(usize::from(inner.height));

    let mut lines: Vec<Line> = Vec::new();
    for (row, render_line) in visible.enumerate() {
        let y = inner.y + u16::try_from(row).unwrap_or(u16::MAX);
        let line = match render_line.kind {
            LineKind::SectionHeading(i) => {
                hits.heading_rows.push((y, i));
                let marker = if app.expanded.get(i).copied().unwrap_or(false) {
                    "▾ "
                } else {
                    "▸ "
                };
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        render_line.text.clone(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            }
            LineKind::SubsectionHeading(i) => {
                let style = if app.is_dim(i) {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                Line::from(Span::styled(render_line.text.clone(), style))
            }
            LineKind::Body(enclosing) => {
                let dim = enclosing.is_some_and(|i| app.is_dim(i));
                let style = if dim {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(render_line.text.clone(), style))
            }
        };
        lines.push(line);
    }

    let content = Paragraph::new(lines).block(block);
    f.render_widget(content, area);
}

fn draw_footer(f: &mut Frame, app: &PageController, area: Rect) {
    let help = if app.narrow {
        "↑/↓ Scroll | m: Menu | Tab: Next section | q: Quit"
    } else {
        "↑/↓ Scroll | b: Sidebar | Tab/BackTab: Sections | q: Quit"
    };
    let line = Line::from(vec![
        Span::raw(help),
        Span::raw("  Dashboard: "),
        Span::styled(
            app.dashboard_url.clone(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ]);
    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
