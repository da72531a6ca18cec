//! tocsin: a scroll-synced terminal viewer for markdown manuals.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::Position;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tocsin::controller::PageController;
use tocsin::{config, outline, ui};

/// Interval between animation ticks while idle.
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "tocsin")]
#[command(about = "Scroll-synced terminal viewer for markdown manuals", long_about = None)]
struct Args {
    /// Files or directories to view
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Override the dashboard link shown in the footer
    #[arg(long, value_name = "URL")]
    dashboard_url: Option<String>,

    /// Print the table of contents as JSON and exit
    #[arg(long)]
    outline: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if let Some(url) = args.dashboard_url {
        cfg.dashboard_url = url;
    }

    let documents = outline::find_documents(args.paths, &cfg.file_extensions)?;

    let Some(document) = documents.first() else {
        eprintln!("No matching files found");
        return Ok(());
    };

    let parsed = outline::extract_outline(document)?;

    if parsed.sections.is_empty() {
        eprintln!("No sections found in {}", document.display());
        return Ok(());
    }

    if args.outline {
        let export = outline::TocExport {
            path: &parsed.path,
            sections: &parsed.sections,
            subsections: &parsed.subsections,
        };
        let json = serde_json::to_string_pretty(&export).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    run_tui(parsed, &cfg)
}

fn run_tui(parsed: outline::Outline, cfg: &config::Config) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = PageController::new(parsed, cfg, size.width, size.height);

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut PageController,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(TICK)? {
            app.tick_fades();
            continue;
        }

        match event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Up => app.scroll_by(-1),
                KeyCode::Down => app.scroll_by(1),
                KeyCode::PageUp => app.scroll_by(-page_step(app)),
                KeyCode::PageDown => app.scroll_by(page_step(app)),
                KeyCode::Home => app.scroll_to(0),
                KeyCode::End => app.scroll_to(app.max_scroll()),
                KeyCode::Char('b') => app.toggle_sidebar(),
                KeyCode::Char('m') => app.toggle_menu(),
                KeyCode::Tab => step_section(app, 1),
                KeyCode::BackTab => step_section(app, -1),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => app.scroll_by(-3),
                MouseEventKind::ScrollDown => app.scroll_by(3),
                MouseEventKind::Down(MouseButton::Left) => {
                    dispatch_click(app, mouse.column, mouse.row);
                }
                _ => {}
            },
            Event::Resize(width, height) => app.handle_resize(width, height),
            _ => {}
        }
    }
}

fn page_step(app: &PageController) -> isize {
    isize::try_from(app.content_height().max(1)).unwrap_or(1)
}

/// Tab order over the TOC: activates the entry after (or before) the current
/// active one, wrapping at the ends.
fn step_section(app: &mut PageController, direction: isize) {
    let count = app.outline.sections.len();
    if count == 0 {
        return;
    }
    let next = match (app.active_entry, direction >= 0) {
        (Some(i), true) => (i + 1) % count,
        (Some(i), false) => i.checked_sub(1).unwrap_or(count - 1),
        (None, true) => 0,
        (None, false) => count - 1,
    };
    let slug = app.outline.sections[next].slug.clone();
    app.select_toc_entry(&slug);
}

/// Routes a left click through the hit regions recorded by the last draw:
/// menu button, then TOC rows, then section headings, then (narrow layout)
/// anywhere outside the open sidebar, which closes it.
fn dispatch_click(app: &mut PageController, column: u16, row: u16) {
    let position = Position::new(column, row);
    let hits = app.hits.clone();

    if let Some(button) = hits.menu_button {
        if button.contains(position) {
            app.toggle_menu();
            return;
        }
    }

    if let Some(sidebar) = hits.sidebar {
        if sidebar.contains(position) {
            if let Some(&(_, entry)) = hits.toc_rows.iter().find(|(y, _)| *y == row) {
                let slug = app.outline.sections[entry].slug.clone();
                app.select_toc_entry(&slug);
            }
            return;
        }
    }

    if app.narrow && app.sidebar_visible {
        app.click_outside();
        return;
    }

    if let Some(&(_, section)) = hits.heading_rows.iter().find(|(y, _)| *y == row) {
        app.toggle_section(section);
    }
}
