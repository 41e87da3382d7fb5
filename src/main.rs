//! ptop: minimal terminal process viewer.
//!
//! A sortable, scrollable list of live processes with a modal detail popup.
//!
//! Install: `cargo install ptop`
//! Run: `ptop`

use ptop::{app, collector, ui};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::stdout;
use std::time::Duration;

use app::App;

/// ptop: minimal terminal process viewer
#[derive(Parser, Debug)]
#[command(name = "ptop")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Sortable, scrollable process list with a detail popup", long_about = None)]
struct Cli {
    /// Refresh timeout in milliseconds when idle
    #[arg(short, long, default_value = "800")]
    refresh: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !collector::is_available() {
        bail!("process table is not available on this system");
    }

    // Setup terminal
    enable_raw_mode().context("failed to enable raw terminal mode")?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &cli);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, cli: &Cli) -> Result<()> {
    let mut app = App::new();
    let idle_timeout = Duration::from_millis(cli.refresh);

    loop {
        // The popup shows a point-in-time copy; while it is open the
        // snapshot is not refreshed.
        if app.detail.is_none() {
            let size = terminal.size()?;
            app.visible_rows = ui::visible_rows(Rect::new(0, 0, size.width, size.height));
            app.apply_snapshot(collector::capture()?);
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        // List view polls with a bounded wait so live data refreshes even
        // without input; the popup blocks until dismissed.
        let pending = if app.detail.is_some() {
            Some(event::read()?)
        } else if event::poll(idle_timeout)? {
            Some(event::read()?)
        } else {
            None
        };

        if let Some(Event::Key(key)) = pending {
            if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}
