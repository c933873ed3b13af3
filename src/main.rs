// src/main.rs
use std::error::Error;
use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CEvent, KeyEvent, KeyEventKind};
use crossterm::{execute, terminal::{EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter, prelude::*, Registry};

mod api;
mod app;
mod checks;
mod config;
mod copy;
mod debounce;
mod model;
mod render;
mod ui;

use api::HttpBackend;
use app::App;
use config::load_settings;
use copy::SystemClipboard;
use model::AppEvent;
use ui::draw_ui;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = load_settings();

    // stdout belongs to the terminal UI, so tracing only goes to a file with --debug
    if settings.debug {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let fmt_layer = fmt::layer()
            .with_writer(move || file.try_clone().expect("log file clone"))
            .with_target(false)
            .with_ansi(false);
        Registry::default().with(filter).with(fmt_layer).init();
        info!("Tracing initialized to {} (debug)", settings.log_file.display());
    }

    info!("Starting Sentinel TUI against {}", settings.base_url);

    let backend = Arc::new(HttpBackend::new(&settings.base_url, settings.request_timeout)?);

    // Channel for background tasks -> UI
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut app = App::new(backend, Box::new(SystemClipboard), tx, &settings);

    // Terminal setup
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    crossterm::terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    loop {
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            terminal.draw(|f| draw_ui(f, &mut app)).ok();
            last_tick = Instant::now();
        }

        // Drain background events
        while let Ok(ev) = rx.try_recv() {
            app.handle_event(ev);
        }

        // crossterm::event::poll blocks this worker; spawned tasks keep running on the others
        if event::poll(Duration::from_millis(20))? {
            if let CEvent::Key(KeyEvent { code, modifiers, kind, .. }) = event::read()? {
                if kind != KeyEventKind::Release {
                    app.handle_key(code, modifiers);
                }
            }
        }

        if app.quit {
            break;
        }
    }

    // Cleanup
    crossterm::terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("Exiting Sentinel TUI");
    Ok(())
}
