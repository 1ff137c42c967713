mod app;
mod ui;

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use story_shuffle::config::Cli;
use story_shuffle::game::GameState;
use story_shuffle::puzzle::{default_story, load_story};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use app::App;
use ui::draw_ui;

const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let settings = Cli::parse().into_settings()?;
    let _guard = setup_logging(&settings.log_dir)?;
    tracing::debug!(?settings, "settings loaded");

    let story = match &settings.story_path {
        Some(path) => load_story(path)?,
        None => default_story()?,
    };
    let game = match settings.seed {
        Some(seed) => GameState::new(story, &mut StdRng::seed_from_u64(seed)),
        None => GameState::new(story, &mut rand::rng()),
    }
    .with_celebration_duration(settings.celebration);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(game);
    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    result?;

    if app.game.all_solved() {
        println!("\nCongratulations! You put the whole story back together.\n");
    } else {
        let (solved, total) = app.game.progress();
        println!("\nSolved {} of {} lines. The story will be waiting.\n", solved, total);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let mut layout = None;
        terminal.draw(|f| layout = draw_ui(f, app))?;
        if let Some(board) = &layout {
            app.scroll = board.scroll;
            app.reveal = None;
        }
        app.layout = layout;

        let timeout = app
            .scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(TICK, |wait| wait.min(TICK));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
        app.tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Logs go to a file; the terminal belongs to the UI.
fn setup_logging(log_dir: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "story-shuffle.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}
