//! # Primer CLI Entry Point
//!
//! This is the main entry point for the Primer TUI application.
//!
//! ## Overview
//!
//! Primer is a terminal lesson browser. The left pane lists lesson topics by
//! category; opening a lesson loads it in the background and shows it in the
//! right pane.
//!
//! ## Usage
//!
//! ```bash
//! # Browse lessons
//! primer
//!
//! # Print the lesson menu and exit
//! primer --list
//!
//! # Print one lesson and exit
//! primer --open 5_Hooks/UseState
//!
//! # Ignore lesson loads that finish after a newer one was requested
//! primer --discard-stale
//! ```
//!
//! ## Key Bindings
//!
//! ### Topics (left panel)
//! - `q` / `Q` - Quit the application
//! - `j` / `Down` - Move selection down
//! - `k` / `Up` - Move selection up
//! - `Enter` - Open the selected lesson (on a category: jump to its first lesson)
//! - `Tab` - Focus the lesson panel
//! - `t` - Next theme
//! - `i` - Show/hide help
//!
//! ### Lesson (right panel)
//! - `j` / `k` - Scroll down/up by line
//! - `g` / `G` - Jump to top/bottom
//! - `Esc` / `q` - Return focus to the topics panel

use primer::catalog::{humanize, Catalog};
use primer::lesson::{LessonKey, LessonRegistry, Resolution, Selector};
use primer::logging;
use primer::ui;
use primer::ui::app::Action;
use primer::ui::config::Config;
use primer::ui::theme::Theme;
use primer::ui::App;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fmt::Write as _;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Primer - browse lessons on components, state, hooks and styling
#[derive(Parser, Debug)]
#[command(name = "primer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A terminal lesson browser", long_about = None)]
struct Args {
    /// Print the lesson menu and exit
    #[arg(long, conflicts_with = "open")]
    list: bool,

    /// Print a single lesson (CATEGORY/LESSON) and exit
    #[arg(long, value_name = "CATEGORY/LESSON")]
    open: Option<String>,

    /// Theme to use for this session (overrides the config file)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Ignore lesson loads that finish after a newer one was requested
    #[arg(long)]
    discard_stale: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Directory for the log file
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    let _ = panic::take_hook();

    result
}

async fn run_application(args: Args) -> Result<()> {
    let log_dir = match args.log_dir.clone() {
        Some(dir) => Ok(dir),
        None => logging::default_log_dir(),
    };
    let _log_guard = match log_dir.and_then(|dir| logging::init(&dir, &args.log_level)) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    let mut config = Config::load();
    let theme = select_theme(args.theme.as_deref().unwrap_or(&config.theme));

    let catalog = Catalog::builtin();
    let registry = LessonRegistry::builtin();
    for key in registry.missing_from(&catalog) {
        tracing::warn!(%key, "catalog lists a lesson with no registered loader");
    }
    for key in registry.unlisted(&catalog) {
        tracing::warn!(%key, "registered lesson is not listed in the catalog");
    }

    if args.list {
        print!("{}", format_catalog(&catalog, &registry));
        return Ok(());
    }

    if let Some(target) = args.open.as_deref() {
        let text = open_lesson(&catalog, &registry, target).await?;
        print!("{}", text);
        return Ok(());
    }

    let mut app = App::new(catalog, theme);
    app.discard_stale = args.discard_stale || config.discard_stale;
    let (mut selector, mut resolutions) = Selector::new(Arc::new(registry));

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    tracing::info!(
        lessons = app.catalog.lesson_count(),
        discard_stale = app.discard_stale,
        "starting lesson browser"
    );

    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(
        &mut terminal,
        &mut app,
        &mut selector,
        &mut resolutions,
        &mut event_reader,
        &mut config,
    );

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    Ok(())
}

/// Look up a theme by name, falling back to the default.
fn select_theme(name: &str) -> Theme {
    match Theme::by_name(name) {
        Some(theme) => theme.clone(),
        None => {
            tracing::warn!(theme = name, "unknown theme, using default");
            Theme::default_theme().clone()
        }
    }
}

/// The lesson menu as plain text, with lessons that cannot load marked.
fn format_catalog(catalog: &Catalog, registry: &LessonRegistry) -> String {
    let mut out = String::new();
    for entry in catalog.entries() {
        let _ = writeln!(out, "{}", humanize(&entry.category));
        for lesson in &entry.lessons {
            let key = LessonKey::new(&entry.category, lesson);
            if registry.contains(&key) {
                let _ = writeln!(out, "  {}", key);
            } else {
                let _ = writeln!(out, "  {}  (unavailable)", key);
            }
        }
    }
    out
}

/// Resolve one lesson and return it as plain text.
async fn open_lesson(catalog: &Catalog, registry: &LessonRegistry, target: &str) -> Result<String> {
    let key = LessonKey::parse(target)
        .with_context(|| format!("Invalid lesson `{}`: expected CATEGORY/LESSON", target))?;
    if !catalog.contains(&key.category, &key.lesson) {
        tracing::warn!(%key, "opening a lesson the catalog does not list");
    }
    let lesson = registry
        .load(&key)
        .await
        .with_context(|| format!("Failed to open lesson `{}`", key))?;
    Ok(lesson.to_plain_text())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    selector: &mut Selector,
    resolutions: &mut UnboundedReceiver<Resolution>,
    event_reader: &mut dyn EventReader,
    config: &mut Config,
) -> Result<()> {
    loop {
        app.drain_resolutions(resolutions);

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        // Poll faster while a lesson is loading so it shows up promptly
        let poll_timeout = if app.is_loading() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        let event = match event_reader.read_event(poll_timeout)? {
            Some(e) => e,
            None => continue,
        };

        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key) {
                Some(Action::Activate(lesson)) => {
                    app.request(selector, &lesson);
                }
                Some(Action::ThemeChanged) => {
                    config.theme = app.theme.name.to_string();
                    if let Err(e) = config.save() {
                        tracing::warn!("Failed to save theme: {:#}", e);
                    }
                }
                None => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
