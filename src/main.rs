//! marksheet - Marks Calculator
//!
//! Opens a terminal form that collects per-subject marks and shows the
//! total, percentage and grade, or evaluates a marks CSV non-interactively
//! with `marksheet evaluate`.

use std::error::Error;
use std::io;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use marksheet::application::App;
use marksheet::cli::{Cli, Command, evaluate_file};
use marksheet::domain::GradeEvaluator;
use marksheet::infrastructure::{init_file_logging, init_stderr_logging};
use marksheet::presentation::{render_ui, InputHandler};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Some(Command::Evaluate { input, format, max }) => {
            match &cli.log_file {
                Some(path) => init_file_logging(path)?,
                None => init_stderr_logging()?,
            }
            evaluate_file(&input, format, GradeEvaluator::new(max), io::stdout().lock())?;
            Ok(())
        }
        None => {
            if let Some(path) = &cli.log_file {
                init_file_logging(path)?;
            }
            let mut app = App::default();
            if let Some(subjects) = cli.subjects {
                app.subject_count_input = subjects.to_string();
                app.set_subjects();
            }
            run_form(app)?;
            Ok(())
        }
    }
}

/// Sets up the terminal, runs the form until the user quits, and restores
/// the terminal even if the event loop fails.
fn run_form(mut app: App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("form opened");
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    info!("form closed");

    res
}

/// Main application event loop.
///
/// Ctrl+Q or Ctrl+C quits from any mode; every other key goes to the
/// input handler.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let quit = key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'));
            if quit {
                return Ok(());
            }
            InputHandler::handle_key_event(app, key.code, key.modifiers);
        }
    }
}
