//! # academy-quiz
//!
//! A terminal questionnaire that scores answers across a set of
//! categories ("academies") and reports the highest-scoring one(s).
//! In-progress answers are persisted after every change and restored on
//! the next start.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use academy_quiz::{Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Load the questionnaire definition from a JSON file
//!     let quiz = Quiz::from_json("questionnaire.json")?;
//!
//!     // Run it in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod models;
pub mod present;
pub mod progress;
pub mod registry;
pub mod scoring;
pub mod terminal;
mod ui;
pub mod validate;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::{App, ScoredResult};
pub use data::{LoadError, load_questionnaire};
pub use models::{
    Category, Choice, DEFAULT_SECTION_SPLIT, DEFAULT_STORAGE_KEY, Phase, Question, QuizConfig,
    Weights, WeightsError,
};
pub use present::{CategoryScore, REVEAL_DELAY, RenderInstruction};
pub use progress::{FileStore, MemoryStore, ProgressStore, Snapshot, StoreError};
pub use registry::AnswerRegistry;
pub use scoring::{ScoreError, ScoreVector};
pub use validate::{MissingPart, ValidationReport};

/// How long the event loop waits for input before redrawing. Keeps
/// time-based effects (the result reveal) moving without busy-looping.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for questionnaire sessions.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The questionnaire definition could not be loaded.
    #[error("failed to load questionnaire: {0}")]
    Load(#[from] LoadError),
    /// Scoring hit inconsistent authoring data.
    #[error("scoring aborted: {0}")]
    Score(#[from] ScoreError),
    /// IO error during execution.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A questionnaire session that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Load a questionnaire definition and persist progress under the
    /// default data directory.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        Self::from_json_with_data_dir(path, FileStore::default_dir())
    }

    /// Same as [`Quiz::from_json`], with an explicit progress directory.
    pub fn from_json_with_data_dir<P: AsRef<Path>>(
        path: P,
        data_dir: PathBuf,
    ) -> Result<Self, QuizError> {
        let (config, questions) = data::load_questionnaire(path)?;
        let store = FileStore::new(data_dir, &config.storage_key);
        Ok(Self::with_store(config, questions, Box::new(store)))
    }

    /// Build a session around any progress store. Useful for embedding
    /// and for tests.
    pub fn with_store(
        config: QuizConfig,
        questions: Vec<Question>,
        store: Box<dyn ProgressStore>,
    ) -> Self {
        Self {
            app: App::new(config, questions, store),
        }
    }

    /// Run the questionnaire in the terminal.
    ///
    /// This takes over the terminal, displays the UI, and returns when
    /// the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code)? {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> Result<bool, QuizError> {
    match app.phase {
        Phase::Welcome => Ok(handle_welcome_input(app, key)),
        Phase::Answering => handle_answer_input(app, key),
        Phase::Scored => Ok(handle_result_input(app, key)),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_answer_input(app: &mut App, key: KeyCode) -> Result<bool, QuizError> {
    // While the missing-questions overlay is up, any key dismisses it;
    // focus already sits on the first gap.
    if app.report().is_some() {
        app.dismiss_report();
        return Ok(false);
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm_selection(),
        KeyCode::Left | KeyCode::Char('p') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('n') => app.next_question(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.submit()?,
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        _ => {}
    }
    Ok(false)
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.edit_answers();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}
