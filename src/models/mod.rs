mod config;
mod question;

pub use config::{Category, DEFAULT_SECTION_SPLIT, DEFAULT_STORAGE_KEY, QuizConfig};
pub use question::{Choice, Question, Weights, WeightsError};

/// Which screen the application is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Welcome,
    Answering,
    Scored,
}
