//! Questionnaire definition loading.
//!
//! The JSON definition is deserialized into raw shapes and validated into
//! the domain model in one pass. Weight tuples are checked against the
//! category count here, before any scoring can run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{
    Category, Choice, DEFAULT_SECTION_SPLIT, DEFAULT_STORAGE_KEY, Question, QuizConfig,
    WeightsError,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("questionnaire defines no categories")]
    NoCategories,
    #[error("questionnaire defines no questions")]
    NoQuestions,
    #[error("question {question} has no choices")]
    NoChoices { question: usize },
    #[error("question {question}, choice {choice} (`{value}`): {source}")]
    Weights {
        question: usize,
        choice: usize,
        value: String,
        #[source]
        source: WeightsError,
    },
}

#[derive(Deserialize)]
struct RawQuestionnaire {
    categories: Vec<Category>,
    #[serde(default = "default_storage_key")]
    storage_key: String,
    #[serde(default = "default_section_split")]
    section_split: usize,
    questions: Vec<RawQuestion>,
}

#[derive(Deserialize)]
struct RawQuestion {
    text: String,
    choices: Vec<RawChoice>,
}

#[derive(Deserialize)]
struct RawChoice {
    label: String,
    value: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_section_split() -> usize {
    DEFAULT_SECTION_SPLIT
}

/// Load and validate a questionnaire definition from a JSON file.
pub fn load_questionnaire<P: AsRef<Path>>(
    path: P,
) -> Result<(QuizConfig, Vec<Question>), LoadError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: RawQuestionnaire =
        serde_json::from_str(&raw).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    build(parsed)
}

fn build(raw: RawQuestionnaire) -> Result<(QuizConfig, Vec<Question>), LoadError> {
    if raw.categories.is_empty() {
        return Err(LoadError::NoCategories);
    }
    if raw.questions.is_empty() {
        return Err(LoadError::NoQuestions);
    }

    let arity = raw.categories.len();
    let mut questions = Vec::with_capacity(raw.questions.len());
    for (q_index, question) in raw.questions.into_iter().enumerate() {
        let number = q_index + 1;
        if question.choices.is_empty() {
            return Err(LoadError::NoChoices { question: number });
        }

        let mut choices = Vec::with_capacity(question.choices.len());
        for (c_index, choice) in question.choices.into_iter().enumerate() {
            let built = Choice::new(choice.label, choice.value.clone(), arity).map_err(
                |source| LoadError::Weights {
                    question: number,
                    choice: c_index + 1,
                    value: choice.value,
                    source,
                },
            )?;
            choices.push(built);
        }

        questions.push(Question {
            text: question.text,
            choices,
        });
    }

    let config = QuizConfig {
        categories: raw.categories,
        storage_key: raw.storage_key,
        section_split: raw.section_split,
    };
    Ok((config, questions))
}
