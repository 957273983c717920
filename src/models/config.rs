use serde::Deserialize;

/// Storage key for the persisted progress snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "author_quiz_progress_v1";

/// Last question number belonging to Part 1.
pub const DEFAULT_SECTION_SPLIT: usize = 20;

/// One scoring category: display name plus the identifier of the display
/// target that receives its score.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub name: String,
    pub target: String,
}

/// Per-session questionnaire configuration. Each [`crate::app::App`] owns
/// its own instance.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Scoring categories, in display order.
    pub categories: Vec<Category>,
    /// Key under which progress is persisted.
    pub storage_key: String,
    /// Questions up to and including this number belong to Part 1,
    /// the rest to Part 2. Grouping only affects reporting.
    pub section_split: usize,
}

impl QuizConfig {
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}
