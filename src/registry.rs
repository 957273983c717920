//! In-memory view over the question set and its current selections.

use crate::models::{Choice, Question};
use crate::progress::{Snapshot, field_index};

/// Owns the presented questions and tracks which choice, if any, is
/// selected for each. Question indices are 1-based throughout.
pub struct AnswerRegistry {
    questions: Vec<Question>,
    selections: Vec<Option<usize>>,
}

impl AnswerRegistry {
    pub fn new(questions: Vec<Question>) -> Self {
        let selections = vec![None; questions.len()];
        Self {
            questions,
            selections,
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, question: usize) -> Option<&Question> {
        self.questions.get(question.checked_sub(1)?)
    }

    /// Currently selected choice for a question.
    pub fn selection(&self, question: usize) -> Option<&Choice> {
        let index = question.checked_sub(1)?;
        let choice = (*self.selections.get(index)?)?;
        self.questions[index].choices.get(choice)
    }

    /// Index of the selected choice, if any.
    pub fn selected_choice(&self, question: usize) -> Option<usize> {
        *self.selections.get(question.checked_sub(1)?)?
    }

    /// Mark `choice` selected for `question`. Out-of-range pairs are
    /// ignored.
    pub fn select(&mut self, question: usize, choice: usize) {
        let Some(index) = question.checked_sub(1) else {
            return;
        };
        if index < self.questions.len() && choice < self.questions[index].choices.len() {
            self.selections[index] = Some(choice);
        }
    }

    pub fn answered_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }

    /// Unanswered question indices, ascending, 1-based.
    pub fn unanswered(&self) -> Vec<usize> {
        self.selections
            .iter()
            .enumerate()
            .filter(|(_, selection)| selection.is_none())
            .map(|(index, _)| index + 1)
            .collect()
    }

    /// Apply a persisted snapshot: each entry selects the choice of the
    /// matching question whose encoded value equals the stored one.
    /// Unmatched keys and values are skipped; re-applying the same
    /// snapshot yields the same selections.
    pub fn rehydrate(&mut self, snapshot: &Snapshot) {
        for (key, value) in snapshot.iter() {
            let Some(index) = field_index(key)
                .and_then(|question| question.checked_sub(1))
                .filter(|index| *index < self.questions.len())
            else {
                tracing::debug!(key, "skipping stale progress entry");
                continue;
            };
            if let Some(choice) = self.questions[index]
                .choices
                .iter()
                .position(|choice| choice.value == value)
            {
                self.selections[index] = Some(choice);
            }
        }
    }

    /// Snapshot of every current selection, keyed by field name.
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for (index, selection) in self.selections.iter().enumerate() {
            if let Some(choice) = selection {
                snapshot.insert(index + 1, self.questions[index].choices[*choice].value.clone());
            }
        }
        snapshot
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        self.selections.fill(None);
    }
}
