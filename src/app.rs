//! Application controller.
//!
//! Owns the answer registry and the progress store for one questionnaire
//! session and drives the lifecycle: rehydrate on construction, snapshot
//! on every answer change, validate-then-score on submit.

use std::time::Instant;

use crate::models::{Phase, Question, QuizConfig};
use crate::present::{self, RenderInstruction};
use crate::progress::ProgressStore;
use crate::registry::AnswerRegistry;
use crate::scoring::{self, ScoreError};
use crate::validate::{self, ValidationReport};

/// A surfaced result: the render instruction plus the moment it became
/// visible, used to time the deferred reveal effect.
pub struct ScoredResult {
    pub instruction: RenderInstruction,
    shown_at: Instant,
}

impl ScoredResult {
    /// Whether the reveal effect is due yet.
    pub fn revealed(&self) -> bool {
        self.shown_at.elapsed() >= self.instruction.reveal_delay
    }
}

pub struct App {
    pub phase: Phase,
    config: QuizConfig,
    registry: AnswerRegistry,
    store: Box<dyn ProgressStore>,
    /// 0-based index of the question on screen.
    cursor: usize,
    /// Highlighted choice of the current question.
    highlight: usize,
    report: Option<ValidationReport>,
    scored: Option<ScoredResult>,
    restored: usize,
}

impl App {
    /// Build a session and rehydrate it from whatever the store holds.
    pub fn new(config: QuizConfig, questions: Vec<Question>, store: Box<dyn ProgressStore>) -> Self {
        let mut registry = AnswerRegistry::new(questions);
        registry.rehydrate(&store.load());
        let restored = registry.answered_count();

        let mut app = Self {
            phase: Phase::Welcome,
            config,
            registry,
            store,
            cursor: 0,
            highlight: 0,
            report: None,
            scored: None,
            restored,
        };
        app.sync_highlight();
        app
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn registry(&self) -> &AnswerRegistry {
        &self.registry
    }

    /// How many answers the startup rehydration restored.
    pub fn restored_count(&self) -> usize {
        self.restored
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    pub fn scored(&self) -> Option<&ScoredResult> {
        self.scored.as_ref()
    }

    pub fn current_question_number(&self) -> usize {
        self.cursor + 1
    }

    pub fn total_questions(&self) -> usize {
        self.registry.total()
    }

    pub fn current_question(&self) -> &Question {
        &self.registry.questions()[self.cursor]
    }

    /// 1 or 2, depending on which side of the section split the current
    /// question falls.
    pub fn current_part(&self) -> usize {
        if self.current_question_number() <= self.config.section_split {
            1
        } else {
            2
        }
    }

    pub fn highlighted_option(&self) -> usize {
        self.highlight
    }

    pub fn start(&mut self) {
        self.phase = Phase::Answering;
        self.cursor = self
            .registry
            .unanswered()
            .first()
            .map(|question| question - 1)
            .unwrap_or(0);
        self.sync_highlight();
    }

    fn sync_highlight(&mut self) {
        self.highlight = self
            .registry
            .selected_choice(self.current_question_number())
            .unwrap_or(0);
    }

    pub fn select_next_option(&mut self) {
        let count = self.current_question().choices.len();
        self.highlight = (self.highlight + 1) % count;
    }

    pub fn select_previous_option(&mut self) {
        let count = self.current_question().choices.len();
        self.highlight = (self.highlight + count - 1) % count;
    }

    /// The change event: record the highlighted choice, persist a fresh
    /// snapshot, and advance to the next question.
    pub fn confirm_selection(&mut self) {
        let question = self.current_question_number();
        self.registry.select(question, self.highlight);
        self.persist();
        if self.cursor + 1 < self.registry.total() {
            self.cursor += 1;
            self.sync_highlight();
        }
    }

    fn persist(&mut self) {
        let snapshot = self.registry.snapshot();
        if let Err(err) = self.store.save(&snapshot) {
            tracing::warn!(%err, "failed to persist progress");
        }
    }

    pub fn next_question(&mut self) {
        if self.cursor + 1 < self.registry.total() {
            self.cursor += 1;
            self.sync_highlight();
        }
    }

    pub fn previous_question(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.sync_highlight();
        }
    }

    /// The submit event. Incomplete forms surface a report and move the
    /// cursor to the first missing question; complete forms are scored
    /// and presented. Resubmission recomputes from scratch.
    pub fn submit(&mut self) -> Result<(), ScoreError> {
        if let Some(report) = validate::check_completeness(&self.registry, self.config.section_split)
        {
            self.cursor = report.first_missing - 1;
            self.sync_highlight();
            self.report = Some(report);
            return Ok(());
        }

        let scores = scoring::compute_scores(&self.registry, self.config.category_count())?;
        let instruction = present::present(&self.config.categories, &scores);
        self.scored = Some(ScoredResult {
            instruction,
            shown_at: Instant::now(),
        });
        self.phase = Phase::Scored;
        Ok(())
    }

    pub fn dismiss_report(&mut self) {
        self.report = None;
    }

    /// Return from the result screen to editing. Selections survive; the
    /// persisted snapshot is untouched.
    pub fn edit_answers(&mut self) {
        self.phase = Phase::Answering;
        self.scored = None;
        self.sync_highlight();
    }

    /// Drop every answer, including the persisted snapshot, and return to
    /// the welcome screen.
    pub fn restart(&mut self) {
        self.registry.clear();
        self.persist();
        self.phase = Phase::Welcome;
        self.cursor = 0;
        self.highlight = 0;
        self.report = None;
        self.scored = None;
        self.restored = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Choice};
    use crate::progress::{MemoryStore, Snapshot};

    fn two_question_config() -> QuizConfig {
        QuizConfig {
            categories: vec![
                Category {
                    name: "A".to_string(),
                    target: "a-score".to_string(),
                },
                Category {
                    name: "B".to_string(),
                    target: "b-score".to_string(),
                },
            ],
            storage_key: "author_quiz_progress_v1".to_string(),
            section_split: 20,
        }
    }

    fn two_questions() -> Vec<Question> {
        vec![
            Question {
                text: "First".to_string(),
                choices: vec![
                    Choice::new("Towards A", "1_0", 2).unwrap(),
                    Choice::new("Towards B", "0_1", 2).unwrap(),
                ],
            },
            Question {
                text: "Second".to_string(),
                choices: vec![
                    Choice::new("Towards A", "1_0", 2).unwrap(),
                    Choice::new("Towards B", "0_1", 2).unwrap(),
                ],
            },
        ]
    }

    fn app() -> App {
        App::new(
            two_question_config(),
            two_questions(),
            Box::new(MemoryStore::new()),
        )
    }

    #[test]
    fn end_to_end_tie_reports_both_names() {
        let mut app = app();
        app.start();

        // Question 1 → "1_0", question 2 → "0_1".
        app.confirm_selection();
        app.select_next_option();
        app.confirm_selection();

        app.submit().unwrap();
        assert_eq!(app.phase, Phase::Scored);

        let instruction = &app.scored().unwrap().instruction;
        assert_eq!(instruction.rows[0].score, 1);
        assert_eq!(instruction.rows[1].score, 1);
        assert_eq!(instruction.headline, "A & B");
    }

    #[test]
    fn incomplete_submission_surfaces_report_and_moves_focus() {
        let mut app = app();
        app.start();
        app.next_question();
        app.select_next_option();
        app.confirm_selection(); // only question 2 answered

        app.submit().unwrap();
        assert_eq!(app.phase, Phase::Answering);

        let report = app.report().unwrap();
        assert_eq!(report.missing, vec![1]);
        assert_eq!(report.first_missing, 1);
        assert_eq!(app.current_question_number(), 1);

        app.dismiss_report();
        assert!(app.report().is_none());
    }

    #[test]
    fn every_change_persists_a_fresh_snapshot() {
        let mut store = MemoryStore::new();
        let mut seeded = Snapshot::default();
        seeded.insert(1, "1_0");
        store.save(&seeded).unwrap();

        let mut app = App::new(two_question_config(), two_questions(), Box::new(store));
        assert_eq!(app.restored_count(), 1);

        app.start();
        // Resumes at the first unanswered question (question 2).
        assert_eq!(app.current_question_number(), 2);

        app.select_next_option();
        app.confirm_selection();
        assert_eq!(app.registry().snapshot().get(2), Some("0_1"));
    }

    #[test]
    fn rehydration_restores_selections() {
        let mut store = MemoryStore::new();
        let mut snapshot = Snapshot::default();
        snapshot.insert(1, "0_1");
        snapshot.insert(2, "1_0");
        store.save(&snapshot).unwrap();

        let app = App::new(two_question_config(), two_questions(), Box::new(store));
        assert_eq!(app.registry().selected_choice(1), Some(1));
        assert_eq!(app.registry().selected_choice(2), Some(0));
    }

    #[test]
    fn corrupt_store_starts_empty() {
        let mut store = MemoryStore::new();
        store.set_raw("}} not json {{");

        let app = App::new(two_question_config(), two_questions(), Box::new(store));
        assert_eq!(app.restored_count(), 0);
        assert_eq!(app.registry().unanswered(), vec![1, 2]);
    }

    #[test]
    fn successful_submission_keeps_the_snapshot() {
        let mut app = app();
        app.start();
        app.confirm_selection();
        app.confirm_selection();
        app.submit().unwrap();

        // The durable snapshot survives submission; a fresh session would
        // rehydrate the same answers.
        assert_eq!(app.registry().snapshot().len(), 2);
        assert!(!app.store.load().is_empty());
    }

    #[test]
    fn editing_after_scoring_recomputes() {
        let mut app = app();
        app.start();
        app.confirm_selection(); // q1 → "1_0"
        app.confirm_selection(); // q2 → "1_0"
        app.submit().unwrap();
        assert_eq!(app.scored().unwrap().instruction.headline, "A");

        app.edit_answers();
        assert_eq!(app.phase, Phase::Answering);
        assert!(app.scored().is_none());

        app.previous_question();
        app.select_next_option();
        app.confirm_selection(); // q1 → "0_1"
        app.submit().unwrap();
        assert_eq!(app.scored().unwrap().instruction.headline, "A & B");
    }

    #[test]
    fn restart_clears_registry_and_store() {
        let mut app = app();
        app.start();
        app.confirm_selection();
        app.confirm_selection();
        app.submit().unwrap();

        app.restart();
        assert_eq!(app.phase, Phase::Welcome);
        assert_eq!(app.registry().answered_count(), 0);
        assert!(app.store.load().is_empty());
    }

    #[test]
    fn highlight_follows_saved_selection_when_navigating() {
        let mut app = app();
        app.start();
        app.select_next_option();
        app.confirm_selection(); // q1 → choice 1, cursor now on q2

        app.previous_question();
        assert_eq!(app.highlighted_option(), 1);

        app.next_question();
        assert_eq!(app.highlighted_option(), 0);
    }
}
