//! Completeness validation and the unanswered-question report.

use crate::registry::AnswerRegistry;

/// Missing questions for one part, renumbered relative to the part start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPart {
    pub title: String,
    pub numbers: Vec<usize>,
}

/// Which questions are unanswered, grouped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Absolute question indices, ascending.
    pub missing: Vec<usize>,
    /// Non-empty parts only.
    pub parts: Vec<MissingPart>,
    /// Absolute index of the first gap, for focus targeting.
    pub first_missing: usize,
}

impl ValidationReport {
    /// Human-readable report, one line per non-empty part.
    pub fn message(&self) -> String {
        let mut message = String::from("Some questions are still unanswered!");
        for part in &self.parts {
            let numbers = part
                .numbers
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!("\n{}: {}", part.title, numbers));
        }
        message
    }
}

/// Check that every question has a selection. `None` means the submission
/// may proceed. Pure: reads registry state, mutates nothing.
///
/// Questions numbered `1..=split` report under Part 1 with their absolute
/// numbers; the rest report under Part 2, renumbered from 1.
pub fn check_completeness(registry: &AnswerRegistry, split: usize) -> Option<ValidationReport> {
    let missing = registry.unanswered();
    let first_missing = *missing.first()?;

    let part_one: Vec<usize> = missing.iter().copied().filter(|&n| n <= split).collect();
    let part_two: Vec<usize> = missing
        .iter()
        .copied()
        .filter(|&n| n > split)
        .map(|n| n - split)
        .collect();

    let mut parts = Vec::new();
    if !part_one.is_empty() {
        parts.push(MissingPart {
            title: "Part 1".to_string(),
            numbers: part_one,
        });
    }
    if !part_two.is_empty() {
        parts.push(MissingPart {
            title: "Part 2".to_string(),
            numbers: part_two,
        });
    }

    Some(ValidationReport {
        missing,
        parts,
        first_missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Choice, Question};

    fn registry(total: usize, answered: &[usize]) -> AnswerRegistry {
        let questions = (0..total)
            .map(|q| Question {
                text: format!("Question {}", q + 1),
                choices: vec![
                    Choice::new("Yes", "1_0", 2).unwrap(),
                    Choice::new("No", "0_1", 2).unwrap(),
                ],
            })
            .collect();
        let mut registry = AnswerRegistry::new(questions);
        for &question in answered {
            registry.select(question, 0);
        }
        registry
    }

    #[test]
    fn complete_form_passes() {
        let all: Vec<usize> = (1..=30).collect();
        assert_eq!(check_completeness(&registry(30, &all), 20), None);
    }

    #[test]
    fn single_gap_in_part_one() {
        let answered: Vec<usize> = (1..=30).filter(|&q| q != 15).collect();
        let report = check_completeness(&registry(30, &answered), 20).unwrap();

        assert_eq!(report.missing, vec![15]);
        assert_eq!(report.first_missing, 15);
        assert_eq!(report.parts.len(), 1);
        assert_eq!(report.parts[0].title, "Part 1");
        assert_eq!(report.parts[0].numbers, vec![15]);
    }

    #[test]
    fn part_two_renumbers_from_the_split() {
        let answered: Vec<usize> = (1..=30).filter(|&q| q != 25).collect();
        let report = check_completeness(&registry(30, &answered), 20).unwrap();

        assert_eq!(report.first_missing, 25);
        assert_eq!(report.parts.len(), 1);
        assert_eq!(report.parts[0].title, "Part 2");
        assert_eq!(report.parts[0].numbers, vec![5]);
    }

    #[test]
    fn gaps_in_both_parts() {
        let answered: Vec<usize> = (1..=30).filter(|&q| q != 3 && q != 21 && q != 30).collect();
        let report = check_completeness(&registry(30, &answered), 20).unwrap();

        assert_eq!(report.missing, vec![3, 21, 30]);
        assert_eq!(report.first_missing, 3);
        assert_eq!(report.parts[0].numbers, vec![3]);
        assert_eq!(report.parts[1].numbers, vec![1, 10]);
    }

    #[test]
    fn message_lists_each_part_on_its_own_line() {
        let answered: Vec<usize> = (1..=30).filter(|&q| q != 1 && q != 5 && q != 25).collect();
        let report = check_completeness(&registry(30, &answered), 20).unwrap();

        assert_eq!(
            report.message(),
            "Some questions are still unanswered!\nPart 1: 1, 5\nPart 2: 5"
        );
    }
}
