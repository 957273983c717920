use thiserror::Error;

/// Defects in an encoded weight tuple such as `"2_3_0_0_0"`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeightsError {
    #[error("`{part}` is not an integer")]
    BadInteger { part: String },
    #[error("tuple has {found} weights, expected {expected}")]
    Arity { expected: usize, found: usize },
}

/// Per-choice weight tuple, one entry per category in category order.
///
/// Arity is checked once at construction; scoring works on the already
/// parsed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weights(Vec<i32>);

impl Weights {
    /// Parse an underscore-delimited tuple with exactly `arity` entries.
    pub fn parse(raw: &str, arity: usize) -> Result<Self, WeightsError> {
        let values = raw
            .split('_')
            .map(|part| {
                part.trim()
                    .parse::<i32>()
                    .map_err(|_| WeightsError::BadInteger {
                        part: part.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() != arity {
            return Err(WeightsError::Arity {
                expected: arity,
                found: values.len(),
            });
        }

        Ok(Self(values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }
}

/// One selectable answer: display label plus its encoded weight value.
///
/// The raw `value` string doubles as the persisted representation of this
/// choice in progress snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: String,
    pub value: String,
    weights: Weights,
}

impl Choice {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        arity: usize,
    ) -> Result<Self, WeightsError> {
        let value = value.into();
        let weights = Weights::parse(&value, arity)?;
        Ok(Self {
            label: label.into(),
            value,
            weights,
        })
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone)]
pub struct Question {
    pub text: String,
    pub choices: Vec<Choice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reference_tuple() {
        let weights = Weights::parse("2_3_0_0_0", 5).unwrap();
        assert_eq!(weights.as_slice(), &[2, 3, 0, 0, 0]);
    }

    #[test]
    fn parse_negative_and_spaced_entries() {
        let weights = Weights::parse("1_ -2_3", 3).unwrap();
        assert_eq!(weights.as_slice(), &[1, -2, 3]);
    }

    #[test]
    fn parse_rejects_wrong_arity() {
        assert_eq!(
            Weights::parse("1_0", 5),
            Err(WeightsError::Arity {
                expected: 5,
                found: 2
            })
        );
    }

    #[test]
    fn parse_rejects_non_integer() {
        assert_eq!(
            Weights::parse("1_x_0", 3),
            Err(WeightsError::BadInteger {
                part: "x".to_string()
            })
        );
    }

    #[test]
    fn choice_keeps_raw_value() {
        let choice = Choice::new("Strongly agree", "0_0_4", 3).unwrap();
        assert_eq!(choice.value, "0_0_4");
        assert_eq!(choice.weights().as_slice(), &[0, 0, 4]);
    }
}
