//! Question aggregate: statement, option slots, and the answer key.
//!
//! Questions are read-only from the progression engine's perspective; admin
//! curation happens elsewhere. The constructor still validates the shape so
//! corrupted rows never reach scoring.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label of one of a question's option slots.
///
/// True/false questions populate `A` and `B`; multiple-choice questions use
/// up to all five slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    /// First option slot.
    A,
    /// Second option slot.
    B,
    /// Third option slot.
    C,
    /// Fourth option slot.
    D,
    /// Fifth option slot.
    E,
}

impl OptionLabel {
    /// Stable storage and wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OptionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            "D" | "d" => Ok(Self::D),
            "E" | "e" => Ok(Self::E),
            other => Err(format!("unknown option label: {other}")),
        }
    }
}

/// One populated option slot of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Slot label.
    pub label: OptionLabel,
    /// Option text shown to the user.
    pub text: String,
}

/// Validation errors returned by [`Question::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionValidationError {
    /// The statement was empty once trimmed.
    EmptyStatement,
    /// Fewer than two option slots were populated.
    TooFewOptions {
        /// Minimum number of options required.
        min: usize,
    },
    /// An option's text was empty once trimmed.
    EmptyOptionText {
        /// Label of the offending slot.
        label: OptionLabel,
    },
    /// Option labels were duplicated or out of slot order.
    UnorderedOptionLabels,
    /// The answer key does not reference a populated option slot.
    AnswerKeyNotAnOption {
        /// The dangling answer key.
        label: OptionLabel,
    },
}

impl fmt::Display for QuestionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStatement => write!(f, "question statement must not be empty"),
            Self::TooFewOptions { min } => {
                write!(f, "question must populate at least {min} option slots")
            }
            Self::EmptyOptionText { label } => {
                write!(f, "option {label} must not have empty text")
            }
            Self::UnorderedOptionLabels => {
                write!(f, "option labels must be unique and in slot order")
            }
            Self::AnswerKeyNotAnOption { label } => {
                write!(f, "answer key {label} does not match a populated option")
            }
        }
    }
}

impl std::error::Error for QuestionValidationError {}

/// Field bundle for constructing a [`Question`].
#[derive(Debug, Clone)]
pub struct QuestionDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Statement shown to the user.
    pub statement: String,
    /// Populated option slots in slot order.
    pub options: Vec<AnswerOption>,
    /// Label of the correct option.
    pub answer_key: OptionLabel,
    /// Subject this question belongs to.
    pub subject_id: Uuid,
    /// Examining board that authored the question, when known.
    pub board_id: Option<Uuid>,
    /// Agency the original exam was held for, when known.
    pub agency_id: Option<Uuid>,
    /// Year of the original exam, when known.
    pub year: Option<i32>,
    /// Whether the question is available for answering.
    pub active: bool,
}

/// An exam question with its answer key.
///
/// ## Invariants
/// - Between two and five option slots are populated, with unique labels in
///   slot order.
/// - `answer_key` references a populated slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: Uuid,
    statement: String,
    options: Vec<AnswerOption>,
    answer_key: OptionLabel,
    subject_id: Uuid,
    board_id: Option<Uuid>,
    agency_id: Option<Uuid>,
    year: Option<i32>,
    active: bool,
}

const MIN_OPTIONS: usize = 2;

impl Question {
    /// Validate and construct a question from its draft fields.
    pub fn new(draft: QuestionDraft) -> Result<Self, QuestionValidationError> {
        let QuestionDraft {
            id,
            statement,
            options,
            answer_key,
            subject_id,
            board_id,
            agency_id,
            year,
            active,
        } = draft;

        if statement.trim().is_empty() {
            return Err(QuestionValidationError::EmptyStatement);
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuestionValidationError::TooFewOptions { min: MIN_OPTIONS });
        }
        for option in &options {
            if option.text.trim().is_empty() {
                return Err(QuestionValidationError::EmptyOptionText {
                    label: option.label,
                });
            }
        }
        let ordered = options
            .windows(2)
            .all(|pair| matches!(pair, [left, right] if left.label < right.label));
        if !ordered {
            return Err(QuestionValidationError::UnorderedOptionLabels);
        }
        if !options.iter().any(|option| option.label == answer_key) {
            return Err(QuestionValidationError::AnswerKeyNotAnOption { label: answer_key });
        }

        Ok(Self {
            id,
            statement,
            options,
            answer_key,
            subject_id,
            board_id,
            agency_id,
            year,
            active,
        })
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Statement shown to the user.
    #[must_use]
    pub fn statement(&self) -> &str {
        self.statement.as_str()
    }

    /// Populated option slots in slot order.
    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    /// Label of the correct option.
    #[must_use]
    pub fn answer_key(&self) -> OptionLabel {
        self.answer_key
    }

    /// Subject this question belongs to.
    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }

    /// Examining board that authored the question, when known.
    #[must_use]
    pub fn board_id(&self) -> Option<Uuid> {
        self.board_id
    }

    /// Agency the original exam was held for, when known.
    #[must_use]
    pub fn agency_id(&self) -> Option<Uuid> {
        self.agency_id
    }

    /// Year of the original exam, when known.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Whether the question is available for answering.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the given label references a populated option slot.
    #[must_use]
    pub fn has_option(&self, label: OptionLabel) -> bool {
        self.options.iter().any(|option| option.label == label)
    }

    /// Score a chosen option against the answer key.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{AnswerOption, OptionLabel, Question, QuestionDraft};
    /// use uuid::Uuid;
    ///
    /// let question = Question::new(QuestionDraft {
    ///     id: Uuid::new_v4(),
    ///     statement: "A patente mais alta do exemplo?".to_owned(),
    ///     options: vec![
    ///         AnswerOption { label: OptionLabel::A, text: "Soldado".to_owned() },
    ///         AnswerOption { label: OptionLabel::B, text: "Coronel".to_owned() },
    ///     ],
    ///     answer_key: OptionLabel::B,
    ///     subject_id: Uuid::new_v4(),
    ///     board_id: None,
    ///     agency_id: None,
    ///     year: None,
    ///     active: true,
    /// })
    /// .expect("valid question");
    ///
    /// assert!(question.is_correct(OptionLabel::B));
    /// assert!(!question.is_correct(OptionLabel::A));
    /// ```
    #[must_use]
    pub fn is_correct(&self, chosen: OptionLabel) -> bool {
        chosen == self.answer_key
    }
}
