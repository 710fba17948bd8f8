use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::categories;

/// A multiple-choice question as held by the bank. Immutable once loaded.
///
/// `options` is an ordered list of at least two entries; `correct_index`
/// always points inside it. Option labels (A, B, C, …) are derived, never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub category: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub option_images: Option<Vec<String>>,
}

impl Question {
    /// Upholds the `0 <= correct_index < options.len()` invariant, with at
    /// least two options to choose between.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() >= 2 && self.correct_index < self.options.len()
    }

    /// Derived option label: 0 -> 'A', 1 -> 'B', and so on.
    pub fn option_label(index: usize) -> char {
        (b'A' + index as u8) as char
    }
}

/// One entry of the sign catalog: an image and its true label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSign {
    pub id: String,
    pub label: String,
    pub image: String,
}

/// Lesson/summary text for one category, supplied by the remote notes
/// source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub category: String,
    pub title: String,
    pub body: String,
}

/// An incorrect answer, snapshotted at finish time so later pool changes
/// cannot alter what the user actually saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrongAnswer {
    pub question_id: String,
    pub prompt: String,
    pub category: String,
    pub category_name: String,
    pub options: Vec<String>,
    pub selected_index: usize,
    pub correct_index: usize,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub option_images: Option<Vec<String>>,
    /// Attached asynchronously after creation; may stay empty forever.
    #[serde(default)]
    pub ai_note: Option<String>,
}

impl WrongAnswer {
    pub fn from_question(question: &Question, selected_index: usize) -> Self {
        Self {
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            category: question.category.clone(),
            category_name: categories::display_name(&question.category).to_string(),
            options: question.options.clone(),
            selected_index,
            correct_index: question.correct_index,
            image: question.image.clone(),
            option_images: question.option_images.clone(),
            ai_note: None,
        }
    }
}

/// Pass threshold of the reference exam, in percent of the session
/// total.
pub const PASS_MARK: u32 = 70;

/// The persisted outcome of one finished session. Append-only; never
/// mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: String,
    pub taken_at: DateTime<Utc>,
    pub label: String,
    pub score: usize,
    pub total: usize,
    pub wrong: Vec<WrongAnswer>,
}

impl QuizResult {
    /// Percentage of the session total, rounded down.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.score * 100 / self.total) as u32
    }

    /// Pass verdict against a percentage threshold (70 in the reference
    /// exam).
    pub fn passed(&self, pass_mark: u32) -> bool {
        self.percentage() >= pass_mark
    }
}
