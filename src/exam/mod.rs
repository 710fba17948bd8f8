//! Exam composition: quota-based full exams, category practice quizzes,
//! the daily mix, and generated sign-recognition questions.

pub mod composer;
pub mod sampler;
pub mod signs;

pub use composer::{compose_category_quiz, compose_daily_mix, compose_full_exam};
pub use sampler::sample;
pub use signs::sign_questions;

/// Fixed per-category quotas for one full exam.
///
/// The trafik contribution is split between text questions from the pool
/// and generated sign questions; both count toward its quota. The
/// defaults mirror the reference exam sheet: 12 + 6 + (18 + 5) + 9 = 50.
#[derive(Debug, Clone)]
pub struct ExamBlueprint {
    pub first_aid: usize,
    pub courtesy: usize,
    pub traffic_text: usize,
    pub traffic_signs: usize,
    pub engine: usize,
}

impl Default for ExamBlueprint {
    fn default() -> Self {
        Self {
            first_aid: 12,
            courtesy: 6,
            traffic_text: 18,
            traffic_signs: 5,
            engine: 9,
        }
    }
}

impl ExamBlueprint {
    pub fn total(&self) -> usize {
        self.first_aid + self.courtesy + self.traffic_text + self.traffic_signs + self.engine
    }
}

/// Questions per category in the daily mixed quiz.
pub const DAILY_MIX_PER_CATEGORY: usize = 2;

/// Cap for single-category practice quizzes.
pub const CATEGORY_QUIZ_MAX: usize = 10;
