use crate::categories;
use crate::models::{Lesson, Question, TrafficSign};
use crate::remote::ContentClient;

/// In-memory question repository for one app run.
///
/// Questions are fetched once at startup and never mutated afterwards;
/// callers get cloned snapshots of the pools they ask for. A failed fetch
/// degrades to an empty bank, which the composer tolerates by
/// under-filling.
#[derive(Debug, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
    signs: Vec<TrafficSign>,
    lessons: Vec<Lesson>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>, signs: Vec<TrafficSign>) -> Self {
        let questions: Vec<Question> = questions
            .into_iter()
            .filter(|q| {
                if q.is_well_formed() {
                    true
                } else {
                    tracing::warn!("dropping malformed question {}", q.id);
                    false
                }
            })
            .collect();

        tracing::info!(
            "question bank ready: {} questions, {} signs",
            questions.len(),
            signs.len()
        );

        Self {
            questions,
            signs,
            lessons: Vec::new(),
        }
    }

    /// Fetch questions and lessons from the remote content store. Network
    /// failure is not fatal: the affected part of the bank stays empty and
    /// the UI offers a retry by reloading.
    pub async fn load(client: &ContentClient, signs: Vec<TrafficSign>) -> Self {
        let questions = match client.fetch_questions().await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!("question fetch failed, starting with empty bank: {e}");
                Vec::new()
            }
        };

        let lessons = match client.fetch_lessons().await {
            Ok(lessons) => lessons,
            Err(e) => {
                tracing::warn!("lesson fetch failed: {e}");
                Vec::new()
            }
        };

        let mut bank = Self::new(questions, signs);
        bank.lessons = lessons;
        bank
    }

    pub fn with_lessons(mut self, lessons: Vec<Lesson>) -> Self {
        self.lessons = lessons;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Cloned pool for a public category id, resolved through the alias
    /// table. Unknown ids and the synthetic sign category yield an empty
    /// pool (sign questions never live in the bank).
    pub fn pool(&self, category_id: &str) -> Vec<Question> {
        let Some(canonical) = categories::resolve(category_id) else {
            tracing::warn!("unknown category id: {category_id}");
            return Vec::new();
        };
        if canonical == categories::ISARETLER {
            return Vec::new();
        }
        self.questions
            .iter()
            .filter(|q| categories::resolve(&q.category) == Some(canonical))
            .cloned()
            .collect()
    }

    pub fn signs(&self) -> &[TrafficSign] {
        &self.signs
    }

    /// Lesson entries for a public category id, alias-resolved.
    pub fn lessons_for(&self, category_id: &str) -> Vec<&Lesson> {
        let canonical = categories::resolve(category_id);
        self.lessons
            .iter()
            .filter(|l| categories::resolve(&l.category) == canonical)
            .collect()
    }
}
