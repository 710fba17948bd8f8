pub mod bank;
pub mod categories;
pub mod exam;
pub mod models;
pub mod remote;
pub mod session;
pub mod store;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tokio::time::{self, Duration};

use bank::QuestionBank;
use exam::ExamBlueprint;
use models::{Question, QuizResult, WrongAnswer};
use remote::{Explanation, ExplanationClient, ExplanationRequest};
use session::{QuizKind, QuizSession};
use store::Store;

/// The wired-up engine: question bank, local store, optional explanation
/// client, and the exam blueprint. Screens hold a clone of this and start
/// sessions through it.
#[derive(Clone)]
pub struct App {
    pub bank: Arc<QuestionBank>,
    pub store: Store,
    pub explainer: Option<Arc<ExplanationClient>>,
    pub blueprint: ExamBlueprint,
}

impl App {
    pub fn new(bank: QuestionBank, store: Store, explainer: Option<ExplanationClient>) -> Self {
        Self {
            bank: Arc::new(bank),
            store,
            explainer: explainer.map(Arc::new),
            blueprint: ExamBlueprint::default(),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(rand::random())
    }

    /// Start a full 50-question exam. `None` when the bank has nothing to
    /// draw from at all — the caller shows the "no content" state with a
    /// retry.
    pub fn start_full_exam(&self) -> Option<QuizSession> {
        let questions = exam::compose_full_exam(&self.bank, &self.blueprint, &mut Self::rng());
        Self::start(QuizKind::FullExam, questions)
    }

    /// Start a practice quiz for one public category id.
    pub fn start_category_quiz(&self, category_id: &str) -> Option<QuizSession> {
        let questions = exam::compose_category_quiz(
            &self.bank,
            category_id,
            exam::CATEGORY_QUIZ_MAX,
            &mut Self::rng(),
        );
        Self::start(QuizKind::Category(category_id.to_string()), questions)
    }

    /// Start a sign-recognition quiz, generated from the sign catalog.
    pub fn start_sign_quiz(&self) -> Option<QuizSession> {
        let questions = exam::compose_category_quiz(
            &self.bank,
            categories::ISARETLER,
            exam::CATEGORY_QUIZ_MAX,
            &mut Self::rng(),
        );
        Self::start(QuizKind::Signs, questions)
    }

    /// Start the daily mixed quiz: a couple of questions from every
    /// category.
    pub fn start_daily_mix(&self) -> Option<QuizSession> {
        let questions = exam::compose_daily_mix(&self.bank, &mut Self::rng());
        Self::start(QuizKind::DailyMix, questions)
    }

    /// Start a review session over the stored wrong questions, presented
    /// from their snapshots so they look exactly as they did when missed.
    pub async fn start_review(&self) -> Option<QuizSession> {
        let questions: Vec<Question> = self
            .store
            .wrong_questions()
            .await
            .iter()
            .map(snapshot_question)
            .collect();
        Self::start(QuizKind::Review, questions)
    }

    fn start(kind: QuizKind, questions: Vec<Question>) -> Option<QuizSession> {
        if questions.is_empty() {
            tracing::warn!("no questions available for {}", kind.label());
            return None;
        }
        Some(QuizSession::new(kind, questions))
    }

    /// Finish the session and run the result through the sinks: history,
    /// wrong-question store, and one explanation fetch per wrong answer.
    /// `None` when the session had already left `InProgress`.
    pub async fn finalize(&self, session: &mut QuizSession) -> Option<QuizResult> {
        let result = session.finish()?;
        let correct_ids: Vec<String> = session
            .correct_question_ids()
            .iter()
            .map(|id| id.to_string())
            .collect();
        self.record(session.kind(), &correct_ids, &result).await;
        Some(result)
    }

    /// Drive the session countdown, one tick per second of wall-clock
    /// time. When the countdown forces submission, the result runs
    /// through the same sinks as a manual finish. The loop stops as soon
    /// as the session leaves `InProgress`, so a finish or cancel
    /// elsewhere also stops the timer.
    pub async fn run_countdown(&self, session: Arc<Mutex<QuizSession>>) {
        let mut interval = time::interval(Duration::from_secs(1));
        interval.tick().await;
        loop {
            interval.tick().await;
            let mut guard = session.lock().await;
            if !guard.in_progress() {
                break;
            }
            if let Some(result) = guard.tick() {
                let kind = guard.kind().clone();
                let correct_ids: Vec<String> = guard
                    .correct_question_ids()
                    .iter()
                    .map(|id| id.to_string())
                    .collect();
                drop(guard);
                self.record(&kind, &correct_ids, &result).await;
                break;
            }
        }
    }

    // In-memory sinks update first; persistence inside the store follows
    // and never blocks the result from reaching the caller.
    async fn record(&self, kind: &QuizKind, correct_ids: &[String], result: &QuizResult) {
        self.store.record_result(result.clone()).await;
        self.store.merge_wrong(result.wrong.clone()).await;

        // A correct re-answer during review clears the stored entry.
        if *kind == QuizKind::Review {
            for id in correct_ids {
                self.store.remove_wrong(id).await;
            }
        }

        self.spawn_explanations(&result.wrong);
    }

    fn spawn_explanations(&self, wrong: &[WrongAnswer]) {
        let Some(explainer) = &self.explainer else {
            return;
        };
        for entry in wrong {
            let explainer = Arc::clone(explainer);
            let store = self.store.clone();
            let request = ExplanationRequest::for_wrong_answer(entry);
            let question_id = entry.question_id.clone();
            tokio::spawn(async move {
                match explainer.explain(&request).await {
                    Explanation::Note(note) => store.attach_note(&question_id, &note).await,
                    Explanation::Unavailable => {
                        tracing::warn!("explanation unavailable for {question_id}");
                    }
                }
            });
        }
    }
}

/// Rebuild a reviewable question from a stored wrong answer's snapshot.
fn snapshot_question(wrong: &WrongAnswer) -> Question {
    Question {
        id: wrong.question_id.clone(),
        prompt: wrong.prompt.clone(),
        options: wrong.options.clone(),
        correct_index: wrong.correct_index,
        category: wrong.category.clone(),
        explanation: None,
        image: wrong.image.clone(),
        option_images: wrong.option_images.clone(),
    }
}
