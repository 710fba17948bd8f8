use std::collections::HashMap;

use chrono::Utc;
use ulid::Ulid;

use crate::categories;
use crate::models::{Question, QuizResult, WrongAnswer};

/// What kind of quiz a session runs. The kind decides the countdown
/// duration, the result label, and whether answer feedback is immediate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizKind {
    FullExam,
    Category(String),
    Signs,
    DailyMix,
    Review,
}

impl QuizKind {
    /// Full exams defer all feedback to the result screen; every practice
    /// kind reveals correctness per question.
    pub fn reveals_immediately(&self) -> bool {
        !matches!(self, QuizKind::FullExam)
    }

    pub fn duration_minutes(&self) -> u64 {
        match self {
            QuizKind::FullExam => 45,
            QuizKind::Review => 15,
            QuizKind::Category(_) | QuizKind::Signs | QuizKind::DailyMix => 10,
        }
    }

    pub fn label(&self) -> String {
        match self {
            QuizKind::FullExam => "Tam Sınav".to_string(),
            QuizKind::Category(id) => categories::display_name(id).to_string(),
            QuizKind::Signs => categories::display_name(categories::ISARETLER).to_string(),
            QuizKind::DailyMix => "Günlük Karışık".to_string(),
            QuizKind::Review => "Yanlış Tekrarı".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Finished,
    Cancelled,
}

/// Outcome of one [`QuizSession::select_answer`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerFeedback {
    /// Recorded; correctness deferred to the result (full-exam mode).
    Recorded,
    Correct,
    Incorrect { correct_index: usize },
    /// Out-of-range input or a finished session; state untouched.
    Rejected,
}

/// One quiz attempt: a fixed question list, a sparse answer map, and a
/// countdown.
///
/// Composition (and any remote fetch behind it) happens before a session
/// value exists, so a constructed session is always in progress. Once
/// finished, the question list, the answer map and the derived result are
/// frozen; cancelling is the only way to leave without producing a
/// result. The session itself is ephemeral — only its result is
/// persisted.
#[derive(Debug)]
pub struct QuizSession {
    kind: QuizKind,
    questions: Vec<Question>,
    answers: HashMap<usize, usize>,
    remaining_secs: u64,
    state: SessionState,
    outcome: Option<QuizResult>,
}

impl QuizSession {
    pub fn new(kind: QuizKind, questions: Vec<Question>) -> Self {
        let minutes = kind.duration_minutes();
        Self::with_duration(kind, questions, minutes)
    }

    pub fn with_duration(kind: QuizKind, questions: Vec<Question>, minutes: u64) -> Self {
        tracing::info!(
            "session started: {} with {} questions, {minutes} min",
            kind.label(),
            questions.len()
        );
        Self {
            kind,
            questions,
            answers: HashMap::new(),
            remaining_secs: minutes * 60,
            state: SessionState::InProgress,
            outcome: None,
        }
    }

    pub fn kind(&self) -> &QuizKind {
        &self.kind
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn in_progress(&self) -> bool {
        self.state == SessionState::InProgress
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn answer_at(&self, position: usize) -> Option<usize> {
        self.answers.get(&position).copied()
    }

    /// The frozen result, present once the session has finished.
    pub fn result(&self) -> Option<&QuizResult> {
        self.outcome.as_ref()
    }

    /// Record (or overwrite) the answer for one question position.
    ///
    /// Range violations and calls on a session that already left
    /// `InProgress` are rejected without touching state; a correctly
    /// wired UI never produces them.
    pub fn select_answer(&mut self, position: usize, option_index: usize) -> AnswerFeedback {
        if !self.in_progress() {
            tracing::warn!("answer after session end ignored (position {position})");
            return AnswerFeedback::Rejected;
        }
        let Some(question) = self.questions.get(position) else {
            tracing::warn!("answer for out-of-range position {position} ignored");
            return AnswerFeedback::Rejected;
        };
        if option_index >= question.options.len() {
            tracing::warn!(
                "option {option_index} out of range for position {position}, ignored"
            );
            return AnswerFeedback::Rejected;
        }

        self.answers.insert(position, option_index);

        if !self.kind.reveals_immediately() {
            return AnswerFeedback::Recorded;
        }
        if option_index == question.correct_index {
            AnswerFeedback::Correct
        } else {
            AnswerFeedback::Incorrect {
                correct_index: question.correct_index,
            }
        }
    }

    /// One second of wall-clock time. Returns the result exactly when the
    /// countdown reaches zero and forces submission; a session that is no
    /// longer in progress ignores stray ticks.
    pub fn tick(&mut self) -> Option<QuizResult> {
        if !self.in_progress() {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        tracing::info!("time expired, forcing submission");
        self.finish()
    }

    /// Score the session and freeze it.
    ///
    /// Returns `Some` exactly once, on the transition out of
    /// `InProgress`; repeated calls (a stray timer tick racing a manual
    /// finish) and cancelled sessions yield `None`, so result sinks run
    /// once. The frozen result stays readable via [`Self::result`].
    pub fn finish(&mut self) -> Option<QuizResult> {
        if !self.in_progress() {
            return None;
        }

        let mut score = 0;
        let mut wrong = Vec::new();
        for (position, question) in self.questions.iter().enumerate() {
            match self.answers.get(&position) {
                Some(selected) if *selected == question.correct_index => score += 1,
                Some(selected) => wrong.push(WrongAnswer::from_question(question, *selected)),
                // Unanswered: neither correct nor wrong.
                None => {}
            }
        }

        let result = QuizResult {
            id: Ulid::new().to_string(),
            taken_at: Utc::now(),
            label: self.kind.label(),
            score,
            total: self.questions.len(),
            wrong,
        };

        tracing::info!(
            "session finished: {} scored {}/{}",
            result.label,
            result.score,
            result.total
        );

        self.state = SessionState::Finished;
        self.outcome = Some(result.clone());
        Some(result)
    }

    /// Abandon the session without a result. The caller confirms with the
    /// user first — the in-progress answers are irrecoverable.
    pub fn cancel(&mut self) {
        if !self.in_progress() {
            return;
        }
        tracing::info!("session cancelled: {}", self.kind.label());
        self.state = SessionState::Cancelled;
    }

    /// Question ids answered correctly in this session. Review mode uses
    /// this to clear mastered entries from the wrong-question store.
    pub fn correct_question_ids(&self) -> Vec<&str> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(position, question)| {
                self.answers.get(position) == Some(&question.correct_index)
            })
            .map(|(_, question)| question.id.as_str())
            .collect()
    }
}
