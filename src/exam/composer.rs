use rand::seq::SliceRandom;
use rand::Rng;

use super::sampler::sample;
use super::signs::sign_questions;
use super::{ExamBlueprint, DAILY_MIX_PER_CATEGORY};
use crate::bank::QuestionBank;
use crate::categories;
use crate::models::Question;

/// Compose a full exam from the fixed blueprint quotas.
///
/// Each category's draw goes through the sampler; the trafik quota is
/// text questions plus generated sign questions, shuffled together before
/// joining the rest. A final full-list shuffle breaks up the category
/// blocks. Pools smaller than their quota under-fill silently — the
/// shortfall is a diagnostic, never a user-facing error.
pub fn compose_full_exam<R: Rng + ?Sized>(
    bank: &QuestionBank,
    blueprint: &ExamBlueprint,
    rng: &mut R,
) -> Vec<Question> {
    let mut exam = Vec::with_capacity(blueprint.total());

    exam.extend(sample(
        &bank.pool(categories::ILKYARDIM),
        blueprint.first_aid,
        rng,
    ));
    exam.extend(sample(
        &bank.pool(categories::TRAFIKADABI),
        blueprint.courtesy,
        rng,
    ));

    let mut traffic = sample(&bank.pool(categories::TRAFIK), blueprint.traffic_text, rng);
    traffic.extend(sign_questions(bank.signs(), blueprint.traffic_signs, rng));
    traffic.shuffle(rng);
    exam.extend(traffic);

    exam.extend(sample(&bank.pool(categories::MOTOR), blueprint.engine, rng));

    exam.shuffle(rng);

    if exam.len() < blueprint.total() {
        tracing::debug!(
            "full exam under-filled: {} of {} questions",
            exam.len(),
            blueprint.total()
        );
    }

    exam
}

/// Compose a practice quiz for one public category id.
///
/// The id is resolved through the alias table; the synthetic sign
/// category bypasses the bank and generates its questions instead. An
/// empty return means the category has no content right now — the caller
/// shows a "no questions" state with a retry, not an error.
pub fn compose_category_quiz<R: Rng + ?Sized>(
    bank: &QuestionBank,
    category_id: &str,
    max: usize,
    rng: &mut R,
) -> Vec<Question> {
    match categories::resolve(category_id) {
        Some(categories::ISARETLER) => sign_questions(bank.signs(), max, rng),
        Some(canonical) => sample(&bank.pool(canonical), max, rng),
        None => {
            tracing::warn!("category quiz requested for unknown id: {category_id}");
            Vec::new()
        }
    }
}

/// Compose the daily mixed quiz: a small fixed cap from every canonical
/// category plus the same cap of sign questions, under-fill tolerated the
/// same way the full exam tolerates it.
pub fn compose_daily_mix<R: Rng + ?Sized>(bank: &QuestionBank, rng: &mut R) -> Vec<Question> {
    let mut quiz = Vec::new();
    for category in categories::CANONICAL {
        quiz.extend(sample(&bank.pool(category), DAILY_MIX_PER_CATEGORY, rng));
    }
    quiz.extend(sign_questions(bank.signs(), DAILY_MIX_PER_CATEGORY, rng));
    quiz.shuffle(rng);
    quiz
}
