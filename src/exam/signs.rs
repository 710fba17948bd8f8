use rand::seq::SliceRandom;
use rand::Rng;

use super::sampler::sample;
use crate::categories;
use crate::models::{Question, TrafficSign};

/// Options per generated sign question: the true label plus three
/// distractors.
const OPTION_COUNT: usize = 4;

/// Generate up to `count` sign-recognition questions from the catalog.
///
/// Each question shows one sign image and asks for its label; the
/// distractors are other signs' labels, drawn without replacement, and
/// the correct slot is shuffled so it carries no positional bias. A
/// catalog smaller than four signs cannot produce enough distractors and
/// yields no questions at all.
pub fn sign_questions<R: Rng + ?Sized>(
    catalog: &[TrafficSign],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    if catalog.len() < OPTION_COUNT {
        tracing::debug!(
            "sign catalog too small for a question: {} entries",
            catalog.len()
        );
        return Vec::new();
    }

    sample(catalog, count, rng)
        .into_iter()
        .map(|sign| question_for(&sign, catalog, rng))
        .collect()
}

fn question_for<R: Rng + ?Sized>(
    sign: &TrafficSign,
    catalog: &[TrafficSign],
    rng: &mut R,
) -> Question {
    let distractor_pool: Vec<String> = catalog
        .iter()
        .filter(|other| other.id != sign.id)
        .map(|other| other.label.clone())
        .collect();

    let mut options = sample(&distractor_pool, OPTION_COUNT - 1, rng);
    options.push(sign.label.clone());
    options.shuffle(rng);

    let correct_index = options
        .iter()
        .position(|label| *label == sign.label)
        .unwrap_or(0);

    Question {
        id: format!("sign-{}", sign.id),
        prompt: "Şekildeki trafik işareti neyi bildirir?".to_string(),
        options,
        correct_index,
        category: categories::ISARETLER.to_string(),
        explanation: None,
        image: Some(sign.image.clone()),
        option_images: None,
    }
}
