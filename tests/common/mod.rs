#![allow(dead_code)]

use ehliyet_prep::models::{Question, TrafficSign};
use ehliyet_prep::store::Store;
use tempfile::TempDir;

/// Store over a throwaway directory. Keep the `TempDir` alive for the
/// duration of the test or the directory disappears under the store.
pub async fn create_test_store() -> (Store, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = Store::open(dir.path())
        .await
        .expect("failed to open test store");
    (store, dir)
}

pub fn make_question(id: &str, category: &str, correct_index: usize) -> Question {
    Question {
        id: id.to_string(),
        prompt: format!("Prompt for {id}"),
        options: (0..4).map(|i| format!("{id} option {i}")).collect(),
        correct_index,
        category: category.to_string(),
        explanation: None,
        image: None,
        option_images: None,
    }
}

pub fn make_questions(category: &str, n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| make_question(&format!("{category}-{i}"), category, i % 4))
        .collect()
}

pub fn make_signs(n: usize) -> Vec<TrafficSign> {
    (0..n)
        .map(|i| TrafficSign {
            id: format!("sign-{i}"),
            label: format!("Sign label {i}"),
            image: format!("signs/{i}.png"),
        })
        .collect()
}
