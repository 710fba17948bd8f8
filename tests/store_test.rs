mod common;

use chrono::{NaiveDate, Utc};

use common::{create_test_store, make_question};
use ehliyet_prep::models::{QuizResult, WrongAnswer};
use ehliyet_prep::store::{Profile, Store, HISTORY_CAP};

fn make_wrong(id: &str, category: &str, selected_index: usize) -> WrongAnswer {
    WrongAnswer::from_question(&make_question(id, category, 0), selected_index)
}

fn make_result(id: &str, score: usize, total: usize) -> QuizResult {
    QuizResult {
        id: id.to_string(),
        taken_at: Utc::now(),
        label: "Tam Sınav".to_string(),
        score,
        total,
        wrong: Vec::new(),
    }
}

#[tokio::test]
async fn test_merge_upserts_by_question_id() {
    let (store, _dir) = create_test_store().await;

    store.merge_wrong(vec![make_wrong("q1", "trafik", 2)]).await;
    // Same question missed again with a different selection
    store.merge_wrong(vec![make_wrong("q1", "trafik", 3)]).await;

    assert_eq!(store.wrong_count().await, 1);
    let entries = store.wrong_questions().await;
    assert_eq!(entries[0].question_id, "q1");
    // Only the most recent attempt survives
    assert_eq!(entries[0].selected_index, 3);
}

#[tokio::test]
async fn test_attach_note_after_remove_is_a_noop() {
    let (store, _dir) = create_test_store().await;

    store.merge_wrong(vec![make_wrong("q1", "trafik", 2)]).await;
    assert!(store.remove_wrong("q1").await);

    // The async explanation fetch lost the race; nothing resurrects
    store.attach_note("q1", "late note").await;

    assert_eq!(store.wrong_count().await, 0);
}

#[tokio::test]
async fn test_attach_note_sets_the_field() {
    let (store, _dir) = create_test_store().await;

    store.merge_wrong(vec![make_wrong("q1", "trafik", 2)]).await;
    store.attach_note("q1", "işaret levhası dur anlamına gelir").await;

    let entries = store.wrong_questions().await;
    assert_eq!(
        entries[0].ai_note.as_deref(),
        Some("işaret levhası dur anlamına gelir")
    );
}

#[tokio::test]
async fn test_remove_missing_entry() {
    let (store, _dir) = create_test_store().await;
    assert!(!store.remove_wrong("nope").await);
}

#[tokio::test]
async fn test_category_counts_sorted_descending() {
    let (store, _dir) = create_test_store().await;

    store
        .merge_wrong(vec![
            make_wrong("t1", "trafik", 1),
            make_wrong("t2", "trafik", 2),
            make_wrong("t3", "trafik", 3),
            make_wrong("m1", "motor", 1),
        ])
        .await;

    let counts = store.wrong_counts_by_category().await;

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0], ("Trafik ve Çevre Bilgisi".to_string(), 3));
    assert_eq!(counts[1], ("Araç Tekniği".to_string(), 1));
}

#[tokio::test]
async fn test_noted_entries_grouped_by_category() {
    let (store, _dir) = create_test_store().await;

    store
        .merge_wrong(vec![
            make_wrong("t1", "trafik", 1),
            make_wrong("t2", "trafik", 2),
            make_wrong("m1", "motor", 1),
        ])
        .await;
    store.attach_note("t1", "note one").await;
    store.attach_note("m1", "note two").await;

    let groups = store.noted_by_category().await;

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "Araç Tekniği");
    assert_eq!(groups[0].1.len(), 1);
    assert_eq!(groups[1].0, "Trafik ve Çevre Bilgisi");
    // t2 has no note yet and stays out of this view
    assert_eq!(groups[1].1.len(), 1);
    assert_eq!(groups[1].1[0].question_id, "t1");
}

#[tokio::test]
async fn test_history_evicts_oldest_past_the_cap() {
    let (store, _dir) = create_test_store().await;

    for i in 0..HISTORY_CAP + 5 {
        store.record_result(make_result(&format!("r{i}"), 40, 50)).await;
    }

    let history = store.history().await;
    assert_eq!(history.len(), HISTORY_CAP);
    // Most recent first; the five oldest are gone
    assert_eq!(history[0].id, format!("r{}", HISTORY_CAP + 4));
    assert!(history.iter().all(|r| r.id != "r0" && r.id != "r4"));
}

#[tokio::test]
async fn test_history_summary() {
    let (store, _dir) = create_test_store().await;

    store.record_result(make_result("r1", 8, 10)).await;
    store.record_result(make_result("r2", 5, 10)).await;

    let summary = store.history_summary().await;

    assert_eq!(summary.attempts, 2);
    assert_eq!(summary.best_percentage, 80);
    assert!((summary.mean_percentage - 65.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_store_reloads_from_disk() {
    let (store, dir) = create_test_store().await;

    store.merge_wrong(vec![make_wrong("q1", "trafik", 2)]).await;
    store.attach_note("q1", "kept across restarts").await;
    store.record_result(make_result("r1", 42, 50)).await;
    store
        .set_profile(Profile {
            name: "Ayşe".to_string(),
            exam_date: NaiveDate::from_ymd_opt(2026, 9, 1),
        })
        .await;
    drop(store);

    let reopened = Store::open(dir.path()).await.unwrap();

    let entries = reopened.wrong_questions().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ai_note.as_deref(), Some("kept across restarts"));
    assert_eq!(reopened.history().await.len(), 1);
    let profile = reopened.profile().await;
    assert_eq!(profile.name, "Ayşe");
    assert_eq!(profile.exam_date, NaiveDate::from_ymd_opt(2026, 9, 1));
}

#[tokio::test]
async fn test_unreadable_blob_resets_to_empty() {
    let (store, dir) = create_test_store().await;
    store.merge_wrong(vec![make_wrong("q1", "trafik", 2)]).await;
    drop(store);

    tokio::fs::write(dir.path().join("wrong_questions.json"), "{not json")
        .await
        .unwrap();

    let reopened = Store::open(dir.path()).await.unwrap();
    assert_eq!(reopened.wrong_count().await, 0);
}

#[test]
fn test_days_to_exam() {
    let profile = Profile {
        name: String::new(),
        exam_date: NaiveDate::from_ymd_opt(2026, 9, 10),
    };
    let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

    assert_eq!(profile.days_to_exam(today), Some(9));
    assert_eq!(Profile::default().days_to_exam(today), None);

    let passed = Profile {
        name: String::new(),
        exam_date: NaiveDate::from_ymd_opt(2026, 8, 30),
    };
    assert_eq!(passed.days_to_exam(today), Some(-2));
}

#[tokio::test]
async fn test_clear_wrong() {
    let (store, _dir) = create_test_store().await;

    store
        .merge_wrong(vec![
            make_wrong("q1", "trafik", 1),
            make_wrong("q2", "motor", 2),
        ])
        .await;
    store.clear_wrong().await;

    assert_eq!(store.wrong_count().await, 0);
    assert!(store.wrong_questions().await.is_empty());
}
