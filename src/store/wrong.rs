use std::collections::HashMap;

use crate::models::WrongAnswer;

use super::{Store, WRONG_FILE};

impl Store {
    /// Upsert a batch of wrong answers into the store, keyed by question
    /// id.
    ///
    /// An entry that already exists for the same question is replaced
    /// wholesale, so the store always holds the most recent wrong attempt
    /// per question and nothing older.
    pub async fn merge_wrong(&self, incoming: Vec<WrongAnswer>) {
        if incoming.is_empty() {
            return;
        }
        let mut state = self.state.lock().await;
        for entry in incoming {
            state.wrong.insert(entry.question_id.clone(), entry);
        }
        tracing::info!("wrong-question store now holds {} entries", state.wrong.len());
        self.write_wrong(&state.wrong).await;
    }

    /// Drop the entry for a question, typically after it was re-answered
    /// correctly during review. Returns whether an entry existed.
    pub async fn remove_wrong(&self, question_id: &str) -> bool {
        let mut state = self.state.lock().await;
        let removed = state.wrong.remove(question_id).is_some();
        if removed {
            self.write_wrong(&state.wrong).await;
        }
        removed
    }

    /// Attach an AI-generated note to an existing entry.
    ///
    /// The note arrives from an async fetch that may lose the race against
    /// a concurrent `remove_wrong` for the same question; a missing entry
    /// is left missing and the note is dropped.
    pub async fn attach_note(&self, question_id: &str, note: &str) {
        let mut state = self.state.lock().await;
        match state.wrong.get_mut(question_id) {
            Some(entry) => {
                entry.ai_note = Some(note.to_string());
                self.write_wrong(&state.wrong).await;
            }
            None => {
                tracing::debug!("note for {question_id} arrived after removal, dropped");
            }
        }
    }

    pub async fn wrong_count(&self) -> usize {
        self.state.lock().await.wrong.len()
    }

    /// All stored wrong answers, ordered by category then question id so
    /// review lists render stably across runs.
    pub async fn wrong_questions(&self) -> Vec<WrongAnswer> {
        let state = self.state.lock().await;
        let mut entries: Vec<WrongAnswer> = state.wrong.values().cloned().collect();
        entries.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.question_id.cmp(&b.question_id))
        });
        entries
    }

    /// Wrong-entry counts per category display name, most wronged first.
    pub async fn wrong_counts_by_category(&self) -> Vec<(String, usize)> {
        let state = self.state.lock().await;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in state.wrong.values() {
            *counts.entry(entry.category_name.as_str()).or_default() += 1;
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// The entries that already carry an AI note, grouped by category
    /// display name.
    pub async fn noted_by_category(&self) -> Vec<(String, Vec<WrongAnswer>)> {
        let mut groups: HashMap<String, Vec<WrongAnswer>> = HashMap::new();
        for entry in self.wrong_questions().await {
            if entry.ai_note.is_some() {
                groups.entry(entry.category_name.clone()).or_default().push(entry);
            }
        }
        let mut groups: Vec<(String, Vec<WrongAnswer>)> = groups.into_iter().collect();
        groups.sort_by(|a, b| a.0.cmp(&b.0));
        groups
    }

    pub async fn clear_wrong(&self) {
        let mut state = self.state.lock().await;
        state.wrong.clear();
        self.write_wrong(&state.wrong).await;
    }

    // Serialized as a flat list, sorted by id so the blob is stable.
    async fn write_wrong(&self, wrong: &HashMap<String, WrongAnswer>) {
        let mut list: Vec<&WrongAnswer> = wrong.values().collect();
        list.sort_by(|a, b| a.question_id.cmp(&b.question_id));
        self.write_blob(WRONG_FILE, &list).await;
    }
}
