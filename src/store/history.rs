use serde::Serialize;

use crate::models::QuizResult;

use super::{Store, HISTORY_FILE};

/// How many finished results the history keeps before evicting the
/// oldest.
pub const HISTORY_CAP: usize = 50;

/// Aggregates over the stored history, for the progress screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub attempts: usize,
    pub best_percentage: u32,
    pub mean_percentage: f64,
}

impl Store {
    /// Append a finished result. The history is append-only and bounded:
    /// past the cap, the oldest entry is evicted first.
    pub async fn record_result(&self, result: QuizResult) {
        let mut state = self.state.lock().await;
        state.history.push_back(result);
        while state.history.len() > HISTORY_CAP {
            state.history.pop_front();
        }
        self.write_blob(HISTORY_FILE, &state.history).await;
    }

    /// Stored results, most recent first.
    pub async fn history(&self) -> Vec<QuizResult> {
        let state = self.state.lock().await;
        state.history.iter().rev().cloned().collect()
    }

    pub async fn history_summary(&self) -> HistorySummary {
        let state = self.state.lock().await;
        let attempts = state.history.len();
        let best_percentage = state
            .history
            .iter()
            .map(QuizResult::percentage)
            .max()
            .unwrap_or(0);
        let mean_percentage = if attempts == 0 {
            0.0
        } else {
            let sum: u32 = state.history.iter().map(QuizResult::percentage).sum();
            f64::from(sum) / attempts as f64
        };
        HistorySummary {
            attempts,
            best_percentage,
            mean_percentage,
        }
    }
}
