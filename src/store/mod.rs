// Local persistence - small JSON blobs under one directory

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::models::{QuizResult, WrongAnswer};

mod history;
mod profile;
mod wrong;

pub use history::{HistorySummary, HISTORY_CAP};
pub use profile::Profile;

const WRONG_FILE: &str = "wrong_questions.json";
const HISTORY_FILE: &str = "history.json";
const PROFILE_FILE: &str = "profile.json";

#[derive(Debug, Default)]
struct StoreState {
    wrong: HashMap<String, WrongAnswer>,
    history: VecDeque<QuizResult>,
    profile: Profile,
}

/// Handle over the app's local key-value persistence.
///
/// All state lives in memory; every mutation updates memory first and
/// then writes the affected JSON blob back. Write failures are logged and
/// swallowed — the UI always reflects the in-memory state, and a lost
/// write costs at most one device-local update.
#[derive(Clone)]
pub struct Store {
    state: Arc<Mutex<StoreState>>,
    dir: PathBuf,
}

impl Store {
    /// Open the store directory, creating it if needed, and load whatever
    /// blobs already exist. Unreadable blobs reset to empty rather than
    /// blocking startup.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let wrong_list: Vec<WrongAnswer> = read_blob(&dir.join(WRONG_FILE)).await;
        let history: VecDeque<QuizResult> = read_blob(&dir.join(HISTORY_FILE)).await;
        let profile: Profile = read_blob(&dir.join(PROFILE_FILE)).await;

        let wrong = wrong_list
            .into_iter()
            .map(|entry| (entry.question_id.clone(), entry))
            .collect();

        tracing::info!("store opened at {}", dir.display());

        Ok(Self {
            state: Arc::new(Mutex::new(StoreState {
                wrong,
                history,
                profile,
            })),
            dir,
        })
    }

    async fn write_blob<T: Serialize>(&self, file: &str, value: &T) {
        let path = self.dir.join(file);
        let json = match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("could not serialize {file}: {e}");
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&path, json).await {
            tracing::warn!("could not write {}: {e}", path.display());
        }
    }
}

async fn read_blob<T: DeserializeOwned + Default>(path: &Path) -> T {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("could not parse {}, resetting: {e}", path.display());
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}
