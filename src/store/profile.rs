use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Store, PROFILE_FILE};

/// The user's local profile: a display name and the booked exam date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exam_date: Option<NaiveDate>,
}

impl Profile {
    /// Days from `today` until the exam. Negative once the date has
    /// passed; `None` while no date is set.
    pub fn days_to_exam(&self, today: NaiveDate) -> Option<i64> {
        self.exam_date
            .map(|date| date.signed_duration_since(today).num_days())
    }
}

impl Store {
    pub async fn profile(&self) -> Profile {
        self.state.lock().await.profile.clone()
    }

    pub async fn set_profile(&self, profile: Profile) {
        let mut state = self.state.lock().await;
        state.profile = profile;
        self.write_blob(PROFILE_FILE, &state.profile).await;
    }
}
