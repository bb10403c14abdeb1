use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-date completion record for one habit. At most one row exists per
/// (habit_id, date) pair; `completed_at` is present exactly while
/// `completed` is true.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Checkmark {
    pub id: String,
    pub habit_id: String,
    pub date: String,
    pub completed: bool,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleRequest {
    pub habit_id: String,
    pub date: String,
}

/// Wire shape returned by the toggle endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CheckmarkStatus {
    pub completed: bool,
    pub completed_at: Option<String>,
}
