use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Habit {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Scheduled time of day as "HH:MM", or empty when unscheduled.
    pub time: String,
    /// Derived from `time` at creation; never accepted from the caller.
    pub category: String,
    pub created_at: String,
}

/// A habit joined with its checkmark state for today.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HabitWithStatus {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub time: String,
    pub category: String,
    pub completed: bool,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewHabitRequest {
    pub title: String,
    pub description: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateHabitRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub time: Option<String>,
}
