use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::db::repository;
use crate::error::AppError;
use crate::models::Checkmark;

/// What a toggle did to the (habit, date) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No checkmark existed; a new one was created already completed.
    Created,
    /// An existing checkmark was flipped to the contained value.
    Flipped(bool),
}

impl ToggleOutcome {
    pub fn completed(self) -> bool {
        match self {
            ToggleOutcome::Created => true,
            ToggleOutcome::Flipped(v) => v,
        }
    }
}

/// Lazy create-or-flip logic for per-date habit checkmarks. A checkmark is
/// created on first toggle and flipped in place forever after; it is never
/// deleted individually.
pub struct CheckmarkService {
    db: SqlitePool,
    clock: Clock,
}

impl CheckmarkService {
    pub fn new(db: SqlitePool, clock: Clock) -> Self {
        Self { db, clock }
    }

    /// Toggles the checkmark for (habit, date). `completed_at` is stamped
    /// with now() whenever the new state is completed and cleared otherwise,
    /// so two consecutive calls restore the original state exactly.
    pub async fn toggle(
        &self,
        habit_id: &str,
        date: NaiveDate,
    ) -> Result<(ToggleOutcome, Checkmark), AppError> {
        repository::find_habit_by_id(&self.db, habit_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Habit not found".to_string()))?;

        match repository::find_checkmark(&self.db, habit_id, date).await? {
            None => {
                let mark = Checkmark {
                    id: Uuid::new_v4().to_string(),
                    habit_id: habit_id.to_string(),
                    date: date.to_string(),
                    completed: true,
                    completed_at: Some(self.clock.timestamp()),
                };
                repository::insert_checkmark(&self.db, &mark).await?;
                info!("checkmark created for habit {} on {}", habit_id, date);
                Ok((ToggleOutcome::Created, mark))
            }
            Some(mut mark) => {
                mark.completed = !mark.completed;
                mark.completed_at = mark.completed.then(|| self.clock.timestamp());
                repository::set_checkmark_state(
                    &self.db,
                    &mark.id,
                    mark.completed,
                    mark.completed_at.as_deref(),
                )
                .await?;
                info!(
                    "checkmark flipped to {} for habit {} on {}",
                    mark.completed, habit_id, date
                );
                Ok((ToggleOutcome::Flipped(mark.completed), mark))
            }
        }
    }
}
