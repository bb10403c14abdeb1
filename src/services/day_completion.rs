use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::db::repository;
use crate::error::AppError;
use crate::models::{DayCompletion, Note};
use crate::period;

/// A habit as it appears in a day-detail response: completed on that date,
/// with its scheduled time normalized to "HH:MM" when parseable.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedHabit {
    pub id: String,
    pub title: String,
    pub time: Option<String>,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayDetail {
    pub date: String,
    pub completed_at: String,
    pub habits: Vec<CompletedHabit>,
    pub notes: Vec<Note>,
}

/// Rules for marking a whole day complete. A date moves from open to
/// completed only when every habit has a completed checkmark for it; the
/// completion row is immutable afterwards and only removed by explicit
/// deletion or a global reset.
pub struct DayCompletionService {
    db: SqlitePool,
    clock: Clock,
}

impl DayCompletionService {
    pub fn new(db: SqlitePool, clock: Clock) -> Self {
        Self { db, clock }
    }

    /// Marks today complete. The all-habits check is a strict AND evaluated
    /// at call time; the UNIQUE(date) constraint turns a concurrent
    /// duplicate insert into the conflict error rather than a second row.
    pub async fn complete_today(&self) -> Result<DayCompletion, AppError> {
        let now = self.clock.now();
        let today = now.date_naive();

        if repository::count_habits(&self.db).await? == 0 {
            return Err(AppError::BadRequest("No habits found".to_string()));
        }
        if repository::count_unchecked_habits(&self.db, today).await? > 0 {
            return Err(AppError::BadRequest(
                "Not all habits are completed for today".to_string(),
            ));
        }

        let completion = DayCompletion {
            id: Uuid::new_v4().to_string(),
            date: today.to_string(),
            completed_at: now.to_rfc3339(),
        };
        match repository::insert_day_completion(&self.db, &completion).await {
            Ok(()) => {
                info!("day {} marked complete", completion.date);
                Ok(completion)
            }
            Err(e) if is_unique_violation(&e) => {
                Err(AppError::Conflict("Day already completed".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(&self) -> Result<Vec<DayCompletion>, AppError> {
        Ok(repository::fetch_day_completions(&self.db).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if repository::delete_day_completion(&self.db, id).await? {
            info!("day completion {} deleted", id);
            Ok(())
        } else {
            Err(AppError::NotFound("Day completion not found".to_string()))
        }
    }

    /// Everything recorded for a completed date: the completion timestamp,
    /// the habits checked off that day, and the notes written that day.
    /// Notes are attributed to the date by converting their creation
    /// timestamp into the fixed zone, so the day window and the compared
    /// timestamps agree near midnight.
    pub async fn day_detail(&self, date: NaiveDate) -> Result<DayDetail, AppError> {
        let completion = repository::find_day_completion_by_date(&self.db, date)
            .await?
            .ok_or_else(|| AppError::NotFound("Day completion not found".to_string()))?;

        let habits = repository::fetch_completed_habits(&self.db, date)
            .await?
            .into_iter()
            .map(|row| CompletedHabit {
                id: row.habit_id,
                title: row.title,
                time: period::normalize_time(&row.time),
                completed_at: row.completed_at,
            })
            .collect();

        let notes = repository::fetch_notes(&self.db)
            .await?
            .into_iter()
            .filter(|n| self.clock.local_date(&n.created_at) == Some(date))
            .collect();

        Ok(DayDetail {
            date: completion.date,
            completed_at: completion.completed_at,
            habits,
            notes,
        })
    }

    /// Wipes all checkmarks, day completions and notes; habits stay.
    pub async fn reset_all(&self) -> Result<(), AppError> {
        repository::reset_tracking(&self.db).await?;
        info!("checkmarks, day completions and notes reset");
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
