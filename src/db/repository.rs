use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};

use crate::models::{
    Checkmark, DayCompletion, Habit, HabitWithStatus, Note, UpdateHabitRequest,
};

// ---- habits ----

pub async fn fetch_habits(db: &SqlitePool) -> Result<Vec<Habit>, sqlx::Error> {
    sqlx::query_as::<_, Habit>(
        "SELECT id, title, description, time, category, created_at
         FROM habits
         ORDER BY created_at, id",
    )
    .fetch_all(db)
    .await
}

/// Every habit joined with its checkmark state for `date`.
pub async fn fetch_habits_with_status(
    db: &SqlitePool,
    date: NaiveDate,
) -> Result<Vec<HabitWithStatus>, sqlx::Error> {
    sqlx::query_as::<_, HabitWithStatus>(
        "SELECT h.id, h.title, h.description, h.time, h.category,
                COALESCE(c.completed, 0) AS completed,
                c.completed_at
         FROM habits h
         LEFT JOIN checkmarks c ON c.habit_id = h.id AND c.date = ?1
         ORDER BY h.created_at, h.id",
    )
    .bind(date.to_string())
    .fetch_all(db)
    .await
}

pub async fn find_habit_by_id(db: &SqlitePool, id: &str) -> Result<Option<Habit>, sqlx::Error> {
    sqlx::query_as::<_, Habit>(
        "SELECT id, title, description, time, category, created_at FROM habits WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_habit(db: &SqlitePool, habit: &Habit) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO habits (id, title, description, time, category, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&habit.id)
    .bind(&habit.title)
    .bind(&habit.description)
    .bind(&habit.time)
    .bind(&habit.category)
    .bind(&habit.created_at)
    .execute(db)
    .await?;
    Ok(())
}

/// Partial patch: only supplied fields overwrite. The stored category is
/// deliberately left alone even when the time changes.
pub async fn update_habit(
    db: &SqlitePool,
    id: &str,
    req: UpdateHabitRequest,
) -> Result<Option<Habit>, sqlx::Error> {
    let mut current = match find_habit_by_id(db, id).await? {
        Some(h) => h,
        None => return Ok(None),
    };

    if let Some(title) = req.title {
        current.title = title;
    }
    if let Some(description) = req.description {
        current.description = Some(description);
    }
    if let Some(time) = req.time {
        current.time = time;
    }

    sqlx::query(
        "UPDATE habits SET title = ?1, description = ?2, time = ?3 WHERE id = ?4",
    )
    .bind(&current.title)
    .bind(&current.description)
    .bind(&current.time)
    .bind(id)
    .execute(db)
    .await?;

    Ok(Some(current))
}

/// Deletes a habit and all of its checkmarks in one transaction,
/// dependents first. Returns false when the habit does not exist.
pub async fn delete_habit(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM checkmarks WHERE habit_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM habits WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(rows > 0)
}

pub async fn count_habits(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM habits")
        .fetch_one(db)
        .await
}

/// Habits with no completed checkmark for `date`.
pub async fn count_unchecked_habits(db: &SqlitePool, date: NaiveDate) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM habits h
         WHERE NOT EXISTS (
             SELECT 1 FROM checkmarks c
             WHERE c.habit_id = h.id AND c.date = ?1 AND c.completed = 1
         )",
    )
    .bind(date.to_string())
    .fetch_one(db)
    .await
}

// ---- checkmarks ----

pub async fn find_checkmark(
    db: &SqlitePool,
    habit_id: &str,
    date: NaiveDate,
) -> Result<Option<Checkmark>, sqlx::Error> {
    sqlx::query_as::<_, Checkmark>(
        "SELECT id, habit_id, date, completed, completed_at
         FROM checkmarks
         WHERE habit_id = ?1 AND date = ?2",
    )
    .bind(habit_id)
    .bind(date.to_string())
    .fetch_optional(db)
    .await
}

pub async fn insert_checkmark(db: &SqlitePool, mark: &Checkmark) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO checkmarks (id, habit_id, date, completed, completed_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&mark.id)
    .bind(&mark.habit_id)
    .bind(&mark.date)
    .bind(mark.completed)
    .bind(&mark.completed_at)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn set_checkmark_state(
    db: &SqlitePool,
    id: &str,
    completed: bool,
    completed_at: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE checkmarks SET completed = ?1, completed_at = ?2 WHERE id = ?3")
        .bind(completed)
        .bind(completed_at)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn fetch_checkmarks_for_habit(
    db: &SqlitePool,
    habit_id: &str,
) -> Result<Vec<Checkmark>, sqlx::Error> {
    sqlx::query_as::<_, Checkmark>(
        "SELECT id, habit_id, date, completed, completed_at
         FROM checkmarks
         WHERE habit_id = ?1
         ORDER BY date",
    )
    .bind(habit_id)
    .fetch_all(db)
    .await
}

/// One row per completed checkmark on `date`, joined to its habit. The inner
/// join silently drops checkmarks whose habit no longer exists.
#[derive(Debug, FromRow)]
pub struct CompletedHabitRow {
    pub habit_id: String,
    pub title: String,
    pub time: String,
    pub completed_at: Option<String>,
}

pub async fn fetch_completed_habits(
    db: &SqlitePool,
    date: NaiveDate,
) -> Result<Vec<CompletedHabitRow>, sqlx::Error> {
    sqlx::query_as::<_, CompletedHabitRow>(
        "SELECT c.habit_id, h.title, h.time, c.completed_at
         FROM checkmarks c
         JOIN habits h ON h.id = c.habit_id
         WHERE c.date = ?1 AND c.completed = 1
         ORDER BY h.created_at, h.id",
    )
    .bind(date.to_string())
    .fetch_all(db)
    .await
}

// ---- day completions ----

pub async fn fetch_day_completions(db: &SqlitePool) -> Result<Vec<DayCompletion>, sqlx::Error> {
    sqlx::query_as::<_, DayCompletion>(
        "SELECT id, date, completed_at FROM day_completions ORDER BY date",
    )
    .fetch_all(db)
    .await
}

pub async fn find_day_completion_by_date(
    db: &SqlitePool,
    date: NaiveDate,
) -> Result<Option<DayCompletion>, sqlx::Error> {
    sqlx::query_as::<_, DayCompletion>(
        "SELECT id, date, completed_at FROM day_completions WHERE date = ?1",
    )
    .bind(date.to_string())
    .fetch_optional(db)
    .await
}

/// Insert relies on the table's UNIQUE(date) constraint; the caller maps a
/// unique violation to the duplicate-completion conflict.
pub async fn insert_day_completion(
    db: &SqlitePool,
    completion: &DayCompletion,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO day_completions (id, date, completed_at) VALUES (?1, ?2, ?3)")
        .bind(&completion.id)
        .bind(&completion.date)
        .bind(&completion.completed_at)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete_day_completion(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM day_completions WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();
    Ok(rows > 0)
}

/// Empties checkmarks, day completions and notes together; habits survive.
/// The transaction rolls back all three deletes on any failure.
pub async fn reset_tracking(db: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM checkmarks").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM day_completions").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM notes").execute(&mut *tx).await?;

    tx.commit().await?;
    Ok(())
}

// ---- notes ----

pub async fn fetch_notes(db: &SqlitePool) -> Result<Vec<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        "SELECT id, content, created_at FROM notes ORDER BY created_at DESC",
    )
    .fetch_all(db)
    .await
}

pub async fn find_note_by_id(db: &SqlitePool, id: &str) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>("SELECT id, content, created_at FROM notes WHERE id = ?1")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_note(db: &SqlitePool, note: &Note) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO notes (id, content, created_at) VALUES (?1, ?2, ?3)")
        .bind(&note.id)
        .bind(&note.content)
        .bind(&note.created_at)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn update_note(
    db: &SqlitePool,
    id: &str,
    content: Option<String>,
) -> Result<Option<Note>, sqlx::Error> {
    let mut current = match find_note_by_id(db, id).await? {
        Some(n) => n,
        None => return Ok(None),
    };

    if let Some(content) = content {
        current.content = content;
    }

    sqlx::query("UPDATE notes SET content = ?1 WHERE id = ?2")
        .bind(&current.content)
        .bind(id)
        .execute(db)
        .await?;

    Ok(Some(current))
}

pub async fn delete_note(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM notes WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();
    Ok(rows > 0)
}
