use axum::Json;
use axum::extract::Path;
use axum::routing::{delete, post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use chrono::NaiveDate;
use serde::Serialize;
use tower_http::services::{ServeDir, ServeFile};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::*;
use crate::period::Period;
use crate::services::{CheckmarkService, DayCompletionService, DayDetail};
use crate::state::AppState;
use crate::db::repository;

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse { message: text.to_string() })
}

#[derive(Serialize)]
struct CompleteDayResponse {
    date: String,
    completed_at: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route_service("/", ServeFile::new("static/index.html"))
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", get(health))
        .route("/api/habits", get(list_habits).post(create_habit))
        .route("/api/habits/reset", post(reset))
        .route("/api/habits/{id}", put(update_habit).delete(delete_habit))
        .route("/api/checkmarks", post(toggle_checkmark))
        .route("/api/day-completion", post(complete_day))
        .route("/api/day-completion/{date}", get(day_detail))
        .route("/api/day-completions", get(list_day_completions))
        .route("/api/day-completions/{id}", delete(delete_day_completion))
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/{id}", put(update_note).delete(delete_note))
        .with_state(state)
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("Invalid date format, expected YYYY-MM-DD".to_string()))
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

// ---- habits ----

async fn list_habits(
    State(state): State<AppState>,
) -> Result<Json<Vec<HabitWithStatus>>, AppError> {
    let habits = repository::fetch_habits_with_status(&state.db, state.clock.today()).await?;
    Ok(Json(habits))
}

async fn create_habit(
    State(state): State<AppState>,
    Json(req): Json<NewHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let time = req.time.unwrap_or_default();
    let habit = Habit {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: req.description.map(|d| d.trim().to_string()),
        category: Period::from_time(&time).as_str().to_string(),
        time,
        created_at: state.clock.timestamp(),
    };
    repository::insert_habit(&state.db, &habit).await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

async fn update_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateHabitRequest>,
) -> Result<Json<Habit>, AppError> {
    let habit = repository::update_habit(&state.db, &id, req)
        .await?
        .ok_or_else(|| AppError::NotFound("Habit not found".to_string()))?;
    Ok(Json(habit))
}

async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if repository::delete_habit(&state.db, &id).await? {
        Ok(message("Habit deleted successfully"))
    } else {
        Err(AppError::NotFound("Habit not found".to_string()))
    }
}

async fn reset(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    let service = DayCompletionService::new(state.db.clone(), state.clock);
    service.reset_all().await?;
    Ok(message("All habits have been reset successfully"))
}

// ---- checkmarks ----

async fn toggle_checkmark(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<CheckmarkStatus>, AppError> {
    let date = parse_date(&req.date)?;
    let service = CheckmarkService::new(state.db.clone(), state.clock);
    let (_, mark) = service.toggle(&req.habit_id, date).await?;
    Ok(Json(CheckmarkStatus {
        completed: mark.completed,
        completed_at: mark.completed_at,
    }))
}

// ---- day completions ----

async fn complete_day(
    State(state): State<AppState>,
) -> Result<Json<CompleteDayResponse>, AppError> {
    let service = DayCompletionService::new(state.db.clone(), state.clock);
    let completion = service.complete_today().await?;
    Ok(Json(CompleteDayResponse {
        date: completion.date,
        completed_at: completion.completed_at,
    }))
}

async fn list_day_completions(
    State(state): State<AppState>,
) -> Result<Json<Vec<DayCompletion>>, AppError> {
    let service = DayCompletionService::new(state.db.clone(), state.clock);
    Ok(Json(service.list().await?))
}

async fn delete_day_completion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let service = DayCompletionService::new(state.db.clone(), state.clock);
    service.delete(&id).await?;
    Ok(message("Day completion deleted successfully"))
}

async fn day_detail(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayDetail>, AppError> {
    let date = parse_date(&date)?;
    let service = DayCompletionService::new(state.db.clone(), state.clock);
    Ok(Json(service.day_detail(date).await?))
}

// ---- notes ----

async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, AppError> {
    Ok(Json(repository::fetch_notes(&state.db).await?))
}

async fn create_note(
    State(state): State<AppState>,
    Json(req): Json<NewNoteRequest>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let note = Note {
        id: Uuid::new_v4().to_string(),
        content: req.content,
        created_at: state.clock.timestamp(),
    };
    repository::insert_note(&state.db, &note).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, AppError> {
    let note = repository::update_note(&state.db, &id, req.content)
        .await?
        .ok_or_else(|| AppError::NotFound("Note not found".to_string()))?;
    Ok(Json(note))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if repository::delete_note(&state.db, &id).await? {
        Ok(message("Note deleted successfully"))
    } else {
        Err(AppError::NotFound("Note not found".to_string()))
    }
}
