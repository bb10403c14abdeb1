use chrono::TimeZone;
use habits::clock::Clock;
use habits::db::repository;
use habits::error::AppError;
use habits::models::{Habit, Note};
use habits::period::Period;
use habits::services::{CheckmarkService, DayCompletionService};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

async fn setup() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

fn clock() -> Clock {
    Clock::new(chrono_tz::America::Sao_Paulo)
}

async fn add_habit(pool: &SqlitePool, title: &str, time: &str) -> Habit {
    let habit = Habit {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: None,
        time: time.to_string(),
        category: Period::from_time(time).as_str().to_string(),
        created_at: clock().timestamp(),
    };
    repository::insert_habit(pool, &habit)
        .await
        .expect("Failed to insert habit");
    habit
}

async fn add_note_at(pool: &SqlitePool, content: &str, created_at: String) -> Note {
    let note = Note {
        id: Uuid::new_v4().to_string(),
        content: content.to_string(),
        created_at,
    };
    repository::insert_note(pool, &note)
        .await
        .expect("Failed to insert note");
    note
}

#[tokio::test]
async fn completing_a_day_requires_at_least_one_habit() {
    let pool = setup().await;
    let service = DayCompletionService::new(pool.clone(), clock());

    let err = service.complete_today().await.expect_err("should fail");
    assert!(matches!(err, AppError::BadRequest(msg) if msg == "No habits found"));
}

#[tokio::test]
async fn completing_a_day_requires_every_habit_checked() {
    let pool = setup().await;
    let clock = clock();
    let done = add_habit(&pool, "Read", "20:00").await;
    add_habit(&pool, "Run", "07:00").await;

    CheckmarkService::new(pool.clone(), clock)
        .toggle(&done.id, clock.today())
        .await
        .expect("toggle");

    let service = DayCompletionService::new(pool.clone(), clock);
    let err = service.complete_today().await.expect_err("should fail");
    assert!(matches!(err, AppError::BadRequest(msg) if msg == "Not all habits are completed for today"));

    // A habit toggled back to incomplete also blocks completion.
    CheckmarkService::new(pool.clone(), clock)
        .toggle(&done.id, clock.today())
        .await
        .expect("toggle off");
    let err = service.complete_today().await.expect_err("should still fail");
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn completing_a_day_twice_is_a_conflict() {
    let pool = setup().await;
    let clock = clock();
    let a = add_habit(&pool, "A", "").await;
    let b = add_habit(&pool, "B", "").await;

    let checkmarks = CheckmarkService::new(pool.clone(), clock);
    checkmarks.toggle(&a.id, clock.today()).await.expect("toggle a");
    checkmarks.toggle(&b.id, clock.today()).await.expect("toggle b");

    let service = DayCompletionService::new(pool.clone(), clock);
    let completion = service.complete_today().await.expect("complete");
    assert_eq!(completion.date, clock.today().to_string());

    let err = service.complete_today().await.expect_err("second call should fail");
    assert!(matches!(err, AppError::Conflict(msg) if msg == "Day already completed"));

    let all = service.list().await.expect("list");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn deleting_a_completion_makes_the_date_completable_again() {
    let pool = setup().await;
    let clock = clock();
    let habit = add_habit(&pool, "Meditate", "06:30").await;

    CheckmarkService::new(pool.clone(), clock)
        .toggle(&habit.id, clock.today())
        .await
        .expect("toggle");

    let service = DayCompletionService::new(pool.clone(), clock);
    let completion = service.complete_today().await.expect("complete");

    service.delete(&completion.id).await.expect("delete");
    assert!(service.list().await.expect("list").is_empty());

    // The checkmarks are untouched, so the day can be completed again.
    service.complete_today().await.expect("complete again");

    let err = service.delete(&completion.id).await.expect_err("gone");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn day_detail_for_an_uncompleted_date_is_not_found() {
    let pool = setup().await;
    let clock = clock();
    let service = DayCompletionService::new(pool.clone(), clock);

    let err = service
        .day_detail(clock.today())
        .await
        .expect_err("should fail");
    assert!(matches!(err, AppError::NotFound(msg) if msg == "Day completion not found"));
}

#[tokio::test]
async fn day_detail_joins_habits_and_filters_notes_by_day_window() {
    let pool = setup().await;
    let clock = clock();
    let tz = clock.timezone();
    let today = clock.today();
    let tomorrow = today.succ_opt().unwrap();

    let scheduled = add_habit(&pool, "Journal", "9:15").await;
    let unscheduled = add_habit(&pool, "Floss", "").await;

    let checkmarks = CheckmarkService::new(pool.clone(), clock);
    checkmarks.toggle(&scheduled.id, today).await.expect("toggle");
    checkmarks.toggle(&unscheduled.id, today).await.expect("toggle");

    let service = DayCompletionService::new(pool.clone(), clock);
    service.complete_today().await.expect("complete");

    let last_second = tz
        .from_local_datetime(&today.and_hms_opt(23, 59, 59).unwrap())
        .single()
        .unwrap()
        .to_rfc3339();
    let next_day = tz
        .from_local_datetime(&tomorrow.and_hms_opt(0, 0, 1).unwrap())
        .single()
        .unwrap()
        .to_rfc3339();
    let in_window = add_note_at(&pool, "made it", last_second).await;
    add_note_at(&pool, "too late", next_day).await;

    let detail = service.day_detail(today).await.expect("detail");
    assert_eq!(detail.date, today.to_string());

    assert_eq!(detail.habits.len(), 2);
    let journal = detail
        .habits
        .iter()
        .find(|h| h.id == scheduled.id)
        .expect("journal in detail");
    assert_eq!(journal.time.as_deref(), Some("09:15"));
    assert!(journal.completed_at.is_some());
    let floss = detail
        .habits
        .iter()
        .find(|h| h.id == unscheduled.id)
        .expect("floss in detail");
    assert_eq!(floss.time, None);

    assert_eq!(detail.notes.len(), 1);
    assert_eq!(detail.notes[0].id, in_window.id);
}

#[tokio::test]
async fn completion_record_is_unchanged_after_untoggling_a_habit() {
    let pool = setup().await;
    let clock = clock();
    let habit = add_habit(&pool, "Read", "20:00").await;
    let today = clock.today();

    let checkmarks = CheckmarkService::new(pool.clone(), clock);
    checkmarks.toggle(&habit.id, today).await.expect("toggle on");

    let service = DayCompletionService::new(pool.clone(), clock);
    let completion = service.complete_today().await.expect("complete");

    checkmarks.toggle(&habit.id, today).await.expect("toggle off");

    let detail = service.day_detail(today).await.expect("detail");
    assert_eq!(detail.completed_at, completion.completed_at);
    // The untoggled habit no longer shows as completed that day.
    assert!(detail.habits.is_empty());
}

#[tokio::test]
async fn reset_wipes_tracking_but_keeps_habits() {
    let pool = setup().await;
    let clock = clock();
    let habit = add_habit(&pool, "Read", "20:00").await;

    CheckmarkService::new(pool.clone(), clock)
        .toggle(&habit.id, clock.today())
        .await
        .expect("toggle");

    let service = DayCompletionService::new(pool.clone(), clock);
    service.complete_today().await.expect("complete");
    add_note_at(&pool, "scratch", clock.timestamp()).await;

    service.reset_all().await.expect("reset");

    assert_eq!(repository::fetch_habits(&pool).await.expect("habits").len(), 1);
    assert!(repository::fetch_checkmarks_for_habit(&pool, &habit.id)
        .await
        .expect("checkmarks")
        .is_empty());
    assert!(service.list().await.expect("completions").is_empty());
    assert!(repository::fetch_notes(&pool).await.expect("notes").is_empty());
}
