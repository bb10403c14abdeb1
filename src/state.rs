use sqlx::SqlitePool;

use crate::clock::Clock;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub clock: Clock,
}
