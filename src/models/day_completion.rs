use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Marker that every habit was completed on `date`. Immutable once created;
/// only ever removed by explicit deletion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DayCompletion {
    pub id: String,
    pub date: String,
    pub completed_at: String,
}
