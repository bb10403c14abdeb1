use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewNoteRequest {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNoteRequest {
    pub content: Option<String>,
}
