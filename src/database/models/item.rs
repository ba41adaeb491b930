use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Inventory record. Items are not scoped to the user that created them;
/// any authenticated user can list, edit and delete every item.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}
