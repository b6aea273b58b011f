//! Legacy catalog item models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::common::display_timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl Item {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn created_display(&self) -> String {
        display_timestamp(&self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemChanges {
    pub title: String,
    pub description: Option<String>,
}
