//! Product models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::common::{display_event_date, display_timestamp};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    /// Event date in `YYYY-MM-DDTHH:MM`
    pub date: String,
    pub created_at: String,
}

impl Product {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn date_display(&self) -> String {
        display_event_date(&self.date)
    }

    pub fn created_display(&self) -> String {
        display_timestamp(&self.created_at)
    }
}

/// Validated product fields, shared by create and edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChanges {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub date: String,
}
