//! Registration models: a user's interest in a product, awaiting admin approval.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::common::{display_event_date, display_timestamp};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Approved,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
        }
    }
}

impl From<String> for RegistrationStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "approved" => Self::Approved,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: i64,
    pub user_id: i64,
    pub products_id: i64,
    pub status: String,
    pub created_at: String,
    pub approved_at: Option<String>,
}

impl Registration {
    pub fn status_enum(&self) -> RegistrationStatus {
        RegistrationStatus::from(self.status.clone())
    }

    pub fn is_approved(&self) -> bool {
        self.status_enum() == RegistrationStatus::Approved
    }
}

/// Registration joined with its user and product for listings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RegistrationDetails {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub products_id: i64,
    pub product_title: String,
    pub product_location: String,
    pub product_date: String,
    pub status: String,
    pub created_at: String,
    pub approved_at: Option<String>,
}

impl RegistrationDetails {
    pub fn status_enum(&self) -> RegistrationStatus {
        RegistrationStatus::from(self.status.clone())
    }

    pub fn is_pending(&self) -> bool {
        self.status_enum() == RegistrationStatus::Pending
    }

    pub fn product_date_display(&self) -> String {
        display_event_date(&self.product_date)
    }

    pub fn created_display(&self) -> String {
        display_timestamp(&self.created_at)
    }

    pub fn approved_display(&self) -> String {
        self.approved_at
            .as_deref()
            .map(display_timestamp)
            .unwrap_or_else(|| "-".to_string())
    }
}
