//! Common types and utilities shared across models.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Format of the product `date` field, as submitted by a `datetime-local` input
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Current time as stored in `created_at` / `approved_at` columns.
/// Fixed width so that string order is time order.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Render a stored RFC 3339 timestamp for humans; unparseable values pass through
pub fn display_timestamp(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| ts.to_string())
}

/// Render a stored event date (`YYYY-MM-DDTHH:MM`) for humans
pub fn display_event_date(date: &str) -> String {
    NaiveDateTime::parse_from_str(date, EVENT_DATE_FORMAT)
        .map(|dt| dt.format("%a %d %b %Y, %H:%M").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// One page of a newest-first listing
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

impl<T> Page<T> {
    /// Clamp a requested page number to 1..
    pub fn normalize(page: Option<u32>) -> u32 {
        page.unwrap_or(1).max(1)
    }

    /// SQL OFFSET for a page number
    pub fn offset(page: u32, per_page: u32) -> i64 {
        i64::from(page.saturating_sub(1)) * i64::from(per_page)
    }

    pub fn pages(&self) -> u32 {
        if self.per_page == 0 || self.total <= 0 {
            return 0;
        }
        let per_page = i64::from(self.per_page);
        u32::try_from((self.total + per_page - 1) / per_page).unwrap_or(u32::MAX)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }

    pub fn prev_num(&self) -> u32 {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next_num(&self) -> u32 {
        self.page + 1
    }

    /// Pages past the end are missing, except an empty first page
    pub fn is_out_of_range(&self) -> bool {
        self.page > 1 && self.items.is_empty()
    }
}
