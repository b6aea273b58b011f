//! Form input validation.
//!
//! Form structs deserialize missing fields as empty strings so every problem
//! is reported here, as a user-facing message, rather than as an extractor
//! rejection.

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::db::{ItemChanges, ProductChanges, EVENT_DATE_FORMAT};

lazy_static! {
    /// Loose address check: something@something.tld, no whitespace
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Require a non-blank value
pub fn validate_required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{label} is required."));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required.".to_string());
    }
    if email.len() > 254 || !EMAIL_REGEX.is_match(email) {
        return Err("Email address is not valid.".to_string());
    }
    Ok(())
}

/// Parse a `YYYY-MM-DDTHH:MM` event date
pub fn parse_event_date(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Date is required.".to_string());
    }
    NaiveDateTime::parse_from_str(value, EVENT_DATE_FORMAT)
        .map_err(|_| "Date must be in the format YYYY-MM-DDTHH:MM.".to_string())
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Product create/edit form, as submitted
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
}

impl ProductForm {
    /// Trimmed copy used to echo values back into a re-rendered form
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            date: self.date.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<ProductChanges, Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = validate_required(&self.title, "Title") {
            errors.push(e);
        }
        if let Err(e) = validate_required(&self.location, "Location") {
            errors.push(e);
        }
        let date = match parse_event_date(&self.date) {
            Ok(date) => Some(date),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        match date {
            Some(date) if errors.is_empty() => Ok(ProductChanges {
                title: self.title.trim().to_string(),
                description: optional_text(&self.description),
                location: self.location.trim().to_string(),
                date: date.format(EVENT_DATE_FORMAT).to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// Legacy item create/edit form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemForm {
    pub title: String,
    pub description: String,
}

impl ItemForm {
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<ItemChanges, Vec<String>> {
        validate_required(&self.title, "Title").map_err(|e| vec![e])?;
        Ok(ItemChanges {
            title: self.title.trim().to_string(),
            description: optional_text(&self.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, location: &str, date: &str) -> ProductForm {
        ProductForm {
            title: title.to_string(),
            description: String::new(),
            location: location.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_valid_product() {
        let changes = product("  Career fair ", "Hall A", "2026-03-14T09:30")
            .validate()
            .unwrap();
        assert_eq!(changes.title, "Career fair");
        assert_eq!(changes.description, None);
        assert_eq!(changes.date, "2026-03-14T09:30");
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let errors = product("", " ", "").validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Title is required.".to_string(),
                "Location is required.".to_string(),
                "Date is required.".to_string(),
            ]
        );
    }

    #[test]
    fn test_unparseable_date() {
        let errors = product("Talk", "Room 1", "not-a-date").validate().unwrap_err();
        assert_eq!(errors, vec!["Date must be in the format YYYY-MM-DDTHH:MM.".to_string()]);

        assert!(parse_event_date("2026-02-30T10:00").is_err());
        assert!(parse_event_date("2026-02-10 10:00").is_err());
    }

    #[test]
    fn test_trimmed_echo() {
        let form = product(" a ", " b ", " not-a-date ").trimmed();
        assert_eq!(form.title, "a");
        assert_eq!(form.date, "not-a-date");
    }

    #[test]
    fn test_item_form() {
        let form = ItemForm {
            title: "Chair".to_string(),
            description: "  ".to_string(),
        };
        assert_eq!(form.validate().unwrap().description, None);

        let blank = ItemForm::default();
        assert_eq!(blank.validate().unwrap_err(), vec!["Title is required.".to_string()]);
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("ada example.com").is_err());
        assert!(validate_email("").is_err());
    }
}
