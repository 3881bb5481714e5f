//! Domain model for a calendar event.
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unified event category set shared by the dashboard widget and the calendar page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainEventCategory {
    Meeting,
    Deadline,
    Personal,
    Onetime,
}

impl fmt::Display for DomainEventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DomainEventCategory::Meeting => "meeting",
            DomainEventCategory::Deadline => "deadline",
            DomainEventCategory::Personal => "personal",
            DomainEventCategory::Onetime => "onetime",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for DomainEventCategory {
    type Err = EventValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meeting" => Ok(DomainEventCategory::Meeting),
            "deadline" => Ok(DomainEventCategory::Deadline),
            "personal" => Ok(DomainEventCategory::Personal),
            "onetime" | "one-time" => Ok(DomainEventCategory::Onetime),
            _ => Err(EventValidationError::UnknownCategory(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainEvent {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub category: DomainEventCategory,
    pub time: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub invitees: Option<String>,
}

impl DomainEvent {
    pub fn generate_id() -> String {
        format!("event::{}", Uuid::new_v4().simple())
    }

    /// Invitees split on commas with blanks dropped
    pub fn invitee_list(&self) -> Vec<String> {
        self.invitees
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Required text fields of an event, checked before the event list is touched
pub fn require_field(field: &'static str, value: &str) -> Result<String, EventValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EventValidationError::MissingRequiredField(field));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text becomes `None`
pub fn optional_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventValidationError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("Unknown event category: {0}")]
    UnknownCategory(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl EventValidationError {
    /// Form field the error should be shown next to
    pub fn field(&self) -> Option<&'static str> {
        match self {
            EventValidationError::MissingRequiredField(field) => Some(*field),
            EventValidationError::UnknownCategory(_) => Some("category"),
            EventValidationError::InvalidDate(_) => Some("date"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_unique() {
        let a = DomainEvent::generate_id();
        let b = DomainEvent::generate_id();
        assert!(a.starts_with("event::"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Meeting".parse::<DomainEventCategory>(), Ok(DomainEventCategory::Meeting));
        assert_eq!(" deadline ".parse::<DomainEventCategory>(), Ok(DomainEventCategory::Deadline));
        assert_eq!("one-time".parse::<DomainEventCategory>(), Ok(DomainEventCategory::Onetime));
        assert_eq!(
            "Workshop".parse::<DomainEventCategory>(),
            Err(EventValidationError::UnknownCategory("Workshop".to_string()))
        );
    }

    #[test]
    fn test_invitee_list() {
        let event = DomainEvent {
            id: "event::1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
            title: "Client Presentation".to_string(),
            category: DomainEventCategory::Meeting,
            time: "14:00".to_string(),
            location: None,
            description: None,
            invitees: Some("client@client.com, manager@company.com, ".to_string()),
        };
        assert_eq!(
            event.invitee_list(),
            vec!["client@client.com".to_string(), "manager@company.com".to_string()]
        );
    }

    #[test]
    fn test_required_and_optional_fields() {
        assert_eq!(require_field("title", "  Sync "), Ok("Sync".to_string()));
        assert_eq!(
            require_field("time", "   "),
            Err(EventValidationError::MissingRequiredField("time"))
        );
        assert_eq!(optional_field(Some("  ".to_string())), None);
        assert_eq!(optional_field(Some(" Zoom ".to_string())), Some("Zoom".to_string()));
        assert_eq!(optional_field(None), None);
    }
}
