use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Meeting,
    Deadline,
    Personal,
    #[serde(alias = "one-time")]
    Onetime,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventCategory::Meeting => "Meeting",
            EventCategory::Deadline => "Deadline",
            EventCategory::Personal => "Personal",
            EventCategory::Onetime => "Onetime",
        };
        write!(f, "{}", name)
    }
}

/// A calendar event as exchanged with the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event ID in format: "event::<uuid>"
    pub id: String,
    /// Calendar day the event falls on (YYYY-MM-DD)
    pub date: NaiveDate,
    pub title: String,
    pub category: EventCategory,
    /// Time of day for display only, e.g. "09:00"
    pub time: String,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Comma-separated invitee list as entered by the user
    pub invitees: Option<String>,
    /// Invitee list split on commas, trimmed, empties removed
    #[serde(default)]
    pub invitee_list: Vec<String>,
}

/// Calendar display granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Month,
    Week,
}

/// A single day slot in a rendered calendar grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub day: u32,
    /// False for padding days borrowed from adjacent months
    pub is_in_current_period: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// Events shown in the cell, in input order
    pub events: Vec<CalendarEvent>,
    /// Events bound to the day but not shown because of the overflow limit
    pub hidden_event_count: usize,
    pub has_events: bool,
}

/// Calendar grid with events bound to each cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarGridResponse {
    pub view_mode: ViewMode,
    pub reference_date: NaiveDate,
    pub selected_date: NaiveDate,
    /// e.g. "April 2024" or "Apr 14 - Apr 20, 2024"
    pub title: String,
    pub weekday_headers: Vec<String>,
    pub rows: Vec<Vec<CalendarCell>>,
}

/// Transient navigation state of a calendar view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewStateResponse {
    pub reference_date: NaiveDate,
    pub selected_date: NaiveDate,
    pub view_mode: ViewMode,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectDateRequest {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetViewModeRequest {
    pub view_mode: ViewMode,
}

/// Summary counts shown above the calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSummaryResponse {
    pub today: NaiveDate,
    pub events_today: usize,
    pub events_this_week: usize,
    /// Events later this week, today included
    pub upcoming_this_week: usize,
}

/// Current date information from the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: i32,
    pub day: u32,
    pub formatted_date: String, // e.g., "April 15, 2024"
    pub iso_date: String,       // e.g., "2024-04-15"
}

/// Request to create an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub date: NaiveDate,
    pub title: String,
    pub category: EventCategory,
    pub time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub invitees: Option<String>,
}

/// Request to update an event; only provided fields change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<EventCategory>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub invitees: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    pub event: CalendarEvent,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventResponse {
    /// False when the event no longer exists; nothing was changed
    pub found: bool,
    pub event: Option<CalendarEvent>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    pub deleted: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListResponse {
    pub events: Vec<CalendarEvent>,
}

/// Form fields of the add/edit event form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFormDraft {
    pub title: String,
    pub category: EventCategory,
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub invitees: String,
}

/// Stage of the add/view/edit event interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EventFlowState {
    Idle,
    Creating { date: NaiveDate, draft: EventFormDraft },
    Viewing { event: CalendarEvent },
    Editing { event_id: String, draft: EventFormDraft },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenCreateRequest {
    /// Defaults to the currently selected date
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFlowResponse {
    pub flow: EventFlowState,
    /// Event created, updated or deleted by the transition, if any
    pub affected_event_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Form field the error refers to, if any
    pub field: Option<String>,
}
