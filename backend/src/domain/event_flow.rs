//! Add / view / edit / delete interaction for calendar events.
//!
//! `EventFlow` is a plain state machine: transitions either move to a new
//! state and optionally hand back a `FlowEffect` (the event-list mutation the
//! transition implies), or fail and leave the state untouched.
//! `EventFlowService` applies those effects through the `EventService`.
//!
//! ```text
//! Idle --open_create--> Creating --submit/cancel--> Idle
//! Idle --view--> Viewing --begin_edit--> Editing --save--> Viewing
//!                Viewing/Editing --delete--> Idle, any --close--> Idle
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::calendar::CalendarService;
use crate::domain::commands::events::{CreateEventCommand, UpdateEventCommand};
use crate::domain::event_service::EventService;
use crate::domain::models::event::{DomainEvent, DomainEventCategory, EventValidationError};

/// Contents of the add/edit form
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub category: DomainEventCategory,
    pub time: String,
    pub location: String,
    pub description: String,
    pub invitees: String,
}

impl EventDraft {
    /// Editable copy of an existing event
    pub fn from_event(event: &DomainEvent) -> Self {
        Self {
            title: event.title.clone(),
            category: event.category,
            time: event.time.clone(),
            location: event.location.clone().unwrap_or_default(),
            description: event.description.clone().unwrap_or_default(),
            invitees: event.invitees.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<(), EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::MissingRequiredField("title"));
        }
        if self.time.trim().is_empty() {
            return Err(EventValidationError::MissingRequiredField("time"));
        }
        Ok(())
    }
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: DomainEventCategory::Meeting,
            time: "09:00".to_string(),
            location: String::new(),
            description: String::new(),
            invitees: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Idle,
    Creating { date: NaiveDate, draft: EventDraft },
    Viewing { event_id: String },
    Editing { event_id: String, draft: EventDraft },
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::Creating { .. } => "creating",
            FlowState::Viewing { .. } => "viewing",
            FlowState::Editing { .. } => "editing",
        }
    }

    /// Same form with `draft` as its contents; other states are unchanged
    fn with_draft(self, draft: EventDraft) -> FlowState {
        match self {
            FlowState::Creating { date, .. } => FlowState::Creating { date, draft },
            FlowState::Editing { event_id, .. } => FlowState::Editing { event_id, draft },
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAction {
    OpenCreate,
    UpdateDraft,
    SubmitCreate,
    View,
    BeginEdit,
    SaveEdit,
    Cancel,
    Delete,
}

impl fmt::Display for FlowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowAction::OpenCreate => "open_create",
            FlowAction::UpdateDraft => "update_draft",
            FlowAction::SubmitCreate => "submit_create",
            FlowAction::View => "view",
            FlowAction::BeginEdit => "begin_edit",
            FlowAction::SaveEdit => "save_edit",
            FlowAction::Cancel => "cancel",
            FlowAction::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

/// Event-list mutation implied by a transition
#[derive(Debug, Clone)]
pub enum FlowEffect {
    Create(CreateEventCommand),
    Update(UpdateEventCommand),
    Delete(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventFlowError {
    #[error("Cannot {action} while {state}")]
    InvalidTransition { state: &'static str, action: FlowAction },
    #[error(transparent)]
    Validation(#[from] EventValidationError),
    #[error("Event not found: {0}")]
    EventNotFound(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventFlow {
    state: FlowState,
}

impl EventFlow {
    pub fn new() -> Self {
        Self { state: FlowState::Idle }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    fn reject(&self, action: FlowAction) -> EventFlowError {
        EventFlowError::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }

    /// Open an empty add form for `date`
    pub fn open_create(&mut self, date: NaiveDate) -> Result<(), EventFlowError> {
        match self.state {
            FlowState::Idle | FlowState::Viewing { .. } | FlowState::Creating { .. } => {
                self.state = FlowState::Creating {
                    date,
                    draft: EventDraft::default(),
                };
                Ok(())
            }
            FlowState::Editing { .. } => Err(self.reject(FlowAction::OpenCreate)),
        }
    }

    /// Replace the form contents without submitting
    pub fn update_draft(&mut self, new_draft: EventDraft) -> Result<(), EventFlowError> {
        if let FlowState::Creating { draft, .. } | FlowState::Editing { draft, .. } = &mut self.state {
            *draft = new_draft;
            return Ok(());
        }
        Err(self.reject(FlowAction::UpdateDraft))
    }

    /// Submit the add form. Missing required fields keep the form open.
    pub fn submit_create(&mut self, draft: EventDraft) -> Result<FlowEffect, EventFlowError> {
        let date = match &self.state {
            FlowState::Creating { date, .. } => *date,
            _ => return Err(self.reject(FlowAction::SubmitCreate)),
        };

        if let Err(e) = draft.validate() {
            self.state = FlowState::Creating { date, draft };
            return Err(e.into());
        }

        self.state = FlowState::Idle;
        Ok(FlowEffect::Create(CreateEventCommand {
            date,
            title: draft.title,
            category: draft.category,
            time: draft.time,
            location: Some(draft.location),
            description: Some(draft.description),
            invitees: Some(draft.invitees),
        }))
    }

    /// Open the read-only detail panel for an event
    pub fn view(&mut self, event_id: &str) -> Result<(), EventFlowError> {
        match self.state {
            FlowState::Idle | FlowState::Viewing { .. } => {
                self.state = FlowState::Viewing {
                    event_id: event_id.to_string(),
                };
                Ok(())
            }
            _ => Err(self.reject(FlowAction::View)),
        }
    }

    /// Switch the detail panel to an editable copy of `event`
    pub fn begin_edit(&mut self, event: &DomainEvent) -> Result<(), EventFlowError> {
        match &self.state {
            FlowState::Viewing { event_id } if *event_id == event.id => {
                self.state = FlowState::Editing {
                    event_id: event.id.clone(),
                    draft: EventDraft::from_event(event),
                };
                Ok(())
            }
            _ => Err(self.reject(FlowAction::BeginEdit)),
        }
    }

    /// Save the edited copy over the original, same ID
    pub fn save_edit(&mut self, draft: EventDraft) -> Result<FlowEffect, EventFlowError> {
        let event_id = match &self.state {
            FlowState::Editing { event_id, .. } => event_id.clone(),
            _ => return Err(self.reject(FlowAction::SaveEdit)),
        };

        if let Err(e) = draft.validate() {
            self.state = FlowState::Editing { event_id, draft };
            return Err(e.into());
        }

        self.state = FlowState::Viewing {
            event_id: event_id.clone(),
        };
        Ok(FlowEffect::Update(UpdateEventCommand {
            event_id,
            date: None,
            title: Some(draft.title),
            category: Some(draft.category),
            time: Some(draft.time),
            location: Some(draft.location),
            description: Some(draft.description),
            invitees: Some(draft.invitees),
        }))
    }

    /// Discard the add form, or discard the edited copy and go back to viewing
    pub fn cancel(&mut self) -> Result<(), EventFlowError> {
        match &self.state {
            FlowState::Creating { .. } => {
                self.state = FlowState::Idle;
                Ok(())
            }
            FlowState::Editing { event_id, .. } => {
                let event_id = event_id.clone();
                self.state = FlowState::Viewing { event_id };
                Ok(())
            }
            _ => Err(self.reject(FlowAction::Cancel)),
        }
    }

    /// Delete the event in the detail panel and close it
    pub fn delete(&mut self) -> Result<FlowEffect, EventFlowError> {
        match &self.state {
            FlowState::Viewing { event_id } | FlowState::Editing { event_id, .. } => {
                let event_id = event_id.clone();
                self.state = FlowState::Idle;
                Ok(FlowEffect::Delete(event_id))
            }
            _ => Err(self.reject(FlowAction::Delete)),
        }
    }

    /// Close whatever is open
    pub fn close(&mut self) {
        self.state = FlowState::Idle;
    }
}

impl Default for EventFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Flow state with the event of the detail panel resolved
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSnapshot {
    pub state: FlowState,
    pub event: Option<DomainEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowOutcome {
    pub snapshot: FlowSnapshot,
    pub affected_event_id: Option<String>,
    pub message: Option<String>,
}

/// Value produced by a transition, with the states on either side of it
struct Transition<T> {
    value: T,
    from: FlowState,
    to: FlowState,
}

/// Drives an `EventFlow` and applies its effects to the shared event list
#[derive(Clone)]
pub struct EventFlowService {
    flow: Arc<Mutex<EventFlow>>,
    event_service: EventService,
    calendar_service: CalendarService,
}

impl EventFlowService {
    pub fn new(event_service: EventService, calendar_service: CalendarService) -> Self {
        Self {
            flow: Arc::new(Mutex::new(EventFlow::new())),
            event_service,
            calendar_service,
        }
    }

    fn state(&self) -> FlowState {
        self.flow
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state()
            .clone()
    }

    /// Run a transition under the lock
    fn transition<T>(
        &self,
        apply: impl FnOnce(&mut EventFlow) -> Result<T, EventFlowError>,
    ) -> Result<Transition<T>, EventFlowError> {
        let mut flow = self.flow.lock().unwrap_or_else(PoisonError::into_inner);
        let from = flow.state().clone();
        let value = apply(&mut *flow)?;
        Ok(Transition {
            value,
            from,
            to: flow.state().clone(),
        })
    }

    /// Undo a transition whose effect failed.
    ///
    /// Only resets the panel to `from` if it is still in `to`; returns
    /// whether the reset happened.
    fn roll_back(&self, from: FlowState, to: &FlowState) -> bool {
        let mut flow = self.flow.lock().unwrap_or_else(PoisonError::into_inner);
        if flow.state != *to {
            warn!(
                "Panel moved to {} while applying a change, not rolling back to {}",
                flow.state.name(),
                from.name()
            );
            return false;
        }
        flow.state = from;
        true
    }

    pub async fn snapshot(&self) -> Result<FlowSnapshot> {
        let state = self.state();
        let event = match &state {
            FlowState::Viewing { event_id } | FlowState::Editing { event_id, .. } => {
                self.event_service.get_event(event_id).await?
            }
            _ => None,
        };
        Ok(FlowSnapshot { state, event })
    }

    async fn outcome(&self, affected_event_id: Option<String>, message: Option<String>) -> Result<FlowOutcome> {
        Ok(FlowOutcome {
            snapshot: self.snapshot().await?,
            affected_event_id,
            message,
        })
    }

    /// Open the add form; defaults to the selected date and selects the day
    pub async fn open_create(&self, date: Option<NaiveDate>) -> Result<FlowOutcome> {
        let date = date.unwrap_or_else(|| self.calendar_service.get_view_state().selected_date);
        self.transition(|flow| flow.open_create(date))?;
        self.calendar_service.select_date(date);
        info!("Opened add-event form for {}", date);
        self.outcome(None, None).await
    }

    pub async fn update_draft(&self, draft: EventDraft) -> Result<FlowOutcome> {
        self.transition(|flow| flow.update_draft(draft))?;
        self.outcome(None, None).await
    }

    pub async fn submit_create(&self, draft: EventDraft) -> Result<FlowOutcome> {
        let submitted = draft.clone();
        let Transition { value: effect, from, to } = self.transition(|flow| flow.submit_create(draft))?;
        match self.apply(effect).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                // Reopen the form with what was submitted
                self.roll_back(from.with_draft(submitted), &to);
                Err(e)
            }
        }
    }

    pub async fn view(&self, event_id: &str) -> Result<FlowOutcome> {
        if self.event_service.get_event(event_id).await?.is_none() {
            return Err(EventFlowError::EventNotFound(event_id.to_string()).into());
        }
        self.transition(|flow| flow.view(event_id))?;
        self.outcome(None, None).await
    }

    pub async fn begin_edit(&self) -> Result<FlowOutcome> {
        let event_id = match self.state() {
            FlowState::Viewing { event_id } => event_id,
            state => {
                return Err(EventFlowError::InvalidTransition {
                    state: state.name(),
                    action: FlowAction::BeginEdit,
                }
                .into())
            }
        };

        match self.event_service.get_event(&event_id).await? {
            Some(event) => {
                self.transition(|flow| flow.begin_edit(&event))?;
                self.outcome(None, None).await
            }
            None => {
                warn!("Event {} vanished while viewing, closing panel", event_id);
                self.close().await
            }
        }
    }

    pub async fn save_edit(&self, draft: EventDraft) -> Result<FlowOutcome> {
        let submitted = draft.clone();
        let Transition { value: effect, from, to } = self.transition(|flow| flow.save_edit(draft))?;
        match self.apply(effect).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                // Reopen the form with what was submitted
                self.roll_back(from.with_draft(submitted), &to);
                Err(e)
            }
        }
    }

    pub async fn cancel(&self) -> Result<FlowOutcome> {
        self.transition(|flow| flow.cancel())?;
        self.outcome(None, None).await
    }

    pub async fn delete(&self) -> Result<FlowOutcome> {
        let transition = self.transition(|flow| flow.delete())?;
        self.apply(transition.value).await
    }

    pub async fn close(&self) -> Result<FlowOutcome> {
        self.flow.lock().unwrap_or_else(PoisonError::into_inner).close();
        self.outcome(None, None).await
    }

    async fn apply(&self, effect: FlowEffect) -> Result<FlowOutcome> {
        match effect {
            FlowEffect::Create(command) => {
                let event = self.event_service.create_event(command).await?;
                self.outcome(Some(event.id), Some("Event added".to_string())).await
            }
            FlowEffect::Update(command) => {
                let event_id = command.event_id.clone();
                let result = self.event_service.update_event(command).await?;
                if result.event.is_none() {
                    // Edited event is gone; nothing to show any more
                    self.flow.lock().unwrap_or_else(PoisonError::into_inner).close();
                    return self
                        .outcome(None, Some(format!("Event {} no longer exists", event_id)))
                        .await;
                }
                self.outcome(Some(event_id), Some("Event updated".to_string())).await
            }
            FlowEffect::Delete(event_id) => {
                let result = self.event_service.delete_event(&event_id).await?;
                let affected = result.deleted.then_some(event_id);
                self.outcome(affected, Some(result.message)).await
            }
        }
    }
}
