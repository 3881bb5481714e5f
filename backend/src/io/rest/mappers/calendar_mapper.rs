use shared::{
    CalendarCell, CalendarGridResponse, CalendarSummaryResponse, EventFlowResponse,
    EventFlowState, ViewMode, ViewStateResponse,
};
use chrono::{Datelike, NaiveDate};

use super::event_mapper::EventMapper;
use crate::domain::calendar::CalendarService;
use crate::domain::event_binder::{BoundCell, BoundGrid, EventSummary};
use crate::domain::event_flow::{FlowOutcome, FlowSnapshot, FlowState};
use crate::domain::models::calendar::{DomainViewMode, ViewState};

pub struct CalendarMapper;

impl CalendarMapper {
    pub fn view_mode_to_domain(dto: ViewMode) -> DomainViewMode {
        match dto {
            ViewMode::Month => DomainViewMode::Month,
            ViewMode::Week => DomainViewMode::Week,
        }
    }

    pub fn view_mode_to_dto(domain: DomainViewMode) -> ViewMode {
        match domain {
            DomainViewMode::Month => ViewMode::Month,
            DomainViewMode::Week => ViewMode::Week,
        }
    }

    /// Convert a bound grid into the render model.
    ///
    /// Month cells list at most `max_visible_events` events; the rest are
    /// only counted. Week cells list everything.
    pub fn to_grid_dto(
        calendar_service: &CalendarService,
        grid: BoundGrid,
        selected_date: NaiveDate,
        max_visible_events: usize,
    ) -> CalendarGridResponse {
        let limit = match grid.view_mode {
            DomainViewMode::Month => max_visible_events,
            DomainViewMode::Week => usize::MAX,
        };

        CalendarGridResponse {
            view_mode: Self::view_mode_to_dto(grid.view_mode),
            reference_date: grid.reference_date,
            selected_date,
            title: calendar_service.period_title(grid.reference_date, grid.view_mode),
            weekday_headers: calendar_service.weekday_headers(),
            rows: grid
                .rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| Self::to_cell_dto(cell, limit)).collect())
                .collect(),
        }
    }

    fn to_cell_dto(bound: BoundCell, limit: usize) -> CalendarCell {
        let (shown, hidden_event_count) = bound.overflow(limit);
        CalendarCell {
            date: bound.cell.date,
            day: bound.cell.date.day(),
            is_in_current_period: bound.cell.is_in_current_period,
            is_today: bound.cell.is_today,
            is_selected: bound.cell.is_selected,
            events: EventMapper::to_dto_list(shown.to_vec()),
            hidden_event_count,
            has_events: bound.has_events(),
        }
    }

    pub fn to_view_state_dto(calendar_service: &CalendarService, state: ViewState) -> ViewStateResponse {
        ViewStateResponse {
            title: calendar_service.period_title(state.reference_date, state.view_mode),
            reference_date: state.reference_date,
            selected_date: state.selected_date,
            view_mode: Self::view_mode_to_dto(state.view_mode),
        }
    }

    pub fn to_summary_dto(today: NaiveDate, summary: EventSummary) -> CalendarSummaryResponse {
        CalendarSummaryResponse {
            today,
            events_today: summary.events_today,
            events_this_week: summary.events_this_week,
            upcoming_this_week: summary.upcoming_this_week,
        }
    }

    pub fn to_flow_state_dto(snapshot: FlowSnapshot) -> EventFlowState {
        match (snapshot.state, snapshot.event) {
            (FlowState::Creating { date, draft }, _) => EventFlowState::Creating {
                date,
                draft: EventMapper::draft_to_dto(draft),
            },
            (FlowState::Viewing { .. }, Some(event)) => EventFlowState::Viewing {
                event: EventMapper::to_dto(event),
            },
            (FlowState::Editing { event_id, draft }, _) => EventFlowState::Editing {
                event_id,
                draft: EventMapper::draft_to_dto(draft),
            },
            // Viewing an event that is already gone renders as closed
            (FlowState::Viewing { .. }, None) | (FlowState::Idle, _) => EventFlowState::Idle,
        }
    }

    pub fn to_flow_response(outcome: FlowOutcome) -> EventFlowResponse {
        EventFlowResponse {
            flow: Self::to_flow_state_dto(outcome.snapshot),
            affected_event_id: outcome.affected_event_id,
            message: outcome.message,
        }
    }
}
