use shared::{CalendarEvent, CreateEventRequest, EventCategory, EventFormDraft, UpdateEventRequest};

use crate::domain::commands::events::{CreateEventCommand, UpdateEventCommand};
use crate::domain::event_flow::EventDraft;
use crate::domain::models::event::{DomainEvent, DomainEventCategory};

pub struct EventMapper;

impl EventMapper {
    /// Convert shared EventCategory to domain DomainEventCategory
    pub fn category_to_domain(dto: EventCategory) -> DomainEventCategory {
        match dto {
            EventCategory::Meeting => DomainEventCategory::Meeting,
            EventCategory::Deadline => DomainEventCategory::Deadline,
            EventCategory::Personal => DomainEventCategory::Personal,
            EventCategory::Onetime => DomainEventCategory::Onetime,
        }
    }

    /// Convert domain DomainEventCategory to shared EventCategory
    pub fn category_to_dto(domain: DomainEventCategory) -> EventCategory {
        match domain {
            DomainEventCategory::Meeting => EventCategory::Meeting,
            DomainEventCategory::Deadline => EventCategory::Deadline,
            DomainEventCategory::Personal => EventCategory::Personal,
            DomainEventCategory::Onetime => EventCategory::Onetime,
        }
    }

    /// Convert domain DomainEvent to shared CalendarEvent DTO
    pub fn to_dto(domain: DomainEvent) -> CalendarEvent {
        let invitee_list = domain.invitee_list();
        CalendarEvent {
            id: domain.id,
            date: domain.date,
            title: domain.title,
            category: Self::category_to_dto(domain.category),
            time: domain.time,
            location: domain.location,
            description: domain.description,
            invitees: domain.invitees,
            invitee_list,
        }
    }

    pub fn to_dto_list(domain_events: Vec<DomainEvent>) -> Vec<CalendarEvent> {
        domain_events.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateEventRequest) -> CreateEventCommand {
        CreateEventCommand {
            date: request.date,
            title: request.title,
            category: Self::category_to_domain(request.category),
            time: request.time,
            location: request.location,
            description: request.description,
            invitees: request.invitees,
        }
    }

    pub fn to_update_command(event_id: String, request: UpdateEventRequest) -> UpdateEventCommand {
        UpdateEventCommand {
            event_id,
            date: request.date,
            title: request.title,
            category: request.category.map(Self::category_to_domain),
            time: request.time,
            location: request.location,
            description: request.description,
            invitees: request.invitees,
        }
    }

    pub fn draft_to_domain(dto: EventFormDraft) -> EventDraft {
        EventDraft {
            title: dto.title,
            category: Self::category_to_domain(dto.category),
            time: dto.time,
            location: dto.location,
            description: dto.description,
            invitees: dto.invitees,
        }
    }

    pub fn draft_to_dto(domain: EventDraft) -> EventFormDraft {
        EventFormDraft {
            title: domain.title,
            category: Self::category_to_dto(domain.category),
            time: domain.time,
            location: domain.location,
            description: domain.description,
            invitees: domain.invitees,
        }
    }
}
