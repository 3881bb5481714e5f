//! # In-Memory Event Repository
//!
//! Events live in an insertion-ordered `Vec` for the lifetime of the
//! process. Nothing is written to disk; a restart starts from the seed data
//! again.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use log::{debug, info};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::models::event::{DomainEvent, DomainEventCategory};
use crate::storage::EventStorage;

#[derive(Clone, Default)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `events`
    pub fn with_events(events: Vec<DomainEvent>) -> Self {
        info!("Seeding event store with {} events", events.len());
        Self {
            events: Arc::new(RwLock::new(events)),
        }
    }

    /// Demo events around `today`: a meeting today, a deadline in two days
    /// and a client meeting in five days
    pub fn sample_events(today: NaiveDate) -> Vec<DomainEvent> {
        vec![
            DomainEvent {
                id: DomainEvent::generate_id(),
                date: today,
                title: "Weekly Team Sync".to_string(),
                category: DomainEventCategory::Meeting,
                time: "10:00".to_string(),
                location: Some("Zoom".to_string()),
                description: Some("Discussing weekly progress and blockers.".to_string()),
                invitees: Some("team@company.com".to_string()),
            },
            DomainEvent {
                id: DomainEvent::generate_id(),
                date: today + Duration::days(2),
                title: "Submit Q1 Report".to_string(),
                category: DomainEventCategory::Deadline,
                time: "17:00".to_string(),
                location: Some("Drive".to_string()),
                description: Some("Final submission for Q1 financial report.".to_string()),
                invitees: Some("finance@company.com".to_string()),
            },
            DomainEvent {
                id: DomainEvent::generate_id(),
                date: today + Duration::days(5),
                title: "Client Presentation".to_string(),
                category: DomainEventCategory::Meeting,
                time: "14:00".to_string(),
                location: Some("Office".to_string()),
                description: Some("Presenting the new marketing strategy.".to_string()),
                invitees: Some("client@client.com, manager@company.com".to_string()),
            },
        ]
    }
}

#[async_trait]
impl EventStorage for InMemoryEventRepository {
    async fn list_events(&self) -> Result<Vec<DomainEvent>> {
        let events = self.events.read().unwrap_or_else(PoisonError::into_inner);
        Ok(events.clone())
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<DomainEvent>> {
        let events = self.events.read().unwrap_or_else(PoisonError::into_inner);
        Ok(events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn store_event(&self, event: &DomainEvent) -> Result<()> {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        if events.iter().any(|e| e.id == event.id) {
            return Err(anyhow::anyhow!("Event {} already exists", event.id));
        }
        events.push(event.clone());
        debug!("Stored event {} ({} total)", event.id, events.len());
        Ok(())
    }

    async fn update_event(&self, event: &DomainEvent) -> Result<bool> {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => {
                *existing = event.clone();
                debug!("Updated event {}", event.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_event(&self, event_id: &str) -> Result<bool> {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        let before = events.len();
        events.retain(|e| e.id != event_id);
        let deleted = events.len() < before;
        if deleted {
            debug!("Deleted event {}", event_id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, title: &str) -> DomainEvent {
        DomainEvent {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
            title: title.to_string(),
            category: DomainEventCategory::Deadline,
            time: "17:00".to_string(),
            location: None,
            description: None,
            invitees: None,
        }
    }

    #[tokio::test]
    async fn test_store_and_list_keeps_insertion_order() {
        let repo = InMemoryEventRepository::new();
        repo.store_event(&event("event::b", "B")).await.unwrap();
        repo.store_event(&event("event::a", "A")).await.unwrap();

        let ids: Vec<String> = repo.list_events().await.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["event::b", "event::a"]);
    }

    #[tokio::test]
    async fn test_store_duplicate_id_fails() {
        let repo = InMemoryEventRepository::new();
        repo.store_event(&event("event::1", "First")).await.unwrap();

        assert!(repo.store_event(&event("event::1", "Again")).await.is_err());
        assert_eq!(repo.list_events().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_in_place() {
        let repo = InMemoryEventRepository::with_events(vec![event("event::1", "One"), event("event::2", "Two")]);

        assert!(repo.update_event(&event("event::1", "Renamed")).await.unwrap());
        assert!(!repo.update_event(&event("event::9", "Missing")).await.unwrap());

        let events = repo.list_events().await.unwrap();
        assert_eq!(events[0].title, "Renamed");
        assert_eq!(events[1].title, "Two");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryEventRepository::with_events(vec![event("event::1", "One")]);

        assert!(repo.delete_event("event::1").await.unwrap());
        assert!(!repo.delete_event("event::1").await.unwrap());
        assert!(repo.get_event("event::1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_one_event_list() {
        let widget_view = InMemoryEventRepository::new();
        let page_view = widget_view.clone();

        page_view.store_event(&event("event::1", "Shared")).await.unwrap();

        assert_eq!(widget_view.list_events().await.unwrap().len(), 1);
    }

    #[test]
    fn test_sample_events_relative_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let samples = InMemoryEventRepository::sample_events(today);

        let dates: Vec<NaiveDate> = samples.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![today, today + Duration::days(2), today + Duration::days(5)]
        );
    }
}
