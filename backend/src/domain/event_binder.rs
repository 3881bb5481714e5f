//! Binds events to the cells of a generated calendar grid.
//!
//! Matching is by calendar day only: year, month and day components are
//! compared and anything finer (time of day) is ignored. Events keep their
//! relative input order inside a cell; nothing here sorts by time.

use crate::domain::models::calendar::{CalendarGrid, DomainViewMode, GridCell};
use crate::domain::models::event::DomainEvent;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// A grid cell together with the events falling on its day
#[derive(Debug, Clone, PartialEq)]
pub struct BoundCell {
    pub cell: GridCell,
    pub events: Vec<DomainEvent>,
}

impl BoundCell {
    /// First `limit` events plus the number left out
    pub fn overflow(&self, limit: usize) -> (&[DomainEvent], usize) {
        let shown = self.events.len().min(limit);
        (&self.events[..shown], self.events.len() - shown)
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundGrid {
    pub view_mode: DomainViewMode,
    pub reference_date: NaiveDate,
    pub rows: Vec<Vec<BoundCell>>,
}

impl BoundGrid {
    pub fn cells(&self) -> impl Iterator<Item = &BoundCell> {
        self.rows.iter().flatten()
    }

    pub fn cell_for(&self, date: NaiveDate) -> Option<&BoundCell> {
        self.cells().find(|c| same_calendar_day(&c.cell.date, &date))
    }
}

/// Counts shown above the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSummary {
    pub events_today: usize,
    pub events_this_week: usize,
    pub upcoming_this_week: usize,
}

/// True when both values fall on the same calendar day
pub fn same_calendar_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Attach to every cell the events on that cell's day, in input order
pub fn bind_events(grid: &CalendarGrid, events: &[DomainEvent]) -> BoundGrid {
    let mut by_day: HashMap<(i32, u32, u32), Vec<&DomainEvent>> = HashMap::new();
    for event in events {
        by_day
            .entry((event.date.year(), event.date.month(), event.date.day()))
            .or_default()
            .push(event);
    }

    let rows = grid
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| BoundCell {
                    cell: cell.clone(),
                    events: by_day
                        .get(&(cell.date.year(), cell.date.month(), cell.date.day()))
                        .map(|events| events.iter().map(|e| (*e).clone()).collect())
                        .unwrap_or_default(),
                })
                .collect()
        })
        .collect();

    BoundGrid {
        view_mode: grid.view_mode,
        reference_date: grid.reference_date,
        rows,
    }
}

/// Events on a given day, in input order
pub fn events_on<'a>(events: &'a [DomainEvent], date: NaiveDate) -> Vec<&'a DomainEvent> {
    events
        .iter()
        .filter(|e| same_calendar_day(&e.date, &date))
        .collect()
}

/// Events between `start` and `end`, both inclusive, in input order
pub fn events_in_range<'a>(
    events: &'a [DomainEvent],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&'a DomainEvent> {
    events
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .collect()
}

/// Summary counts for the week `[week_start, week_end]` containing `today`
pub fn summarize(
    events: &[DomainEvent],
    today: NaiveDate,
    week_start: NaiveDate,
    week_end: NaiveDate,
) -> EventSummary {
    let this_week = events_in_range(events, week_start, week_end);
    EventSummary {
        events_today: events_on(events, today).len(),
        events_this_week: this_week.len(),
        upcoming_this_week: this_week.iter().filter(|e| e.date >= today).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::CalendarService;
    use crate::domain::models::event::DomainEventCategory;
    use chrono::{Duration, NaiveDateTime, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_event(id: &str, date: NaiveDate) -> DomainEvent {
        DomainEvent {
            id: id.to_string(),
            date,
            title: format!("Event {}", id),
            category: DomainEventCategory::Meeting,
            time: "09:00".to_string(),
            location: None,
            description: None,
            invitees: None,
        }
    }

    fn month_grid(reference: NaiveDate) -> CalendarGrid {
        CalendarService::default().generate_grid(reference, DomainViewMode::Month, reference, reference)
    }

    #[test]
    fn test_same_calendar_day_ignores_time() {
        let morning = NaiveDateTime::parse_from_str("2024-04-15 00:00:01", "%Y-%m-%d %H:%M:%S").unwrap();
        let night = NaiveDateTime::parse_from_str("2024-04-15 23:59:59", "%Y-%m-%d %H:%M:%S").unwrap();
        let day = date(2024, 4, 15);

        assert!(same_calendar_day(&morning, &night));
        assert!(same_calendar_day(&night, &morning));
        assert!(same_calendar_day(&day, &day));
        assert!(same_calendar_day(&morning, &day));
        assert!(!same_calendar_day(&day, &date(2024, 4, 16)));
        assert!(!same_calendar_day(&day, &date(2023, 4, 15)));
    }

    #[test]
    fn test_event_binds_to_single_cell() {
        let grid = month_grid(date(2024, 4, 15));
        let events = vec![create_test_event("1", date(2024, 4, 15))];

        let bound = bind_events(&grid, &events);

        let holders: Vec<NaiveDate> = bound
            .cells()
            .filter(|c| c.has_events())
            .map(|c| c.cell.date)
            .collect();
        assert_eq!(holders, vec![date(2024, 4, 15)]);
    }

    #[test]
    fn test_padding_days_receive_events() {
        let grid = month_grid(date(2024, 4, 15));
        let events = vec![create_test_event("pad", date(2024, 5, 2))];

        let bound = bind_events(&grid, &events);

        let cell = bound.cell_for(date(2024, 5, 2)).unwrap();
        assert!(!cell.cell.is_in_current_period);
        assert_eq!(cell.events.len(), 1);
    }

    #[test]
    fn test_binding_preserves_input_order() {
        let grid = month_grid(date(2024, 4, 15));
        let day = date(2024, 4, 10);
        let events = vec![
            create_test_event("b", day),
            create_test_event("other", date(2024, 4, 11)),
            create_test_event("a", day),
            create_test_event("c", day),
        ];

        let bound = bind_events(&grid, &events);

        let ids: Vec<&str> = bound.cell_for(day).unwrap().events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_every_event_in_grid_bound_exactly_once() {
        let grid = month_grid(date(2024, 2, 14));
        let first = grid.first_date().unwrap();
        let events: Vec<DomainEvent> = (0..grid.len() as i64 * 2)
            .map(|i| create_test_event(&i.to_string(), first + Duration::days(i / 2)))
            .collect();

        let bound = bind_events(&grid, &events);

        let mut bound_ids: Vec<String> = bound
            .cells()
            .flat_map(|c| c.events.iter().map(|e| e.id.clone()))
            .collect();
        let mut expected: Vec<String> = events.iter().map(|e| e.id.clone()).collect();
        bound_ids.sort();
        expected.sort();
        assert_eq!(bound_ids, expected);
    }

    #[test]
    fn test_events_outside_grid_are_not_bound() {
        let grid = month_grid(date(2024, 4, 15));
        let events = vec![create_test_event("far", date(2024, 7, 1))];

        let bound = bind_events(&grid, &events);

        assert!(bound.cells().all(|c| !c.has_events()));
    }

    #[test]
    fn test_overflow() {
        let day = date(2024, 4, 10);
        let grid = month_grid(day);
        let events: Vec<DomainEvent> = (0..5).map(|i| create_test_event(&i.to_string(), day)).collect();

        let bound = bind_events(&grid, &events);
        let cell = bound.cell_for(day).unwrap();

        let (shown, hidden) = cell.overflow(3);
        assert_eq!(shown.len(), 3);
        assert_eq!(shown[0].id, "0");
        assert_eq!(hidden, 2);

        let (shown, hidden) = cell.overflow(10);
        assert_eq!(shown.len(), 5);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_events_on_and_in_range() {
        let events = vec![
            create_test_event("1", date(2024, 4, 14)),
            create_test_event("2", date(2024, 4, 15)),
            create_test_event("3", date(2024, 4, 20)),
            create_test_event("4", date(2024, 4, 21)),
        ];

        assert_eq!(events_on(&events, date(2024, 4, 15)).len(), 1);
        assert!(events_on(&events, date(2024, 4, 16)).is_empty());

        let ids: Vec<&str> = events_in_range(&events, date(2024, 4, 14), date(2024, 4, 20))
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_summarize() {
        let service = CalendarService::new(Weekday::Sun);
        let today = date(2024, 4, 17);
        let events = vec![
            create_test_event("past-this-week", date(2024, 4, 15)),
            create_test_event("today", today),
            create_test_event("today-2", today),
            create_test_event("later-this-week", date(2024, 4, 20)),
            create_test_event("next-week", date(2024, 4, 21)),
        ];

        let summary = summarize(&events, today, service.week_start_of(today), service.week_end_of(today));

        assert_eq!(summary.events_today, 2);
        assert_eq!(summary.events_this_week, 4);
        assert_eq!(summary.upcoming_this_week, 3);
    }
}
