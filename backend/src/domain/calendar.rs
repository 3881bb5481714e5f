//! Calendar domain logic for the career calendar.
//!
//! This module owns grid generation (month and week layouts), date helpers
//! and the navigation/selection state of the calendar view. Event binding
//! lives in `event_binder`; the UI only renders what is produced here.

use crate::domain::models::calendar::{CalendarGrid, DomainViewMode, GridCell, ViewState};
use chrono::{Datelike, Duration, Local, Months, NaiveDate, Weekday};
use log::{debug, info, warn};
use shared::CurrentDateResponse;
use std::sync::{Arc, Mutex, PoisonError};

/// Calendar service that handles grid generation and view navigation
#[derive(Clone)]
pub struct CalendarService {
    /// First day of every generated week
    week_start: Weekday,
    /// Reference date, selected date and view mode of the calendar page.
    /// Kept in memory only.
    view_state: Arc<Mutex<ViewState>>,
}

impl CalendarService {
    /// Create a new CalendarService anchored on today
    pub fn new(week_start: Weekday) -> Self {
        Self::with_view_state(week_start, ViewState::default())
    }

    pub fn with_view_state(week_start: Weekday, view_state: ViewState) -> Self {
        Self {
            week_start,
            view_state: Arc::new(Mutex::new(view_state)),
        }
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Today's date in the local timezone
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Generate the grid for a reference date and view mode.
    ///
    /// Month grids cover whole weeks from the week containing the 1st to the
    /// week containing the last day of the month. Week grids are the seven
    /// days of the week containing `reference`.
    pub fn generate_grid(
        &self,
        reference: NaiveDate,
        view_mode: DomainViewMode,
        today: NaiveDate,
        selected: NaiveDate,
    ) -> CalendarGrid {
        let (start, end) = match view_mode {
            DomainViewMode::Month => (
                self.week_start_of(self.first_day_of_month(reference)),
                self.week_end_of(self.last_day_of_month(reference)),
            ),
            DomainViewMode::Week => (self.week_start_of(reference), self.week_end_of(reference)),
        };

        // `iter_days` stops short of NaiveDate::MAX, so walk with succ_opt
        let cells: Vec<GridCell> = std::iter::successors(Some(start), |date| date.succ_opt())
            .take_while(|date| *date <= end)
            .map(|date| GridCell {
                date,
                is_in_current_period: match view_mode {
                    DomainViewMode::Month => {
                        date.year() == reference.year() && date.month() == reference.month()
                    }
                    DomainViewMode::Week => true,
                },
                is_today: date == today,
                is_selected: date == selected,
            })
            .collect();

        debug!(
            "Generated {:?} grid for {}: {} cells from {} to {}",
            view_mode,
            reference,
            cells.len(),
            start,
            end
        );

        CalendarGrid {
            view_mode,
            reference_date: reference,
            rows: cells.chunks(7).map(<[GridCell]>::to_vec).collect(),
        }
    }

    /// Grid for the current view state
    pub fn current_grid(&self) -> CalendarGrid {
        let state = self.get_view_state();
        self.generate_grid(
            state.reference_date,
            state.view_mode,
            self.today(),
            state.selected_date,
        )
    }

    /// Start of the week containing `date`.
    ///
    /// Saturates at `NaiveDate::MIN` when the week begins before the
    /// representable range.
    pub fn week_start_of(&self, date: NaiveDate) -> NaiveDate {
        date.checked_sub_signed(Duration::days(self.days_into_week(date)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the week containing `date`, saturating at `NaiveDate::MAX`
    pub fn week_end_of(&self, date: NaiveDate) -> NaiveDate {
        date.checked_add_signed(Duration::days(6 - self.days_into_week(date)))
            .unwrap_or(NaiveDate::MAX)
    }

    fn days_into_week(&self, date: NaiveDate) -> i64 {
        let weekday = date.weekday().num_days_from_sunday() as i64;
        let first = self.week_start.num_days_from_sunday() as i64;
        (weekday - first + 7) % 7
    }

    pub fn first_day_of_month(&self, date: NaiveDate) -> NaiveDate {
        date - Duration::days(date.day0() as i64)
    }

    pub fn last_day_of_month(&self, date: NaiveDate) -> NaiveDate {
        let first = self.first_day_of_month(date);
        first + Duration::days(self.days_in_month(date.month(), date.year()) as i64 - 1)
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        match month {
            2 => if self.is_leap_year(year) { 29 } else { 28 },
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Full weekday names in grid column order
    pub fn weekday_headers(&self) -> Vec<String> {
        let mut day = self.week_start;
        let mut headers = Vec::with_capacity(7);
        for _ in 0..7 {
            headers.push(weekday_name(day).to_string());
            day = day.succ();
        }
        headers
    }

    /// Header text for the displayed period
    pub fn period_title(&self, reference: NaiveDate, view_mode: DomainViewMode) -> String {
        match view_mode {
            DomainViewMode::Month => {
                format!("{} {}", self.month_name(reference.month()), reference.year())
            }
            DomainViewMode::Week => {
                let start = self.week_start_of(reference);
                let end = self.week_end_of(reference);
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
            }
        }
    }

    /// Move a reference date one period back or forward.
    ///
    /// Month steps clamp the day to the end of the target month.
    pub fn shift_reference(
        &self,
        reference: NaiveDate,
        view_mode: DomainViewMode,
        forward: bool,
    ) -> NaiveDate {
        let shifted = match (view_mode, forward) {
            (DomainViewMode::Month, true) => reference.checked_add_months(Months::new(1)),
            (DomainViewMode::Month, false) => reference.checked_sub_months(Months::new(1)),
            (DomainViewMode::Week, true) => reference.checked_add_signed(Duration::days(7)),
            (DomainViewMode::Week, false) => reference.checked_sub_signed(Duration::days(7)),
        };
        shifted.unwrap_or_else(|| {
            warn!("Cannot move calendar past {}, staying put", reference);
            reference
        })
    }

    /// Get current date information
    pub fn get_current_date(&self) -> CurrentDateResponse {
        let today = self.today();
        CurrentDateResponse {
            month: today.month(),
            year: today.year(),
            day: today.day(),
            formatted_date: self.format_date_for_display(today),
            iso_date: today.format("%Y-%m-%d").to_string(),
        }
    }

    /// Format a date for human-readable display
    pub fn format_date_for_display(&self, date: NaiveDate) -> String {
        format!("{} {}, {}", self.month_name(date.month()), date.day(), date.year())
    }

    /// Get the current view state
    pub fn get_view_state(&self) -> ViewState {
        self.view_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update_view_state(&self, update: impl FnOnce(&mut ViewState)) -> ViewState {
        let mut state = self
            .view_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        update(&mut state);
        state.clone()
    }

    /// Show the previous month or week
    pub fn navigate_previous(&self) -> ViewState {
        let state = self.update_view_state(|state| {
            state.reference_date = self.shift_reference(state.reference_date, state.view_mode, false);
        });
        info!("📅 Navigated back to {}", state.reference_date);
        state
    }

    /// Show the next month or week
    pub fn navigate_next(&self) -> ViewState {
        let state = self.update_view_state(|state| {
            state.reference_date = self.shift_reference(state.reference_date, state.view_mode, true);
        });
        info!("📅 Navigated forward to {}", state.reference_date);
        state
    }

    /// Jump back to the period containing today; the selection is left alone
    pub fn navigate_today(&self) -> ViewState {
        let today = self.today();
        let state = self.update_view_state(|state| state.reference_date = today);
        info!("📅 Navigated to today ({})", today);
        state
    }

    /// Select a day; drives the highlighted cell and the add-event form
    pub fn select_date(&self, date: NaiveDate) -> ViewState {
        info!("📅 Selected {}", date);
        self.update_view_state(|state| state.selected_date = date)
    }

    pub fn set_view_mode(&self, view_mode: DomainViewMode) -> ViewState {
        info!("📅 Switched to {:?} view", view_mode);
        self.update_view_state(|state| state.view_mode = view_mode)
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}
