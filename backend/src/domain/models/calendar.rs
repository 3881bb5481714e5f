//! Domain models for calendar grids and view state.
use chrono::{Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainViewMode {
    Month,
    Week,
}

/// One day slot of a generated grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub date: NaiveDate,
    /// False only for padding days of a month grid
    pub is_in_current_period: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Ordered grid cells grouped into rows of seven
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid {
    pub view_mode: DomainViewMode,
    pub reference_date: NaiveDate,
    pub rows: Vec<Vec<GridCell>>,
}

impl CalendarGrid {
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.rows.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.cells().next().map(|c| c.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.cells().last().map(|c| c.date)
    }
}

/// Which month/week is displayed, which day is selected, and how
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub reference_date: NaiveDate,
    pub selected_date: NaiveDate,
    pub view_mode: DomainViewMode,
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            reference_date: today,
            selected_date: today,
            view_mode: DomainViewMode::Month,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}
