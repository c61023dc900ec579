use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use indexmap::IndexMap;

/// Timestamp layout used for window bounds, e.g. `2024-01-05T00:00:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Summed nutrition values keyed by component, in first-seen order.
pub type NutritionTotals = IndexMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecalculateDailyGoalsInput {
    pub user_id: String,
    pub date: NaiveDate,
}

/// Chooses where the food entry window of a day ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayBoundary {
    /// `[00:00:00, 23:59:59)`: entries logged during the final second are not counted.
    #[default]
    LastSecondExclusive,
    /// `[00:00:00, next day 00:00:00)`.
    NextMidnight,
}

impl DayBoundary {
    pub fn window(self, date: NaiveDate) -> Option<DayWindow> {
        let start = date.and_hms_opt(0, 0, 0)?;
        let end = match self {
            DayBoundary::LastSecondExclusive => {
                start.checked_add_signed(TimeDelta::seconds(86_399))?
            }
            DayBoundary::NextMidnight => start.checked_add_signed(TimeDelta::days(1))?,
        };

        Some(DayWindow { start, end })
    }
}

/// Half-open timestamp range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayWindow {
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp < self.end
    }

    pub fn start_param(&self) -> String {
        self.start.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(TIMESTAMP_FORMAT).to_string()
    }
}
