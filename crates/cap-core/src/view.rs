//! Calendar view state: zoom level, anchor date and navigation.
//!
//! Zoom levels are ordered coarse→fine: year > quarter > month > week.
//! The state is process-local UI state, reset whenever the hosting view is
//! reopened.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{DateSpan, UserId};
use crate::workload::week_start_of;

/// Aggregation granularity of the calendar, coarse to fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewLevel {
    Year,
    Quarter,
    Month,
    Week,
}

impl ViewLevel {
    /// One level finer, or `None` at week.
    #[must_use]
    pub const fn finer(self) -> Option<Self> {
        match self {
            Self::Year => Some(Self::Quarter),
            Self::Quarter => Some(Self::Month),
            Self::Month => Some(Self::Week),
            Self::Week => None,
        }
    }

    /// One level coarser, or `None` at year.
    #[must_use]
    pub const fn coarser(self) -> Option<Self> {
        match self {
            Self::Year => None,
            Self::Quarter => Some(Self::Year),
            Self::Month => Some(Self::Quarter),
            Self::Week => Some(Self::Month),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Quarter => "quarter",
            Self::Month => "month",
            Self::Week => "week",
        }
    }
}

/// Navigation direction for [`CalendarViewState::navigate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Process-local calendar view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarViewState {
    pub level: ViewLevel,
    pub anchor: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_user: Option<UserId>,
}

impl CalendarViewState {
    /// Opens the view at month level anchored on `today`.
    #[must_use]
    pub const fn open(today: NaiveDate) -> Self {
        Self {
            level: ViewLevel::Month,
            anchor: today,
            selected_user: None,
        }
    }

    /// Moves one level finer, re-anchoring if a date is given.
    /// No-op at week level.
    pub fn zoom_in(&mut self, anchor: Option<NaiveDate>) {
        if let Some(finer) = self.level.finer() {
            self.level = finer;
            if let Some(date) = anchor {
                self.anchor = date;
            }
        }
    }

    /// Moves one level coarser. No-op at year level.
    pub fn zoom_out(&mut self) {
        if let Some(coarser) = self.level.coarser() {
            self.level = coarser;
        }
    }

    /// Click-to-drill: zoom in anchored at the clicked cell's start date.
    pub fn drill(&mut self, cell_start: NaiveDate) {
        self.zoom_in(Some(cell_start));
    }

    /// Shifts the anchor by one unit of the current level.
    ///
    /// Month-based shifts clamp the day (Jan 31 → Feb 28) via chrono's
    /// checked month arithmetic.
    pub fn navigate(&mut self, direction: Direction) {
        let anchor = self.anchor;
        let shifted = match (self.level, direction) {
            (ViewLevel::Week, Direction::Prev) => anchor.checked_sub_days(chrono::Days::new(7)),
            (ViewLevel::Week, Direction::Next) => anchor.checked_add_days(chrono::Days::new(7)),
            (ViewLevel::Month, Direction::Prev) => anchor.checked_sub_months(Months::new(1)),
            (ViewLevel::Month, Direction::Next) => anchor.checked_add_months(Months::new(1)),
            (ViewLevel::Quarter, Direction::Prev) => anchor.checked_sub_months(Months::new(3)),
            (ViewLevel::Quarter, Direction::Next) => anchor.checked_add_months(Months::new(3)),
            (ViewLevel::Year, Direction::Prev) => anchor.checked_sub_months(Months::new(12)),
            (ViewLevel::Year, Direction::Next) => anchor.checked_add_months(Months::new(12)),
        };
        if let Some(date) = shifted {
            self.anchor = date;
        }
    }

    /// Resets the anchor to `today` without changing the zoom level.
    pub const fn today(&mut self, today: NaiveDate) {
        self.anchor = today;
    }

    /// The date range displayed at the current level and anchor.
    #[must_use]
    pub fn period(&self) -> DateSpan {
        let anchor = self.anchor;
        let (start, end) = match self.level {
            ViewLevel::Week => {
                let start = week_start_of(anchor);
                (start, start + Duration::days(6))
            }
            ViewLevel::Month => {
                let start = first_of_month(anchor);
                (start, end_of_months(start, 1))
            }
            ViewLevel::Quarter => {
                let quarter_month = ((anchor.month0() / 3) * 3) + 1;
                let start = NaiveDate::from_ymd_opt(anchor.year(), quarter_month, 1)
                    .unwrap_or(anchor);
                (start, end_of_months(start, 3))
            }
            ViewLevel::Year => {
                let start = NaiveDate::from_ymd_opt(anchor.year(), 1, 1).unwrap_or(anchor);
                (start, end_of_months(start, 12))
            }
        };
        DateSpan { start, end }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Last day of the period spanning `months` months from `start` (the first
/// of a month).
fn end_of_months(start: NaiveDate, months: u32) -> NaiveDate {
    start
        .checked_add_months(Months::new(months))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn zoom_in_three_times_reaches_week_then_saturates() {
        let mut view = CalendarViewState {
            level: ViewLevel::Year,
            anchor: date(2025, 6, 15),
            selected_user: None,
        };
        view.zoom_in(None);
        assert_eq!(view.level, ViewLevel::Quarter);
        view.zoom_in(None);
        assert_eq!(view.level, ViewLevel::Month);
        view.zoom_in(None);
        assert_eq!(view.level, ViewLevel::Week);
        view.zoom_in(None);
        assert_eq!(view.level, ViewLevel::Week); // no-op at week
    }

    #[test]
    fn zoom_out_three_times_reaches_year_then_saturates() {
        let mut view = CalendarViewState {
            level: ViewLevel::Week,
            anchor: date(2025, 6, 15),
            selected_user: None,
        };
        for expected in [ViewLevel::Month, ViewLevel::Quarter, ViewLevel::Year, ViewLevel::Year] {
            view.zoom_out();
            assert_eq!(view.level, expected);
        }
    }

    #[test]
    fn drill_re_anchors_on_the_cell() {
        let mut view = CalendarViewState {
            level: ViewLevel::Quarter,
            anchor: date(2025, 4, 1),
            selected_user: None,
        };
        view.drill(date(2025, 5, 12));
        assert_eq!(view.level, ViewLevel::Month);
        assert_eq!(view.anchor, date(2025, 5, 12));
    }

    #[test]
    fn drill_at_week_level_keeps_anchor() {
        let mut view = CalendarViewState {
            level: ViewLevel::Week,
            anchor: date(2025, 5, 12),
            selected_user: None,
        };
        view.drill(date(2025, 5, 19));
        assert_eq!(view.level, ViewLevel::Week);
        assert_eq!(view.anchor, date(2025, 5, 12));
    }

    #[test]
    fn navigate_shifts_by_one_unit_of_the_level() {
        let mut view = CalendarViewState {
            level: ViewLevel::Week,
            anchor: date(2025, 3, 12),
            selected_user: None,
        };
        view.navigate(Direction::Next);
        assert_eq!(view.anchor, date(2025, 3, 19));
        view.navigate(Direction::Prev);
        assert_eq!(view.anchor, date(2025, 3, 12));

        view.level = ViewLevel::Quarter;
        view.navigate(Direction::Next);
        assert_eq!(view.anchor, date(2025, 6, 12));

        view.level = ViewLevel::Year;
        view.navigate(Direction::Prev);
        assert_eq!(view.anchor, date(2024, 6, 12));
    }

    #[test]
    fn navigate_clamps_month_ends() {
        let mut view = CalendarViewState {
            level: ViewLevel::Month,
            anchor: date(2025, 1, 31),
            selected_user: None,
        };
        view.navigate(Direction::Next);
        assert_eq!(view.anchor, date(2025, 2, 28));
    }

    #[test]
    fn today_resets_anchor_only() {
        let mut view = CalendarViewState {
            level: ViewLevel::Quarter,
            anchor: date(2024, 1, 1),
            selected_user: None,
        };
        view.today(date(2025, 3, 12));
        assert_eq!(view.level, ViewLevel::Quarter);
        assert_eq!(view.anchor, date(2025, 3, 12));
    }

    #[test]
    fn week_period_is_iso_monday_to_sunday() {
        let view = CalendarViewState {
            level: ViewLevel::Week,
            anchor: date(2025, 3, 12), // Wednesday
            selected_user: None,
        };
        let span = view.period();
        assert_eq!(span.start, date(2025, 3, 10));
        assert_eq!(span.end, date(2025, 3, 16));
    }

    #[test]
    fn month_period_covers_the_calendar_month() {
        let view = CalendarViewState {
            level: ViewLevel::Month,
            anchor: date(2024, 2, 15),
            selected_user: None,
        };
        let span = view.period();
        assert_eq!(span.start, date(2024, 2, 1));
        assert_eq!(span.end, date(2024, 2, 29)); // leap year
    }

    #[test]
    fn quarter_period_snaps_to_quarter_start() {
        let view = CalendarViewState {
            level: ViewLevel::Quarter,
            anchor: date(2025, 8, 20),
            selected_user: None,
        };
        let span = view.period();
        assert_eq!(span.start, date(2025, 7, 1));
        assert_eq!(span.end, date(2025, 9, 30));
    }

    #[test]
    fn year_period_covers_the_calendar_year() {
        let view = CalendarViewState {
            level: ViewLevel::Year,
            anchor: date(2025, 8, 20),
            selected_user: None,
        };
        let span = view.period();
        assert_eq!(span.start, date(2025, 1, 1));
        assert_eq!(span.end, date(2025, 12, 31));
    }
}
