//! Availability resolution for capacity units.
//!
//! Decides whether a `(collaborator, date, half-day)` may legally receive an
//! assignment. Rules are evaluated in order: weekend, holiday, leave, then an
//! optional external override (e.g. "that half-day is already occupied")
//! supplied by the slot collaborator. Pure and side-effect free, so it is
//! safe to call at hover frequency.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};

use crate::types::{HalfDay, HalfDayRef, Holiday, UserId, UserLeave};

/// External availability restriction. ANDed with the local rules when set.
pub type AvailabilityOverride<'a> = &'a dyn Fn(&UserId, NaiveDate, HalfDay) -> bool;

/// Holiday and leave data the resolver consults.
///
/// Rebuilt whenever the source records change; never patched in place.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityCalendar {
    holidays: HashSet<NaiveDate>,
    leaves: HashMap<UserId, Vec<UserLeave>>,
}

impl AvailabilityCalendar {
    #[must_use]
    pub fn new(holidays: &[Holiday], leaves: &[UserLeave]) -> Self {
        let holiday_dates = holidays.iter().map(|h| h.date).collect();
        let mut by_user: HashMap<UserId, Vec<UserLeave>> = HashMap::new();
        for leave in leaves {
            by_user
                .entry(leave.user_id.clone())
                .or_default()
                .push(leave.clone());
        }
        Self {
            holidays: holiday_dates,
            leaves: by_user,
        }
    }

    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Whether a non-cancelled leave of `user` covers `date`.
    #[must_use]
    pub fn is_on_leave(&self, user: &UserId, date: NaiveDate) -> bool {
        self.leaves
            .get(user)
            .is_some_and(|leaves| leaves.iter().any(|leave| leave.blocks(date)))
    }
}

/// Whether the date falls on a Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Why a capacity unit cannot receive an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    Weekend,
    Holiday,
    Leave,
    /// Rejected by the external override (typically: already occupied).
    External,
}

/// Pure availability predicate over an [`AvailabilityCalendar`].
pub struct AvailabilityResolver<'a> {
    calendar: &'a AvailabilityCalendar,
    external: Option<AvailabilityOverride<'a>>,
}

impl<'a> AvailabilityResolver<'a> {
    #[must_use]
    pub const fn new(calendar: &'a AvailabilityCalendar) -> Self {
        Self {
            calendar,
            external: None,
        }
    }

    /// Adds an external override that can only further restrict availability.
    #[must_use]
    pub const fn with_override(mut self, external: AvailabilityOverride<'a>) -> Self {
        self.external = Some(external);
        self
    }

    /// Whether the capacity unit may legally receive an assignment.
    #[must_use]
    pub fn is_available(&self, user: &UserId, date: NaiveDate, half_day: HalfDay) -> bool {
        self.check(user, date, half_day).is_ok()
    }

    #[must_use]
    pub fn is_unit_available(&self, user: &UserId, unit: HalfDayRef) -> bool {
        self.is_available(user, unit.date, unit.half_day)
    }

    /// Availability with the blocking reason, for hover feedback.
    pub fn check(
        &self,
        user: &UserId,
        date: NaiveDate,
        half_day: HalfDay,
    ) -> Result<(), Unavailable> {
        if is_weekend(date) {
            return Err(Unavailable::Weekend);
        }
        if self.calendar.is_holiday(date) {
            return Err(Unavailable::Holiday);
        }
        if self.calendar.is_on_leave(user, date) {
            return Err(Unavailable::Leave);
        }
        if let Some(external) = self.external {
            if !external(user, date, half_day) {
                return Err(Unavailable::External);
            }
        }
        Ok(())
    }

    /// First assignable half-day within the 7 days starting at `week_start`,
    /// scanning in calendar order. Used to resolve drops onto week-granular
    /// cells before handing them to the placement logic.
    #[must_use]
    pub fn first_available_in_week(
        &self,
        user: &UserId,
        week_start: NaiveDate,
    ) -> Option<HalfDayRef> {
        let mut cursor = HalfDayRef::new(week_start, HalfDay::Morning);
        let week_end = week_start + chrono::Duration::days(6);
        while cursor.date <= week_end {
            if self.is_unit_available(user, cursor) {
                return Some(cursor);
            }
            cursor = cursor.succ()?;
        }
        None
    }
}
