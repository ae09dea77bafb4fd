//! Per-collaborator workload projections.
//!
//! Workloads are pure projections over externally supplied slot, holiday and
//! leave records. They are recomputed wholesale whenever the source data
//! changes, never patched incrementally; [`compute_workloads`] fans out
//! across collaborators with rayon.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityCalendar;
use crate::types::{DateSpan, HalfDay, HalfDayRef, HalfDaySlot, Holiday, UserId, UserLeave};

/// Roster entry for one collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

/// One half of a projected day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfDayCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<HalfDaySlot>,
    pub is_leave: bool,
}

/// Projected capacity of one date for one collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCapacity {
    pub date: NaiveDate,
    pub is_holiday: bool,
    pub morning: HalfDayCell,
    pub afternoon: HalfDayCell,
}

impl DayCapacity {
    /// Occupied half-days of this date.
    #[must_use]
    pub fn used(&self) -> u32 {
        u32::from(self.morning.slot.is_some()) + u32::from(self.afternoon.slot.is_some())
    }
}

/// A collaborator's projected workload over the active date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberWorkload {
    pub member: MemberProfile,
    pub days: Vec<DayCapacity>,
    /// Raw capacity of the span: two half-days per day.
    pub total_slots: u32,
    pub used_slots: u32,
    pub leave_slots: u32,
    pub holiday_slots: u32,
}

impl MemberWorkload {
    /// Capacity actually open for scheduling.
    #[must_use]
    pub const fn available_slots(&self) -> u32 {
        self.total_slots
            .saturating_sub(self.leave_slots)
            .saturating_sub(self.holiday_slots)
    }
}

/// Capacity of one ISO week, aggregated from its days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekLoad {
    /// Monday of the ISO week.
    pub week_start: NaiveDate,
    pub total_slots: u32,
    pub used_slots: u32,
    pub leave_slots: u32,
    pub holiday_slots: u32,
}

impl WeekLoad {
    #[must_use]
    pub const fn available_slots(&self) -> u32 {
        self.total_slots
            .saturating_sub(self.leave_slots)
            .saturating_sub(self.holiday_slots)
    }
}

/// Monday of the ISO week containing `date`.
#[must_use]
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Projects the workload of every roster member over `span`.
///
/// Counting rules: a holiday date contributes two holiday slots; a
/// non-cancelled leave date contributes two leave slots unless the date is
/// also a holiday (holiday takes precedence, matching the availability rule
/// order, so no date is counted twice). `total_slots` is the raw
/// `2 × num_days` capacity of the span.
#[must_use]
pub fn compute_workloads(
    members: &[MemberProfile],
    slots: &[HalfDaySlot],
    holidays: &[Holiday],
    leaves: &[UserLeave],
    span: DateSpan,
) -> Vec<MemberWorkload> {
    let calendar = AvailabilityCalendar::new(holidays, leaves);

    let mut by_user: HashMap<&UserId, HashMap<HalfDayRef, &HalfDaySlot>> = HashMap::new();
    for slot in slots {
        by_user
            .entry(&slot.user_id)
            .or_default()
            .insert(slot.unit(), slot);
    }

    let workloads: Vec<MemberWorkload> = members
        .par_iter()
        .map(|member| project_member(member, by_user.get(&member.id), &calendar, span))
        .collect();
    tracing::debug!(members = members.len(), span = %span, "recomputed workloads");
    workloads
}

fn project_member(
    member: &MemberProfile,
    slots: Option<&HashMap<HalfDayRef, &HalfDaySlot>>,
    calendar: &AvailabilityCalendar,
    span: DateSpan,
) -> MemberWorkload {
    let mut days = Vec::with_capacity(span.num_days() as usize);
    let mut used_slots = 0;
    let mut leave_slots = 0;
    let mut holiday_slots = 0;

    for date in span.days() {
        let is_holiday = calendar.is_holiday(date);
        let is_leave = calendar.is_on_leave(&member.id, date);

        let cell = |half_day| HalfDayCell {
            slot: slots
                .and_then(|m| m.get(&HalfDayRef::new(date, half_day)))
                .map(|&s| s.clone()),
            is_leave,
        };
        let day = DayCapacity {
            date,
            is_holiday,
            morning: cell(HalfDay::Morning),
            afternoon: cell(HalfDay::Afternoon),
        };

        used_slots += day.used();
        if is_holiday {
            holiday_slots += 2;
        } else if is_leave {
            leave_slots += 2;
        }
        days.push(day);
    }

    MemberWorkload {
        member: member.clone(),
        days,
        total_slots: span.num_days() * 2,
        used_slots,
        leave_slots,
        holiday_slots,
    }
}

/// Aggregates a workload's days into per-ISO-week loads, in week order.
///
/// A week that only partially overlaps the span is aggregated over the
/// overlapping days only.
#[must_use]
pub fn weekly_loads(workload: &MemberWorkload) -> Vec<WeekLoad> {
    let mut weeks: Vec<WeekLoad> = Vec::new();

    for day in &workload.days {
        let week_start = week_start_of(day.date);
        if weeks.last().is_none_or(|w| w.week_start != week_start) {
            weeks.push(WeekLoad {
                week_start,
                total_slots: 0,
                used_slots: 0,
                leave_slots: 0,
                holiday_slots: 0,
            });
        }
        if let Some(week) = weeks.last_mut() {
            week.total_slots += 2;
            week.used_slots += day.used();
            if day.is_holiday {
                week.holiday_slots += 2;
            } else if day.morning.is_leave {
                week.leave_slots += 2;
            }
        }
    }

    weeks
}
