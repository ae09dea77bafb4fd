//! Per-resolution capacity grids.
//!
//! Builds the cell data the calendar renders at each view level from member
//! workload projections. The resolution-specific shapes live in one tagged
//! variant per level and are dispatched by pattern matching; availability
//! and segmentation logic stays shared.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::{AvailabilityResolver, is_weekend};
use crate::heatmap::{LoadBucket, bucket};
use crate::types::{HalfDay, HalfDayRef, SlotId, TaskId, UserId};
use crate::view::{CalendarViewState, ViewLevel};
use crate::workload::{DayCapacity, HalfDayCell, MemberWorkload, weekly_loads};

/// Why a half-day cell cannot receive a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockReason {
    Weekend,
    Holiday,
    Leave,
}

/// Interactive state of one half-day cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    /// Assignable, registers a drop target.
    Open,
    /// Holds a slot; renders the task and acts as a drag source.
    Occupied { slot_id: SlotId, task_id: TaskId },
    /// Non-interactive; no drop target is registered.
    Blocked(BlockReason),
}

/// One half-day cell of a week- or month-level row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCell {
    pub unit: HalfDayRef,
    pub state: CellState,
}

impl UnitCell {
    /// Whether a drag may drop here.
    #[must_use]
    pub const fn droppable(&self) -> bool {
        matches!(self.state, CellState::Open)
    }
}

/// One ISO-week cell of a quarter-level row.
///
/// `drop_unit` is the first assignable half-day of the week; a drop on the
/// cell resolves to it before being handed to the placement logic. `None`
/// means the whole week is blocked and the cell accepts no drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekCell {
    pub week_start: NaiveDate,
    pub used_slots: u32,
    pub leave_slots: u32,
    pub available_slots: u32,
    pub load: LoadBucket,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_unit: Option<HalfDayRef>,
}

/// One ISO-week cell of a year-level row: load bucket only, no interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCell {
    pub week_start: NaiveDate,
    pub load: LoadBucket,
}

/// A grid row for one collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRow<C> {
    pub member_id: UserId,
    pub member_name: String,
    pub cells: Vec<C>,
}

/// The renderable grid at one view level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CapacityGrid {
    /// Week and month levels: one cell per half-day per collaborator.
    HalfDays { rows: Vec<MemberRow<UnitCell>> },
    /// Quarter level: one cell per ISO week per collaborator, droppable.
    Weeks { rows: Vec<MemberRow<WeekCell>> },
    /// Year level: weekly load buckets, visualization only.
    Buckets { rows: Vec<MemberRow<BucketCell>> },
}

/// Builds the grid for the current view over the given workload projections.
///
/// Workloads are expected to cover the view's period. When the view has a
/// selected collaborator, other rows are omitted.
#[must_use]
pub fn build_grid(
    view: &CalendarViewState,
    workloads: &[MemberWorkload],
    resolver: &AvailabilityResolver<'_>,
) -> CapacityGrid {
    let visible = workloads
        .iter()
        .filter(|w| view.selected_user.as_ref().is_none_or(|u| *u == w.member.id));

    match view.level {
        ViewLevel::Week | ViewLevel::Month => CapacityGrid::HalfDays {
            rows: visible.map(half_day_row).collect(),
        },
        ViewLevel::Quarter => CapacityGrid::Weeks {
            rows: visible.map(|w| week_row(w, resolver)).collect(),
        },
        ViewLevel::Year => CapacityGrid::Buckets {
            rows: visible.map(bucket_row).collect(),
        },
    }
}

fn half_day_row(workload: &MemberWorkload) -> MemberRow<UnitCell> {
    let cells = workload
        .days
        .iter()
        .flat_map(|day| {
            [
                unit_cell(day, HalfDay::Morning, &day.morning),
                unit_cell(day, HalfDay::Afternoon, &day.afternoon),
            ]
        })
        .collect();
    MemberRow {
        member_id: workload.member.id.clone(),
        member_name: workload.member.name.clone(),
        cells,
    }
}

fn unit_cell(day: &DayCapacity, half_day: HalfDay, half: &HalfDayCell) -> UnitCell {
    let state = if is_weekend(day.date) {
        CellState::Blocked(BlockReason::Weekend)
    } else if day.is_holiday {
        CellState::Blocked(BlockReason::Holiday)
    } else if let Some(slot) = &half.slot {
        CellState::Occupied {
            slot_id: slot.id.clone(),
            task_id: slot.task_id.clone(),
        }
    } else if half.is_leave {
        CellState::Blocked(BlockReason::Leave)
    } else {
        CellState::Open
    };
    UnitCell {
        unit: HalfDayRef::new(day.date, half_day),
        state,
    }
}

fn week_row(workload: &MemberWorkload, resolver: &AvailabilityResolver<'_>) -> MemberRow<WeekCell> {
    let cells = weekly_loads(workload)
        .into_iter()
        .map(|week| {
            let available = week.available_slots();
            WeekCell {
                week_start: week.week_start,
                used_slots: week.used_slots,
                leave_slots: week.leave_slots,
                available_slots: available,
                load: bucket(week.used_slots, available),
                drop_unit: resolver
                    .first_available_in_week(&workload.member.id, week.week_start),
            }
        })
        .collect();
    MemberRow {
        member_id: workload.member.id.clone(),
        member_name: workload.member.name.clone(),
        cells,
    }
}

fn bucket_row(workload: &MemberWorkload) -> MemberRow<BucketCell> {
    let cells = weekly_loads(workload)
        .into_iter()
        .map(|week| BucketCell {
            week_start: week.week_start,
            load: bucket(week.used_slots, week.available_slots()),
        })
        .collect();
    MemberRow {
        member_id: workload.member.id.clone(),
        member_name: workload.member.name.clone(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::AvailabilityCalendar;
    use crate::types::{DateSpan, HalfDaySlot, Holiday, LeaveId, LeaveStatus, UserLeave};
    use crate::workload::{MemberProfile, compute_workloads};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn member(id: &str, name: &str) -> MemberProfile {
        MemberProfile {
            id: UserId::new(id).unwrap(),
            name: name.to_string(),
            avatar_url: None,
            job_title: None,
        }
    }

    fn view(level: ViewLevel, anchor: NaiveDate) -> CalendarViewState {
        CalendarViewState {
            level,
            anchor,
            selected_user: None,
        }
    }

    fn week_fixture() -> (Vec<Holiday>, Vec<UserLeave>, Vec<HalfDaySlot>) {
        let holidays = vec![Holiday {
            date: date(2025, 3, 11),
            name: "Holiday".to_string(),
        }];
        let leaves = vec![UserLeave {
            id: LeaveId::new("l1").unwrap(),
            user_id: UserId::new("u1").unwrap(),
            start_date: date(2025, 3, 13),
            end_date: date(2025, 3, 13),
            status: LeaveStatus::Confirmed,
            leave_type: "vacation".to_string(),
        }];
        let slots = vec![HalfDaySlot {
            id: SlotId::new("s1").unwrap(),
            task_id: TaskId::new("t1").unwrap(),
            user_id: UserId::new("u1").unwrap(),
            date: date(2025, 3, 10),
            half_day: HalfDay::Morning,
        }];
        (holidays, leaves, slots)
    }

    #[test]
    fn week_grid_marks_blocked_and_occupied_cells() {
        let (holidays, leaves, slots) = week_fixture();
        let v = view(ViewLevel::Week, date(2025, 3, 12));
        let span = v.period();
        let workloads =
            compute_workloads(&[member("u1", "Ada")], &slots, &holidays, &leaves, span);
        let calendar = AvailabilityCalendar::new(&holidays, &leaves);
        let resolver = AvailabilityResolver::new(&calendar);

        let CapacityGrid::HalfDays { rows } = build_grid(&v, &workloads, &resolver) else {
            panic!("week view must produce half-day cells");
        };
        let cells = &rows[0].cells;
        // 7 days × 2 half-days.
        assert_eq!(cells.len(), 14);

        // Monday morning occupied, Monday afternoon open.
        assert!(matches!(cells[0].state, CellState::Occupied { .. }));
        assert!(!cells[0].droppable());
        assert!(cells[1].droppable());
        // Tuesday: holiday, both halves blocked.
        assert_eq!(cells[2].state, CellState::Blocked(BlockReason::Holiday));
        assert_eq!(cells[3].state, CellState::Blocked(BlockReason::Holiday));
        // Thursday: leave.
        assert_eq!(cells[6].state, CellState::Blocked(BlockReason::Leave));
        // Saturday and Sunday blocked as weekend, never droppable.
        for cell in &cells[10..14] {
            assert_eq!(cell.state, CellState::Blocked(BlockReason::Weekend));
            assert!(!cell.droppable());
        }
    }

    #[test]
    fn quarter_grid_resolves_drops_to_first_open_half_day() {
        let (holidays, leaves, slots) = week_fixture();
        let v = view(ViewLevel::Quarter, date(2025, 2, 15));
        let span = v.period();
        let workloads =
            compute_workloads(&[member("u1", "Ada")], &slots, &holidays, &leaves, span);
        let calendar = AvailabilityCalendar::new(&holidays, &leaves);
        // Occupied halves are not valid drop resolutions either.
        let external = |_: &UserId, d: NaiveDate, h: HalfDay| {
            !(d == date(2025, 3, 10) && h == HalfDay::Morning)
        };
        let resolver = AvailabilityResolver::new(&calendar).with_override(&external);

        let CapacityGrid::Weeks { rows } = build_grid(&v, &workloads, &resolver) else {
            panic!("quarter view must produce week cells");
        };
        let cell = rows[0]
            .cells
            .iter()
            .find(|c| c.week_start == date(2025, 3, 10))
            .expect("week of March 10 in Q1");

        // Monday AM is occupied, so the drop resolves to Monday PM.
        assert_eq!(
            cell.drop_unit,
            Some(HalfDayRef::new(date(2025, 3, 10), HalfDay::Afternoon))
        );
        assert_eq!(cell.used_slots, 1);
        assert_eq!(cell.leave_slots, 2);
    }

    #[test]
    fn year_grid_has_no_drop_targets() {
        let v = view(ViewLevel::Year, date(2025, 6, 1));
        let span = DateSpan::new(date(2025, 1, 1), date(2025, 12, 31)).unwrap();
        let workloads = compute_workloads(&[member("u1", "Ada")], &[], &[], &[], span);
        let calendar = AvailabilityCalendar::default();
        let resolver = AvailabilityResolver::new(&calendar);

        let CapacityGrid::Buckets { rows } = build_grid(&v, &workloads, &resolver) else {
            panic!("year view must produce bucket cells");
        };
        // 2025 spans 53 ISO week rows; empty calendar means every bucket is None.
        assert_eq!(rows[0].cells.len(), 53);
        assert!(rows[0].cells.iter().all(|c| c.load == LoadBucket::None));
    }

    #[test]
    fn selected_user_filters_rows() {
        let v = CalendarViewState {
            level: ViewLevel::Week,
            anchor: date(2025, 3, 12),
            selected_user: Some(UserId::new("u2").unwrap()),
        };
        let span = v.period();
        let workloads = compute_workloads(
            &[member("u1", "Ada"), member("u2", "Grace")],
            &[],
            &[],
            &[],
            span,
        );
        let calendar = AvailabilityCalendar::default();
        let resolver = AvailabilityResolver::new(&calendar);

        let CapacityGrid::HalfDays { rows } = build_grid(&v, &workloads, &resolver) else {
            panic!("week view must produce half-day cells");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].member_id.as_str(), "u2");
    }

    #[test]
    fn fully_blocked_week_cell_accepts_no_drop() {
        let holidays: Vec<Holiday> = (0..5)
            .map(|offset| Holiday {
                date: date(2025, 3, 10) + chrono::Duration::days(offset),
                name: "Shutdown".to_string(),
            })
            .collect();
        let v = view(ViewLevel::Quarter, date(2025, 3, 1));
        let span = v.period();
        let workloads = compute_workloads(&[member("u1", "Ada")], &[], &holidays, &[], span);
        let calendar = AvailabilityCalendar::new(&holidays, &[]);
        let resolver = AvailabilityResolver::new(&calendar);

        let CapacityGrid::Weeks { rows } = build_grid(&v, &workloads, &resolver) else {
            panic!("quarter view must produce week cells");
        };
        let cell = rows[0]
            .cells
            .iter()
            .find(|c| c.week_start == date(2025, 3, 10))
            .expect("shutdown week present");
        assert_eq!(cell.drop_unit, None);
    }
}
