//! Core engine for the workload capacity calendar.
//!
//! This crate contains the pure, synchronous parts of the engine:
//! - Availability: whether a (collaborator, date, half-day) is assignable
//! - Segmentation: splitting a task's duration into equal placement runs
//! - Workload: per-collaborator capacity projections and weekly aggregates
//! - Heatmap: discrete load buckets from used/available ratios
//! - View: zoom level, anchor date and navigation
//! - Grid: the renderable cell data at each view level

pub mod availability;
pub mod grid;
pub mod heatmap;
pub mod palette;
pub mod segmentation;
pub mod types;
pub mod view;
pub mod workload;

pub use availability::{AvailabilityCalendar, AvailabilityResolver, Unavailable, is_weekend};
pub use grid::{BlockReason, CapacityGrid, CellState, MemberRow, UnitCell, WeekCell, build_grid};
pub use heatmap::{LoadBucket, bucket};
pub use palette::MemberPalette;
pub use segmentation::{
    PlacementPlan, PlanError, Segment, plan_segments, replan_segments, valid_segment_counts,
};
pub use types::{
    DateSpan, HalfDay, HalfDayRef, HalfDaySlot, Holiday, LeaveId, LeaveStatus, SlotId, TaskId,
    TaskPriority, TaskProgress, TaskRef, UserId, UserLeave, ValidationError,
};
pub use view::{CalendarViewState, Direction, ViewLevel};
pub use workload::{
    DayCapacity, HalfDayCell, MemberProfile, MemberWorkload, WeekLoad, compute_workloads,
    weekly_loads, week_start_of,
};
