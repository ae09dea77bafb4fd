//! Segmentation planning: splitting a task's half-day duration into equal
//! segments and computing the placement walk that fills them.
//!
//! The walk scans forward through consecutive half-days from an anchor,
//! consuming assignable units and skipping unavailable ones entirely.
//! Skipped units neither count toward a segment nor terminate the scan.

use thiserror::Error;

use crate::availability::AvailabilityResolver;
use crate::types::{HalfDayRef, HalfDaySlot, UserId};

/// Upper bound on the walk, in half-days (two years). A calendar with no
/// assignable units must produce an error, not an unbounded scan.
const WALK_HORIZON: u32 = 2 * 366 * 2;

/// Planning failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The requested segment count does not evenly divide the duration.
    #[error("{count} segments do not evenly divide {duration} half-days")]
    UnevenSplit { duration: u32, count: u32 },

    /// A task with no duration cannot be segmented.
    #[error("cannot plan a zero-duration task")]
    ZeroDuration,

    /// Not enough assignable half-days within the scan horizon.
    #[error("no assignable capacity within {WALK_HORIZON} half-days of the anchor")]
    HorizonExhausted,

    /// Re-segmentation was requested for a task with no existing slots.
    #[error("task has no existing slots to re-segment")]
    NothingToResegment,
}

/// All valid ways to split `duration` half-days into equal segments:
/// the divisors of `duration` in ascending order.
///
/// Always starts with 1 (one contiguous block) and ends with `duration`
/// (all-singles). Returns an empty list for a zero duration.
#[must_use]
pub fn valid_segment_counts(duration: u32) -> Vec<u32> {
    (1..=duration).filter(|n| duration % n == 0).collect()
}

/// One planned segment: `duration / count` units, contiguous modulo skips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    units: Vec<HalfDayRef>,
}

impl Segment {
    /// First capacity unit of the segment.
    #[must_use]
    pub fn start(&self) -> HalfDayRef {
        self.units[0]
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        u32::try_from(self.units.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    #[must_use]
    pub fn units(&self) -> &[HalfDayRef] {
        &self.units
    }
}

/// The result of a placement walk: `count` equal segments covering the
/// task's full duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPlan {
    segments: Vec<Segment>,
}

impl PlacementPlan {
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.segments.iter().map(Segment::len).sum()
    }

    /// Every unit of the plan in calendar order.
    pub fn units(&self) -> impl Iterator<Item = HalfDayRef> + '_ {
        self.segments.iter().flat_map(|s| s.units.iter().copied())
    }
}

/// Runs the placement walk for `user` from `anchor`.
///
/// Consumes `duration` assignable half-days into `count` equal segments,
/// skipping unavailable units entirely. The anchor itself is the first
/// candidate; if it is unavailable the walk simply starts later.
pub fn plan_segments(
    resolver: &AvailabilityResolver<'_>,
    user: &UserId,
    anchor: HalfDayRef,
    duration: u32,
    count: u32,
) -> Result<PlacementPlan, PlanError> {
    if duration == 0 {
        return Err(PlanError::ZeroDuration);
    }
    if count == 0 || duration % count != 0 {
        return Err(PlanError::UnevenSplit { duration, count });
    }
    let segment_len = duration / count;

    let mut segments = Vec::with_capacity(count as usize);
    let mut current: Vec<HalfDayRef> = Vec::with_capacity(segment_len as usize);
    let mut cursor = Some(anchor);

    for _ in 0..WALK_HORIZON {
        let Some(unit) = cursor else {
            return Err(PlanError::HorizonExhausted);
        };
        if resolver.is_unit_available(user, unit) {
            current.push(unit);
            if current.len() == segment_len as usize {
                segments.push(Segment {
                    units: std::mem::take(&mut current),
                });
                if segments.len() == count as usize {
                    return Ok(PlacementPlan { segments });
                }
            }
        }
        cursor = unit.succ();
    }

    Err(PlanError::HorizonExhausted)
}

/// Plans a re-segmentation of an existing placement.
///
/// The task's current slots for this collaborator are discarded by the slot
/// collaborator; the walk reruns from the earliest previously-occupied
/// half-day, producing a fresh contiguous-modulo-skips layout.
pub fn replan_segments(
    resolver: &AvailabilityResolver<'_>,
    user: &UserId,
    existing: &[HalfDaySlot],
    duration: u32,
    new_count: u32,
) -> Result<PlacementPlan, PlanError> {
    let anchor = existing
        .iter()
        .map(HalfDaySlot::unit)
        .min()
        .ok_or(PlanError::NothingToResegment)?;
    plan_segments(resolver, user, anchor, duration, new_count)
}
