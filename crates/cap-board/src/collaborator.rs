//! Contract with the external slot-management collaborator.
//!
//! Authoritative storage and the at-most-one-occupant-per-half-day rule
//! live outside this engine. The engine decides when and where an
//! assignment is legal and drives the collaborator through this trait;
//! mutating calls are asynchronous and awaited one at a time per gesture.

use chrono::NaiveDate;

use cap_core::types::{HalfDay, HalfDayRef, HalfDaySlot, SlotId, TaskId, TaskProgress, UserId};

/// The slot collaborator the board drives.
///
/// Mutators map one-to-one onto the collaborator's placement operations;
/// the read accessors back drag sourcing and the availability override.
#[allow(async_fn_in_trait)]
pub trait SlotStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Places a single half-day unit.
    async fn add_slot(
        &self,
        task: &TaskId,
        user: &UserId,
        date: NaiveDate,
        half_day: HalfDay,
    ) -> Result<(), Self::Error>;

    /// Places `count` units as one contiguous run from `start`, walking
    /// forward and skipping unassignable half-days.
    async fn add_slot_run(
        &self,
        task: &TaskId,
        user: &UserId,
        start: HalfDayRef,
        count: u32,
    ) -> Result<(), Self::Error>;

    /// Moves an existing slot to a new half-day.
    async fn move_slot(
        &self,
        slot: &SlotId,
        date: NaiveDate,
        half_day: HalfDay,
    ) -> Result<(), Self::Error>;

    /// Removes an existing slot.
    async fn remove_slot(&self, slot: &SlotId) -> Result<(), Self::Error>;

    /// Re-segments an existing placement into `segment_count` equal runs.
    async fn segment_slot(
        &self,
        slot: &HalfDaySlot,
        user: &UserId,
        segment_count: u32,
    ) -> Result<(), Self::Error>;

    /// Number of slots the task currently occupies for this collaborator.
    fn task_slot_count(&self, task: &TaskId, user: &UserId) -> u32;

    /// Known duration of the task in half-day units, if any.
    fn task_duration(&self, task: &TaskId) -> Option<u32>;

    /// Completion progress of the task, if tracked.
    fn task_progress(&self, task: &TaskId) -> Option<TaskProgress>;

    /// External availability restriction, typically "not already occupied".
    /// Feeds the resolver override; ANDed with the local calendar rules.
    fn is_half_day_available(&self, user: &UserId, date: NaiveDate, half_day: HalfDay) -> bool;
}
