//! Drag-and-drop assignment state machine.
//!
//! Mediates placement and movement of tasks into capacity units:
//! `Idle → Dragging → Hovering → (drop | cancel) → Idle`. All transitions
//! run synchronously except the collaborator calls triggered by a drop or a
//! confirmed segmentation, which are awaited. A `pending` guard makes the
//! mutating path non-reentrant: a second drop or confirm is ignored until
//! the in-flight call settles.
//!
//! Failure is always recoverable. A rejected collaborator call is logged
//! and surfaced to the caller with the confirmation prompt left intact, so
//! the operator can retry or cancel; no visual state is committed because
//! the engine holds no authoritative state of its own.

use chrono::NaiveDate;
use thiserror::Error;

use cap_core::availability::{AvailabilityResolver, is_weekend};
use cap_core::segmentation::{PlanError, plan_segments, valid_segment_counts};
use cap_core::types::{HalfDay, HalfDayRef, HalfDaySlot, SlotId, TaskRef, UserId};

use crate::collaborator::SlotStore;

/// What a drag gesture carries: an existing slot (move) or a task (new
/// placement).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    Slot(HalfDaySlot),
    Task(TaskRef),
}

/// The capacity unit a drag currently hovers. Transient: cleared on drop,
/// drag-leave and drag-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub half_day: HalfDay,
}

impl DropTarget {
    #[must_use]
    pub const fn unit(&self) -> HalfDayRef {
        HalfDayRef::new(self.date, self.half_day)
    }
}

/// Drag gesture state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: DragSource,
    },
    Hovering {
        source: DragSource,
        target: DropTarget,
    },
}

/// Pending segmentation confirmation for a multi-half-day placement.
///
/// Offered counts are the divisors of the duration; the default selection
/// is 1, the full contiguous block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPrompt {
    pub task: TaskRef,
    pub target: DropTarget,
    pub duration: u32,
    pub options: Vec<u32>,
    pub selected: u32,
}

/// Result of a drop transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Invalid gesture, rejected locally with no external call.
    Ignored,
    /// The placement or move request was issued and accepted.
    Completed,
    /// The duration needs a segmentation choice; no call issued yet.
    Confirm(SegmentPrompt),
}

/// Gesture failures. `Store` wraps a rejected collaborator call.
#[derive(Debug, Error)]
pub enum GestureError<E> {
    #[error("collaborator call failed")]
    Store(#[source] E),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("a collaborator call is still pending")]
    Busy,

    #[error("{count} is not a valid segment count for {duration} half-days")]
    InvalidCount { duration: u32, count: u32 },
}

/// The drag-and-drop assignment controller.
///
/// Holds only transient gesture state; availability and the collaborator
/// are passed per call because both are rebuilt on every data refresh.
#[derive(Debug, Default)]
pub struct DragDropController {
    state: DragState,
    pending: bool,
}

impl DragDropController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Whether a collaborator call from this controller is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Starts a drag gesture. Ignored while a call is pending; a gesture
    /// cannot begin meaningful interaction until the guard clears.
    pub fn begin_drag(&mut self, source: DragSource) {
        if self.pending {
            return;
        }
        self.state = DragState::Dragging { source };
    }

    /// Dragover handling. Returns whether the cell signals droppable.
    ///
    /// Weekend dates proactively signal non-acceptance before any drop is
    /// attempted; every other cell answers from the resolver.
    pub fn hover(&mut self, resolver: &AvailabilityResolver<'_>, target: DropTarget) -> bool {
        let source = match std::mem::take(&mut self.state) {
            DragState::Dragging { source } | DragState::Hovering { source, .. } => source,
            DragState::Idle => return false,
        };

        let droppable = !is_weekend(target.date)
            && resolver.is_available(&target.user_id, target.date, target.half_day);

        self.state = if droppable {
            DragState::Hovering { source, target }
        } else {
            DragState::Dragging { source }
        };
        droppable
    }

    /// The pointer left the hovered cell without dropping.
    pub fn drag_leave(&mut self) {
        if let DragState::Hovering { source, .. } = std::mem::take(&mut self.state) {
            self.state = DragState::Dragging { source };
        }
    }

    /// Drag ended without a drop: escape, or release outside any cell.
    /// Returns to idle with no external call and no residual state.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Drop transition.
    ///
    /// Issues at most one kind of request per gesture: a move for an
    /// existing slot, a single- or known-duration placement for a task, or
    /// a [`SegmentPrompt`] when the duration needs a segmentation choice.
    /// Invalid gestures are rejected locally with no error surfaced.
    pub async fn drop<S: SlotStore>(
        &mut self,
        resolver: &AvailabilityResolver<'_>,
        store: &S,
    ) -> Result<DropOutcome, GestureError<S::Error>> {
        if self.pending {
            return Ok(DropOutcome::Ignored);
        }
        let DragState::Hovering { source, target } = std::mem::take(&mut self.state) else {
            // Dropped without a valid hover target; pointer feedback has
            // already signaled non-acceptance.
            self.state = DragState::Idle;
            return Ok(DropOutcome::Ignored);
        };

        if !resolver.is_available(&target.user_id, target.date, target.half_day) {
            return Ok(DropOutcome::Ignored);
        }

        match source {
            DragSource::Slot(slot) => {
                self.guarded(store.move_slot(&slot.id, target.date, target.half_day))
                    .await?;
                tracing::debug!(slot = %slot.id, target = %target.unit(), "slot moved");
                Ok(DropOutcome::Completed)
            }
            DragSource::Task(task) => {
                let duration = task
                    .duration_half_days
                    .or_else(|| store.task_duration(&task.id));
                match duration {
                    // A task that reports zero duration is invalid data and
                    // must not issue a placement call.
                    Some(0) => Err(GestureError::Plan(PlanError::ZeroDuration)),
                    // Unknown or single-unit duration: one slot at the target.
                    None | Some(1) => {
                        self.guarded(store.add_slot(
                            &task.id,
                            &target.user_id,
                            target.date,
                            target.half_day,
                        ))
                        .await?;
                        tracing::debug!(task = %task.id, target = %target.unit(), "slot placed");
                        Ok(DropOutcome::Completed)
                    }
                    // One full day: placed directly, no confirmation step.
                    Some(2) => {
                        self.guarded(store.add_slot_run(
                            &task.id,
                            &target.user_id,
                            target.unit(),
                            2,
                        ))
                        .await?;
                        tracing::debug!(task = %task.id, target = %target.unit(), "day placed");
                        Ok(DropOutcome::Completed)
                    }
                    Some(duration) => Ok(DropOutcome::Confirm(SegmentPrompt {
                        options: valid_segment_counts(duration),
                        selected: 1,
                        duration,
                        task,
                        target,
                    })),
                }
            }
        }
    }

    /// Applies a confirmed segmentation choice.
    ///
    /// The confirmed count is authoritative: the placement walk is planned
    /// with it and one contiguous run is requested per planned segment. On
    /// failure the prompt stays open for retry or cancel.
    pub async fn confirm_segments<S: SlotStore>(
        &mut self,
        resolver: &AvailabilityResolver<'_>,
        store: &S,
        prompt: &SegmentPrompt,
        count: u32,
    ) -> Result<(), GestureError<S::Error>> {
        if self.pending {
            return Err(GestureError::Busy);
        }
        if !prompt.options.contains(&count) {
            return Err(GestureError::InvalidCount {
                duration: prompt.duration,
                count,
            });
        }

        let plan = plan_segments(
            resolver,
            &prompt.target.user_id,
            prompt.target.unit(),
            prompt.duration,
            count,
        )?;

        self.pending = true;
        for segment in plan.segments() {
            let result = store
                .add_slot_run(
                    &prompt.task.id,
                    &prompt.target.user_id,
                    segment.start(),
                    segment.len(),
                )
                .await;
            if let Err(error) = result {
                self.pending = false;
                tracing::warn!(task = %prompt.task.id, %error, "placement rejected; prompt kept open");
                return Err(GestureError::Store(error));
            }
        }
        self.pending = false;
        tracing::debug!(task = %prompt.task.id, segments = count, "segmented placement confirmed");
        Ok(())
    }

    /// Requests a re-segmentation of an existing placement after validating
    /// the divisor.
    pub async fn request_resegment<S: SlotStore>(
        &mut self,
        store: &S,
        slot: &HalfDaySlot,
        user: &UserId,
        new_count: u32,
    ) -> Result<(), GestureError<S::Error>> {
        if self.pending {
            return Err(GestureError::Busy);
        }
        let duration = store.task_duration(&slot.task_id).unwrap_or(0);
        if duration == 0 || !valid_segment_counts(duration).contains(&new_count) {
            return Err(GestureError::InvalidCount {
                duration,
                count: new_count,
            });
        }
        self.guarded(store.segment_slot(slot, user, new_count)).await
    }

    /// Requests removal of an existing slot.
    pub async fn request_remove<S: SlotStore>(
        &mut self,
        store: &S,
        slot: &SlotId,
    ) -> Result<(), GestureError<S::Error>> {
        if self.pending {
            return Err(GestureError::Busy);
        }
        self.guarded(store.remove_slot(slot)).await
    }

    /// Awaits one collaborator call under the pending guard.
    async fn guarded<T, E>(
        &mut self,
        call: impl Future<Output = Result<T, E>>,
    ) -> Result<T, GestureError<E>> {
        self.pending = true;
        let result = call.await;
        self.pending = false;
        result.map_err(|error| {
            tracing::warn!("collaborator call rejected");
            GestureError::Store(error)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_core::availability::AvailabilityCalendar;
    use cap_core::types::{TaskId, TaskPriority};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn task(id: &str, duration: Option<u32>) -> TaskRef {
        TaskRef {
            id: TaskId::new(id).unwrap(),
            title: "Task".to_string(),
            priority: TaskPriority::Normal,
            due_date: None,
            status: None,
            duration_half_days: duration,
            progress: None,
        }
    }

    fn target(user_id: &str, d: NaiveDate, half: HalfDay) -> DropTarget {
        DropTarget {
            user_id: user(user_id),
            date: d,
            half_day: half,
        }
    }

    #[test]
    fn hover_rejects_weekend_before_any_resolver_answer() {
        let calendar = AvailabilityCalendar::default();
        // An override that would accept anything must not matter on weekends.
        let always = |_: &UserId, _: NaiveDate, _: HalfDay| true;
        let resolver = AvailabilityResolver::new(&calendar).with_override(&always);

        let mut controller = DragDropController::new();
        controller.begin_drag(DragSource::Task(task("t1", None)));
        let droppable = controller.hover(
            &resolver,
            target("u1", date(2025, 3, 8), HalfDay::Morning), // Saturday
        );
        assert!(!droppable);
        assert!(matches!(controller.state(), DragState::Dragging { .. }));
    }

    #[test]
    fn hover_without_drag_is_inert() {
        let calendar = AvailabilityCalendar::default();
        let resolver = AvailabilityResolver::new(&calendar);
        let mut controller = DragDropController::new();
        assert!(!controller.hover(
            &resolver,
            target("u1", date(2025, 3, 10), HalfDay::Morning)
        ));
        assert_eq!(*controller.state(), DragState::Idle);
    }

    #[test]
    fn drag_leave_returns_to_dragging() {
        let calendar = AvailabilityCalendar::default();
        let resolver = AvailabilityResolver::new(&calendar);
        let mut controller = DragDropController::new();
        controller.begin_drag(DragSource::Task(task("t1", None)));
        assert!(controller.hover(
            &resolver,
            target("u1", date(2025, 3, 10), HalfDay::Morning)
        ));
        assert!(matches!(controller.state(), DragState::Hovering { .. }));

        controller.drag_leave();
        assert!(matches!(controller.state(), DragState::Dragging { .. }));
    }

    #[test]
    fn cancel_clears_all_transient_state() {
        let calendar = AvailabilityCalendar::default();
        let resolver = AvailabilityResolver::new(&calendar);
        let mut controller = DragDropController::new();
        controller.begin_drag(DragSource::Task(task("t1", None)));
        controller.hover(
            &resolver,
            target("u1", date(2025, 3, 10), HalfDay::Morning),
        );
        controller.cancel();
        assert_eq!(*controller.state(), DragState::Idle);
        assert!(!controller.is_pending());
    }
}
