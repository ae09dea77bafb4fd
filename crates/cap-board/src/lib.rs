//! Interactive assignment layer for the workload capacity calendar.
//!
//! Sits between the pure engine in `cap-core` and the external
//! slot-management collaborator: the drag-and-drop controller decides when
//! and where an assignment is legal and drives the collaborator's async
//! placement operations through the [`SlotStore`] contract.

pub mod collaborator;
pub mod dragdrop;

pub use collaborator::SlotStore;
pub use dragdrop::{
    DragDropController, DragSource, DragState, DropOutcome, DropTarget, GestureError,
    SegmentPrompt,
};
