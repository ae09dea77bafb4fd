//! Shared data model for the capacity calendar.
//!
//! The atomic unit of schedulable capacity is a half-day: the morning or
//! afternoon of one date for one collaborator. Everything else in the engine
//! is addressed in these units.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A date span ended before it started.
    #[error("span end {end} is before start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    /// Invalid half-day string.
    #[error("invalid half day: {value}")]
    InvalidHalfDay { value: String },

    /// Invalid leave status string.
    #[error("invalid leave status: {value}")]
    InvalidLeaveStatus { value: String },
}

/// One half of a working day.
///
/// Ordered so that `Morning < Afternoon`, which makes `(date, half_day)`
/// pairs totally ordered in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HalfDay {
    Morning,
    Afternoon,
}

impl HalfDay {
    /// String representation for display and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
        }
    }
}

impl fmt::Display for HalfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HalfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" | "am" => Ok(Self::Morning),
            "afternoon" | "pm" => Ok(Self::Afternoon),
            _ => Err(ValidationError::InvalidHalfDay {
                value: s.to_string(),
            }),
        }
    }
}

/// The address of one capacity unit: a half-day of one date.
///
/// This is the cursor type of the segmentation walk: [`HalfDayRef::succ`]
/// steps Morning → Afternoon → next day's Morning.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HalfDayRef {
    pub date: NaiveDate,
    pub half_day: HalfDay,
}

impl HalfDayRef {
    #[must_use]
    pub const fn new(date: NaiveDate, half_day: HalfDay) -> Self {
        Self { date, half_day }
    }

    /// The next half-day in calendar order.
    ///
    /// Returns `None` only at the end of the representable date range.
    #[must_use]
    pub fn succ(self) -> Option<Self> {
        match self.half_day {
            HalfDay::Morning => Some(Self::new(self.date, HalfDay::Afternoon)),
            HalfDay::Afternoon => self
                .date
                .succ_opt()
                .map(|next| Self::new(next, HalfDay::Morning)),
        }
    }
}

impl fmt::Display for HalfDayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.half_day)
    }
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated slot identifier.
    ///
    /// Slot IDs are minted by the external slot collaborator; this engine
    /// only carries them.
    SlotId, "slot ID"
);

define_string_id!(
    /// A validated collaborator identifier.
    UserId, "user ID"
);

define_string_id!(
    /// A validated task identifier.
    TaskId, "task ID"
);

define_string_id!(
    /// A validated leave record identifier.
    LeaveId, "leave ID"
);

/// One unit of planned work: a task occupying one half-day of one
/// collaborator.
///
/// At most one slot may exist per `(user_id, date, half_day)`; that
/// invariant is enforced by the external slot collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfDaySlot {
    pub id: SlotId,
    pub task_id: TaskId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub half_day: HalfDay,
}

impl HalfDaySlot {
    /// The capacity unit this slot occupies.
    #[must_use]
    pub const fn unit(&self) -> HalfDayRef {
        HalfDayRef::new(self.date, self.half_day)
    }
}

/// A company-wide holiday. Blocks both half-days of the date for everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

/// Lifecycle status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl LeaveStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LeaveStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ValidationError::InvalidLeaveStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// A leave record for one collaborator over an inclusive date range.
///
/// Leave is modeled at whole-day granularity: a non-cancelled leave blocks
/// both half-days of every covered date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLeave {
    pub id: LeaveId,
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    pub leave_type: String,
}

impl UserLeave {
    /// Whether this leave blocks the given date.
    #[must_use]
    pub fn blocks(&self, date: NaiveDate) -> bool {
        self.status != LeaveStatus::Cancelled && self.start_date <= date && date <= self.end_date
    }
}

/// Task priority, used for drag-source ordering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

/// Task completion progress in half-day units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub completed: u32,
    pub total: u32,
}

/// A read-only projection of a task, used as a drag source.
///
/// `duration_half_days` is the number of half-day units the task requires;
/// it may be unknown, in which case a drop places a single unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_half_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<TaskProgress>,
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// Creates a span after validating that `end` is not before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of days in the span, inclusive.
    #[must_use]
    pub fn num_days(&self) -> u32 {
        u32::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates the dates of the span in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        self.start.iter_days().take(self.num_days() as usize)
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
