//! Stable member color assignment.
//!
//! Color indices are an arena keyed by member ID: built when the roster
//! loads and only ever extended. Filtering or reordering the roster never
//! reassigns an index, so a collaborator keeps their color across
//! re-renders.

use std::collections::HashMap;

use crate::types::UserId;

/// Number of distinct colors in the fixed palette. Indices wrap when the
/// roster outgrows it.
pub const PALETTE_SIZE: usize = 10;

/// Extend-only `member → color index` arena.
#[derive(Debug, Clone, Default)]
pub struct MemberPalette {
    assignments: HashMap<UserId, usize>,
    next: usize,
}

impl MemberPalette {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the arena from the roster in load order.
    #[must_use]
    pub fn from_roster<'a>(members: impl IntoIterator<Item = &'a UserId>) -> Self {
        let mut palette = Self::new();
        for member in members {
            palette.assign(member);
        }
        palette
    }

    /// Returns the member's color index, assigning the next free one on
    /// first sight. Existing assignments are never changed.
    pub fn assign(&mut self, member: &UserId) -> usize {
        if let Some(&index) = self.assignments.get(member) {
            return index;
        }
        let index = self.next;
        self.assignments.insert(member.clone(), index);
        self.next += 1;
        index
    }

    /// Looks up an already-assigned index.
    #[must_use]
    pub fn color_index(&self, member: &UserId) -> Option<usize> {
        self.assignments.get(member).copied()
    }

    /// The index folded into the fixed palette.
    #[must_use]
    pub fn color_slot(&self, member: &UserId) -> Option<usize> {
        self.color_index(member).map(|i| i % PALETTE_SIZE)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
