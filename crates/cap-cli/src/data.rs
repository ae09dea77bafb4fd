//! Planning snapshot loading.
//!
//! The snapshot is a JSON export of the external planning system: roster,
//! placed slots, holidays, leave records and the open task backlog. The
//! engine treats it as read-only input.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cap_core::{
    AvailabilityCalendar, HalfDayRef, HalfDaySlot, Holiday, MemberProfile, TaskRef, UserId,
    UserLeave,
};

/// A planning snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub members: Vec<MemberProfile>,
    #[serde(default)]
    pub slots: Vec<HalfDaySlot>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub leaves: Vec<UserLeave>,
    #[serde(default)]
    pub tasks: Vec<TaskRef>,
}

impl Snapshot {
    /// Loads a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
        let snapshot: Self = serde_json::from_str(&raw)
            .with_context(|| format!("invalid snapshot JSON in {}", path.display()))?;
        tracing::debug!(
            members = snapshot.members.len(),
            slots = snapshot.slots.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// The availability calendar carried by this snapshot.
    #[must_use]
    pub fn calendar(&self) -> AvailabilityCalendar {
        AvailabilityCalendar::new(&self.holidays, &self.leaves)
    }

    /// Occupied capacity units per collaborator, for the occupancy override.
    #[must_use]
    pub fn occupied_units(&self) -> HashMap<UserId, HashSet<HalfDayRef>> {
        let mut occupied: HashMap<UserId, HashSet<HalfDayRef>> = HashMap::new();
        for slot in &self.slots {
            occupied
                .entry(slot.user_id.clone())
                .or_default()
                .insert(slot.unit());
        }
        occupied
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SNAPSHOT_JSON: &str = r#"{
        "members": [{"id": "u1", "name": "Ada"}],
        "slots": [
            {"id": "s1", "task_id": "t1", "user_id": "u1",
             "date": "2025-03-10", "half_day": "morning"}
        ],
        "holidays": [{"date": "2025-03-14", "name": "Founders Day"}],
        "leaves": [],
        "tasks": [{"id": "t1", "title": "Design review", "duration_half_days": 4}]
    }"#;

    #[test]
    fn loads_a_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SNAPSHOT_JSON.as_bytes()).unwrap();

        let snapshot = Snapshot::load(&path).unwrap();
        assert_eq!(snapshot.members.len(), 1);
        assert_eq!(snapshot.slots.len(), 1);
        assert_eq!(snapshot.tasks[0].duration_half_days, Some(4));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"members": []}"#).unwrap();
        assert!(snapshot.slots.is_empty());
        assert!(snapshot.tasks.is_empty());
    }

    #[test]
    fn occupied_units_groups_by_collaborator() {
        let snapshot: Snapshot = serde_json::from_str(SNAPSHOT_JSON).unwrap();
        let occupied = snapshot.occupied_units();
        let units = occupied.get(&UserId::new("u1").unwrap()).unwrap();
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn load_reports_the_offending_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = Snapshot::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
