use crate::models::timetable::{ResourceId, TimetableSlot};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Teacher,
    Room,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::Teacher => f.write_str("teacher"),
            ConflictKind::Room => f.write_str("room"),
        }
    }
}

/// Two slots double-booking one resource; indices point into the checked slice
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub first: usize,
    pub second: usize,
    pub resource: ResourceId,
    pub message: String,
}

/// Compare every unordered pair of slots.
///
/// A pair clashes when day, start and end all match; each shared teacher
/// or room then yields its own conflict.
pub fn check_conflicts(slots: &[TimetableSlot]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for (i, a) in slots.iter().enumerate() {
        for (j, b) in slots.iter().enumerate().skip(i + 1) {
            if !a.same_time(b) {
                continue;
            }

            if let Some(teacher) = shared(&a.teacher, &b.teacher) {
                conflicts.push(Conflict {
                    kind: ConflictKind::Teacher,
                    first: i,
                    second: j,
                    message: format!(
                        "Teacher {} is booked twice on {}",
                        teacher,
                        a.time_label()
                    ),
                    resource: teacher.clone(),
                });
            }

            if let Some(room) = shared(&a.room, &b.room) {
                conflicts.push(Conflict {
                    kind: ConflictKind::Room,
                    first: i,
                    second: j,
                    message: format!("Room {} is booked twice on {}", room, a.time_label()),
                    resource: room.clone(),
                });
            }
        }
    }

    conflicts
}

fn shared<'a>(a: &'a Option<ResourceId>, b: &Option<ResourceId>) -> Option<&'a ResourceId> {
    match (a, b) {
        (Some(a), Some(b)) if a == b && !a.is_placeholder() => Some(a),
        _ => None,
    }
}
