use crate::containment::RoomCandidate;
use crate::plan::Room;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

/// Appearance decided for one computed room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomAssignment {
    pub room_id: Uuid,
    pub mesh: Uuid,
    pub texture: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub matched: usize,
    pub created: usize,
    pub removed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// One entry per computed room, in the same order.
    pub assignments: Vec<RoomAssignment>,
    pub report: ReconcileReport,
}

/// Carry persisted room appearance over to a freshly computed room list.
///
/// A persisted room matches a computed room when their centres are exactly
/// equal; each persisted room is claimed at most once, first in list order.
/// Matched rooms keep their id and texture and get a new mesh handle.
/// Computed rooms without a match become new rooms with `default_texture`.
/// Persisted rooms left unclaimed are removed, so afterwards the persisted
/// centres are exactly the computed ones.
pub fn reconcile_rooms(
    rooms: &mut Vec<Room>,
    computed: &[RoomCandidate],
    default_texture: &str,
) -> Reconciliation {
    let mut claimed = vec![false; rooms.len()];
    let mut created = Vec::new();
    let mut assignments = Vec::with_capacity(computed.len());
    let mut report = ReconcileReport::default();

    for candidate in computed {
        let mesh = Uuid::new_v4();
        let existing = rooms
            .iter()
            .enumerate()
            .position(|(i, room)| !claimed[i] && room.center == candidate.center);

        match existing {
            Some(i) => {
                claimed[i] = true;
                let room = &mut rooms[i];
                room.mesh = Some(mesh);
                report.matched += 1;
                assignments.push(RoomAssignment {
                    room_id: room.id,
                    mesh,
                    texture: room.texture.clone(),
                });
            }
            None => {
                let room = Room {
                    id: Uuid::new_v4(),
                    center: candidate.center,
                    mesh: Some(mesh),
                    texture: default_texture.to_string(),
                };
                debug!(
                    "New room {} at ({}, {})",
                    room.id, candidate.center.x, candidate.center.y
                );
                report.created += 1;
                assignments.push(RoomAssignment {
                    room_id: room.id,
                    mesh,
                    texture: room.texture.clone(),
                });
                created.push(room);
            }
        }
    }

    let before = rooms.len();
    let mut keep = claimed.into_iter();
    rooms.retain(|_| keep.next().unwrap_or(false));
    report.removed = before - rooms.len();
    rooms.extend(created);

    info!(
        "Reconciled rooms: {} matched, {} created, {} removed",
        report.matched, report.created, report.removed
    );

    Reconciliation {
        assignments,
        report,
    }
}
