//! Room merging
//!
//! Rooms whose rectangles share a border are fused into one multi-rectangle
//! room, then the survivors are renumbered contiguously.
//!
//! This is a single forward pass, not a fixed point. Room `i` absorbs every
//! room it touches at the moment it is visited (including rectangles it just
//! absorbed), but a chain whose link to `i` only appears after `i` has been
//! visited can be left as two touching rooms.

use tracing::debug;

use super::room::Room;

/// Per-room state during the merge pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeStatus {
    Active,
    /// Rectangles were moved into the given room
    MergedInto(usize),
}

/// Result of [`merge_touching_rooms`]
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Surviving rooms, in their original relative order
    pub rooms: Vec<Room>,
    /// Old room index to new room index; merged rooms map to their absorber
    pub remap: Vec<usize>,
}

impl MergeOutcome {
    /// Number of rooms that disappeared into another
    pub fn merged_count(&self) -> usize {
        self.remap.len() - self.rooms.len()
    }
}

/// Fuse rooms that touch along an edge
pub fn merge_touching_rooms(mut rooms: Vec<Room>) -> MergeOutcome {
    let n = rooms.len();
    let mut status = vec![MergeStatus::Active; n];

    for i in 0..n {
        if status[i] != MergeStatus::Active {
            continue;
        }
        for j in 0..n {
            if i == j || status[j] != MergeStatus::Active {
                continue;
            }
            if rooms[i].touches(&rooms[j]) {
                let absorbed = std::mem::take(&mut rooms[j].rects);
                rooms[i].rects.extend(absorbed);
                status[j] = MergeStatus::MergedInto(i);
                debug!(room = j, into = i, "merged touching rooms");
            }
        }
    }

    compact(rooms, &status)
}

/// Follow merge links to the room that finally holds `i`'s rectangles
fn resolve(status: &[MergeStatus], mut i: usize) -> usize {
    while let MergeStatus::MergedInto(next) = status[i] {
        i = next;
    }
    i
}

fn compact(rooms: Vec<Room>, status: &[MergeStatus]) -> MergeOutcome {
    let mut new_index = vec![usize::MAX; rooms.len()];
    let mut survivors = Vec::with_capacity(rooms.len());

    for (i, room) in rooms.into_iter().enumerate() {
        if status[i] == MergeStatus::Active {
            new_index[i] = survivors.len();
            survivors.push(room);
        }
    }

    let remap = (0..status.len())
        .map(|i| new_index[resolve(status, i)])
        .collect();

    MergeOutcome {
        rooms: survivors,
        remap,
    }
}
