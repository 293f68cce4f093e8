//! Room state management
//!
//! Owns the current `RoomData` (if any) and a version counter used to
//! invalidate viewport mesh caches. There is deliberately no undo
//! history: keyboard moves mutate in place and stay where they land.

mod object_ops;
mod patch_ops;
mod persistence;
mod transform_ops;

pub use patch_ops::PatchSummary;
pub use transform_ops::{MOVE_STEP, PART_MOVE_STEP, ROTATE_STEP};

use shared::{ObjectId, RoomData, VoxelObject};

/// Room state with a mutation version counter
#[derive(Default)]
pub struct RoomState {
    /// Current room; None until a photo is voxelized, a save is loaded,
    /// or the first toolbox object is placed
    pub room: Option<RoomData>,
    pub(crate) version: u64,
}

impl RoomState {
    /// Current room version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn has_room(&self) -> bool {
        self.room.is_some()
    }

    pub fn object(&self, id: &str) -> Option<&VoxelObject> {
        self.room.as_ref()?.object(id)
    }

    pub fn object_mut(&mut self, id: &str) -> Option<&mut VoxelObject> {
        self.room.as_mut()?.object_mut(id)
    }

    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.room
            .as_ref()
            .map(|r| r.objects.iter().map(|o| o.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Replace the whole room
    pub fn set_room(&mut self, room: RoomData) {
        self.room = Some(room);
        self.version += 1;
    }

    /// Discard the room entirely
    pub fn clear_room(&mut self) {
        if self.room.is_some() {
            self.room = None;
            self.version += 1;
        }
    }
}
