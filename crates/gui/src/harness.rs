//! Headless harness for programmatic room manipulation.
//!
//! Drives the editing core (room, selection, toolbox, keyboard steps)
//! without a window, for integration tests and scripted checks.

use shared::patch::RoomPatch;
use shared::{RoomData, VoxelObject};

use crate::export;
use crate::state::room::{PatchSummary, RoomState, MOVE_STEP, PART_MOVE_STEP};
use crate::state::selection::SelectionState;
use crate::state::toolbox::ToolboxState;

/// Horizontal/vertical step direction of a keyboard press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKey {
    /// ArrowUp: away from the camera (−Z)
    Up,
    /// ArrowDown: toward the camera (+Z)
    Down,
    /// ArrowLeft: −X
    Left,
    /// ArrowRight: +X
    Right,
    /// Q: raise (+Y)
    Raise,
    /// E: lower (−Y)
    Lower,
}

impl StepKey {
    fn direction(self) -> [f64; 3] {
        match self {
            StepKey::Up => [0.0, 0.0, -1.0],
            StepKey::Down => [0.0, 0.0, 1.0],
            StepKey::Left => [-1.0, 0.0, 0.0],
            StepKey::Right => [1.0, 0.0, 0.0],
            StepKey::Raise => [0.0, 1.0, 0.0],
            StepKey::Lower => [0.0, -1.0, 0.0],
        }
    }
}

/// Headless harness — room, selection, and toolbox without a UI
pub struct RoomHarness {
    pub room: RoomState,
    pub selection: SelectionState,
    pub toolbox: ToolboxState,
    pub room_size_feet: f64,
}

impl RoomHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self {
            room: RoomState::default(),
            selection: SelectionState::default(),
            toolbox: ToolboxState::default(),
            room_size_feet: shared::DEFAULT_ROOM_SIZE,
        }
    }

    // ── Room manipulation ─────────────────────────────────────

    /// Load a room (replaces current, clears selection)
    pub fn load_room(&mut self, room: RoomData) {
        self.room.set_room(room);
        self.selection.clear();
    }

    /// Load a room from JSON string
    pub fn load_room_json(&mut self, json: &str) -> Result<(), String> {
        let room = export::room_from_json(json)?;
        self.load_room(room);
        Ok(())
    }

    /// Export the current room as JSON (empty string without a room)
    pub fn export_room_json(&self) -> String {
        self.room
            .room
            .as_ref()
            .map(export::room_to_json)
            .unwrap_or_default()
    }

    /// Add an object as-is
    pub fn add_object(&mut self, object: VoxelObject) {
        self.room.add_object(object, self.room_size_feet);
    }

    /// Place a template copy at the spawn position and select it
    pub fn place(&mut self, template: &VoxelObject) -> String {
        let id = self.room.place_object(template, self.room_size_feet);
        self.selection.select_object(id.clone());
        id
    }

    /// Delete an object
    pub fn delete(&mut self, id: &str) -> bool {
        let removed = self.room.remove_object(id);
        self.selection.prune(|sel| sel != id);
        removed
    }

    pub fn toggle_visibility(&mut self, id: &str) {
        self.room.toggle_visibility(id);
    }

    pub fn clear_room(&mut self) {
        self.room.clear_room();
        self.selection.clear();
    }

    /// Apply a decorate patch
    pub fn apply_patch(&mut self, patch: RoomPatch) -> PatchSummary {
        self.room.apply_patch(patch)
    }

    // ── Selection ─────────────────────────────────────────────

    pub fn select(&mut self, id: &str) {
        self.selection.select_object(id.to_string());
    }

    pub fn select_part(&mut self, id: &str, part_index: usize) {
        self.selection.select_part(id, part_index);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Keyboard steps ────────────────────────────────────────

    /// One keyboard step: moves the selected part if one is active,
    /// otherwise the selected object. No-op without a selection.
    pub fn step(&mut self, key: StepKey) {
        let Some(id) = self.selection.object().cloned() else {
            return;
        };
        let dir = key.direction();

        if let Some(part_index) = self.selection.part() {
            let delta = [
                dir[0] * PART_MOVE_STEP,
                dir[1] * PART_MOVE_STEP,
                dir[2] * PART_MOVE_STEP,
            ];
            self.room.move_part(&id, part_index, delta);
        } else {
            let delta = [dir[0] * MOVE_STEP, dir[1] * MOVE_STEP, dir[2] * MOVE_STEP];
            self.room.move_object(&id, delta);
        }
    }

    /// N identical steps
    pub fn step_n(&mut self, key: StepKey, n: usize) {
        for _ in 0..n {
            self.step(key);
        }
    }

    /// Rotate the selected object by the fixed increment
    pub fn rotate(&mut self) {
        if let Some(id) = self.selection.object().cloned() {
            self.room.rotate_object(&id);
        }
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn object_count(&self) -> usize {
        self.room.object_ids().len()
    }

    pub fn position_of(&self, id: &str) -> Option<[f64; 3]> {
        self.room.object(id).map(|o| o.position)
    }

    pub fn rotation_of(&self, id: &str) -> Option<f64> {
        self.room.object(id).map(|o| o.rotation)
    }

    pub fn part_offset_of(&self, id: &str, part_index: usize) -> Option<[f64; 3]> {
        self.room
            .object(id)
            .and_then(|o| o.parts.get(part_index))
            .map(|p| p.offset)
    }

    pub fn is_visible(&self, id: &str) -> Option<bool> {
        self.room.object(id).map(|o| o.visible)
    }
}

impl Default for RoomHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_new_harness_empty() {
        let h = RoomHarness::new();
        assert_eq!(h.object_count(), 0);
        assert!(h.export_room_json().is_empty());
    }

    #[test]
    fn test_place_selects() {
        let mut h = RoomHarness::new();
        let id = h.place(&fixtures::chair("tb-1"));
        assert_eq!(h.object_count(), 1);
        assert!(h.selection.is_object_selected(&id));
    }

    #[test]
    fn test_step_moves_object() {
        let mut h = RoomHarness::new();
        let id = h.place(&fixtures::chair("tb-1"));
        let start = h.position_of(&id).unwrap();

        h.step(StepKey::Right);
        h.step(StepKey::Up);
        let pos = h.position_of(&id).unwrap();
        assert_eq!(pos[0], start[0] + MOVE_STEP);
        assert_eq!(pos[2], start[2] - MOVE_STEP);
    }

    #[test]
    fn test_step_without_selection_is_noop() {
        let mut h = RoomHarness::new();
        h.add_object(fixtures::chair("a"));
        let before = h.position_of("a").unwrap();
        h.step(StepKey::Left);
        assert_eq!(h.position_of("a").unwrap(), before);
    }

    #[test]
    fn test_part_step_targets_part() {
        let mut h = RoomHarness::new();
        h.add_object(fixtures::chair("a"));
        h.select("a");
        h.select_part("a", 1);

        let obj_pos = h.position_of("a").unwrap();
        let part_before = h.part_offset_of("a", 1).unwrap();

        h.step(StepKey::Raise);

        assert_eq!(h.position_of("a").unwrap(), obj_pos);
        let part_after = h.part_offset_of("a", 1).unwrap();
        assert!((part_after[1] - (part_before[1] + PART_MOVE_STEP)).abs() < 1e-12);
    }

    #[test]
    fn test_delete_prunes_selection() {
        let mut h = RoomHarness::new();
        let id = h.place(&fixtures::chair("tb-1"));
        assert!(h.delete(&id));
        assert!(h.selection.object().is_none());
        assert_eq!(h.object_count(), 0);
    }
}
