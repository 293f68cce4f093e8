//! Keyboard transform operations
//!
//! Fixed-step moves with no bounds clamping: an object can be pushed
//! arbitrarily far outside the room and that is accepted behavior.

use std::f64::consts::FRAC_PI_2;

use super::RoomState;
use crate::helpers::normalize_rotation;

/// Arrow/Q/E step for whole objects (feet)
pub const MOVE_STEP: f64 = 0.5;
/// Arrow/Q/E step for part offsets (feet)
pub const PART_MOVE_STEP: f64 = 0.1;
/// R step: a quarter turn, so four presses return to the start
pub const ROTATE_STEP: f64 = FRAC_PI_2;

impl RoomState {
    /// Translate an object by a delta on the room axes
    pub fn move_object(&mut self, id: &str, delta: [f64; 3]) {
        if let Some(obj) = self.object_mut(id) {
            obj.position[0] += delta[0];
            obj.position[1] += delta[1];
            obj.position[2] += delta[2];
            self.version += 1;
        }
    }

    /// Rotate an object by the fixed increment, modulo a full turn
    pub fn rotate_object(&mut self, id: &str) {
        if let Some(obj) = self.object_mut(id) {
            obj.rotation = normalize_rotation(obj.rotation + ROTATE_STEP);
            self.version += 1;
        }
    }

    /// Translate one part's offset, leaving the object position untouched
    pub fn move_part(&mut self, id: &str, part_index: usize, delta: [f64; 3]) {
        if let Some(obj) = self.object_mut(id) {
            if let Some(part) = obj.parts.get_mut(part_index) {
                part.offset[0] += delta[0];
                part.offset[1] += delta[1];
                part.offset[2] += delta[2];
                self.version += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn state_with_chair() -> RoomState {
        let mut state = RoomState::default();
        state.add_object(fixtures::chair_at("a", [6.0, 0.5, 6.0]), 12.0);
        state
    }

    #[test]
    fn test_move_object() {
        let mut state = state_with_chair();
        state.move_object("a", [MOVE_STEP, 0.0, 0.0]);
        state.move_object("a", [0.0, 0.0, -MOVE_STEP]);
        assert_eq!(state.object("a").unwrap().position, [6.5, 0.5, 5.5]);
    }

    #[test]
    fn test_move_object_back_and_forth_restores_exactly() {
        let mut state = state_with_chair();
        let original = state.object("a").unwrap().position;

        for _ in 0..7 {
            state.move_object("a", [MOVE_STEP, 0.0, 0.0]);
        }
        for _ in 0..7 {
            state.move_object("a", [-MOVE_STEP, 0.0, 0.0]);
        }
        assert_eq!(state.object("a").unwrap().position, original);
    }

    #[test]
    fn test_move_ignores_unknown_object() {
        let mut state = state_with_chair();
        let v = state.version();
        state.move_object("ghost", [1.0, 0.0, 0.0]);
        assert_eq!(state.version(), v);
    }

    #[test]
    fn test_no_bounds_clamping() {
        let mut state = state_with_chair();
        for _ in 0..100 {
            state.move_object("a", [MOVE_STEP, 0.0, 0.0]);
        }
        // far outside the 12ft room and that is fine
        assert!(state.object("a").unwrap().position[0] > 50.0);
    }

    #[test]
    fn test_rotate_four_times_returns_to_start() {
        let mut state = state_with_chair();
        let original = state.object("a").unwrap().rotation;
        for _ in 0..4 {
            state.rotate_object("a");
        }
        let rotation = state.object("a").unwrap().rotation;
        assert!((rotation - original).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_stays_in_range() {
        let mut state = state_with_chair();
        for _ in 0..11 {
            state.rotate_object("a");
            let r = state.object("a").unwrap().rotation;
            assert!((0.0..std::f64::consts::TAU).contains(&r));
        }
    }

    #[test]
    fn test_move_part_leaves_object_position() {
        let mut state = state_with_chair();
        let position = state.object("a").unwrap().position;
        let offset = state.object("a").unwrap().parts[0].offset;

        state.move_part("a", 0, [0.0, PART_MOVE_STEP, 0.0]);

        let obj = state.object("a").unwrap();
        assert_eq!(obj.position, position);
        assert!((obj.parts[0].offset[1] - (offset[1] + PART_MOVE_STEP)).abs() < 1e-12);
    }

    #[test]
    fn test_move_part_out_of_range_is_noop() {
        let mut state = state_with_chair();
        let v = state.version();
        state.move_part("a", 99, [1.0, 0.0, 0.0]);
        assert_eq!(state.version(), v);
    }
}
