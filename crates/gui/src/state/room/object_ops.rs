//! Object CRUD operations on the room

use shared::{ObjectId, RoomData, VoxelObject};

use super::RoomState;
use crate::helpers;

impl RoomState {
    /// Room to place into, creating an empty one of the given size when
    /// nothing has been voxelized yet (placing from the toolbox works
    /// without a photographed room).
    pub fn ensure_room(&mut self, size_feet: f64) -> &mut RoomData {
        if self.room.is_none() {
            self.version += 1;
        }
        self.room.get_or_insert_with(|| RoomData::empty(size_feet))
    }

    /// Place a copy of a toolbox/marketplace object into the room at the
    /// spawn position and return its new id.
    pub fn place_object(&mut self, template: &VoxelObject, size_feet: f64) -> ObjectId {
        let room = self.ensure_room(size_feet);
        let id = helpers::placed_id();
        let spawn = room.spawn_position();

        let mut obj = template.clone();
        obj.id = id.clone();
        obj.position = spawn;
        obj.visible = true;
        room.objects.push(obj);

        self.version += 1;
        id
    }

    /// Add an already-finalized object as-is (room analysis results)
    pub fn add_object(&mut self, object: VoxelObject, size_feet: f64) {
        let room = self.ensure_room(size_feet);
        room.objects.push(object);
        self.version += 1;
    }

    /// Remove an object by id; returns whether anything was removed
    pub fn remove_object(&mut self, id: &str) -> bool {
        let Some(room) = self.room.as_mut() else {
            return false;
        };
        let before = room.objects.len();
        room.objects.retain(|o| o.id != id);
        let removed = room.objects.len() != before;
        if removed {
            self.version += 1;
        }
        removed
    }

    /// Flip an object's visibility flag
    pub fn toggle_visibility(&mut self, id: &str) {
        if let Some(obj) = self.object_mut(id) {
            obj.visible = !obj.visible;
            self.version += 1;
        }
    }

    /// Replace an object wholesale (refinement results), keeping its slot
    pub fn replace_object(&mut self, object: VoxelObject) -> bool {
        let Some(room) = self.room.as_mut() else {
            return false;
        };
        if let Some(slot) = room.objects.iter_mut().find(|o| o.id == object.id) {
            *slot = object;
            self.version += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_ensure_room_creates_once() {
        let mut state = RoomState::default();
        assert!(!state.has_room());
        state.ensure_room(10.0);
        assert!(state.has_room());
        let v = state.version();
        state.ensure_room(99.0);
        // second call keeps the existing room and version
        assert_eq!(state.version(), v);
        assert_eq!(state.room.as_ref().unwrap().width(), 10.0);
    }

    #[test]
    fn test_place_object_assigns_placed_id_and_spawn() {
        let mut state = RoomState::default();
        let template = fixtures::chair("tb-1");
        let id = state.place_object(&template, 12.0);

        assert!(id.starts_with("placed-"));
        let obj = state.object(&id).unwrap();
        assert_eq!(obj.position, [6.0, 0.5, 6.0]);
        assert!(obj.visible);
        // template itself untouched
        assert_eq!(template.id, "tb-1");
    }

    #[test]
    fn test_remove_object() {
        let mut state = RoomState::default();
        state.add_object(fixtures::chair("a"), 12.0);
        state.add_object(fixtures::chair("b"), 12.0);

        assert!(state.remove_object("a"));
        assert!(!state.remove_object("a"));
        assert_eq!(state.object_ids(), vec!["b".to_string()]);
    }

    #[test]
    fn test_toggle_visibility_twice_restores() {
        let mut state = RoomState::default();
        state.add_object(fixtures::chair("a"), 12.0);
        assert!(state.object("a").unwrap().visible);

        state.toggle_visibility("a");
        assert!(!state.object("a").unwrap().visible);
        state.toggle_visibility("a");
        assert!(state.object("a").unwrap().visible);
    }

    #[test]
    fn test_replace_object_keeps_slot() {
        let mut state = RoomState::default();
        state.add_object(fixtures::chair("a"), 12.0);
        state.add_object(fixtures::chair("b"), 12.0);

        let mut refined = fixtures::chair("a");
        refined.name = "Refined Chair".to_string();
        assert!(state.replace_object(refined));

        let ids = state.object_ids();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(state.object("a").unwrap().name, "Refined Chair");

        assert!(!state.replace_object(fixtures::chair("ghost")));
    }

    #[test]
    fn test_clear_room_discards_objects() {
        let mut state = RoomState::default();
        state.add_object(fixtures::chair("a"), 12.0);
        state.clear_room();
        assert!(!state.has_room());
        assert!(state.object_ids().is_empty());
    }
}
