//! Toolbox: the personal collection of generated objects

use shared::{ObjectId, VoxelObject};

use crate::helpers;

#[derive(Default)]
pub struct ToolboxState {
    pub items: Vec<VoxelObject>,
}

impl ToolboxState {
    /// Append a finalized object (photo capture result)
    pub fn add(&mut self, object: VoxelObject) {
        self.items.push(object);
    }

    /// Copy a room object into the toolbox under a fresh `tb-` id
    pub fn save_asset(&mut self, object: &VoxelObject) -> ObjectId {
        let id = helpers::saved_asset_id();
        let mut copy = object.clone();
        copy.id = id.clone();
        self.items.push(copy);
        id
    }

    pub fn item(&self, id: &str) -> Option<&VoxelObject> {
        self.items.iter().find(|o| o.id == id)
    }

    /// Replace an entry wholesale (refinement results)
    pub fn replace(&mut self, object: VoxelObject) -> bool {
        if let Some(slot) = self.items.iter_mut().find(|o| o.id == object.id) {
            *slot = object;
            true
        } else {
            false
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|o| o.id != id);
        self.items.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_save_asset_copies_with_tb_id() {
        let mut toolbox = ToolboxState::default();
        let room_obj = fixtures::chair("placed-1");
        let id = toolbox.save_asset(&room_obj);

        assert!(id.starts_with("tb-"));
        assert_eq!(toolbox.items.len(), 1);
        assert_eq!(toolbox.item(&id).unwrap().name, room_obj.name);
        // the original keeps its id
        assert_eq!(room_obj.id, "placed-1");
    }

    #[test]
    fn test_replace_and_remove() {
        let mut toolbox = ToolboxState::default();
        toolbox.add(fixtures::chair("toolbox-1"));

        let mut refined = fixtures::chair("toolbox-1");
        refined.description = "refined".to_string();
        assert!(toolbox.replace(refined));
        assert_eq!(toolbox.item("toolbox-1").unwrap().description, "refined");

        assert!(!toolbox.replace(fixtures::chair("ghost")));
        assert!(toolbox.remove("toolbox-1"));
        assert!(!toolbox.remove("toolbox-1"));
    }
}
