//! Autosave/load functionality

use shared::RoomData;

use super::RoomState;

impl RoomState {
    /// Get autosave file path
    fn autosave_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "voxelroom", "voxelroom")
            .map(|dirs| dirs.data_dir().join("autosave_room.json"))
    }

    /// Save the room to the autosave file (no-op without a room)
    pub fn autosave(&self) {
        let Some(room) = &self.room else {
            return;
        };
        if let Some(path) = Self::autosave_path() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(json) = serde_json::to_string_pretty(room) {
                let _ = std::fs::write(&path, json);
            }
        }
    }

    /// Load the room from the autosave file
    pub fn load_autosave() -> Option<RoomData> {
        let path = Self::autosave_path()?;
        let json = std::fs::read_to_string(&path).ok()?;
        serde_json::from_str(&json).ok()
    }
}
