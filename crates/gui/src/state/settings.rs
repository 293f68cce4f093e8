//! Application settings

use serde::{Deserialize, Serialize};

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Selection tint RGB
    pub selection_color: [u8; 3],
    /// Enable anti-aliasing
    pub antialiasing: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            // the sky blue behind the room
            background_color: [165, 201, 243],
            selection_color: [255, 255, 255],
            antialiasing: true,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

fn default_room_size() -> f64 {
    shared::DEFAULT_ROOM_SIZE
}

fn default_server_url() -> String {
    "http://localhost:5001".to_string()
}

/// All application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Side of the square room generated from photos (feet)
    #[serde(default = "default_room_size")]
    pub room_size_feet: f64,
    /// Backend base URL
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportSettings,
    /// UI settings
    #[serde(default)]
    pub ui: UiSettings,
    /// UI language code ("ru" / "en")
    #[serde(default)]
    pub language: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            room_size_feet: default_room_size(),
            server_url: default_server_url(),
            viewport: ViewportSettings::default(),
            ui: UiSettings::default(),
            language: String::new(),
        }
    }
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "voxelroom", "voxelroom") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    return settings;
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "voxelroom", "voxelroom") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    let _ = std::fs::write(config_path, json);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = AppSettings::default();
        assert_eq!(s.room_size_feet, 12.0);
        assert_eq!(s.server_url, "http://localhost:5001");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: AppSettings = serde_json::from_str(r#"{"room_size_feet": 20.0}"#).unwrap();
        assert_eq!(s.room_size_feet, 20.0);
        assert_eq!(s.server_url, "http://localhost:5001");
        assert_eq!(s.ui.font_size, 14.0);
    }
}
