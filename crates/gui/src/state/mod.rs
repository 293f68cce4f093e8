pub mod capture;
pub mod chat;
pub mod marketplace;
pub mod room;
pub mod selection;
pub mod session;
pub mod settings;
pub mod toolbox;

use capture::CaptureState;
use chat::ChatState;
use marketplace::MarketplaceState;
pub use room::RoomState;
use selection::SelectionState;
use session::SessionState;
pub use settings::AppSettings;
use toolbox::ToolboxState;

/// Which collection the left sidebar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftTab {
    Scene,
    Toolbox,
    Shop,
}

/// Panel visibility flags
pub struct PanelVisibility {
    pub sidebar: bool,
    pub properties: bool,
    pub chat: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            sidebar: true,
            properties: true,
            chat: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub room: RoomState,
    pub selection: SelectionState,
    pub toolbox: ToolboxState,
    pub chat: ChatState,
    pub capture: CaptureState,
    pub marketplace: MarketplaceState,
    pub session: SessionState,
    pub panels: PanelVisibility,
    pub left_tab: LeftTab,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            room: RoomState::default(),
            selection: SelectionState::default(),
            toolbox: ToolboxState::default(),
            chat: ChatState::default(),
            capture: CaptureState::default(),
            marketplace: MarketplaceState::default(),
            session: SessionState::default(),
            panels: PanelVisibility::default(),
            left_tab: LeftTab::Scene,
            settings: AppSettings::load(),
            show_settings_window: false,
        }
    }
}

impl AppState {
    /// Place a template object into the room, select it, and switch to
    /// the scene tab (toolbox and marketplace "add to room")
    pub fn place_into_room(&mut self, template: &shared::VoxelObject) -> shared::ObjectId {
        let id = self
            .room
            .place_object(template, self.settings.room_size_feet);
        self.selection.select_object(id.clone());
        self.left_tab = LeftTab::Scene;
        id
    }

    /// Delete the selected object, if any
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selection.object().cloned() {
            self.room.remove_object(&id);
            self.selection.clear();
        }
    }
}
