//! UI panels and dialogs

pub mod auth_dialog;
pub mod chat_panel;
pub mod listing_dialog;
pub mod market_panel;
pub mod properties;
pub mod room_tree;
pub mod status_bar;
pub mod toolbar;
pub mod toolbox_panel;
