mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::export`,
// etc. resolve to the lib crate types everywhere in the binary.
pub use voxelroom_gui_lib::export;
pub use voxelroom_gui_lib::helpers;
pub use voxelroom_gui_lib::remote;
pub use voxelroom_gui_lib::state;

use app::RoomApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxelroom_gui=info".into()),
        )
        .init();

    // Parse --room <path> argument
    let initial_room = parse_room_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("VoxelRoom — Room Architect")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "voxelroom-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(RoomApp::new(cc, initial_room)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_room_arg() -> Option<shared::RoomData> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--room" && i + 1 < args.len() {
            let path = &args[i + 1];
            match std::fs::read_to_string(path) {
                Ok(json) => match export::room_from_json(&json) {
                    Ok(room) => {
                        tracing::info!("Loaded room from {path} ({} objects)", room.objects.len());
                        return Some(room);
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse room JSON from {path}: {e}");
                    }
                },
                Err(e) => {
                    tracing::error!("Failed to read room file {path}: {e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}
