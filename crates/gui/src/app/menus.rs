//! Application menu bar and settings window

use eframe::egui;

use crate::export;
use crate::i18n::{self, t, Lang};
use crate::remote::RemoteClient;
use crate::state::AppState;
use crate::viewport::ViewportPanel;

pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &ViewportPanel) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.new")).clicked() {
            state.room.clear_room();
            state.selection.clear();
            ui.close_menu();
        }

        if ui.button(t("menu.open")).clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.open_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                match std::fs::read_to_string(&path) {
                    Ok(json) => match export::room_from_json(&json) {
                        Ok(room) => {
                            state.room.set_room(room);
                            state.selection.clear();
                        }
                        Err(e) => tracing::error!("Failed to parse room: {e}"),
                    },
                    Err(e) => tracing::error!("Failed to read {}: {e}", path.display()),
                }
            }
            ui.close_menu();
        }

        let has_room = state.room.has_room();
        if ui
            .add_enabled(has_room, egui::Button::new(t("menu.save")))
            .clicked()
        {
            if let Some(room) = &state.room.room {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title(t("menu.save_title"))
                    .set_file_name("voxel-room.json")
                    .add_filter("JSON", &["json"])
                    .save_file()
                {
                    if let Err(e) = std::fs::write(&path, export::room_to_json(room)) {
                        tracing::error!("Failed to save room: {e}");
                    }
                }
            }
            ui.close_menu();
        }

        if ui
            .add_enabled(has_room, egui::Button::new(t("menu.export_glb")))
            .clicked()
        {
            let meshes = viewport.export_meshes();
            if !meshes.is_empty() {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title(t("menu.export_glb_title"))
                    .set_file_name("voxel-room.glb")
                    .add_filter("GLB", &["glb"])
                    .save_file()
                {
                    let glb = export::build_glb(&meshes);
                    if let Err(e) = std::fs::write(&path, glb) {
                        tracing::error!("Failed to export GLB: {e}");
                    }
                }
            }
            ui.close_menu();
        }

        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.sidebar, t("menu.sidebar"));
        ui.checkbox(&mut state.panels.properties, t("menu.properties"));
        ui.checkbox(&mut state.panels.chat, t("menu.chat"));

        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }

        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            if ui.button("Русский").clicked() {
                i18n::set_lang(Lang::Ru);
                state.settings.language = "ru".to_string();
                ui.close_menu();
            }
            if ui.button("English").clicked() {
                i18n::set_lang(Lang::En);
                state.settings.language = "en".to_string();
                ui.close_menu();
            }
        });

        ui.separator();
        if ui.button(t("menu.settings")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

pub fn account_menu(ui: &mut egui::Ui, state: &mut AppState, remote: &RemoteClient) {
    ui.menu_button(t("menu.account"), |ui| {
        if state.session.is_logged_in() {
            let email = state
                .session
                .user()
                .map(|u| u.email.clone())
                .unwrap_or_default();
            ui.weak(email);
            ui.separator();

            let has_room = state.room.has_room();
            if ui
                .add_enabled(has_room, egui::Button::new(t("menu.save_cloud")))
                .clicked()
            {
                if let Some(room) = state.room.room.clone() {
                    state.session.save_room(remote, &room);
                }
                ui.close_menu();
            }
            if ui.button(t("menu.load_cloud")).clicked() {
                state.session.load_room(remote);
                ui.close_menu();
            }

            ui.separator();
            if ui.button(t("menu.logout")).clicked() {
                state.session.logout();
                ui.close_menu();
            }
        } else if ui.button(t("menu.login")).clicked() {
            state.session.show_dialog = true;
            ui.close_menu();
        }
    });
}

pub fn settings_window(ctx: &egui::Context, state: &mut AppState, remote: &mut RemoteClient) {
    if !state.show_settings_window {
        return;
    }

    let mut open = true;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(t("settings.server"));
            let response = ui.text_edit_singleline(&mut state.settings.server_url);
            if response.lost_focus() {
                remote.set_base_url(state.settings.server_url.clone());
            }

            ui.label(t("settings.font_size"));
            ui.add(egui::Slider::new(&mut state.settings.ui.font_size, 10.0..=20.0));
        });

    if !open {
        state.show_settings_window = false;
        state.settings.save();
    }
}
