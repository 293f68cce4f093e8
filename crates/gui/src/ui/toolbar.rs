//! Toolbar: photo capture controls and room actions

use egui::Ui;

use crate::i18n::t;
use crate::remote::RemoteClient;
use crate::state::capture::CaptureMode;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState, remote: &RemoteClient) {
    ui.horizontal(|ui| {
        // ── Capture mode ──────────────────────────────────────
        ui.label(t("capture.title"));
        ui.selectable_value(&mut state.capture.mode, CaptureMode::Room, t("capture.mode_room"));
        ui.selectable_value(
            &mut state.capture.mode,
            CaptureMode::Object,
            t("capture.mode_object"),
        );

        ui.separator();

        // ── Photo pick + voxelize ─────────────────────────────
        if ui.button(t("capture.pick_photo")).clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("capture.pick_title"))
                .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
                .pick_file()
            {
                state.capture.load_image(&path);
            }
        }
        if !state.capture.image_name.is_empty() {
            ui.weak(&state.capture.image_name);
        }

        let can_process = state.capture.image.is_some() && !state.capture.is_processing;
        let process_label = match state.capture.mode {
            CaptureMode::Room => t("capture.voxelize_room"),
            CaptureMode::Object => t("capture.voxelize_object"),
        };
        if ui.add_enabled(can_process, egui::Button::new(process_label)).clicked() {
            state.capture.process(remote, state.settings.room_size_feet);
        }

        if state.capture.is_processing {
            ui.spinner();
            ui.weak(t("capture.processing"));
        }

        ui.separator();

        // ── Room size slider ──────────────────────────────────
        ui.label(t("capture.room_size"));
        ui.add(
            egui::Slider::new(&mut state.settings.room_size_feet, 6.0..=30.0)
                .fixed_decimals(0),
        );

        if state.room.has_room() && ui.button(t("capture.clear_room")).clicked() {
            state.room.clear_room();
            state.selection.clear();
        }

        // ── Error readout ─────────────────────────────────────
        if let Some(error) = state.capture.error.clone() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .colored_label(egui::Color32::from_rgb(255, 130, 130), error)
                    .clicked()
                {
                    state.capture.error = None;
                }
            });
        }
    });
}
