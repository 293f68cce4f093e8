//! Toolbox panel: saved assets, placeable into the room

use egui::Ui;

use crate::helpers::hex_to_color32;
use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(t("toolbox.title"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("{}", state.toolbox.items.len()));
        });
    });
    ui.separator();

    if state.toolbox.items.is_empty() {
        ui.weak(t("toolbox.empty"));
        return;
    }

    let mut place: Option<shared::VoxelObject> = None;
    let mut remove: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_salt("toolbox_scroll")
        .show(ui, |ui| {
            for item in &state.toolbox.items {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(22.0, 22.0), egui::Sense::hover());
                        ui.painter().rect_filled(rect, 4.0, hex_to_color32(&item.color));

                        ui.vertical(|ui| {
                            ui.strong(&item.name);
                            ui.weak(&item.kind);
                        });

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("✕").clicked() {
                                remove = Some(item.id.clone());
                            }
                            if ui.button(t("toolbox.place")).clicked() {
                                place = Some(item.clone());
                            }
                        });
                    });
                });
            }
        });

    if let Some(template) = place {
        state.place_into_room(&template);
    }
    if let Some(id) = remove {
        state.toolbox.remove(&id);
    }
}
