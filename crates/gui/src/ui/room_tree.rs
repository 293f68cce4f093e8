//! Room object list with visibility toggles

use egui::Ui;

use crate::helpers::hex_to_color32;
use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("scene.title"));
    ui.separator();

    let Some(room) = &state.room.room else {
        ui.weak(t("status.no_room"));
        return;
    };

    if room.objects.is_empty() {
        ui.weak(t("scene.empty"));
        return;
    }

    // Collect row data first; mutations happen after the loop to keep
    // the borrow checker happy.
    struct Row {
        id: String,
        name: String,
        color: egui::Color32,
        visible: bool,
        selected: bool,
    }
    let rows: Vec<Row> = room
        .objects
        .iter()
        .map(|obj| Row {
            id: obj.id.clone(),
            name: obj.name.clone(),
            color: hex_to_color32(&obj.color),
            visible: obj.visible,
            selected: state.selection.is_object_selected(&obj.id),
        })
        .collect();

    let mut clicked: Option<String> = None;
    let mut toggled: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_salt("room_tree_scroll")
        .show(ui, |ui| {
            for row in &rows {
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, row.color);

                    let label = ui.selectable_label(row.selected, &row.name);
                    if label.clicked() {
                        clicked = Some(row.id.clone());
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let eye = if row.visible { "👁" } else { "–" };
                        if ui.small_button(eye).clicked() {
                            toggled = Some(row.id.clone());
                        }
                    });
                });
            }
        });

    if let Some(id) = clicked {
        state.selection.select_object(id);
    }
    if let Some(id) = toggled {
        state.room.toggle_visibility(&id);
    }
}
