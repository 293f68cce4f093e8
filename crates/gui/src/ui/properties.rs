//! Properties panel for the selected object and its parts

use egui::Ui;

use crate::helpers::hex_to_color32;
use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("props.title"));
    ui.separator();

    let Some(obj) = state
        .selection
        .object()
        .and_then(|id| state.room.object(id))
        .cloned()
    else {
        ui.weak(t("props.none"));
        return;
    };

    // ── Header: swatch + name + close ─────────────────────────
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 4.0, hex_to_color32(&obj.color));
        ui.vertical(|ui| {
            ui.strong(&obj.name);
            ui.weak(&obj.kind);
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("✕").clicked() {
                state.selection.clear();
            }
        });
    });

    if !obj.description.is_empty() {
        ui.weak(format!("\"{}\"", obj.description));
    }

    // ── Keyboard hints ────────────────────────────────────────
    ui.add_space(4.0);
    ui.small(t("props.keys_move"));
    ui.small(t("props.keys_vertical"));
    ui.small(t("props.keys_rotate"));

    // ── Parts ─────────────────────────────────────────────────
    ui.add_space(4.0);
    ui.label(t("props.parts"));

    let mut toggled_part: Option<usize> = None;
    egui::ScrollArea::vertical()
        .id_salt("parts_scroll")
        .max_height(140.0)
        .show(ui, |ui| {
            for (idx, part) in obj.parts.iter().enumerate() {
                let selected = state.selection.is_part_selected(&obj.id, idx);
                ui.horizontal(|ui| {
                    let color = part.color.as_deref().unwrap_or(&obj.color);
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, hex_to_color32(color));

                    if ui
                        .selectable_label(selected, format!("{} {}", t("status.part"), idx + 1))
                        .clicked()
                    {
                        toggled_part = Some(idx);
                    }
                });
            }
        });
    if let Some(idx) = toggled_part {
        state.selection.toggle_part(&obj.id, idx);
    }

    // ── Actions ───────────────────────────────────────────────
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui.button(t("props.save_asset")).clicked() {
            state.toolbox.save_asset(&obj);
        }
        if state.session.is_logged_in() && ui.button(t("props.sell")).clicked() {
            state.marketplace.form.name = obj.name.clone();
            state.marketplace.form.kind = obj.kind.clone();
            state.marketplace.show_listing_dialog = true;
        }
        if ui.button(t("props.delete")).clicked() {
            state.delete_selected();
        }
    });
}
