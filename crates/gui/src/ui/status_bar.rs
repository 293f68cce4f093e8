use egui::Ui;

use crate::i18n::t;
use crate::state::selection::SelectionPhase;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        match &state.room.room {
            Some(room) => {
                ui.label(format!(
                    "{}×{} ft · {} {}",
                    room.width(),
                    room.depth(),
                    room.objects.len(),
                    t("status.objects")
                ));
            }
            None => {
                ui.weak(t("status.no_room"));
            }
        }

        ui.separator();

        match state.selection.phase() {
            SelectionPhase::Unselected => {}
            SelectionPhase::ObjectSelected => {
                if let Some(name) = state
                    .selection
                    .object()
                    .and_then(|id| state.room.object(id))
                    .map(|o| o.name.clone())
                {
                    ui.label(format!("{name} {}", t("status.selected")));
                }
            }
            SelectionPhase::PartSelected => {
                if let (Some(name), Some(part)) = (
                    state
                        .selection
                        .object()
                        .and_then(|id| state.room.object(id))
                        .map(|o| o.name.clone()),
                    state.selection.part(),
                ) {
                    ui.label(format!("{name} · {} {}", t("status.part"), part + 1));
                }
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(user) = state.session.user() {
                ui.weak(&user.email);
            }
            if let Some(status) = &state.session.status {
                ui.weak(status);
            }
        });
    });
}
