//! "List for sale" dialog for the selected object

use crate::i18n::t;
use crate::remote::RemoteClient;
use crate::state::AppState;

const CATEGORIES: [&str; 4] = ["furniture", "decor", "lighting", "structure"];

pub fn show(ctx: &egui::Context, state: &mut AppState, remote: &RemoteClient) {
    if !state.marketplace.show_listing_dialog {
        return;
    }

    // The dialog needs a selected object and a logged-in user
    let object = state
        .selection
        .object()
        .and_then(|id| state.room.object(id))
        .cloned();
    let creator = state.session.user().map(|u| u.email.clone());
    let (Some(object), Some(creator)) = (object, creator) else {
        state.marketplace.show_listing_dialog = false;
        return;
    };

    let mut open = true;
    let mut publish = false;

    egui::Window::new(t("market.listing_title"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(t("market.name"));
            ui.text_edit_singleline(&mut state.marketplace.form.name);

            ui.label(t("market.price"));
            ui.add(
                egui::TextEdit::singleline(&mut state.marketplace.form.price).hint_text("5.00"),
            );

            ui.label(t("market.description"));
            ui.text_edit_multiline(&mut state.marketplace.form.description);

            ui.label(t("market.category"));
            ui.horizontal(|ui| {
                for cat in CATEGORIES {
                    ui.selectable_value(
                        &mut state.marketplace.form.kind,
                        cat.to_string(),
                        cat,
                    );
                }
            });

            if let Some(error) = &state.marketplace.error {
                ui.colored_label(egui::Color32::from_rgb(255, 130, 130), error);
            }

            ui.add_space(6.0);
            if ui.button(t("market.publish")).clicked() {
                publish = true;
            }
        });

    if publish {
        state.marketplace.publish(remote, &object, &creator);
    }
    if !open {
        state.marketplace.show_listing_dialog = false;
    }
}
