//! Marketplace browser panel

use egui::Ui;

use crate::helpers::hex_to_color32;
use crate::i18n::t;
use crate::remote::RemoteClient;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState, remote: &RemoteClient) {
    // ── Search ────────────────────────────────────────────────
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.marketplace.search)
                .hint_text(t("market.search"))
                .desired_width(ui.available_width() - 30.0),
        );
        let search_now = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.small_button("🔍").clicked() || search_now {
            state.marketplace.refresh(remote);
        }
    });

    if !state.session.is_logged_in() {
        ui.weak(t("market.login_hint"));
    }
    if let Some(error) = &state.marketplace.error {
        ui.colored_label(egui::Color32::from_rgb(255, 130, 130), error);
    }
    ui.separator();

    if state.marketplace.is_loading {
        ui.horizontal(|ui| {
            ui.spinner();
        });
    }
    if state.marketplace.items.is_empty() && !state.marketplace.is_loading {
        ui.weak(t("market.empty"));
        return;
    }

    // Deferred actions to keep the item loop immutable
    enum Action {
        View(usize),
        AddToRoom(usize),
        Delete(String),
    }
    let mut action: Option<Action> = None;
    let own_email = state.session.user().map(|u| u.email.clone());

    egui::ScrollArea::vertical()
        .id_salt("market_scroll")
        .show(ui, |ui| {
            for (idx, item) in state.marketplace.items.iter().enumerate() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(26.0, 26.0), egui::Sense::hover());
                        ui.painter().rect_filled(rect, 4.0, hex_to_color32(&item.color));

                        ui.vertical(|ui| {
                            // opening an item counts as a view
                            if ui.selectable_label(false, &item.name).clicked() {
                                action = Some(Action::View(idx));
                            }
                            ui.weak(format!("${:.2} · {}", item.price, item.kind));
                        });
                    });

                    if !item.description.is_empty() {
                        ui.weak(&item.description);
                    }
                    ui.weak(&item.creator);

                    ui.horizontal(|ui| {
                        if ui.button(t("market.add_to_room")).clicked() {
                            action = Some(Action::AddToRoom(idx));
                        }
                        if own_email.as_deref() == Some(item.creator.as_str())
                            && ui.small_button(t("market.delete")).clicked()
                        {
                            action = Some(Action::Delete(item.id.clone()));
                        }
                    });
                });
            }
        });

    match action {
        Some(Action::View(idx)) => {
            let item = state.marketplace.items[idx].clone();
            state.marketplace.record_view(remote, &item, &state.session);
        }
        Some(Action::AddToRoom(idx)) => {
            let item = state.marketplace.items[idx].clone();
            // the purchase records are fire-and-forget; placing locally
            // succeeds even if they never make it to the server
            state.marketplace.purchase(remote, &item, &state.session);
            state.place_into_room(&item.data);
        }
        Some(Action::Delete(id)) => {
            if let Some(email) = &own_email {
                state.marketplace.delete(remote, &id, email);
            }
        }
        None => {}
    }
}
