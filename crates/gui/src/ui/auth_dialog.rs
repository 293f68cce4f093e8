//! Login / registration dialog

use crate::i18n::t;
use crate::remote::RemoteClient;
use crate::state::AppState;

pub fn show(ctx: &egui::Context, state: &mut AppState, remote: &RemoteClient) {
    if !state.session.show_dialog {
        return;
    }

    let title = if state.session.is_registering {
        t("auth.register_title")
    } else {
        t("auth.login_title")
    };

    let mut open = true;
    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.session.input.email)
                    .hint_text(t("auth.email")),
            );
            ui.add(
                egui::TextEdit::singleline(&mut state.session.input.password)
                    .hint_text(t("auth.password"))
                    .password(true),
            );

            if let Some(error) = &state.session.error {
                ui.colored_label(egui::Color32::from_rgb(255, 130, 130), error);
            }
            if let Some(status) = &state.session.status {
                ui.weak(status);
            }

            ui.add_space(4.0);
            let submit_label = if state.session.is_registering {
                t("auth.register")
            } else {
                t("auth.login")
            };
            let can_submit = !state.session.is_busy;
            if ui
                .add_enabled(can_submit, egui::Button::new(submit_label))
                .clicked()
            {
                state.session.submit(remote);
            }
            if state.session.is_busy {
                ui.spinner();
            }

            let switch_label = if state.session.is_registering {
                t("auth.to_login")
            } else {
                t("auth.to_register")
            };
            if ui.small_button(switch_label).clicked() {
                state.session.is_registering = !state.session.is_registering;
                state.session.error = None;
            }
        });

    if !open {
        state.session.show_dialog = false;
    }
}
