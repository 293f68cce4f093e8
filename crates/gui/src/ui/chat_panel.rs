use egui::Ui;

use crate::i18n::t;
use crate::remote::RemoteClient;
use crate::state::chat::{ChatMessage, ChatRole};
use crate::state::AppState;

const USER_BUBBLE: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);
const AI_BUBBLE: egui::Color32 = egui::Color32::from_rgb(40, 46, 60);
const ERROR_BUBBLE: egui::Color32 = egui::Color32::from_rgb(90, 34, 34);

pub fn show(ui: &mut Ui, state: &mut AppState, remote: &RemoteClient) {
    ui.horizontal(|ui| {
        ui.heading(t("chat.title"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if !state.chat.messages.is_empty()
                && ui
                    .small_button(t("chat.clear"))
                    .on_hover_text(t("chat.clear_tip"))
                    .clicked()
            {
                state.chat.clear();
            }
        });
    });
    ui.separator();

    let mut wants_retry = false;

    let history_height = (ui.available_height() - 34.0).max(60.0);
    egui::ScrollArea::vertical()
        .id_salt("chat_scroll")
        .max_height(history_height)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if state.chat.messages.is_empty() && !state.chat.is_loading {
                show_examples(ui);
            }

            let last = state.chat.messages.len().saturating_sub(1);
            for (i, msg) in state.chat.messages.iter().enumerate() {
                let can_retry = i == last && msg.is_error && state.chat.can_retry();
                wants_retry |= show_bubble(ui, msg, can_retry);
            }

            if state.chat.is_loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak(t("chat.thinking"));
                });
            }
        });

    // Retry outside the scroll area to avoid borrowing the messages
    if wants_retry {
        if let Some(room) = state.room.room.clone() {
            state.chat.retry(remote, &room);
        }
    }

    ui.add_space(2.0);
    if !state.room.has_room() {
        ui.weak(t("chat.no_room"));
        return;
    }

    show_input(ui, state, remote);
}

fn show_examples(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.vertical_centered(|ui| {
        ui.weak(t("chat.placeholder"));
        ui.add_space(6.0);
        ui.weak(t("chat.examples"));
        for key in ["chat.example1", "chat.example2", "chat.example3"] {
            ui.weak(format!("  \"{}\"", t(key)));
        }
    });
}

/// One chat bubble: user messages on the right, assistant on the left.
/// Returns true if the retry button was clicked.
fn show_bubble(ui: &mut Ui, msg: &ChatMessage, can_retry: bool) -> bool {
    let mut retry_clicked = false;

    let is_user = msg.role == ChatRole::User;
    let fill = if msg.is_error {
        ERROR_BUBBLE
    } else if is_user {
        USER_BUBBLE
    } else {
        AI_BUBBLE
    };
    let layout = if is_user {
        egui::Layout::right_to_left(egui::Align::TOP)
    } else {
        egui::Layout::left_to_right(egui::Align::TOP)
    };

    ui.with_layout(layout, |ui| {
        let max_width = ui.available_width() * 0.85;
        egui::Frame::NONE
            .fill(fill)
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(6))
            .outer_margin(egui::Margin::symmetric(0, 2))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(&msg.text);
                if can_retry {
                    if ui.small_button(t("chat.retry")).clicked() {
                        retry_clicked = true;
                    }
                }
            });
    });

    retry_clicked
}

fn show_input(ui: &mut Ui, state: &mut AppState, remote: &RemoteClient) {
    ui.horizontal(|ui| {
        let input_width = (ui.available_width() - 40.0).max(40.0);
        let input_resp = ui.add_sized(
            [input_width, 22.0],
            egui::TextEdit::singleline(&mut state.chat.input).hint_text(t("chat.ask")),
        );

        let enter_pressed =
            input_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let can_send = !state.chat.is_loading && !state.chat.input.trim().is_empty();

        let send_clicked = ui
            .add_enabled(can_send, egui::Button::new("➤"))
            .on_hover_text(t("chat.send_tip"))
            .clicked();

        if (send_clicked || enter_pressed) && can_send {
            if let Some(room) = state.room.room.clone() {
                state.chat.send_message(remote, &room);
            }
        }
    });
}
