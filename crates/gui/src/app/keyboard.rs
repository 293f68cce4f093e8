//! Keyboard shortcut handling

use eframe::egui;

use crate::state::room::{MOVE_STEP, PART_MOVE_STEP};
use crate::state::AppState;

/// Handle keyboard input for the application.
///
/// Arrow keys move on the X/Z plane, Q/E move vertically, R rotates,
/// Delete removes, Escape steps the selection back. While a part is
/// selected the same keys move the part offset instead of the object.
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // Escape — part → object → nothing
        if i.key_pressed(egui::Key::Escape) {
            handle_escape(state);
        }
        // Delete — remove selected object
        if i.key_pressed(egui::Key::Delete) {
            state.delete_selected();
        }
        // R — rotate selected object by the fixed increment
        if i.key_pressed(egui::Key::R) {
            if let Some(id) = state.selection.object().cloned() {
                state.room.rotate_object(&id);
            }
        }

        // Movement keys
        let mut dir = [0.0f64; 3];
        if i.key_pressed(egui::Key::ArrowUp) {
            dir[2] -= 1.0;
        }
        if i.key_pressed(egui::Key::ArrowDown) {
            dir[2] += 1.0;
        }
        if i.key_pressed(egui::Key::ArrowLeft) {
            dir[0] -= 1.0;
        }
        if i.key_pressed(egui::Key::ArrowRight) {
            dir[0] += 1.0;
        }
        if i.key_pressed(egui::Key::Q) {
            dir[1] += 1.0;
        }
        if i.key_pressed(egui::Key::E) {
            dir[1] -= 1.0;
        }

        if dir != [0.0; 3] {
            apply_move(state, dir);
        }
    });
}

fn apply_move(state: &mut AppState, dir: [f64; 3]) {
    let Some(id) = state.selection.object().cloned() else {
        return;
    };

    if let Some(part_index) = state.selection.part() {
        let delta = [
            dir[0] * PART_MOVE_STEP,
            dir[1] * PART_MOVE_STEP,
            dir[2] * PART_MOVE_STEP,
        ];
        state.room.move_part(&id, part_index, delta);
    } else {
        let delta = [dir[0] * MOVE_STEP, dir[1] * MOVE_STEP, dir[2] * MOVE_STEP];
        state.room.move_object(&id, delta);
    }
}

fn handle_escape(state: &mut AppState) {
    if state.selection.part().is_some() {
        state.selection.clear_part();
    } else {
        state.selection.clear();
    }
}
