//! 3D viewport panel with OpenGL rendering

mod camera;
mod gl_renderer;
pub use voxelroom_gui_lib::viewport::{mesh, picking, scene};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;
use camera::OrbitCamera;
use gl_renderer::GlRenderer;
use mesh::MeshData;
use picking::{pick_object, pick_part};
use scene::{aabb_lines, build_scene, SceneMeshes};

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    camera: OrbitCamera,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    cache: Option<SceneMeshes>,
    /// (room version, selection version) the cache was built for
    cache_key: Option<(u64, u64)>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: OrbitCamera::new(),
            gl_renderer: None,
            cache: None,
            cache_key: None,
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        self.gl_renderer = Some(Arc::new(Mutex::new(GlRenderer::new(gl))));
    }

    pub fn reset_camera(&mut self) {
        self.camera = OrbitCamera::new();
    }

    /// Meshes of the last built scene (for GLB export)
    pub fn export_meshes(&self) -> HashMap<String, MeshData> {
        self.cache
            .as_ref()
            .map(|c| c.meshes.clone())
            .unwrap_or_default()
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // ── Camera controls ───────────────────────────────────
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.camera.rotate(-delta.x * 0.4, delta.y * 0.4);
        }
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            let scale = self.camera.half_height / rect.height();
            self.camera
                .pan(-delta.x * scale * 2.0, delta.y * scale * 2.0);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }

        // ── Scene cache ───────────────────────────────────────
        self.rebuild_if_needed(state);

        // ── Selection via click ───────────────────────────────
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.handle_click(pos, rect, state);
                self.rebuild_if_needed(state);
            }
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        if state.room.has_room() {
            self.render_gl(ui, rect, state);
        } else {
            self.draw_splash(ui, rect);
        }
    }

    /// Rebuild meshes when the room or the selection changed. Also aims
    /// the camera at a newly created room.
    fn rebuild_if_needed(&mut self, state: &AppState) {
        let Some(room) = &state.room.room else {
            self.cache = None;
            self.cache_key = None;
            return;
        };

        let key = (state.room.version(), state.selection.version);
        if self.cache_key == Some(key) {
            return;
        }

        if self.cache.is_none() {
            self.camera
                .focus_room(room.width() as f32, room.depth() as f32);
        }

        let selection_color = state.settings.viewport.selection_color;
        let color = [
            selection_color[0] as f32 / 255.0,
            selection_color[1] as f32 / 255.0,
            selection_color[2] as f32 / 255.0,
        ];
        self.cache = Some(build_scene(
            room,
            state.selection.object().map(|s| s.as_str()),
            state.selection.part(),
            color,
        ));
        self.cache_key = Some(key);
    }

    /// Click → selection transitions: an object click selects it, a
    /// second click on a part of the selected object drills in, a miss
    /// clears everything.
    fn handle_click(&mut self, pos: egui::Pos2, rect: egui::Rect, state: &mut AppState) {
        let Some(cache) = &self.cache else {
            return;
        };
        let ray = self.camera.screen_ray(pos, rect);

        match pick_object(&ray, &cache.aabbs) {
            Some(hit) => {
                if state.selection.is_object_selected(&hit) {
                    if let Some(parts) = cache.part_aabbs.get(&hit) {
                        if let Some(part_idx) = pick_part(&ray, parts) {
                            state.selection.select_part(&hit, part_idx);
                            return;
                        }
                    }
                    // clicked the selected object outside any part box
                    state.selection.clear_part();
                } else {
                    state.selection.select_object(hit);
                }
            }
            None => state.selection.clear(),
        }
    }

    fn render_gl(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let Some(gl_renderer) = &self.gl_renderer else {
            return;
        };
        let Some(cache) = &self.cache else {
            return;
        };

        let renderer_clone = gl_renderer.clone();
        let camera = OrbitCamera {
            yaw: self.camera.yaw,
            pitch: self.camera.pitch,
            half_height: self.camera.half_height,
            target: self.camera.target,
        };

        let meshes = cache.meshes.clone();
        let version = self.cache_key.unwrap_or((0, 0));

        let selection_lines = state
            .selection
            .object()
            .and_then(|id| cache.aabbs.get(id))
            .map(|aabb| aabb_lines(aabb, [1.0, 1.0, 1.0, 0.9]));

        let bg_color = state.settings.viewport.background_color;

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer_clone.lock() {
                    r.sync_from_meshes(gl, &meshes, version);
                    r.sync_selection(gl, selection_lines.as_ref());

                    let render_params = gl_renderer::RenderParams { viewport, bg_color };
                    r.paint(gl, &camera, &render_params);
                }
            })),
        };

        ui.painter().add(callback);
    }

    /// Empty-state splash when no room exists yet
    fn draw_splash(&self, ui: &mut Ui, rect: egui::Rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(165, 201, 243));
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            t("viewport.ready"),
            egui::FontId::proportional(28.0),
            egui::Color32::WHITE,
        );
        painter.text(
            rect.center() + egui::vec2(0.0, 32.0),
            egui::Align2::CENTER_CENTER,
            t("viewport.ready_hint"),
            egui::FontId::proportional(13.0),
            egui::Color32::from_white_alpha(180),
        );
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}
