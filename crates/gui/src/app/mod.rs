//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::i18n::{self, Lang};
use crate::remote::RemoteClient;
use crate::state::{AppState, LeftTab};
use crate::ui::{
    auth_dialog, chat_panel, listing_dialog, market_panel, properties, room_tree, status_bar,
    toolbar, toolbox_panel,
};
use crate::viewport::ViewportPanel;

/// Main application
pub struct RoomApp {
    state: AppState,
    viewport: ViewportPanel,
    remote: RemoteClient,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    /// Last autosaved room version
    last_saved_version: u64,
}

impl RoomApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_room: Option<shared::RoomData>) -> Self {
        let mut state = AppState::default();

        // Load initial room: CLI argument takes priority, then autosave
        if let Some(room) = initial_room {
            state.room.set_room(room);
        } else if let Some(autosave) = crate::state::RoomState::load_autosave() {
            state.room.set_room(autosave);
            tracing::info!("Loaded autosaved room");
        }

        if state.settings.language == "en" {
            i18n::set_lang(Lang::En);
        }

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let remote = RemoteClient::new(state.settings.server_url.clone());

        let mut viewport = ViewportPanel::new();
        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        let last_font_size = state.settings.ui.font_size;
        let last_saved_version = state.room.version();

        Self {
            state,
            viewport,
            remote,
            last_font_size,
            last_saved_version,
        }
    }

    /// Drain all pending results from background calls
    fn poll_remote(&mut self) {
        // Login → cloud room load; a loaded room replaces the current one
        if let Some(room) = self.state.session.poll(&self.remote) {
            if let Some(dims) = room.dimensions {
                self.state.settings.room_size_feet = dims.width;
            }
            self.state.room.set_room(room);
            self.state.selection.clear();
        }

        if let Some(summary) = self.state.chat.poll(&mut self.state.room) {
            if !summary.added.is_empty() || summary.removed > 0 {
                self.state
                    .selection
                    .prune(|id| self.state.room.room.as_ref().is_some_and(|r| r.object(id).is_some()));
            }
        }

        let size = self.state.settings.room_size_feet;
        self.state.capture.poll(
            &self.remote,
            &mut self.state.room,
            &mut self.state.toolbox,
            size,
        );

        self.state.marketplace.poll(&self.remote);
    }
}

impl eframe::App for RoomApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        self.poll_remote();

        // Autosave room if changed
        let current_version = self.state.room.version();
        if current_version != self.last_saved_version {
            self.state.room.autosave();
            self.state.settings.save();
            self.last_saved_version = current_version;
        }

        keyboard::handle_keyboard(ctx, &mut self.state);

        // Background calls resolve outside user interaction; keep
        // painting so their results are picked up promptly
        if self.state.capture.is_processing
            || self.state.chat.is_loading
            || self.state.marketplace.is_loading
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state, &self.viewport);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::account_menu(ui, &mut self.state, &self.remote);
            });
        });

        // ── Windows ──────────────────────────────────────────
        menus::settings_window(ctx, &mut self.state, &mut self.remote);
        auth_dialog::show(ctx, &mut self.state, &self.remote);
        listing_dialog::show(ctx, &mut self.state, &self.remote);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state, &self.remote);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: scene / toolbox / shop ───────────────
        if self.state.panels.sidebar {
            egui::SidePanel::left("sidebar")
                .default_width(240.0)
                .width_range(180.0..=420.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.selectable_value(
                            &mut self.state.left_tab,
                            LeftTab::Scene,
                            crate::i18n::t("tab.scene"),
                        );
                        ui.selectable_value(
                            &mut self.state.left_tab,
                            LeftTab::Toolbox,
                            crate::i18n::t("tab.toolbox"),
                        );
                        ui.selectable_value(
                            &mut self.state.left_tab,
                            LeftTab::Shop,
                            crate::i18n::t("tab.shop"),
                        );
                    });
                    ui.separator();

                    match self.state.left_tab {
                        LeftTab::Scene => room_tree::show(ui, &mut self.state),
                        LeftTab::Toolbox => toolbox_panel::show(ui, &mut self.state),
                        LeftTab::Shop => {
                            self.state.marketplace.refresh_if_stale(&self.remote);
                            market_panel::show(ui, &mut self.state, &self.remote);
                        }
                    }
                });
        }

        // ── Right panel: Properties + Chat ───────────────────
        self.show_right_panel(ctx);

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }
}

impl RoomApp {
    fn show_right_panel(&mut self, ctx: &egui::Context) {
        let show_right = self.state.panels.properties || self.state.panels.chat;
        if !show_right {
            return;
        }

        egui::SidePanel::right("right_panel")
            .default_width(290.0)
            .width_range(200.0..=500.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)))
            .show(ctx, |ui| {
                let show_props = self.state.panels.properties;
                let show_chat = self.state.panels.chat;

                if show_props && show_chat {
                    // Both panels: split with a scrollable properties area
                    let total = ui.available_height();
                    let props_height = (total * 0.50).max(100.0);

                    egui::ScrollArea::vertical()
                        .id_salt("props_scroll_area")
                        .max_height(props_height)
                        .show(ui, |ui| {
                            properties::show(ui, &mut self.state);
                        });

                    ui.add_space(2.0);
                    ui.separator();
                    ui.add_space(2.0);

                    chat_panel::show(ui, &mut self.state, &self.remote);
                } else if show_props {
                    egui::ScrollArea::vertical()
                        .id_salt("props_scroll_full")
                        .show(ui, |ui| {
                            properties::show(ui, &mut self.state);
                        });
                } else if show_chat {
                    chat_panel::show(ui, &mut self.state, &self.remote);
                }
            });
    }
}
