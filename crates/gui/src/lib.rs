// Library crate: exposes testable modules for integration tests.
// GUI-specific modules (app, ui, viewport rendering) remain in the binary crate.

pub mod export;
pub mod fixtures;
pub mod harness;
pub mod helpers;
pub mod remote;
pub mod state;

/// Subset of viewport types needed without a GL context (mesh data,
/// picking, scene building). The full viewport (camera, renderer, GL)
/// stays in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
    pub mod scene;
}
