//! Photo capture pipelines: photo → room and photo → toolbox object.
//!
//! Room mode sets the analyzed room immediately, then issues one
//! refinement call per detected object concurrently and merges whichever
//! results resolve; a rejected refinement silently keeps the unrefined
//! object. Nothing is cancelled: a result arriving after the user moved
//! on is still applied to whatever state is current.

use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};

use base64::{engine::general_purpose::STANDARD, Engine};

use shared::patch::{GeneratedObject, GenerationRequest, GenerationResponse};
use shared::{ObjectId, RoomData};

use super::room::RoomState;
use super::toolbox::ToolboxState;
use crate::helpers;
use crate::remote::RemoteClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Room,
    Object,
}

/// Where a refinement result lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefineTarget {
    Room,
    Toolbox,
}

type RefineResult = (ObjectId, RefineTarget, Result<GenerationResponse, String>);

pub struct CaptureState {
    pub mode: CaptureMode,
    /// Loaded photo as a data URL, ready to send
    pub image: Option<String>,
    pub image_name: String,
    pub is_processing: bool,
    pub error: Option<String>,
    rx_room: Option<Receiver<Result<GenerationResponse, String>>>,
    rx_object: Option<Receiver<Result<GenerationResponse, String>>>,
    refine_tx: Sender<RefineResult>,
    refine_rx: Receiver<RefineResult>,
}

impl Default for CaptureState {
    fn default() -> Self {
        let (refine_tx, refine_rx) = channel();
        Self {
            mode: CaptureMode::Room,
            image: None,
            image_name: String::new(),
            is_processing: false,
            error: None,
            rx_room: None,
            rx_object: None,
            refine_tx,
            refine_rx,
        }
    }
}

impl CaptureState {
    /// Load a photo from disk into a data URL
    pub fn load_image(&mut self, path: &Path) {
        match std::fs::read(path) {
            Ok(bytes) => {
                let mime = match path.extension().and_then(|e| e.to_str()) {
                    Some("png") => "image/png",
                    Some("webp") => "image/webp",
                    _ => "image/jpeg",
                };
                self.image = Some(format!("data:{mime};base64,{}", STANDARD.encode(&bytes)));
                self.image_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.error = None;
            }
            Err(e) => {
                self.error = Some(format!("Failed to read image: {e}"));
            }
        }
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.image_name.clear();
    }

    /// Kick off voxelization of the loaded photo
    pub fn process(&mut self, remote: &RemoteClient, size_feet: f64) {
        let Some(image) = self.image.clone() else {
            return;
        };
        if self.is_processing {
            return;
        }
        self.is_processing = true;
        self.error = None;

        let (tx, rx) = channel();
        match self.mode {
            CaptureMode::Room => {
                remote.post(
                    "/api/openrouter",
                    GenerationRequest::Room { image, size_feet },
                    tx,
                );
                self.rx_room = Some(rx);
            }
            CaptureMode::Object => {
                remote.post("/api/openrouter", GenerationRequest::Object { image }, tx);
                self.rx_object = Some(rx);
            }
        }
    }

    /// Drain finished calls. Returns ids of toolbox entries added this
    /// frame (for selection/UI feedback).
    pub fn poll(
        &mut self,
        remote: &RemoteClient,
        room: &mut RoomState,
        toolbox: &mut ToolboxState,
        size_feet: f64,
    ) -> Vec<ObjectId> {
        let mut new_toolbox_ids = Vec::new();

        if let Some(result) = self.rx_room.as_ref().and_then(|rx| rx.try_recv().ok()) {
            self.rx_room = None;
            self.is_processing = false;
            match result {
                Ok(GenerationResponse::Room { room: generated }) => {
                    self.apply_room(remote, room, generated, size_feet);
                    self.clear_image();
                }
                Ok(_) => self.error = Some("Unexpected reply from generator".to_string()),
                Err(e) => self.error = Some(e),
            }
        }

        if let Some(result) = self.rx_object.as_ref().and_then(|rx| rx.try_recv().ok()) {
            self.rx_object = None;
            self.is_processing = false;
            match result {
                Ok(GenerationResponse::Object { object }) => {
                    let spawn = [size_feet / 2.0, 0.5, size_feet / 2.0];
                    let finalized = object.into_object(helpers::toolbox_id(), spawn);
                    let id = finalized.id.clone();

                    // immediate quality pass; the unrefined object stays
                    // if the call rejects
                    if let Some(image) = &self.image {
                        self.spawn_refine(remote, image.clone(), &finalized, RefineTarget::Toolbox);
                    }

                    toolbox.add(finalized);
                    new_toolbox_ids.push(id);
                    self.clear_image();
                }
                Ok(_) => self.error = Some("Unexpected reply from generator".to_string()),
                Err(e) => self.error = Some(e),
            }
        }

        self.poll_refinements(room, toolbox);
        new_toolbox_ids
    }

    /// Turn an analyzed room into RoomData and fan out refinements
    fn apply_room(
        &mut self,
        remote: &RemoteClient,
        room: &mut RoomState,
        generated: shared::patch::GeneratedRoom,
        size_feet: f64,
    ) {
        let spawn = [size_feet / 2.0, 0.5, size_feet / 2.0];
        let mut data = RoomData::empty(size_feet);
        data.wall_color = generated.wall_color;
        data.floor_color = generated.floor_color;

        for (idx, gen) in generated.objects.into_iter().enumerate() {
            let id = gen
                .id
                .clone()
                .unwrap_or_else(|| helpers::room_object_id(idx));
            data.objects.push(gen.into_object(id, spawn));
        }

        if let Some(image) = self.image.clone() {
            for obj in &data.objects {
                self.spawn_refine(remote, image.clone(), obj, RefineTarget::Room);
            }
        }

        room.set_room(data);
    }

    fn spawn_refine(
        &self,
        remote: &RemoteClient,
        image: String,
        object: &shared::VoxelObject,
        target: RefineTarget,
    ) {
        let id = object.id.clone();
        remote.post_map(
            "/api/openrouter",
            GenerationRequest::Refine {
                image,
                object: object.clone(),
            },
            self.refine_tx.clone(),
            move |result| (id, target, result),
        );
    }

    fn poll_refinements(&mut self, room: &mut RoomState, toolbox: &mut ToolboxState) {
        while let Ok((id, target, result)) = self.refine_rx.try_recv() {
            let generated = match result {
                Ok(GenerationResponse::Refine { object }) => object,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!("refinement of {id} failed, keeping original: {e}");
                    continue;
                }
            };
            match target {
                RefineTarget::Room => {
                    if let Some(original) = room.object(&id).cloned() {
                        room.replace_object(generated.apply_refinement(&original));
                    }
                }
                RefineTarget::Toolbox => {
                    if let Some(original) = toolbox.item(&id).cloned() {
                        toolbox.replace(generated.apply_refinement(&original));
                    }
                }
            }
        }
    }

    /// Test hook: push a refinement result as if a call had resolved
    #[doc(hidden)]
    pub fn inject_room_refinement(&self, id: &str, result: Result<GeneratedObject, String>) {
        let _ = self.refine_tx.send((
            id.to_string(),
            RefineTarget::Room,
            result.map(|object| GenerationResponse::Refine { object }),
        ));
    }

    /// Test hook: drain refinement results without a remote client
    #[doc(hidden)]
    pub fn drain_refinements(&mut self, room: &mut RoomState, toolbox: &mut ToolboxState) {
        self.poll_refinements(room, toolbox);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_refinement_merges_into_room_object() {
        let mut capture = CaptureState::default();
        let mut room = RoomState::default();
        let mut toolbox = ToolboxState::default();
        room.add_object(fixtures::chair_at("room-obj-0-1", [3.0, 0.5, 3.0]), 12.0);

        capture.inject_room_refinement(
            "room-obj-0-1",
            Ok(GeneratedObject {
                description: "better chair".to_string(),
                parts: fixtures::chair("x").parts,
                ..Default::default()
            }),
        );
        capture.drain_refinements(&mut room, &mut toolbox);

        let obj = room.object("room-obj-0-1").unwrap();
        assert_eq!(obj.description, "better chair");
        // identity and placement survive refinement
        assert_eq!(obj.position, [3.0, 0.5, 3.0]);
    }

    #[test]
    fn test_failed_refinement_keeps_unrefined_object() {
        let mut capture = CaptureState::default();
        let mut room = RoomState::default();
        let mut toolbox = ToolboxState::default();
        room.add_object(fixtures::chair("room-obj-0-1"), 12.0);
        let before = room.object("room-obj-0-1").unwrap().clone();

        capture.inject_room_refinement("room-obj-0-1", Err("timeout".to_string()));
        capture.drain_refinements(&mut room, &mut toolbox);

        assert_eq!(room.object("room-obj-0-1").unwrap(), &before);
    }

    #[test]
    fn test_stale_refinement_for_removed_object_is_dropped() {
        let mut capture = CaptureState::default();
        let mut room = RoomState::default();
        let mut toolbox = ToolboxState::default();
        room.add_object(fixtures::chair("gone"), 12.0);
        room.remove_object("gone");

        capture.inject_room_refinement("gone", Ok(GeneratedObject::default()));
        capture.drain_refinements(&mut room, &mut toolbox);
        assert!(room.object_ids().is_empty());
    }
}
