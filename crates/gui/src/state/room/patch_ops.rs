//! Applying decorate patches from the design chat

use shared::patch::RoomPatch;
use shared::ObjectId;

use super::RoomState;
use crate::helpers;

/// What a patch actually did, for the chat transcript
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PatchSummary {
    pub added: Vec<ObjectId>,
    pub removed: usize,
    pub updated: usize,
}

impl RoomState {
    /// Apply a decorate patch: removals first, then updates merged field
    /// by field, then additions finalized with generated ids and the
    /// room's spawn position. Unknown update ids are skipped.
    pub fn apply_patch(&mut self, patch: RoomPatch) -> PatchSummary {
        let mut summary = PatchSummary::default();
        let Some(room) = self.room.as_mut() else {
            return summary;
        };

        if !patch.remove.is_empty() {
            let before = room.objects.len();
            room.objects.retain(|o| !patch.remove.contains(&o.id));
            summary.removed = before - room.objects.len();
        }

        for update in patch.update {
            let Some(obj) = room.objects.iter_mut().find(|o| o.id == update.id) else {
                continue;
            };
            if let Some(name) = update.name {
                obj.name = name;
            }
            if let Some(kind) = update.kind {
                obj.kind = kind;
            }
            if let Some(position) = update.position {
                obj.position = position;
            }
            if let Some(rotation) = update.rotation {
                obj.rotation = rotation;
            }
            if let Some(color) = update.color {
                obj.color = color;
            }
            if let Some(description) = update.description {
                obj.description = description;
            }
            if let Some(parts) = update.parts {
                obj.parts = parts;
            }
            summary.updated += 1;
        }

        let spawn = room.spawn_position();
        for (idx, generated) in patch.add.into_iter().enumerate() {
            let id = generated
                .id
                .clone()
                .unwrap_or_else(|| helpers::ai_added_id(idx));
            let obj = generated.into_object(id.clone(), spawn);
            room.objects.push(obj);
            summary.added.push(id);
        }

        if summary.removed > 0 || summary.updated > 0 || !summary.added.is_empty() {
            self.version += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use shared::patch::{GeneratedObject, ObjectUpdate};

    fn decorated_state() -> RoomState {
        let mut state = RoomState::default();
        state.add_object(fixtures::chair("chair"), 12.0);
        state.add_object(fixtures::chair("table"), 12.0);
        state
    }

    #[test]
    fn test_patch_removes_by_id() {
        let mut state = decorated_state();
        let summary = state.apply_patch(RoomPatch {
            remove: vec!["chair".to_string(), "ghost".to_string()],
            ..Default::default()
        });
        assert_eq!(summary.removed, 1);
        assert_eq!(state.object_ids(), vec!["table".to_string()]);
    }

    #[test]
    fn test_patch_updates_merge_fields() {
        let mut state = decorated_state();
        let summary = state.apply_patch(RoomPatch {
            update: vec![ObjectUpdate {
                id: "chair".to_string(),
                name: None,
                kind: None,
                position: Some([1.0, 0.0, 1.0]),
                rotation: None,
                color: Some("#ff0000".to_string()),
                description: None,
                parts: None,
            }],
            ..Default::default()
        });
        assert_eq!(summary.updated, 1);

        let obj = state.object("chair").unwrap();
        assert_eq!(obj.position, [1.0, 0.0, 1.0]);
        assert_eq!(obj.color, "#ff0000");
        // untouched fields survive
        assert_eq!(obj.name, "Chair");
        assert!(!obj.parts.is_empty());
    }

    #[test]
    fn test_patch_update_unknown_id_skipped() {
        let mut state = decorated_state();
        let summary = state.apply_patch(RoomPatch {
            update: vec![ObjectUpdate {
                id: "ghost".to_string(),
                name: Some("x".to_string()),
                kind: None,
                position: None,
                rotation: None,
                color: None,
                description: None,
                parts: None,
            }],
            ..Default::default()
        });
        assert_eq!(summary.updated, 0);
    }

    #[test]
    fn test_patch_adds_with_generated_ids_and_spawn() {
        let mut state = decorated_state();
        let summary = state.apply_patch(RoomPatch {
            add: vec![GeneratedObject {
                name: "Rug".to_string(),
                kind: "decor".to_string(),
                color: "#884422".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        });

        assert_eq!(summary.added.len(), 1);
        let id = &summary.added[0];
        assert!(id.starts_with("ai-add-"));

        let obj = state.object(id).unwrap();
        assert_eq!(obj.position, [6.0, 0.5, 6.0]);
        assert!(obj.visible);
        assert_eq!(obj.rotation, 0.0);
    }

    #[test]
    fn test_patch_add_keeps_llm_provided_id() {
        let mut state = decorated_state();
        let summary = state.apply_patch(RoomPatch {
            add: vec![GeneratedObject {
                id: Some("lamp-1".to_string()),
                name: "Lamp".to_string(),
                kind: "lighting".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        });
        assert_eq!(summary.added, vec!["lamp-1".to_string()]);
    }

    #[test]
    fn test_patch_without_room_is_noop() {
        let mut state = RoomState::default();
        let summary = state.apply_patch(RoomPatch {
            remove: vec!["a".to_string()],
            ..Default::default()
        });
        assert_eq!(summary, PatchSummary::default());
        assert!(!state.has_room());
    }

    #[test]
    fn test_empty_patch_does_not_bump_version() {
        let mut state = decorated_state();
        let v = state.version();
        state.apply_patch(RoomPatch::default());
        assert_eq!(state.version(), v);
    }
}
