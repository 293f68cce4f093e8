//! Типы AI-генерации: запросы к LLM-прокси и ответы
//!
//! Сервер превращает фото или инструкцию в JSON-описание воксельной
//! геометрии; клиент финализирует частичные объекты (id, позиция,
//! видимость) перед добавлением в комнату или тулбокс.

use serde::{Deserialize, Serialize};

use crate::{ObjectId, RoomData, VoxelObject, VoxelPart};

/// Запрос к генерационному прокси `/api/openrouter`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GenerationRequest {
    /// Фото комнаты → полное описание RoomData
    Room {
        /// data-URL изображения (base64)
        image: String,
        /// Сторона комнаты в футах
        size_feet: f64,
    },
    /// Фото одного предмета → частичный объект для тулбокса
    Object { image: String },
    /// Текущая комната + текстовая инструкция → списки add/remove/update
    Decorate { room: RoomData, instruction: String },
    /// Контроль качества одного сгенерированного объекта.
    /// При ошибке вызывающая сторона оставляет исходный объект.
    Refine { image: String, object: VoxelObject },
}

/// Частичный объект из ответа LLM: всё, кроме геометрии и вида,
/// заполняется при финализации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GeneratedObject {
    #[serde(default)]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub position: Option<[f64; 3]>,
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parts: Vec<VoxelPart>,
}

impl GeneratedObject {
    /// Финализация в полноценный объект: id, позиция появления,
    /// нулевой поворот и visible=true
    pub fn into_object(self, id: ObjectId, spawn: [f64; 3]) -> VoxelObject {
        VoxelObject {
            id,
            name: self.name,
            kind: self.kind,
            position: self.position.unwrap_or(spawn),
            rotation: self.rotation.unwrap_or(0.0),
            color: self.color,
            description: self.description,
            parts: self.parts,
            visible: true,
            is_user_created: true,
        }
    }

    /// Наложить уточнение на существующий объект: id, позиция и поворот
    /// исходного объекта сохраняются, геометрия и описание — из ответа
    pub fn apply_refinement(self, original: &VoxelObject) -> VoxelObject {
        VoxelObject {
            id: original.id.clone(),
            name: if self.name.is_empty() {
                original.name.clone()
            } else {
                self.name
            },
            kind: if self.kind.is_empty() {
                original.kind.clone()
            } else {
                self.kind
            },
            position: original.position,
            rotation: original.rotation,
            color: if self.color.is_empty() {
                original.color.clone()
            } else {
                self.color
            },
            description: if self.description.is_empty() {
                original.description.clone()
            } else {
                self.description
            },
            parts: if self.parts.is_empty() {
                original.parts.clone()
            } else {
                self.parts
            },
            visible: true,
            is_user_created: original.is_user_created,
        }
    }
}

/// Обновление объекта из decorate-ответа: поля поверх существующего
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectUpdate {
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub position: Option<[f64; 3]>,
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parts: Option<Vec<VoxelPart>>,
}

/// Ответ на Decorate: что добавить, что убрать, что изменить
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RoomPatch {
    #[serde(default)]
    pub add: Vec<GeneratedObject>,
    /// Идентификаторы удаляемых объектов
    #[serde(default)]
    pub remove: Vec<ObjectId>,
    #[serde(default)]
    pub update: Vec<ObjectUpdate>,
    #[serde(rename = "assistantMessage", default)]
    pub assistant_message: String,
}

impl RoomPatch {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && self.update.is_empty()
    }
}

/// Сырой ответ LLM на Room-запрос: цвета + частичные объекты
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GeneratedRoom {
    #[serde(rename = "wallColor", default)]
    pub wall_color: String,
    #[serde(rename = "floorColor", default)]
    pub floor_color: String,
    #[serde(default)]
    pub objects: Vec<GeneratedObject>,
}

/// Типизированный ответ генерационного прокси
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GenerationResponse {
    Room { room: GeneratedRoom },
    Object { object: GeneratedObject },
    Decorate { patch: RoomPatch },
    Refine { object: GeneratedObject },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_request_tags() {
        let req = GenerationRequest::Object {
            image: "data:image/png;base64,AAAA".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""op":"object""#));

        let req = GenerationRequest::Decorate {
            room: RoomData::default(),
            instruction: "add a rug".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""op":"decorate""#));
    }

    #[test]
    fn test_generated_object_minimal_json() {
        // Exactly the mocked LLM reply shape used by the object pipeline
        let json = r##"{
            "name": "Chair",
            "type": "furniture",
            "color": "#abc123",
            "parts": [{"offset": [0,0,0], "dimensions": [1,1,1], "color": "#abc123"}]
        }"##;
        let gen: GeneratedObject = serde_json::from_str(json).unwrap();
        assert_eq!(gen.name, "Chair");
        assert!(gen.id.is_none());
        assert!(gen.position.is_none());

        let obj = gen.into_object("toolbox-1700000000000".to_string(), [6.0, 0.5, 6.0]);
        assert!(obj.id.starts_with("toolbox-"));
        assert_eq!(obj.rotation, 0.0);
        assert!(obj.visible);
        assert_eq!(obj.position, [6.0, 0.5, 6.0]);
        assert_eq!(obj.parts.len(), 1);
    }

    #[test]
    fn test_refinement_preserves_identity() {
        let original = GeneratedObject {
            name: "Chair".to_string(),
            kind: "furniture".to_string(),
            color: "#abc123".to_string(),
            parts: vec![VoxelPart {
                offset: [0.0, 0.0, 0.0],
                dimensions: [1.0, 1.0, 1.0],
                color: None,
            }],
            ..Default::default()
        }
        .into_object("toolbox-1".to_string(), [2.0, 0.5, 2.0]);

        let refined = GeneratedObject {
            parts: vec![
                VoxelPart {
                    offset: [0.0, 0.0, 0.0],
                    dimensions: [1.0, 0.2, 1.0],
                    color: None,
                },
                VoxelPart {
                    offset: [0.0, 0.6, 0.0],
                    dimensions: [0.2, 1.0, 0.2],
                    color: None,
                },
            ],
            ..Default::default()
        };

        let merged = refined.apply_refinement(&original);
        assert_eq!(merged.id, "toolbox-1");
        assert_eq!(merged.position, [2.0, 0.5, 2.0]);
        assert_eq!(merged.name, "Chair");
        assert_eq!(merged.parts.len(), 2);
    }

    #[test]
    fn test_room_patch_defaults() {
        let patch: RoomPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
        assert!(patch.assistant_message.is_empty());
    }

    #[test]
    fn test_room_patch_partial() {
        let json = r#"{"remove": ["a", "b"], "assistantMessage": "removed two"}"#;
        let patch: RoomPatch = serde_json::from_str(json).unwrap();
        assert_eq!(patch.remove, vec!["a".to_string(), "b".to_string()]);
        assert!(patch.add.is_empty());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_object_update_sparse_fields() {
        let json = r##"{"id": "x", "color": "#ff0000"}"##;
        let upd: ObjectUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(upd.id, "x");
        assert_eq!(upd.color.as_deref(), Some("#ff0000"));
        assert!(upd.position.is_none());
        assert!(upd.parts.is_none());
    }

    #[test]
    fn test_generation_response_roundtrip() {
        let resp = GenerationResponse::Decorate {
            patch: RoomPatch {
                remove: vec!["a".to_string()],
                assistant_message: "done".to_string(),
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&resp).unwrap();
        let back: GenerationResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(resp, back);
    }
}
