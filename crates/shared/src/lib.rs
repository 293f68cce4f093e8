use serde::{Deserialize, Serialize};

pub mod market;
pub mod patch;

/// Уникальный идентификатор объекта в комнате
pub type ObjectId = String;

/// Размер комнаты по умолчанию (футы), если dimensions не заданы
pub const DEFAULT_ROOM_SIZE: f64 = 12.0;

/// Высота стен комнаты (футы)
pub const WALL_HEIGHT: f64 = 8.0;

pub(crate) fn default_true() -> bool {
    true
}

/// Часть воксельного объекта — осевыровненный блок,
/// позиционированный относительно начала координат объекта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoxelPart {
    /// Смещение относительно позиции объекта
    pub offset: [f64; 3],
    /// Размеры блока по осям X/Y/Z
    pub dimensions: [f64; 3],
    /// Цвет блока (hex); если None — используется цвет объекта
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Воксельный объект — именованная группа блоков
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoxelObject {
    pub id: ObjectId,
    pub name: String,
    /// Категория объекта ("furniture", "decor", "lighting", "structure", ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Позиция в комнате (1 единица = 1 фут)
    pub position: [f64; 3],
    /// Поворот вокруг вертикальной оси, радианы в диапазоне [0, 2π)
    #[serde(default)]
    pub rotation: f64,
    /// Основной цвет объекта (hex, например "#abc123")
    pub color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parts: Vec<VoxelPart>,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// true — создан пользователем, false — из магазина
    #[serde(rename = "isUserCreated", default)]
    pub is_user_created: bool,
}

/// Габариты пола комнаты
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width: f64,
    pub depth: f64,
}

impl RoomDimensions {
    pub fn square(size: f64) -> Self {
        Self {
            width: size,
            depth: size,
        }
    }
}

/// Комната — пол, две стены и список размещённых объектов.
///
/// Мягкий инвариант (не проверяется): позиции объектов лежат
/// в пределах [0, width] × [0, depth] по горизонтали.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomData {
    #[serde(default)]
    pub objects: Vec<VoxelObject>,
    #[serde(rename = "wallColor")]
    pub wall_color: String,
    #[serde(rename = "floorColor")]
    pub floor_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<RoomDimensions>,
}

impl Default for RoomData {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            wall_color: "#cbd5e1".to_string(),
            floor_color: "#94a3b8".to_string(),
            dimensions: Some(RoomDimensions::square(DEFAULT_ROOM_SIZE)),
        }
    }
}

impl RoomData {
    /// Пустая комната заданного размера
    pub fn empty(size_feet: f64) -> Self {
        Self {
            dimensions: Some(RoomDimensions::square(size_feet)),
            ..Self::default()
        }
    }

    /// Ширина комнаты (по умолчанию 12)
    pub fn width(&self) -> f64 {
        self.dimensions.map(|d| d.width).unwrap_or(DEFAULT_ROOM_SIZE)
    }

    /// Глубина комнаты (по умолчанию 12)
    pub fn depth(&self) -> f64 {
        self.dimensions.map(|d| d.depth).unwrap_or(DEFAULT_ROOM_SIZE)
    }

    /// Точка появления новых объектов — центр комнаты
    pub fn spawn_position(&self) -> [f64; 3] {
        [self.width() / 2.0, 0.5, self.depth() / 2.0]
    }

    pub fn object(&self, id: &str) -> Option<&VoxelObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: &str) -> Option<&mut VoxelObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    fn sample_part() -> VoxelPart {
        VoxelPart {
            offset: [0.0, 0.5, 0.0],
            dimensions: [1.0, 1.0, 1.0],
            color: Some("#abc123".to_string()),
        }
    }

    fn sample_object(id: &str) -> VoxelObject {
        VoxelObject {
            id: id.to_string(),
            name: "Chair".to_string(),
            kind: "furniture".to_string(),
            position: [6.0, 0.5, 6.0],
            rotation: 0.0,
            color: "#abc123".to_string(),
            description: "A voxel chair".to_string(),
            parts: vec![sample_part()],
            visible: true,
            is_user_created: true,
        }
    }

    // --- VoxelPart ---

    #[test]
    fn test_part_serde() {
        roundtrip(&sample_part());
    }

    #[test]
    fn test_part_color_optional() {
        let json = r#"{"offset":[0,0,0],"dimensions":[1,2,3]}"#;
        let p: VoxelPart = serde_json::from_str(json).unwrap();
        assert!(p.color.is_none());
        // None color is omitted on the wire
        let out = serde_json::to_string(&p).unwrap();
        assert!(!out.contains("color"));
    }

    // --- VoxelObject ---

    #[test]
    fn test_object_serde() {
        roundtrip(&sample_object("obj-1"));
    }

    #[test]
    fn test_object_wire_field_names() {
        let json = serde_json::to_string(&sample_object("obj-1")).unwrap();
        assert!(json.contains(r#""type":"furniture""#));
        assert!(json.contains(r#""isUserCreated":true"#));
        assert!(!json.contains("kind"));
    }

    #[test]
    fn test_object_defaults_on_deserialize() {
        let json = r##"{
            "id": "x",
            "name": "Lamp",
            "type": "lighting",
            "position": [1, 0, 1],
            "color": "#ffffff"
        }"##;
        let obj: VoxelObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.rotation, 0.0);
        assert!(obj.visible);
        assert!(!obj.is_user_created);
        assert!(obj.parts.is_empty());
        assert!(obj.description.is_empty());
    }

    // --- RoomData ---

    #[test]
    fn test_room_serde() {
        let room = RoomData {
            objects: vec![sample_object("a"), sample_object("b")],
            ..RoomData::default()
        };
        roundtrip(&room);
        let json = serde_json::to_string(&room).unwrap();
        assert!(json.contains(r#""wallColor""#));
        assert!(json.contains(r#""floorColor""#));
    }

    #[test]
    fn test_room_dimension_defaults() {
        let json = r##"{"wallColor":"#fff","floorColor":"#eee"}"##;
        let room: RoomData = serde_json::from_str(json).unwrap();
        assert!(room.dimensions.is_none());
        assert_eq!(room.width(), DEFAULT_ROOM_SIZE);
        assert_eq!(room.depth(), DEFAULT_ROOM_SIZE);
        assert!(room.objects.is_empty());
    }

    #[test]
    fn test_room_spawn_position_is_center() {
        let room = RoomData::empty(10.0);
        assert_eq!(room.spawn_position(), [5.0, 0.5, 5.0]);
    }

    #[test]
    fn test_room_object_lookup() {
        let mut room = RoomData::default();
        room.objects.push(sample_object("a"));
        assert!(room.object("a").is_some());
        assert!(room.object("missing").is_none());
        room.object_mut("a").unwrap().rotation = 1.0;
        assert_eq!(room.object("a").unwrap().rotation, 1.0);
    }
}
