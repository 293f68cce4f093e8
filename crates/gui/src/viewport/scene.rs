//! Room scene building: RoomData + selection → meshes and pick volumes.
//!
//! A pure function of its inputs; the viewport caches the result keyed
//! by (room version, selection version).

use std::collections::HashMap;

use glam::Vec3;

use shared::{RoomData, VoxelObject, WALL_HEIGHT};

use super::mesh::{LineMeshData, MeshData};
use super::picking::Aabb;
use crate::helpers::parse_hex_color;

/// Key under which the floor/walls mesh is stored; never pickable.
pub const SHELL_ID: &str = "__room_shell";

/// Wall/floor slab thickness
const SHELL_THICKNESS: f32 = 0.5;

pub struct SceneMeshes {
    /// Mesh per visible object, plus the room shell under SHELL_ID
    pub meshes: HashMap<String, MeshData>,
    /// Pick volume per visible object (shell excluded)
    pub aabbs: HashMap<String, Aabb>,
    /// Per-part pick volumes, same order as the object's parts
    pub part_aabbs: HashMap<String, Vec<Aabb>>,
}

/// Highlight applied while building an object mesh
#[derive(Clone, Copy)]
pub struct Highlight {
    pub selected_object: bool,
    pub selected_part: Option<usize>,
    pub color: [f32; 3],
}

/// Build meshes and pick volumes for the whole room.
pub fn build_scene(
    room: &RoomData,
    selected_object: Option<&str>,
    selected_part: Option<usize>,
    selection_color: [f32; 3],
) -> SceneMeshes {
    let mut scene = SceneMeshes {
        meshes: HashMap::new(),
        aabbs: HashMap::new(),
        part_aabbs: HashMap::new(),
    };

    scene.meshes.insert(SHELL_ID.to_string(), shell_mesh(room));

    for obj in &room.objects {
        if !obj.visible {
            continue;
        }
        let selected = selected_object == Some(obj.id.as_str());
        let highlight = Highlight {
            selected_object: selected,
            selected_part: if selected { selected_part } else { None },
            color: selection_color,
        };

        let mesh = object_mesh(obj, highlight);
        let position = Vec3::new(
            obj.position[0] as f32,
            obj.position[1] as f32,
            obj.position[2] as f32,
        );
        scene.aabbs.insert(
            obj.id.clone(),
            Aabb::from_points(mesh.positions(), position),
        );
        scene
            .part_aabbs
            .insert(obj.id.clone(), part_volumes(obj, position));
        scene.meshes.insert(obj.id.clone(), mesh);
    }

    scene
}

/// Floor slab plus the back and left walls.
fn shell_mesh(room: &RoomData) -> MeshData {
    let w = room.width() as f32;
    let d = room.depth() as f32;
    let wall_h = WALL_HEIGHT as f32;
    let t = SHELL_THICKNESS;

    let floor_color = parse_hex_color(&room.floor_color);
    let wall_color = parse_hex_color(&room.wall_color);

    let mut mesh = MeshData::default();
    // Floor: slightly oversized, top face at y = 0
    mesh.push_box(
        Vec3::new(w / 2.0, -t / 2.0, d / 2.0),
        Vec3::new(w + t, t, d + t),
        floor_color,
    );
    // Back wall (along X at z = 0 edge)
    mesh.push_box(
        Vec3::new(w / 2.0, wall_h / 2.0, -t / 2.0),
        Vec3::new(w + t, wall_h, t),
        wall_color,
    );
    // Left wall (along Z at x = 0 edge)
    mesh.push_box(
        Vec3::new(-t / 2.0, wall_h / 2.0, d / 2.0),
        Vec3::new(t, wall_h, d + t),
        wall_color,
    );
    mesh
}

/// One box per part, rotated and translated into world space.
/// Selection tints the whole object; the active part gets the full
/// selection color.
pub fn object_mesh(obj: &VoxelObject, highlight: Highlight) -> MeshData {
    let base_color = parse_hex_color(&obj.color);
    let mut mesh = MeshData::default();

    for (idx, part) in obj.parts.iter().enumerate() {
        let part_color = part
            .color
            .as_deref()
            .map(parse_hex_color)
            .unwrap_or(base_color);

        let color = if highlight.selected_part == Some(idx) {
            highlight.color
        } else if highlight.selected_object {
            tint(part_color, highlight.color, 0.45)
        } else {
            part_color
        };

        mesh.push_box(
            Vec3::new(
                part.offset[0] as f32,
                part.offset[1] as f32,
                part.offset[2] as f32,
            ),
            Vec3::new(
                part.dimensions[0] as f32,
                part.dimensions[1] as f32,
                part.dimensions[2] as f32,
            ),
            color,
        );
    }

    mesh.rotate_y_translate(
        obj.rotation as f32,
        Vec3::new(
            obj.position[0] as f32,
            obj.position[1] as f32,
            obj.position[2] as f32,
        ),
    );
    mesh
}

/// World-space pick volume per part (AABB of the rotated box corners).
fn part_volumes(obj: &VoxelObject, position: Vec3) -> Vec<Aabb> {
    let (sin, cos) = (obj.rotation as f32).sin_cos();

    obj.parts
        .iter()
        .map(|part| {
            let c = Vec3::new(
                part.offset[0] as f32,
                part.offset[1] as f32,
                part.offset[2] as f32,
            );
            let h = Vec3::new(
                part.dimensions[0] as f32 / 2.0,
                part.dimensions[1] as f32 / 2.0,
                part.dimensions[2] as f32 / 2.0,
            );

            let corners = (0..8).map(|i| {
                let local = c + Vec3::new(
                    if i & 1 == 0 { -h.x } else { h.x },
                    if i & 2 == 0 { -h.y } else { h.y },
                    if i & 4 == 0 { -h.z } else { h.z },
                );
                Vec3::new(
                    local.x * cos + local.z * sin + position.x,
                    local.y + position.y,
                    -local.x * sin + local.z * cos + position.z,
                )
            });
            Aabb::from_points(corners, position)
        })
        .collect()
}

fn tint(color: [f32; 3], toward: [f32; 3], amount: f32) -> [f32; 3] {
    [
        color[0] + (toward[0] - color[0]) * amount,
        color[1] + (toward[1] - color[1]) * amount,
        color[2] + (toward[2] - color[2]) * amount,
    ]
}

/// Wireframe box for the selected object's bounding volume.
pub fn aabb_lines(aabb: &Aabb, color: [f32; 4]) -> LineMeshData {
    let (min, max) = (aabb.min, aabb.max);
    let corners = [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(max.x, max.y, max.z),
        Vec3::new(min.x, max.y, max.z),
    ];
    let edges = [
        (0, 1), (1, 2), (2, 3), (3, 0), // bottom
        (4, 5), (5, 6), (6, 7), (7, 4), // top
        (0, 4), (1, 5), (2, 6), (3, 7), // verticals
    ];

    let mut lines = LineMeshData::default();
    for (a, b) in edges {
        lines.push_line(corners[a], corners[b], color);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

    #[test]
    fn test_scene_contains_shell_and_objects() {
        let mut room = RoomData::empty(12.0);
        room.objects.push(fixtures::chair("a"));

        let scene = build_scene(&room, None, None, WHITE);
        assert!(scene.meshes.contains_key(SHELL_ID));
        assert!(scene.meshes.contains_key("a"));
        // shell is not pickable
        assert!(!scene.aabbs.contains_key(SHELL_ID));
        assert!(scene.aabbs.contains_key("a"));
    }

    #[test]
    fn test_hidden_objects_skipped() {
        let mut room = RoomData::empty(12.0);
        let mut obj = fixtures::chair("a");
        obj.visible = false;
        room.objects.push(obj);

        let scene = build_scene(&room, None, None, WHITE);
        assert!(!scene.meshes.contains_key("a"));
        assert!(!scene.aabbs.contains_key("a"));
    }

    #[test]
    fn test_zero_part_object_still_selectable() {
        let mut room = RoomData::empty(12.0);
        let mut obj = fixtures::chair_at("empty", [4.0, 0.5, 4.0]);
        obj.parts.clear();
        room.objects.push(obj);

        let scene = build_scene(&room, None, None, WHITE);
        // renders nothing...
        assert!(scene.meshes.get("empty").unwrap().is_empty());
        // ...but keeps a pick volume around its position
        let aabb = scene.aabbs.get("empty").unwrap();
        assert_eq!(aabb.center(), Vec3::new(4.0, 0.5, 4.0));
    }

    #[test]
    fn test_object_mesh_rotates_parts() {
        let mut obj = fixtures::chair_at("a", [0.0, 0.0, 0.0]);
        obj.parts = vec![shared::VoxelPart {
            offset: [2.0, 0.0, 0.0],
            dimensions: [1.0, 1.0, 1.0],
            color: None,
        }];
        obj.rotation = std::f64::consts::FRAC_PI_2;

        let mesh = object_mesh(
            &obj,
            Highlight {
                selected_object: false,
                selected_part: None,
                color: WHITE,
            },
        );
        let center: Vec3 = mesh.positions().sum::<Vec3>() / mesh.vertex_count() as f32;
        // +X offset swings to -Z under a quarter turn
        assert!(center.x.abs() < 1e-4);
        assert!((center.z + 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_part_volumes_follow_rotation() {
        let mut room = RoomData::empty(12.0);
        let mut obj = fixtures::chair_at("a", [6.0, 0.0, 6.0]);
        obj.parts = vec![shared::VoxelPart {
            offset: [1.0, 0.0, 0.0],
            dimensions: [1.0, 1.0, 1.0],
            color: None,
        }];
        obj.rotation = std::f64::consts::PI;
        room.objects.push(obj);

        let scene = build_scene(&room, None, None, WHITE);
        let parts = scene.part_aabbs.get("a").unwrap();
        assert_eq!(parts.len(), 1);
        // half turn puts the part at x = 5
        assert!((parts[0].center().x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_selection_changes_colors() {
        let room_obj = fixtures::chair("a");
        let plain = object_mesh(
            &room_obj,
            Highlight {
                selected_object: false,
                selected_part: None,
                color: WHITE,
            },
        );
        let selected = object_mesh(
            &room_obj,
            Highlight {
                selected_object: true,
                selected_part: None,
                color: WHITE,
            },
        );
        assert_ne!(plain.vertices, selected.vertices);
    }

    #[test]
    fn test_aabb_lines_edge_count() {
        let aabb = Aabb {
            min: Vec3::ZERO,
            max: Vec3::ONE,
        };
        let lines = aabb_lines(&aabb, [1.0; 4]);
        // 12 edges, 2 vertices each, 7 floats per vertex
        assert_eq!(lines.vertices.len(), 12 * 2 * 7);
    }
}
