use std::collections::HashMap;

use shared::RoomData;

use crate::viewport::mesh::MeshData;

/// GLB magic number: "glTF"
const GLB_MAGIC: u32 = 0x46546C67;
/// GLB version 2
const GLB_VERSION: u32 = 2;
/// JSON chunk type
const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
/// BIN chunk type
const CHUNK_TYPE_BIN: u32 = 0x004E4942;

/// glTF component types
const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;

/// glTF buffer view targets
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

// ── Room JSON ────────────────────────────────────────────────

/// Serialize a room to the on-disk JSON format (identical to the wire
/// shape, so export → import round-trips losslessly).
pub fn room_to_json(room: &RoomData) -> String {
    serde_json::to_string_pretty(room).unwrap_or_default()
}

/// Parse a room from exported JSON.
pub fn room_from_json(json: &str) -> Result<RoomData, String> {
    serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))
}

// ── GLB ──────────────────────────────────────────────────────

/// Build a complete GLB (binary glTF) file from mesh data.
///
/// Each entry in `meshes` becomes a separate node/mesh in the glTF
/// scene, with positions, normals, and per-vertex COLOR_0 extracted
/// from the interleaved vertex layout.
pub fn build_glb(meshes: &HashMap<String, MeshData>) -> Vec<u8> {
    if meshes.is_empty() {
        return Vec::new();
    }

    // Sort mesh keys for deterministic output
    let mut keys: Vec<&String> = meshes.keys().collect();
    keys.sort();

    // ── Phase 1: Build binary buffer ─────────────────────────
    let mut bin_data: Vec<u8> = Vec::new();

    struct MeshMeta {
        name: String,
        vertex_count: usize,
        index_count: usize,
        pos_offset: usize,
        pos_length: usize,
        norm_offset: usize,
        norm_length: usize,
        color_offset: usize,
        color_length: usize,
        idx_offset: usize,
        idx_length: usize,
        pos_min: [f32; 3],
        pos_max: [f32; 3],
    }

    let mut metas: Vec<MeshMeta> = Vec::new();

    for key in &keys {
        let mesh = &meshes[*key];
        let vertex_count = mesh.vertex_count();
        let index_count = mesh.indices.len();

        if vertex_count == 0 || index_count == 0 {
            continue;
        }

        // Deinterleave [px py pz nx ny nz r g b] × vertex_count
        let mut positions: Vec<f32> = Vec::with_capacity(vertex_count * 3);
        let mut normals: Vec<f32> = Vec::with_capacity(vertex_count * 3);
        let mut colors: Vec<f32> = Vec::with_capacity(vertex_count * 3);
        let mut pos_min = [f32::MAX; 3];
        let mut pos_max = [f32::MIN; 3];

        for v in mesh.vertices.chunks_exact(9) {
            positions.extend_from_slice(&v[0..3]);
            normals.extend_from_slice(&v[3..6]);
            colors.extend_from_slice(&v[6..9]);

            for axis in 0..3 {
                pos_min[axis] = pos_min[axis].min(v[axis]);
                pos_max[axis] = pos_max[axis].max(v[axis]);
            }
        }

        let pos_offset = bin_data.len();
        let pos_bytes = floats_to_bytes(&positions);
        let pos_length = pos_bytes.len();
        bin_data.extend_from_slice(&pos_bytes);

        let norm_offset = bin_data.len();
        let norm_bytes = floats_to_bytes(&normals);
        let norm_length = norm_bytes.len();
        bin_data.extend_from_slice(&norm_bytes);

        let color_offset = bin_data.len();
        let color_bytes = floats_to_bytes(&colors);
        let color_length = color_bytes.len();
        bin_data.extend_from_slice(&color_bytes);

        let idx_offset = bin_data.len();
        let idx_bytes = u32s_to_bytes(&mesh.indices);
        let idx_length = idx_bytes.len();
        bin_data.extend_from_slice(&idx_bytes);

        // Pad to 4-byte alignment
        while bin_data.len() % 4 != 0 {
            bin_data.push(0);
        }

        metas.push(MeshMeta {
            name: (*key).clone(),
            vertex_count,
            index_count,
            pos_offset,
            pos_length,
            norm_offset,
            norm_length,
            color_offset,
            color_length,
            idx_offset,
            idx_length,
            pos_min,
            pos_max,
        });
    }

    if metas.is_empty() {
        return Vec::new();
    }

    // ── Phase 2: Build glTF JSON ─────────────────────────────
    // 4 bufferViews/accessors per mesh: positions, normals, colors, indices
    let mut accessors = Vec::new();
    let mut buffer_views = Vec::new();
    let mut gltf_meshes = Vec::new();
    let mut nodes = Vec::new();
    let mut node_indices: Vec<usize> = Vec::new();

    for (i, meta) in metas.iter().enumerate() {
        let bv_base = i * 4;
        let acc_base = i * 4;

        buffer_views.push(serde_json::json!({
            "buffer": 0,
            "byteOffset": meta.pos_offset,
            "byteLength": meta.pos_length,
            "target": ARRAY_BUFFER
        }));
        buffer_views.push(serde_json::json!({
            "buffer": 0,
            "byteOffset": meta.norm_offset,
            "byteLength": meta.norm_length,
            "target": ARRAY_BUFFER
        }));
        buffer_views.push(serde_json::json!({
            "buffer": 0,
            "byteOffset": meta.color_offset,
            "byteLength": meta.color_length,
            "target": ARRAY_BUFFER
        }));
        buffer_views.push(serde_json::json!({
            "buffer": 0,
            "byteOffset": meta.idx_offset,
            "byteLength": meta.idx_length,
            "target": ELEMENT_ARRAY_BUFFER
        }));

        accessors.push(serde_json::json!({
            "bufferView": bv_base,
            "byteOffset": 0,
            "componentType": FLOAT,
            "count": meta.vertex_count,
            "type": "VEC3",
            "min": [meta.pos_min[0], meta.pos_min[1], meta.pos_min[2]],
            "max": [meta.pos_max[0], meta.pos_max[1], meta.pos_max[2]]
        }));
        accessors.push(serde_json::json!({
            "bufferView": bv_base + 1,
            "byteOffset": 0,
            "componentType": FLOAT,
            "count": meta.vertex_count,
            "type": "VEC3"
        }));
        accessors.push(serde_json::json!({
            "bufferView": bv_base + 2,
            "byteOffset": 0,
            "componentType": FLOAT,
            "count": meta.vertex_count,
            "type": "VEC3"
        }));
        accessors.push(serde_json::json!({
            "bufferView": bv_base + 3,
            "byteOffset": 0,
            "componentType": UNSIGNED_INT,
            "count": meta.index_count,
            "type": "SCALAR"
        }));

        gltf_meshes.push(serde_json::json!({
            "name": meta.name,
            "primitives": [{
                "attributes": {
                    "POSITION": acc_base,
                    "NORMAL": acc_base + 1,
                    "COLOR_0": acc_base + 2
                },
                "indices": acc_base + 3,
                "material": 0
            }]
        }));

        nodes.push(serde_json::json!({
            "name": meta.name,
            "mesh": i
        }));
        node_indices.push(i);
    }

    let gltf_json = serde_json::json!({
        "asset": {
            "version": "2.0",
            "generator": "voxelroom v0.1"
        },
        "scene": 0,
        "scenes": [{
            "name": "Room",
            "nodes": node_indices
        }],
        "nodes": nodes,
        "meshes": gltf_meshes,
        "accessors": accessors,
        "bufferViews": buffer_views,
        "buffers": [{
            "byteLength": bin_data.len()
        }],
        "materials": [{
            "name": "Voxel",
            "pbrMetallicRoughness": {
                "baseColorFactor": [1.0, 1.0, 1.0, 1.0],
                "metallicFactor": 0.1,
                "roughnessFactor": 0.6
            }
        }]
    });

    let json_str = serde_json::to_string(&gltf_json).unwrap_or_default();
    let mut json_bytes = json_str.into_bytes();

    // Pad JSON to 4-byte alignment with spaces (per GLB spec)
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    // Pad BIN to 4-byte alignment with zeros (per GLB spec)
    while bin_data.len() % 4 != 0 {
        bin_data.push(0);
    }

    // ── Phase 3: Assemble GLB ────────────────────────────────
    let json_chunk_length = json_bytes.len() as u32;
    let bin_chunk_length = bin_data.len() as u32;

    let total_length: u32 = 12 // header
        + 8 + json_chunk_length  // JSON chunk header + data
        + 8 + bin_chunk_length; // BIN chunk header + data

    let mut glb = Vec::with_capacity(total_length as usize);

    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&total_length.to_le_bytes());

    glb.extend_from_slice(&json_chunk_length.to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_JSON.to_le_bytes());
    glb.extend_from_slice(&json_bytes);

    glb.extend_from_slice(&bin_chunk_length.to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_BIN.to_le_bytes());
    glb.extend_from_slice(&bin_data);

    glb
}

fn floats_to_bytes(data: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() * 4);
    for &f in data {
        bytes.extend_from_slice(&f.to_le_bytes());
    }
    bytes
}

fn u32s_to_bytes(data: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() * 4);
    for &v in data {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use glam::Vec3;

    #[test]
    fn test_room_json_roundtrip_is_deep_equal() {
        let mut room = RoomData::empty(12.0);
        room.objects.push(fixtures::chair("a"));
        room.objects.push(fixtures::chair_at("b", [2.0, 0.0, 3.0]));

        let json = room_to_json(&room);
        let back = room_from_json(&json).unwrap();
        assert_eq!(room, back);
    }

    #[test]
    fn test_room_from_json_rejects_garbage() {
        assert!(room_from_json("not json").is_err());
        assert!(room_from_json("[1,2,3]").is_err());
    }

    #[test]
    fn test_glb_empty() {
        assert!(build_glb(&HashMap::new()).is_empty());
    }

    #[test]
    fn test_glb_header_and_chunks() {
        let mut meshes = HashMap::new();
        let mut mesh = MeshData::default();
        mesh.push_box(Vec3::ZERO, Vec3::ONE, [0.8, 0.2, 0.2]);
        meshes.insert("box".to_string(), mesh);

        let glb = build_glb(&meshes);
        assert!(!glb.is_empty());

        // "glTF" magic, version 2
        assert_eq!(&glb[0..4], b"glTF");
        assert_eq!(u32::from_le_bytes(glb[4..8].try_into().unwrap()), 2);
        // declared total length matches
        let total = u32::from_le_bytes(glb[8..12].try_into().unwrap());
        assert_eq!(total as usize, glb.len());
        // first chunk is JSON
        assert_eq!(&glb[16..20], b"JSON");

        // JSON chunk mentions the color attribute
        let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
        let json = std::str::from_utf8(&glb[20..20 + json_len]).unwrap();
        assert!(json.contains("COLOR_0"));
        assert!(json.contains(r#""name":"box""#));
    }

    #[test]
    fn test_glb_skips_empty_meshes() {
        let mut meshes = HashMap::new();
        meshes.insert("empty".to_string(), MeshData::default());
        assert!(build_glb(&meshes).is_empty());
    }
}
