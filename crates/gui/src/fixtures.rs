//! Factory functions for creating test data.
//!
//! Convenient helpers to construct `VoxelObject`, `RoomData`, and
//! marketplace listings used in unit and integration tests.

use shared::market::{ListingSource, MarketplaceListing};
use shared::{RoomData, VoxelObject, VoxelPart};

// ── Object factories ────────────────────────────────────────────

/// A small chair: seat, back, and four legs.
pub fn chair(id: &str) -> VoxelObject {
    chair_at(id, [6.0, 0.5, 6.0])
}

/// A chair at a specific position.
pub fn chair_at(id: &str, position: [f64; 3]) -> VoxelObject {
    let leg = |x: f64, z: f64| VoxelPart {
        offset: [x, -0.4, z],
        dimensions: [0.15, 0.8, 0.15],
        color: None,
    };
    VoxelObject {
        id: id.to_string(),
        name: "Chair".to_string(),
        kind: "furniture".to_string(),
        position,
        rotation: 0.0,
        color: "#b5651d".to_string(),
        description: "A wooden chair".to_string(),
        parts: vec![
            VoxelPart {
                offset: [0.0, 0.0, 0.0],
                dimensions: [1.2, 0.2, 1.2],
                color: None,
            },
            VoxelPart {
                offset: [0.0, 0.8, -0.5],
                dimensions: [1.2, 1.4, 0.2],
                color: Some("#8b4513".to_string()),
            },
            leg(-0.5, -0.5),
            leg(0.5, -0.5),
            leg(-0.5, 0.5),
            leg(0.5, 0.5),
        ],
        visible: true,
        is_user_created: true,
    }
}

/// A single-block object (the simplest possible geometry).
pub fn block(id: &str, color: &str) -> VoxelObject {
    VoxelObject {
        id: id.to_string(),
        name: "Block".to_string(),
        kind: "decor".to_string(),
        position: [6.0, 0.5, 6.0],
        rotation: 0.0,
        color: color.to_string(),
        description: String::new(),
        parts: vec![VoxelPart {
            offset: [0.0, 0.0, 0.0],
            dimensions: [1.0, 1.0, 1.0],
            color: None,
        }],
        visible: true,
        is_user_created: true,
    }
}

// ── Room factories ──────────────────────────────────────────────

/// An empty 12×12 room.
pub fn empty_room() -> RoomData {
    RoomData::empty(12.0)
}

/// A room with a few furniture pieces.
pub fn furnished_room() -> RoomData {
    let mut room = empty_room();
    room.objects.push(chair_at("chair-1", [3.0, 0.5, 3.0]));
    room.objects.push(chair_at("chair-2", [9.0, 0.5, 3.0]));
    room.objects.push(block("lamp-1", "#ffdd66"));
    room
}

// ── Marketplace factories ───────────────────────────────────────

/// A user-created listing wrapping a chair.
pub fn listing(id: &str, creator: &str, price: f64) -> MarketplaceListing {
    MarketplaceListing {
        id: id.to_string(),
        name: "Cyber Chair".to_string(),
        price,
        description: "A stylish voxel chair".to_string(),
        image_url: String::new(),
        color: "#b5651d".to_string(),
        kind: "furniture".to_string(),
        creator: creator.to_string(),
        data: chair(&format!("{id}-data")),
        created_at: 1_700_000_000_000,
        source: ListingSource::User,
    }
}
