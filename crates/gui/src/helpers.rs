//! Common helper functions for object and color handling
//!
//! This module provides shared utilities to avoid code duplication
//! across the viewport, panels, and state modules.

use std::f64::consts::TAU;

/// Parse a "#rrggbb" (or "#rgb") hex color into linear-ish RGB floats.
/// Unparsable input falls back to mid grey so a bad LLM color never
/// breaks rendering.
pub fn parse_hex_color(hex: &str) -> [f32; 3] {
    let s = hex.trim().trim_start_matches('#');

    let (r, g, b) = match s.len() {
        3 => (
            u8::from_str_radix(&s[0..1].repeat(2), 16),
            u8::from_str_radix(&s[1..2].repeat(2), 16),
            u8::from_str_radix(&s[2..3].repeat(2), 16),
        ),
        6 => (
            u8::from_str_radix(&s[0..2], 16),
            u8::from_str_radix(&s[2..4], 16),
            u8::from_str_radix(&s[4..6], 16),
        ),
        _ => return [0.5, 0.5, 0.5],
    };

    match (r, g, b) {
        (Ok(r), Ok(g), Ok(b)) => [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0],
        _ => [0.5, 0.5, 0.5],
    }
}

/// Hex color to egui Color32 (for swatches in panels).
pub fn hex_to_color32(hex: &str) -> egui::Color32 {
    let [r, g, b] = parse_hex_color(hex);
    egui::Color32::from_rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Normalize an angle into [0, 2π).
pub fn normalize_rotation(angle: f64) -> f64 {
    let wrapped = angle % TAU;
    if wrapped < 0.0 {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Milliseconds since the Unix epoch. Object ids concatenate this with a
/// role prefix; collisions are accepted, matching the source data model.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Id for an object generated from a photo into the toolbox.
pub fn toolbox_id() -> String {
    format!("toolbox-{}", now_millis())
}

/// Id for a room object copied into the toolbox.
pub fn saved_asset_id() -> String {
    format!("tb-{}", now_millis())
}

/// Id for a toolbox/marketplace object placed into the room.
pub fn placed_id() -> String {
    format!("placed-{}", now_millis())
}

/// Id for the idx-th object of an analyzed room photo.
pub fn room_object_id(idx: usize) -> String {
    format!("room-obj-{idx}-{}", now_millis())
}

/// Id for the idx-th object added by a decorate patch.
pub fn ai_added_id(idx: usize) -> String {
    format!("ai-add-{}-{idx}", now_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffffff"), [1.0, 1.0, 1.0]);
        assert_eq!(parse_hex_color("#000000"), [0.0, 0.0, 0.0]);
        let [r, g, b] = parse_hex_color("#ff8000");
        assert!((r - 1.0).abs() < 1e-6);
        assert!((g - 0.501_96).abs() < 1e-3);
        assert!(b.abs() < 1e-6);
    }

    #[test]
    fn test_parse_hex_color_short_form() {
        assert_eq!(parse_hex_color("#fff"), [1.0, 1.0, 1.0]);
        assert_eq!(parse_hex_color("#f00"), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_parse_hex_color_garbage_falls_back() {
        assert_eq!(parse_hex_color("teal"), [0.5, 0.5, 0.5]);
        assert_eq!(parse_hex_color(""), [0.5, 0.5, 0.5]);
        assert_eq!(parse_hex_color("#zzzzzz"), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(0.0), 0.0);
        assert!((normalize_rotation(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((normalize_rotation(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
        assert_eq!(normalize_rotation(TAU), 0.0);
    }

    #[test]
    fn test_id_prefixes() {
        assert!(toolbox_id().starts_with("toolbox-"));
        assert!(saved_asset_id().starts_with("tb-"));
        assert!(placed_id().starts_with("placed-"));
        assert!(room_object_id(3).starts_with("room-obj-3-"));
        assert!(ai_added_id(0).starts_with("ai-add-"));
    }
}
