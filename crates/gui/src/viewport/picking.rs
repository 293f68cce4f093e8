use std::collections::HashMap;

use glam::Vec3;

/// A ray in world space
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box containing all points; identity-sized fallback for
    /// an empty iterator so zero-part objects stay selectable.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>, fallback_center: Vec3) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut any = false;

        for p in points {
            min = min.min(p);
            max = max.max(p);
            any = true;
        }

        if any {
            Self { min, max }
        } else {
            Self {
                min: fallback_center - Vec3::splat(0.5),
                max: fallback_center + Vec3::splat(0.5),
            }
        }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Pick the nearest object whose AABB is intersected by the ray.
pub fn pick_object(ray: &Ray, aabbs: &HashMap<String, Aabb>) -> Option<String> {
    let mut best: Option<(String, f32)> = None;

    for (id, aabb) in aabbs {
        if let Some(dist) = ray_aabb(ray, aabb) {
            if best.as_ref().is_none_or(|(_, d)| dist < *d) {
                best = Some((id.clone(), dist));
            }
        }
    }

    best.map(|(id, _)| id)
}

/// Pick the nearest part box hit by the ray within one object.
pub fn pick_part(ray: &Ray, part_aabbs: &[Aabb]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (idx, aabb) in part_aabbs.iter().enumerate() {
        if let Some(dist) = ray_aabb(ray, aabb) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((idx, dist));
            }
        }
    }

    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(center: Vec3) -> Aabb {
        Aabb {
            min: center - Vec3::splat(0.5),
            max: center + Vec3::splat(0.5),
        }
    }

    fn ray_down_at(x: f32, z: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, 10.0, z),
            direction: Vec3::NEG_Y,
        }
    }

    #[test]
    fn test_ray_hits_box() {
        let aabb = unit_box_at(Vec3::ZERO);
        let dist = ray_aabb(&ray_down_at(0.0, 0.0), &aabb).unwrap();
        assert!((dist - 9.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_box() {
        let aabb = unit_box_at(Vec3::ZERO);
        assert!(ray_aabb(&ray_down_at(2.0, 0.0), &aabb).is_none());
    }

    #[test]
    fn test_ray_behind_origin_misses() {
        let aabb = unit_box_at(Vec3::new(0.0, 20.0, 0.0));
        assert!(ray_aabb(&ray_down_at(0.0, 0.0), &aabb).is_none());
    }

    #[test]
    fn test_pick_object_nearest() {
        let mut aabbs = HashMap::new();
        aabbs.insert("low".to_string(), unit_box_at(Vec3::new(0.0, 0.0, 0.0)));
        aabbs.insert("high".to_string(), unit_box_at(Vec3::new(0.0, 5.0, 0.0)));

        let picked = pick_object(&ray_down_at(0.0, 0.0), &aabbs).unwrap();
        assert_eq!(picked, "high");
    }

    #[test]
    fn test_pick_object_none() {
        let mut aabbs = HashMap::new();
        aabbs.insert("a".to_string(), unit_box_at(Vec3::ZERO));
        assert!(pick_object(&ray_down_at(9.0, 9.0), &aabbs).is_none());
    }

    #[test]
    fn test_pick_part_nearest() {
        let parts = vec![
            unit_box_at(Vec3::new(0.0, 0.0, 0.0)),
            unit_box_at(Vec3::new(0.0, 2.0, 0.0)),
        ];
        assert_eq!(pick_part(&ray_down_at(0.0, 0.0), &parts), Some(1));
        assert_eq!(pick_part(&ray_down_at(5.0, 0.0), &parts), None);
    }

    #[test]
    fn test_from_points_fallback() {
        let aabb = Aabb::from_points(std::iter::empty(), Vec3::new(3.0, 0.5, 3.0));
        assert_eq!(aabb.center(), Vec3::new(3.0, 0.5, 3.0));
        assert_eq!(aabb.max - aabb.min, Vec3::ONE);
    }
}
