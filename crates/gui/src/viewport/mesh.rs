use glam::Vec3;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append an axis-aligned box centered at `center`.
    pub fn push_box(&mut self, center: Vec3, dims: Vec3, color: [f32; 3]) {
        let h = dims * 0.5;

        let faces: [([Vec3; 4], Vec3); 6] = [
            // Front (+Z)
            (
                [
                    Vec3::new(-h.x, -h.y, h.z),
                    Vec3::new(h.x, -h.y, h.z),
                    Vec3::new(h.x, h.y, h.z),
                    Vec3::new(-h.x, h.y, h.z),
                ],
                Vec3::Z,
            ),
            // Back (-Z)
            (
                [
                    Vec3::new(h.x, -h.y, -h.z),
                    Vec3::new(-h.x, -h.y, -h.z),
                    Vec3::new(-h.x, h.y, -h.z),
                    Vec3::new(h.x, h.y, -h.z),
                ],
                Vec3::NEG_Z,
            ),
            // Right (+X)
            (
                [
                    Vec3::new(h.x, -h.y, h.z),
                    Vec3::new(h.x, -h.y, -h.z),
                    Vec3::new(h.x, h.y, -h.z),
                    Vec3::new(h.x, h.y, h.z),
                ],
                Vec3::X,
            ),
            // Left (-X)
            (
                [
                    Vec3::new(-h.x, -h.y, -h.z),
                    Vec3::new(-h.x, -h.y, h.z),
                    Vec3::new(-h.x, h.y, h.z),
                    Vec3::new(-h.x, h.y, -h.z),
                ],
                Vec3::NEG_X,
            ),
            // Top (+Y)
            (
                [
                    Vec3::new(-h.x, h.y, h.z),
                    Vec3::new(h.x, h.y, h.z),
                    Vec3::new(h.x, h.y, -h.z),
                    Vec3::new(-h.x, h.y, -h.z),
                ],
                Vec3::Y,
            ),
            // Bottom (-Y)
            (
                [
                    Vec3::new(-h.x, -h.y, -h.z),
                    Vec3::new(h.x, -h.y, -h.z),
                    Vec3::new(h.x, -h.y, h.z),
                    Vec3::new(-h.x, -h.y, h.z),
                ],
                Vec3::NEG_Y,
            ),
        ];

        for (quad, normal) in &faces {
            let base = (self.vertices.len() / 9) as u32;
            for v in quad {
                let p = *v + center;
                self.vertices.extend_from_slice(&[
                    p.x, p.y, p.z, normal.x, normal.y, normal.z, color[0], color[1], color[2],
                ]);
            }
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    /// Rotate all vertices (positions and normals) around the Y axis,
    /// then translate. Used to bake an object's transform into its mesh.
    pub fn rotate_y_translate(&mut self, angle: f32, translation: Vec3) {
        let (sin, cos) = angle.sin_cos();
        for v in self.vertices.chunks_exact_mut(9) {
            let (px, pz) = (v[0], v[2]);
            v[0] = px * cos + pz * sin + translation.x;
            v[1] += translation.y;
            v[2] = -px * sin + pz * cos + translation.z;

            let (nx, nz) = (v[3], v[5]);
            v[3] = nx * cos + nz * sin;
            v[5] = -nx * sin + nz * cos;
        }
    }

    /// All vertex positions (for bounding volume computation)
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(9)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Clone, Default)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn push_line(&mut self, from: Vec3, to: Vec3, color: [f32; 4]) {
        self.vertices.extend_from_slice(&[
            from.x, from.y, from.z, color[0], color[1], color[2], color[3],
        ]);
        self.vertices
            .extend_from_slice(&[to.x, to.y, to.z, color[0], color[1], color[2], color[3]]);
    }
}
