use glam::{Mat4, Vec3, Vec4};

use super::picking::Ray;

/// Eye distance from the target. Fixed: an orthographic projection only
/// changes apparent size through `half_height`.
const EYE_DISTANCE: f32 = 120.0;

/// Orbit camera with an orthographic projection
pub struct OrbitCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians)
    pub pitch: f32,
    /// Half of the vertical view extent in world units (zoom)
    pub half_height: f32,
    /// Camera target point
    pub target: Vec3,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            // an isometric-ish diagonal view into the room corner
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: 0.62,
            half_height: 9.0,
            target: Vec3::new(6.0, 1.0, 6.0),
        }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        // keep above the floor plane, matching the source viewer's
        // polar-angle clamp
        self.pitch = (self.pitch + dy.to_radians()).clamp(0.02, 1.5);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.half_height = (self.half_height * (1.0 - delta)).clamp(1.0, 60.0);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right_vector();
        let up = self.up_vector();
        self.target += right * dx + up * dy;
    }

    /// Aim at the center of a w×d room
    pub fn focus_room(&mut self, width: f32, depth: f32) {
        self.target = Vec3::new(width / 2.0, 1.0, depth / 2.0);
        self.half_height = (width.max(depth) * 0.75).clamp(1.0, 60.0);
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + Vec3::new(
                EYE_DISTANCE * cp * sy,
                EYE_DISTANCE * sp,
                EYE_DISTANCE * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Orthographic projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let half_w = self.half_height * aspect;
        Mat4::orthographic_rh_gl(
            -half_w,
            half_w,
            -self.half_height,
            self.half_height,
            0.1,
            400.0,
        )
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        let right = self.right_vector();
        right.cross(fwd).normalize_or_zero()
    }

    /// Cast a ray from a screen position into the scene. Unprojects the
    /// near and far clip points, so it is valid for the orthographic
    /// projection (ray origin moves with the cursor, direction is the
    /// view direction).
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let aspect = rect.width() / rect.height();

        // Screen → NDC
        let ndc_x = (screen_pos.x - rect.center().x) / (rect.width() * 0.5);
        let ndc_y = -(screen_pos.y - rect.center().y) / (rect.height() * 0.5);

        let vp_inv = self.view_projection(aspect).inverse();

        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray {
            origin: near,
            direction: (far - near).normalize_or_zero(),
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
