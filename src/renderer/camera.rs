//! Scene camera
//!
//! A perspective camera at a fixed position looking at the arena.
//! Resize events update the aspect ratio only; the position never
//! changes for the life of the session.

use glam::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::consts;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, consts::CAMERA_Z),
            fov_y: consts::CAMERA_FOV_DEG.to_radians(),
            aspect,
            near: consts::CAMERA_NEAR,
            far: consts::CAMERA_FAR,
        }
    }

    /// Aspect-only update, driven by viewport resize
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Project an NDC position onto the z = 0 world plane.
    ///
    /// Casts a ray from the camera through the NDC point and intersects
    /// it with the simulation plane. The camera looks straight down the
    /// z axis, so the ray always crosses the plane.
    pub fn unproject_to_plane(&self, ndc: Vec2) -> Vec2 {
        let inv = self.view_projection().inverse();
        let far_point: Vec4 = inv * Vec4::new(ndc.x, ndc.y, 0.5, 1.0);
        let far_point = far_point.xyz() / far_point.w;

        let dir = (far_point - self.position).normalize();
        let t = -self.position.z / dir.z;
        let hit = self.position + dir * t;
        Vec2::new(hit.x, hit.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ndc_hits_origin() {
        let camera = Camera::new(16.0 / 9.0);
        let hit = camera.unproject_to_plane(Vec2::ZERO);
        assert!(hit.length() < 1e-3, "hit = {hit:?}");
    }

    #[test]
    fn test_unproject_is_symmetric() {
        let camera = Camera::new(16.0 / 9.0);
        let right = camera.unproject_to_plane(Vec2::new(0.5, 0.0));
        let left = camera.unproject_to_plane(Vec2::new(-0.5, 0.0));
        assert!((right.x + left.x).abs() < 1e-3);
        assert!(right.x > 0.0);
    }

    #[test]
    fn test_aspect_widens_horizontal_reach() {
        let wide = Camera::new(2.0);
        let narrow = Camera::new(1.0);
        let ndc = Vec2::new(1.0, 0.0);
        assert!(wide.unproject_to_plane(ndc).x > narrow.unproject_to_plane(ndc).x);
    }

    #[test]
    fn test_resize_updates_aspect_only() {
        let mut camera = Camera::new(1.0);
        let position = camera.position;
        camera.set_aspect(1920.0, 1080.0);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-5);
        assert_eq!(camera.position, position);
    }
}
