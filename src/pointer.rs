//! Pointer state
//!
//! The latest pointer position in NDC and its projection onto the
//! simulation plane. Pointer events are coalesced: each update
//! overwrites the previous one, and the scheduler reads whatever is
//! current once per tick.

use glam::Vec2;

use crate::renderer::Camera;
use crate::screen_to_ndc;

#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    /// Normalized device coordinates, [-1, 1]²
    pub ndc: Vec2,
    /// Projection onto the z = 0 world plane
    pub world: Vec2,
}

impl PointerState {
    /// Record a pointer position given in screen pixels.
    pub fn update(&mut self, x: f32, y: f32, width: f32, height: f32, camera: &Camera) {
        self.ndc = screen_to_ndc(x, y, width, height);
        self.world = camera.unproject_to_plane(self.ndc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_screen_maps_to_world_origin() {
        let camera = Camera::new(800.0 / 600.0);
        let mut pointer = PointerState::default();
        pointer.update(400.0, 300.0, 800.0, 600.0, &camera);
        assert!(pointer.world.length() < 1e-3, "world = {:?}", pointer.world);
    }

    #[test]
    fn test_pointer_updates_are_coalesced() {
        let camera = Camera::new(1.0);
        let mut pointer = PointerState::default();
        pointer.update(10.0, 10.0, 800.0, 600.0, &camera);
        let first = pointer.world;
        pointer.update(700.0, 500.0, 800.0, 600.0, &camera);
        assert_ne!(pointer.world, first);
    }

    #[test]
    fn test_right_of_center_is_positive_x() {
        let camera = Camera::new(800.0 / 600.0);
        let mut pointer = PointerState::default();
        pointer.update(700.0, 300.0, 800.0, 600.0, &camera);
        assert!(pointer.world.x > 0.0);
        assert!(pointer.world.y.abs() < 1e-3);
    }
}
