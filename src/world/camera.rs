use glam::Vec2;

/// Player view-point in world space.
///
/// * Only **yaw** is simulated; the view never tilts up/down.
/// * World +Y is north (row 0 of the map file), yaw 0 looks east, CCW positive.
/// * Written once per frame by the controller, read-only while raycasting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2, // x,y in tile units
    pub yaw: f32,  // radians (0 = east, counter-clockwise)
    pub fov: f32,  // horizontal FoV (radians)
}

impl Camera {
    /// Create a new camera at `pos`, facing `yaw`, with horizontal FoV `fov`.
    pub fn new(pos: Vec2, yaw: f32, fov: f32) -> Self {
        Self {
            pos,
            yaw: yaw.rem_euclid(std::f32::consts::TAU),
            fov,
        }
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        let (s, c) = self.yaw.sin_cos();
        Vec2::new(c, s)
    }

    /// Unit vector pointing to the camera's right (forward rotated -90°).
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        -self.forward().perp()
    }

    /// Half-width of the projection plane at unit distance: `tan(fov/2)`.
    #[inline]
    pub fn plane_scale(&self) -> f32 {
        (self.fov * 0.5).tan()
    }

    /// Camera-plane vector: `right * tan(fov/2)`.
    #[inline]
    pub fn plane(&self) -> Vec2 {
        self.right() * self.plane_scale()
    }

    /// Point `dist` units ahead of the eye; used to probe for doors.
    #[inline]
    pub fn probe(&self, dist: f32) -> Vec2 {
        self.pos + self.forward() * dist
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Rotate around Z (positive = turn left).
    pub fn turn(&mut self, delta_yaw: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    #[test]
    fn forward_and_right_are_orthonormal() {
        let cam = Camera::new(Vec2::ZERO, 0.3, FRAC_PI_3);
        let f = cam.forward();
        let r = cam.right();
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!(f.dot(r).abs() < 1e-5);
    }

    #[test]
    fn right_is_clockwise_of_forward() {
        // facing north, right is east
        let cam = Camera::new(Vec2::ZERO, FRAC_PI_2, FRAC_PI_3);
        assert!((cam.right() - Vec2::new(1.0, 0.0)).length() < 1e-5);
        // facing east, right is south
        let cam = Camera::new(Vec2::ZERO, 0.0, FRAC_PI_3);
        assert_eq!(cam.right(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn plane_scale_at_90_deg() {
        let cam = Camera::new(Vec2::ZERO, 0.0, FRAC_PI_2);
        assert!((cam.plane_scale() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn turn_wraps() {
        let mut cam = Camera::new(Vec2::ZERO, 0.1, FRAC_PI_2);
        cam.turn(-0.2);
        assert!(cam.yaw > 6.0 && cam.yaw < std::f32::consts::TAU);
    }

    #[test]
    fn probe_is_ahead() {
        let cam = Camera::new(Vec2::new(1.0, 1.0), 0.0, FRAC_PI_2);
        assert_eq!(cam.probe(0.5), Vec2::new(1.5, 1.0));
    }
}
