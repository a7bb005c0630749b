//! Grid DDA ray caster.
//!
//! One ray per screen column.  The walk steps into whichever axis crosses a
//! grid line first; on an exact tie the **Y** axis is stepped (the test is a
//! strict `side_dist.x < side_dist.y`).
//!
//! ```text
//!   u        = 2·col / W − 1                        (−1 … +1)
//!   dir      = forward + right · u · tan(fov/2)
//!   perp     = (tile − pos + (1 − step)/2) / dir     on the stepped axis
//! ```
//!
//! `perp` is measured along the forward axis, never along the ray, so walls
//! do not bulge (no fish-eye).

use glam::{IVec2, Vec2};

use crate::world::{Camera, EMPTY, TileCode, TileGrid};

/// Step distance used for a zero direction component: the other axis wins
/// every comparison and the walk cannot stall.
pub const NO_CROSSING: f32 = 1e30;

/// Grid axis whose line the ray crossed to enter the hit tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    X,
    Y,
}

/// Result of one ray; lives for a single column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub tile: IVec2,
    pub code: TileCode,
    pub side: Side,
    /// Distance along the camera forward axis.
    pub perp_dist: f32,
    /// Position along the wall face, `0.0 ..< 1.0`.
    pub wall_x: f32,
    /// Ray direction, kept for face selection and mirroring.
    pub dir: Vec2,
}

/// Camera-space offset of column `col` in a `width`-wide frame.
#[inline]
pub fn column_offset(col: usize, width: usize) -> f32 {
    2.0 * col as f32 / width as f32 - 1.0
}

/// Ray direction for column `col`.
#[inline]
pub fn ray_dir(camera: &Camera, col: usize, width: usize) -> Vec2 {
    camera.forward() + camera.plane() * column_offset(col, width)
}

/// Walk `grid` from `origin` along `dir` until a non-empty tile.
///
/// Returns `None` when the ray leaves the map first (background stays
/// visible) or when `dir` is degenerate.
pub fn cast_ray(grid: &TileGrid, origin: Vec2, dir: Vec2) -> Option<RayHit> {
    if !dir.is_finite() || dir == Vec2::ZERO || !origin.is_finite() {
        return None;
    }

    let mut tile = origin.floor().as_ivec2();

    let delta = Vec2::new(axis_delta(dir.x), axis_delta(dir.y));
    let step = IVec2::new(
        if dir.x < 0.0 { -1 } else { 1 },
        if dir.y < 0.0 { -1 } else { 1 },
    );
    let mut side_dist = Vec2::new(
        first_crossing(origin.x, tile.x, dir.x, delta.x),
        first_crossing(origin.y, tile.y, dir.y, delta.y),
    );

    // Every step moves one cell towards an edge; bounded by the map size
    // plus however far outside the origin sits.
    let outside = tile.x.unsigned_abs() as usize + tile.y.unsigned_abs() as usize;
    let max_steps = grid.width() + grid.height() + outside + 2;

    let mut side = Side::X;
    for _ in 0..max_steps {
        if side_dist.x < side_dist.y {
            side_dist.x += delta.x;
            tile.x += step.x;
            side = Side::X;
        } else {
            side_dist.y += delta.y;
            tile.y += step.y;
            side = Side::Y;
        }

        let Some(code) = grid.tile(tile.x, tile.y) else {
            // Starting outside the map and still walking inwards is fine;
            // once we are past the far edge nothing can be hit.
            if leaving(grid, tile, step) {
                return None;
            }
            continue;
        };
        if code == EMPTY {
            continue;
        }

        let perp_dist = match side {
            Side::X => (tile.x as f32 - origin.x + (1 - step.x) as f32 * 0.5) / dir.x,
            Side::Y => (tile.y as f32 - origin.y + (1 - step.y) as f32 * 0.5) / dir.y,
        };
        let along = match side {
            Side::X => origin.y + perp_dist * dir.y,
            Side::Y => origin.x + perp_dist * dir.x,
        };

        return Some(RayHit {
            tile,
            code,
            side,
            perp_dist,
            wall_x: along - along.floor(),
            dir,
        });
    }
    None
}

#[inline(always)]
fn axis_delta(d: f32) -> f32 {
    if d == 0.0 { NO_CROSSING } else { (1.0 / d).abs() }
}

#[inline(always)]
fn first_crossing(pos: f32, tile: i32, d: f32, delta: f32) -> f32 {
    if d < 0.0 {
        (pos - tile as f32) * delta
    } else {
        (tile as f32 + 1.0 - pos) * delta
    }
}

/// Outside the grid and moving away from it on the axis that left.
#[inline]
fn leaving(grid: &TileGrid, tile: IVec2, step: IVec2) -> bool {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    (tile.x < 0 && step.x < 0)
        || (tile.x >= w && step.x > 0)
        || (tile.y < 0 && step.y < 0)
        || (tile.y >= h && step.y > 0)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
