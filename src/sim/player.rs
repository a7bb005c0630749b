//! Player movement against the tile grid.
//!
//! Per frame, in order:
//!  1. forward/back candidate along the view direction,
//!  2. rotation (never blocked),
//!  3. strafe candidate along the right vector.
//!
//! A candidate landing in a blocked point is dropped whole; there is no
//! sliding along walls.

use glam::Vec2;

use crate::{
    sim::InputCmd,
    world::{Camera, TileGrid},
};

pub const MOVE_SPEED: f32 = 3.0; // tiles / second
pub const TURN_SPEED: f32 = 2.0; // rad / second
pub const RUN_MULTIPLIER: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerController {
    pub move_speed: f32,
    pub turn_speed: f32,
    pub run_multiplier: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            turn_speed: TURN_SPEED,
            run_multiplier: RUN_MULTIPLIER,
        }
    }
}

impl PlayerController {
    /// Integrate `cmd` over `dt` seconds.
    ///
    /// Returns `true` when at least one move candidate was rejected.
    pub fn apply(&self, camera: &mut Camera, cmd: &InputCmd, dt: f32, grid: &TileGrid) -> bool {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let run = if cmd.run { self.run_multiplier } else { 1.0 };
        let speed = self.move_speed * run * dt;

        let mut bumped = false;

        let forward = cmd.forward.clamp(-1.0, 1.0);
        if forward != 0.0 {
            bumped |= !try_move(camera, camera.forward() * forward * speed, grid);
        }

        let turn = cmd.turn.clamp(-1.0, 1.0);
        if turn != 0.0 {
            camera.turn(turn * self.turn_speed * dt);
        }

        let strafe = cmd.strafe.clamp(-1.0, 1.0);
        if strafe != 0.0 {
            bumped |= !try_move(camera, camera.right() * strafe * speed, grid);
        }

        bumped
    }
}

/// Commit `camera.pos + delta` unless the target is blocked.
#[inline]
fn try_move(camera: &mut Camera, delta: Vec2, grid: &TileGrid) -> bool {
    let target = camera.pos + delta;
    if grid.is_blocked(target.x, target.y) {
        return false;
    }
    camera.pos = target;
    true
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
