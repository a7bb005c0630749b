//! Distance and side shading.
//!
//! One model for every pixel the column renderer writes, textured or flat:
//!
//! ```text
//!   light(d)  = max(1 / (1 + d·k), min_light)
//!   factor    = light(d) · (y_side_factor if Y-side else 1)
//! ```
//!
//! RGB is scaled by `factor`, alpha is passed through. `min_light` floors
//! the distance term only, so a far Y-side wall bottoms out at
//! `min_light · y_side_factor`.

use serde::{Deserialize, Serialize};

use crate::{engine::dda::Side, renderer::Rgba};

/// Shading tunables.
///
/// The floor is applied before the side factor: the darkest X-side pixel is
/// `min_light`, the darkest Y-side pixel is `min_light * y_side_factor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shading {
    /// Falloff constant `k`.
    pub falloff: f32,
    /// Floor of the distance term.
    pub min_light: f32,
    /// Extra multiplier for walls hit on a Y-side.
    pub y_side_factor: f32,
}

impl Default for Shading {
    fn default() -> Self {
        Self {
            falloff: 0.15,
            min_light: 0.25,
            y_side_factor: 0.5,
        }
    }
}

impl Shading {
    /// Distance term, in `[min_light, 1]` for non-negative `d`.
    #[inline]
    pub fn light(&self, d: f32) -> f32 {
        let l = 1.0 / (1.0 + d.max(0.0) * self.falloff);
        if l.is_nan() { self.min_light } else { l.max(self.min_light) }
    }

    /// Total factor for a wall at `d` hit on `side`.
    #[inline]
    pub fn factor(&self, d: f32, side: Side) -> f32 {
        let s = match side {
            Side::X => 1.0,
            Side::Y => self.y_side_factor,
        };
        self.light(d) * s
    }
}

/// Scale the RGB channels of `color` by `f` (clamped to `0..=1`).
#[inline]
pub fn shade(color: Rgba, f: f32) -> Rgba {
    let f = f.clamp(0.0, 1.0);
    let a = color & 0xFF00_0000;
    let ch = |shift: u32| ((((color >> shift) & 0xFF) as f32 * f) as u32) << shift;
    a | ch(16) | ch(8) | ch(0)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
