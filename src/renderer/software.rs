//! ---------------------------------------------------------------------------
//! Software (CPU) column renderer
//!
//! * Fills an internal `Vec<u32>` frame-buffer in **0xAARRGGBB** format.
//! * Upper half is cleared to sky, lower half to ground; walls are drawn
//!   over it one column at a time, so no Z-buffer is needed.
//! * Wall height is `screen_h / d` (projection plane at unit distance),
//!   centred on the horizontal midline.
//! ---------------------------------------------------------------------------

use crate::{
    renderer::{
        ColumnSpan, Renderer, Rgba,
        shade::{Shading, shade},
    },
    world::texture::{Texture, TextureBank},
};

/// Distances below this are clamped before projecting.
pub const MIN_DIST: f32 = 1e-3;

pub const DEFAULT_SKY: Rgba = 0xFF_87CEEB;
pub const DEFAULT_GROUND: Rgba = 0xFF_3A3A3A;

/// On-screen height in pixels of a wall at perpendicular distance `d`.
///
/// Strictly decreasing in `d`; finite for `d <= 0` or NaN.
#[inline]
pub fn wall_height(d: f32, screen_h: usize) -> f32 {
    screen_h as f32 / d.max(MIN_DIST)
}

/// Unclipped first and last row of a wall `wall_h` pixels tall.
#[inline]
pub fn column_extent(wall_h: f32, screen_h: usize) -> (i32, i32) {
    let mid = (screen_h / 2) as i32;
    let half = (wall_h * 0.5) as i32;
    (mid - half, mid + half)
}

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
    pub shading: Shading,
    pub sky: Rgba,
    pub ground: Rgba,
}

impl Default for Software {
    fn default() -> Self {
        Self::new(Shading::default(), DEFAULT_SKY, DEFAULT_GROUND)
    }
}

impl Software {
    pub fn new(shading: Shading, sky: Rgba, ground: Rgba) -> Self {
        Self {
            scratch: Vec::new(),
            width: 0,
            height: 0,
            shading,
            sky,
            ground,
        }
    }

    /// Finished pixels of the current frame (row-major).
    pub fn pixels(&self) -> &[Rgba] {
        &self.scratch
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.scratch[y * self.width + x]
    }

    fn clear_background(&mut self) {
        let split = (self.height / 2) * self.width;
        let (sky, ground) = self.scratch.split_at_mut(split);
        sky.fill(self.sky);
        ground.fill(self.ground);
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.clear_background();
    }

    fn draw_column(&mut self, span: &ColumnSpan, bank: &TextureBank) {
        if span.x >= self.width || self.height == 0 {
            return;
        }
        let wall_h = wall_height(span.perp_dist, self.height);
        let (y0, y1) = column_extent(wall_h, self.height);
        let top = y0.max(0);
        let bot = y1.min(self.height as i32 - 1);
        if top > bot {
            return;
        }

        let f = self.shading.factor(span.perp_dist, span.side);
        match span.tex_id.and_then(|id| bank.get(id)) {
            Some(tex) => self.textured_column(span, tex, f, wall_h, y0, top, bot),
            None => {
                let c = shade(span.fallback, f);
                for y in top..=bot {
                    self.scratch[y as usize * self.width + span.x] = c;
                }
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────── column rendering ───────────────────────────*/

impl Software {
    /// Sample one texel column top to bottom.
    ///
    /// The first visible row starts `(top - y0)` rows into the wall, so a
    /// wall taller than the screen stays anchored to its true centre.
    #[allow(clippy::too_many_arguments)]
    fn textured_column(
        &mut self,
        span: &ColumnSpan,
        tex: &Texture,
        f: f32,
        wall_h: f32,
        y0: i32,
        top: i32,
        bot: i32,
    ) {
        let u = span.tex_x.min(tex.w - 1);
        let step = tex.h as f32 / wall_h;
        let th = tex.h as i64;

        for y in top..=bot {
            let v = (((y - y0) as f32 * step) as i64).rem_euclid(th) as usize;
            self.scratch[y as usize * self.width + span.x] = shade(tex.texel(u, v), f);
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
