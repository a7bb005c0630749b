//! Rendering abstraction layer.
//!
//! *The rest of the engine never touches a pixel buffer directly.*
//! The engine casts one ray per screen column and hands the result to a
//! type that implements [`Renderer`] as a [`ColumnSpan`].
//!
//! * Back-ends can be swapped without changing the ray caster.
//! * A blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   with a precomputed span list stay short.

use crate::{
    engine::dda::Side,
    world::texture::{TextureBank, TextureId},
};

pub mod shade;
pub mod software;

pub use shade::Shading;
pub use software::Software;

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// One screen column's worth of wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSpan {
    /// Screen column.
    pub x: usize,
    /// Perpendicular distance to the wall.
    pub perp_dist: f32,
    pub side: Side,
    /// `None` draws `fallback` flat.
    pub tex_id: Option<TextureId>,
    pub tex_x: usize,
    pub fallback: Rgba,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
/// Software callers typically forward it to their window-manager.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear
    /// it to the background.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Rasterise one wall column into the internal buffer.
    fn draw_column(&mut self, span: &ColumnSpan, bank: &TextureBank);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(
        &mut self,
        width: usize,
        height: usize,
        spans: &[ColumnSpan],
        bank: &TextureBank,
        submit: F,
    ) where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        for s in spans {
            self.draw_column(s, bank);
        }
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}
