//! Wall face resolution: which texture a hit shows and which texel column.

use crate::{
    engine::dda::{RayHit, Side},
    world::{Face, FaceTable, TextureBank, TextureId, TileTable},
};

/// Everything the column renderer needs to know about the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallFace {
    pub face: Face,
    /// Slot to sample; `None` = draw `fallback` flat.
    pub tex_id: Option<TextureId>,
    /// Texel column inside the texture (0 when flat).
    pub tex_x: usize,
    pub fallback: u32,
}

/// Face of the hit tile that the ray struck.
///
/// A ray travelling east (+X) meets the tile's west face, one travelling
/// north (+Y) meets its south face, and so on.
#[inline]
pub fn struck_face(hit: &RayHit) -> Face {
    match hit.side {
        Side::X if hit.dir.x > 0.0 => Face::West,
        Side::X => Face::East,
        Side::Y if hit.dir.y > 0.0 => Face::South,
        Side::Y => Face::North,
    }
}

/// Texel column for `wall_x` on a `tex_w`-wide texture.
///
/// Clamped to the texture, then mirrored on west and north faces so that
/// `u` grows from left to right on screen whichever face is visible.
#[inline]
pub fn texture_column(wall_x: f32, tex_w: usize, face: Face) -> usize {
    if tex_w == 0 {
        return 0;
    }
    let u = ((wall_x * tex_w as f32) as isize).clamp(0, tex_w as isize - 1) as usize;
    match face {
        Face::West | Face::North => tex_w - u - 1,
        Face::East | Face::South => u,
    }
}

/// Pick the texture for `hit` and the texel column to sample.
///
/// Special blocks override the per-code texture; a slot that is out of
/// range or was never loaded degrades to the tile's flat colour.
pub fn resolve_face(
    hit: &RayHit,
    tiles: &TileTable,
    faces: &FaceTable,
    bank: &TextureBank,
) -> WallFace {
    let face = struck_face(hit);
    let fallback = tiles.fallback(hit.code);

    let slot = match faces.lookup(hit.tile.x, hit.tile.y) {
        Some(block) => Some(block.texture(face)),
        None => tiles.texture(hit.code),
    };

    match slot.and_then(|id| bank.get(id).map(|t| (id, t))) {
        Some((id, tex)) => WallFace {
            face,
            tex_id: Some(id),
            tex_x: texture_column(hit.wall_x, tex.w, face),
            fallback,
        },
        None => WallFace {
            face,
            tex_id: None,
            tex_x: 0,
            fallback,
        },
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
