//! Tile grid + collision mask.
//!
//! Storage is row-major with row 0 being the **top** of the map, i.e. the
//! highest world Y.  Every lookup goes through [`TileGrid::storage_index`],
//! which applies `row = height - 1 - y`.
//!
//! The code → behaviour mapping lives in a declared [`TileTable`] instead of
//! being scattered around as magic numbers.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::world::texture::TextureId;

/// Raw per-cell code as stored in level files.
pub type TileCode = u8;

/// Passable, invisible cell.
pub const EMPTY: TileCode = 0;

/// Code written by the door state machine for a closed door.
pub const DOOR_CLOSED: TileCode = 5;

/// Flat colour for codes missing from the table.
pub const UNKNOWN_FALLBACK: u32 = 0xFF_FFFFFF;

bitflags! {
    /// Static properties of a tile code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct TileFlags: u8 {
        /// Blocks rays and movement.
        const SOLID = 0x01;
        /// Closed-door visual; only the door state machine writes it.
        const DOOR  = 0x02;
    }
}

/// What a single tile code means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDef {
    pub flags: TileFlags,
    /// Texture slot, `None` = always flat colour.
    #[serde(default)]
    pub texture: Option<TextureId>,
    /// ARGB colour used when the texture is missing.
    pub fallback: u32,
}

impl TileDef {
    pub const fn wall(texture: TextureId, fallback: u32) -> Self {
        Self {
            flags: TileFlags::SOLID,
            texture: Some(texture),
            fallback,
        }
    }
}

/// Declared code → [`TileDef`] table, indexed by code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileTable(pub Vec<TileDef>);

impl Default for TileTable {
    fn default() -> Self {
        TileTable(vec![
            TileDef {
                flags: TileFlags::empty(),
                texture: None,
                fallback: 0,
            },
            TileDef::wall(1, 0xFF_5555FF),
            TileDef::wall(2, 0xFF_55FF55),
            TileDef::wall(3, 0xFF_FF5555),
            TileDef::wall(4, 0xFF_FFFF55),
            TileDef {
                flags: TileFlags::SOLID | TileFlags::DOOR,
                texture: Some(5),
                fallback: 0xFF_8B5A2B,
            },
        ])
    }
}

impl TileTable {
    #[inline]
    pub fn get(&self, code: TileCode) -> Option<&TileDef> {
        self.0.get(code as usize)
    }

    /// Texture slot for `code`; `None` for unknown codes or flat-only tiles.
    #[inline]
    pub fn texture(&self, code: TileCode) -> Option<TextureId> {
        self.get(code).and_then(|d| d.texture)
    }

    /// Flat colour for `code`; unknown codes render white.
    #[inline]
    pub fn fallback(&self, code: TileCode) -> u32 {
        self.get(code).map_or(UNKNOWN_FALLBACK, |d| d.fallback)
    }

    pub fn is_door(&self, code: TileCode) -> bool {
        self.get(code)
            .is_some_and(|d| d.flags.contains(TileFlags::DOOR))
    }
}

/// Fixed-size tile map plus the derived collision mask.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileCode>,
    solid: Vec<bool>,
}

impl TileGrid {
    /// Build from top-to-bottom rows. All rows must share one length.
    ///
    /// Returns `None` for an empty or ragged map; [`crate::world::Level`]
    /// turns that into a proper error.
    pub fn from_rows(rows: &[Vec<TileCode>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let tiles: Vec<TileCode> = rows.iter().flatten().copied().collect();
        let solid = tiles.iter().map(|&c| c != EMPTY).collect();
        Some(Self {
            width,
            height,
            tiles,
            solid,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// World (x, y) → index into the row-major storage (Y inverted).
    #[inline(always)]
    fn storage_index(&self, x: i32, y: i32) -> usize {
        (self.height - 1 - y as usize) * self.width + x as usize
    }

    /// Tile code at world cell (x, y); `None` outside the map.
    #[inline]
    pub fn tile(&self, x: i32, y: i32) -> Option<TileCode> {
        self.in_bounds(x, y)
            .then(|| self.tiles[self.storage_index(x, y)])
    }

    /// Collision mask at world cell (x, y); outside counts as blocked.
    #[inline]
    pub fn cell_blocked(&self, x: i32, y: i32) -> bool {
        !self.in_bounds(x, y) || self.solid[self.storage_index(x, y)]
    }

    /// Is the continuous point (x, y) inside a wall, a closed door or
    /// outside the map?
    #[inline]
    pub fn is_blocked(&self, x: f32, y: f32) -> bool {
        // NaN compares false everywhere, so it lands out of bounds too.
        if !(x.is_finite() && y.is_finite()) {
            return true;
        }
        self.cell_blocked(x.floor() as i32, y.floor() as i32)
    }

    /// Overwrite one cell and keep the mask in sync.
    ///
    /// Only the door state machine calls this, and only between frames.
    pub(crate) fn set_tile(&mut self, x: i32, y: i32, code: TileCode) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.storage_index(x, y);
        self.tiles[idx] = code;
        self.solid[idx] = code != EMPTY;
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TileGrid {
        // top row is world y = 2
        TileGrid::from_rows(&[vec![1, 1, 1], vec![0, 0, 5], vec![0, 2, 0]]).unwrap()
    }

    #[test]
    fn y_axis_is_inverted() {
        let g = grid();
        assert_eq!(g.tile(0, 2), Some(1));
        assert_eq!(g.tile(1, 0), Some(2));
        assert_eq!(g.tile(2, 1), Some(5));
        assert_eq!(g.tile(0, 0), Some(0));
    }

    #[test]
    fn empty_cells_pass_everything_else_blocks() {
        let g = grid();
        for y in 0..3 {
            for x in 0..3 {
                let code = g.tile(x, y).unwrap();
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                assert_eq!(g.is_blocked(px, py), code != EMPTY, "cell ({x},{y})");
            }
        }
    }

    #[test]
    fn outside_is_blocked() {
        let g = grid();
        for (x, y) in [(-0.5, 0.5), (0.5, -0.01), (3.0, 0.5), (0.5, 3.2), (-10.0, -10.0)] {
            assert!(g.is_blocked(x, y), "({x},{y}) should be blocked");
        }
        assert!(g.is_blocked(f32::NAN, 0.5));
        assert!(g.cell_blocked(-1, 0));
        assert_eq!(g.tile(3, 0), None);
    }

    #[test]
    fn set_tile_keeps_mask_in_sync() {
        let mut g = grid();
        g.set_tile(2, 1, EMPTY);
        assert!(!g.is_blocked(2.5, 1.5));
        g.set_tile(2, 1, DOOR_CLOSED);
        assert!(g.is_blocked(2.5, 1.5));
        // out of range writes are ignored
        g.set_tile(7, 7, 1);
    }

    #[test]
    fn ragged_or_empty_rows_rejected() {
        assert!(TileGrid::from_rows(&[]).is_none());
        assert!(TileGrid::from_rows(&[vec![]]).is_none());
        assert!(TileGrid::from_rows(&[vec![0, 0], vec![0]]).is_none());
    }

    #[test]
    fn default_table_lookups() {
        let t = TileTable::default();
        assert_eq!(t.texture(3), Some(3));
        assert_eq!(t.texture(EMPTY), None);
        assert!(t.is_door(DOOR_CLOSED));
        assert!(!t.is_door(1));
        assert_eq!(t.fallback(200), UNKNOWN_FALLBACK);
        assert_eq!(t.texture(200), None);
    }
}
