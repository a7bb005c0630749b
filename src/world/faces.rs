use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::world::texture::TextureId;

/// Cardinal face of a tile, named after the direction it looks at.
///
/// World +Y is north, +X is east.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    North,
    South,
    West,
    East,
}

/// A tile whose texture depends on which side it is seen from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialBlock {
    pub x: i32,
    pub y: i32,
    pub north: TextureId,
    pub south: TextureId,
    pub west: TextureId,
    pub east: TextureId,
}

impl SpecialBlock {
    #[inline]
    pub fn texture(&self, face: Face) -> TextureId {
        match face {
            Face::North => self.north,
            Face::South => self.south,
            Face::West => self.west,
            Face::East => self.east,
        }
    }
}

/// Static lookup table; never mutated after the level is built.
///
/// Maps only hold a handful of these, so a linear scan keyed on the tile
/// coordinate is the whole index.
#[derive(Debug, Clone, Default)]
pub struct FaceTable {
    blocks: SmallVec<[SpecialBlock; 4]>,
}

impl FaceTable {
    pub fn new(blocks: impl IntoIterator<Item = SpecialBlock>) -> Self {
        Self {
            blocks: blocks.into_iter().collect(),
        }
    }

    #[inline]
    pub fn lookup(&self, x: i32, y: i32) -> Option<&SpecialBlock> {
        self.blocks.iter().find(|b| b.x == x && b.y == y)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecialBlock> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
