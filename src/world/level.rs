//! Level description (RON on disk) and its validated runtime form.

use std::{collections::BTreeMap, fs, path::Path};

use glam::Vec2;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::{
    doors::{DoorDef, DoorSet, DoorState},
    faces::{FaceTable, SpecialBlock},
    grid::{DOOR_CLOSED, TileCode, TileGrid, TileTable},
    texture::TextureId,
};

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum LevelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("level parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("level serialise error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("level grid is empty")]
    EmptyGrid,

    #[error("row {row} has {got} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("door at ({x},{y}) lies outside the {w}x{h} grid")]
    DoorOutOfBounds { x: i32, y: i32, w: usize, h: usize },

    #[error("door listed twice at ({x},{y})")]
    DuplicateDoor { x: i32, y: i32 },

    #[error("door code {0} is not flagged DOOR in the tile table")]
    NotADoorCode(TileCode),

    #[error("special block at ({x},{y}) lies outside the {w}x{h} grid")]
    BlockOutOfBounds { x: i32, y: i32, w: usize, h: usize },

    #[error("player start ({x},{y}) is inside a wall or outside the map")]
    StartBlocked { x: f32, y: f32 },
}

/*──────────────────────────── file format ──────────────────────────*/

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStart {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub yaw_deg: f32,
}

/// Everything a level file may contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    #[serde(default)]
    pub name: String,
    /// Row-major tile codes; the first row is the top (highest world Y).
    pub rows: Vec<Vec<TileCode>>,
    #[serde(default)]
    pub tiles: TileTable,
    /// Code written for closed doors.
    #[serde(default = "default_door_code")]
    pub door_code: TileCode,
    #[serde(default)]
    pub doors: Vec<DoorDef>,
    #[serde(default)]
    pub special_blocks: Vec<SpecialBlock>,
    pub player: PlayerStart,
    /// Texture slot → image path, relative to the asset directory.
    #[serde(default)]
    pub textures: BTreeMap<TextureId, String>,
}

fn default_door_code() -> TileCode {
    DOOR_CLOSED
}

impl LevelDef {
    /// Load a level description from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse a RON string (embedded levels, tests).
    pub fn from_ron(s: &str) -> Result<Self, LevelError> {
        Ok(ron::from_str(s)?)
    }

    pub fn to_ron(&self) -> Result<String, LevelError> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// The stock 15×15 map: four side rooms behind doors, a central
    /// corridor and a south hall with a pillar showing a different
    /// texture on each face.
    pub fn builtin() -> Self {
        #[rustfmt::skip]
        let rows: Vec<Vec<TileCode>> = [
            [1,1,1,1,1,1,1,0,1,1,1,1,1,1,1],
            [1,0,0,0,0,1,0,0,0,1,0,0,0,0,1],
            [1,0,0,0,0,5,0,0,0,5,0,0,0,0,1],
            [1,0,0,0,0,1,0,0,0,1,0,0,0,0,1],
            [1,0,0,0,0,1,0,0,0,1,0,0,0,0,1],
            [1,3,2,2,2,4,0,0,0,1,1,1,1,1,1],
            [1,0,0,0,0,1,0,0,0,1,0,0,0,0,1],
            [1,0,0,0,0,5,0,0,0,5,0,0,0,0,1],
            [1,0,0,0,0,1,0,0,0,1,0,0,0,0,1],
            [1,1,1,1,1,1,0,0,0,1,1,1,1,1,1],
            [1,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
            [1,0,0,0,0,0,0,4,0,0,0,0,0,0,1],
            [1,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
            [1,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
            [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
        ]
        .iter()
        .map(|r| r.to_vec())
        .collect();

        let doors = [(5, 12), (9, 12), (5, 7), (9, 7)]
            .into_iter()
            .map(|(x, y)| DoorDef { x, y, closed: true })
            .collect();

        let textures = [
            (1, "bluestone.png"),
            (2, "redbrick.png"),
            (3, "wood.png"),
            (4, "greystone.png"),
            (5, "door.png"),
            (6, "sign_north.png"),
            (7, "sign_south.png"),
        ]
        .into_iter()
        .map(|(slot, path)| (slot, path.to_string()))
        .collect();

        LevelDef {
            name: "builtin".into(),
            rows,
            tiles: TileTable::default(),
            door_code: DOOR_CLOSED,
            doors,
            // free-standing pillar in the south hall
            special_blocks: vec![SpecialBlock {
                x: 7,
                y: 3,
                north: 6,
                south: 7,
                west: 3,
                east: 2,
            }],
            player: PlayerStart {
                x: 1.5,
                y: 7.5,
                yaw_deg: 0.0,
            },
            textures,
        }
    }
}

/*──────────────────────────── runtime form ─────────────────────────*/

/// Grid, tile table, doors and face overrides of the running map.
///
/// The grid is only ever mutated through [`Level::doors_mut`]-driven
/// toggles, which happen between frames.
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    grid: TileGrid,
    tiles: TileTable,
    doors: DoorSet,
    faces: FaceTable,
    start: PlayerStart,
}

impl Level {
    /// Validate `def` and build the runtime level.
    pub fn from_def(def: &LevelDef, door_use_radius: f32) -> Result<Self, LevelError> {
        let expected = def.rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(LevelError::EmptyGrid);
        }
        if let Some((row, r)) = def
            .rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != expected)
        {
            return Err(LevelError::RaggedRow {
                row,
                expected,
                got: r.len(),
            });
        }
        let mut grid = TileGrid::from_rows(&def.rows).ok_or(LevelError::EmptyGrid)?;
        let (w, h) = (grid.width(), grid.height());

        if !def.doors.is_empty() && !def.tiles.is_door(def.door_code) {
            return Err(LevelError::NotADoorCode(def.door_code));
        }

        let mut doors = DoorSet::new(door_use_radius).with_closed_code(def.door_code);
        for d in &def.doors {
            if !grid.in_bounds(d.x, d.y) {
                return Err(LevelError::DoorOutOfBounds { x: d.x, y: d.y, w, h });
            }
            if doors.get(d.x, d.y).is_some() {
                return Err(LevelError::DuplicateDoor { x: d.x, y: d.y });
            }
            let state = if d.closed {
                DoorState::Closed
            } else {
                DoorState::Open
            };
            doors.add(&mut grid, d.x, d.y, state);
        }

        if let Some(b) = def
            .special_blocks
            .iter()
            .find(|b| !grid.in_bounds(b.x, b.y))
        {
            return Err(LevelError::BlockOutOfBounds { x: b.x, y: b.y, w, h });
        }
        let faces = FaceTable::new(def.special_blocks.iter().copied());

        let start = def.player;
        if grid.is_blocked(start.x, start.y) {
            return Err(LevelError::StartBlocked {
                x: start.x,
                y: start.y,
            });
        }

        info!(
            "level `{}`: {w}x{h}, {} doors, {} special blocks",
            def.name,
            doors.len(),
            faces.len()
        );

        Ok(Self {
            name: def.name.clone(),
            grid,
            tiles: def.tiles.clone(),
            doors,
            faces,
            start,
        })
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    #[inline]
    pub fn tiles(&self) -> &TileTable {
        &self.tiles
    }

    #[inline]
    pub fn faces(&self) -> &FaceTable {
        &self.faces
    }

    #[inline]
    pub fn doors(&self) -> &DoorSet {
        &self.doors
    }

    /// Doors and the grid they write, borrowed together.
    #[inline]
    pub fn doors_mut(&mut self) -> (&mut DoorSet, &mut TileGrid) {
        (&mut self.doors, &mut self.grid)
    }

    pub fn start_pos(&self) -> Vec2 {
        Vec2::new(self.start.x, self.start.y)
    }

    pub fn start_yaw(&self) -> f32 {
        self.start.yaw_deg.to_radians()
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::grid::EMPTY;

    #[test]
    fn builtin_level_builds() {
        let level = Level::from_def(&LevelDef::builtin(), 1.2).unwrap();
        let g = level.grid();
        assert_eq!((g.width(), g.height()), (15, 15));
        assert_eq!(level.doors().len(), 4);
        // the door east of the start room, written as closed
        assert_eq!(g.tile(5, 7), Some(DOOR_CLOSED));
        assert!(!g.is_blocked(1.5, 7.5));
        assert_eq!(g.tile(7, 14), Some(EMPTY));
        assert!(level.faces().lookup(7, 3).is_some());
        assert_eq!(g.tile(7, 3), Some(4));
    }

    #[test]
    fn ron_round_trip_keeps_definition() {
        let def = LevelDef::builtin();
        let text = def.to_ron().unwrap();
        let back = LevelDef::from_ron(&text).unwrap();
        assert_eq!(back, def);
    }

    #[test]
    fn minimal_ron_uses_defaults() {
        let def = LevelDef::from_ron(
            r#"(
                rows: [[1,1,1],[1,0,1],[1,1,1]],
                player: (x: 1.5, y: 1.5),
            )"#,
        )
        .unwrap();
        assert_eq!(def.door_code, DOOR_CLOSED);
        assert!(def.doors.is_empty());
        assert_eq!(def.tiles, TileTable::default());
        let level = Level::from_def(&def, 1.2).unwrap();
        assert_eq!(level.start_yaw(), 0.0);
    }

    #[test]
    fn validation_errors() {
        let mut def = LevelDef::builtin();
        def.rows[3].pop();
        assert!(matches!(
            Level::from_def(&def, 1.2),
            Err(LevelError::RaggedRow { row: 3, .. })
        ));

        let mut def = LevelDef::builtin();
        def.doors.push(DoorDef {
            x: 40,
            y: 1,
            closed: true,
        });
        assert!(matches!(
            Level::from_def(&def, 1.2),
            Err(LevelError::DoorOutOfBounds { x: 40, .. })
        ));

        let mut def = LevelDef::builtin();
        def.doors.push(def.doors[0]);
        assert!(matches!(
            Level::from_def(&def, 1.2),
            Err(LevelError::DuplicateDoor { .. })
        ));

        let mut def = LevelDef::builtin();
        def.door_code = 2;
        assert!(matches!(
            Level::from_def(&def, 1.2),
            Err(LevelError::NotADoorCode(2))
        ));

        let mut def = LevelDef::builtin();
        def.player.x = 0.5;
        assert!(matches!(
            Level::from_def(&def, 1.2),
            Err(LevelError::StartBlocked { .. })
        ));

        let mut def = LevelDef::builtin();
        def.rows.clear();
        assert!(matches!(
            Level::from_def(&def, 1.2),
            Err(LevelError::EmptyGrid)
        ));
    }
}
