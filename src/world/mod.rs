pub mod camera;
pub mod doors;
pub mod faces;
pub mod grid;
pub mod level;
pub mod texture;

pub use camera::Camera;
pub use doors::{Door, DoorDef, DoorEvent, DoorSet, DoorState};
pub use faces::{Face, FaceTable, SpecialBlock};
pub use grid::{DOOR_CLOSED, EMPTY, TileCode, TileDef, TileFlags, TileGrid, TileTable};
pub use level::{Level, LevelDef, LevelError, PlayerStart};
pub use texture::{Texture, TextureBank, TextureError, TextureId};
