pub mod dda;
#[allow(clippy::module_inception)]
pub mod engine;
pub mod types;
pub mod walls;

pub use dda::{RayHit, Side, cast_ray, ray_dir};
pub use engine::Engine;
pub use types::Screen;
pub use walls::{WallFace, resolve_face};
