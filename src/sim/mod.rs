mod components;
mod player;
mod tic;

pub use components::InputCmd;
pub use player::{MOVE_SPEED, PlayerController, RUN_MULTIPLIER, TURN_SPEED};
pub use tic::{FrameClock, MAX_FRAME_DT, cap_dt};
