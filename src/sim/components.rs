/// One frame of sampled input, already mapped from keys to axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f32,  // –1 … +1  (back / forward)
    pub strafe: f32,   // –1 … +1  (left / right)
    pub turn: f32,     // –1 … +1  (right / left)
    pub run: bool,     // Shift
    pub use_act: bool, // Space / E, raw level (edge-detected by the doors)
}

impl InputCmd {
    /// Axis value from a pair of opposing keys.
    #[inline]
    pub fn axis(pos: bool, neg: bool) -> f32 {
        match (pos, neg) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}
