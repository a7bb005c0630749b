//! Door state machine.
//!
//! Each door is a single tile toggling between `Open` and `Closed`.  The
//! set is the **only** writer of the tile grid at runtime: a toggle flips
//! the door and rewrites its cell (code + collision mask) in one go.
//!
//! Triggers are edge-detected: holding the use key toggles exactly once.

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::world::grid::{DOOR_CLOSED, EMPTY, TileCode, TileGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    Open,
    Closed,
}

impl DoorState {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            DoorState::Open => DoorState::Closed,
            DoorState::Closed => DoorState::Open,
        }
    }

    /// Code the grid holds while the door is in this state.
    #[inline]
    fn tile_code(self, closed_code: TileCode) -> TileCode {
        match self {
            DoorState::Open => EMPTY,
            DoorState::Closed => closed_code,
        }
    }
}

/// Serialised form of a door inside a level file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorDef {
    pub x: i32,
    pub y: i32,
    #[serde(default = "closed_by_default")]
    pub closed: bool,
}

fn closed_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Door {
    pub x: i32,
    pub y: i32,
    pub state: DoorState,
}

impl Door {
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == DoorState::Closed
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    #[inline]
    fn contains(&self, p: Vec2) -> bool {
        p.x.floor() as i32 == self.x && p.y.floor() as i32 == self.y
    }
}

/// What one call to [`DoorSet::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEvent {
    Opened { x: i32, y: i32 },
    Closed { x: i32, y: i32 },
    /// Close refused because the occupant stands in the doorway.
    Blocked { x: i32, y: i32 },
}

/// All doors of a level plus the edge-detection latch.
#[derive(Debug, Clone)]
pub struct DoorSet {
    doors: SmallVec<[Door; 8]>,
    closed_code: TileCode,
    use_radius: f32,
    use_was_held: bool,
}

impl DoorSet {
    /// Doors interact within `use_radius` world units of their tile centre.
    pub fn new(use_radius: f32) -> Self {
        Self {
            doors: SmallVec::new(),
            closed_code: DOOR_CLOSED,
            use_radius,
            use_was_held: false,
        }
    }

    /// Override the code written for closed doors (custom tile tables).
    pub fn with_closed_code(mut self, code: TileCode) -> Self {
        self.closed_code = code;
        self
    }

    /// Register a door and write its initial state into `grid`.
    pub fn add(&mut self, grid: &mut TileGrid, x: i32, y: i32, state: DoorState) {
        grid.set_tile(x, y, state.tile_code(self.closed_code));
        self.doors.push(Door { x, y, state });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter()
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Door> {
        self.doors.iter().find(|d| d.x == x && d.y == y)
    }

    /// Feed one frame of input.
    ///
    /// * `use_held` – raw level of the interaction key this frame.
    /// * `probe` – point just in front of the player.
    /// * `occupant` – player position, a door never closes on it.
    ///
    /// Only a rising edge of `use_held` can toggle, and at most the single
    /// nearest door within range.
    pub fn update(
        &mut self,
        use_held: bool,
        probe: Vec2,
        occupant: Vec2,
        grid: &mut TileGrid,
    ) -> Option<DoorEvent> {
        let rising = use_held && !self.use_was_held;
        self.use_was_held = use_held;
        if !rising {
            return None;
        }
        let idx = self.nearest_in_range(probe)?;
        self.toggle_index(idx, occupant, grid)
    }

    /// Toggle the door at (x, y) directly, bypassing proximity and edge
    /// detection.
    pub fn toggle_at(
        &mut self,
        x: i32,
        y: i32,
        occupant: Vec2,
        grid: &mut TileGrid,
    ) -> Option<DoorEvent> {
        let idx = self.doors.iter().position(|d| d.x == x && d.y == y)?;
        self.toggle_index(idx, occupant, grid)
    }

    fn nearest_in_range(&self, probe: Vec2) -> Option<usize> {
        let r2 = self.use_radius * self.use_radius;
        self.doors
            .iter()
            .enumerate()
            .map(|(i, d)| (i, d.center().distance_squared(probe)))
            .filter(|&(_, d2)| d2 <= r2)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn toggle_index(
        &mut self,
        idx: usize,
        occupant: Vec2,
        grid: &mut TileGrid,
    ) -> Option<DoorEvent> {
        let door = &mut self.doors[idx];
        let (x, y) = (door.x, door.y);

        if door.state == DoorState::Open && door.contains(occupant) {
            debug!("door ({x},{y}) blocked by occupant, stays open");
            return Some(DoorEvent::Blocked { x, y });
        }

        door.state = door.state.flipped();
        grid.set_tile(x, y, door.state.tile_code(self.closed_code));
        debug!("door ({x},{y}) -> {:?}", door.state);

        Some(match door.state {
            DoorState::Open => DoorEvent::Opened { x, y },
            DoorState::Closed => DoorEvent::Closed { x, y },
        })
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
