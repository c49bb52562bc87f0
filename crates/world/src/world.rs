//! The immutable world value: robot, beepers, walls.

use std::fmt;
use std::sync::Arc;

use crate::direction::Direction;
use crate::error::WorldError;
use crate::floor_plan::{FloorPlan, HEIGHT, WIDTH};

/// A snapshot of the robot world.
///
/// `World` is a value: every mutator returns a new world and leaves the
/// receiver untouched. Cloning is cheap — the wall layout is shared behind
/// an `Arc`, beepers are a bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    floor_plan: Arc<FloorPlan>,
    beepers: u128,
    x: usize,
    y: usize,
    direction: Direction,
}

fn cell(x: usize, y: usize) -> u128 {
    1 << (y * WIDTH + x)
}

impl World {
    /// An empty world: no beepers, bare floor plan, robot in the southwest
    /// corner facing east.
    pub fn empty() -> Self {
        Self::with_floor_plan(FloorPlan::empty())
    }

    /// A beeper-free world over the given plan, robot in the southwest
    /// corner facing east.
    pub fn with_floor_plan(floor_plan: FloorPlan) -> Self {
        Self {
            floor_plan: Arc::new(floor_plan),
            beepers: 0,
            x: 0,
            y: HEIGHT - 1,
            direction: Direction::East,
        }
    }

    /// The same world with the robot placed at `(x, y)` facing `direction`.
    pub fn with_robot(mut self, x: usize, y: usize, direction: Direction) -> Self {
        assert!(x < WIDTH && y < HEIGHT, "robot position ({x}, {y}) off the grid");
        self.x = x;
        self.y = y;
        self.direction = direction;
        self
    }

    /// The same world with a beeper added at `(x, y)`.
    pub fn with_beeper(mut self, x: usize, y: usize) -> Self {
        self.beepers |= cell(x, y);
        self
    }

    /// The same world with the beeper at `(x, y)` flipped. This is the
    /// world-editor operation; programs pick and drop instead.
    pub fn toggle_beeper(mut self, x: usize, y: usize) -> Self {
        self.beepers ^= cell(x, y);
        self
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn beeper_at(&self, x: usize, y: usize) -> bool {
        self.beepers & cell(x, y) != 0
    }

    pub fn beeper_count(&self) -> u32 {
        self.beepers.count_ones()
    }

    // ---- mutators ----

    /// Move one cell forward.
    pub fn move_forward(&self) -> Result<World, WorldError> {
        if !self.front_is_clear() {
            return Err(WorldError::BlockedByWall);
        }
        let (dx, dy) = self.direction.delta();
        let mut next = self.clone();
        next.x = (self.x as i32 + dx) as usize;
        next.y = (self.y as i32 + dy) as usize;
        Ok(next)
    }

    pub fn turn_left(&self) -> World {
        let mut next = self.clone();
        next.direction = self.direction.to_left();
        next
    }

    pub fn turn_around(&self) -> World {
        let mut next = self.clone();
        next.direction = self.direction.opposite();
        next
    }

    pub fn turn_right(&self) -> World {
        let mut next = self.clone();
        next.direction = self.direction.to_right();
        next
    }

    /// Pick the beeper under the robot.
    pub fn pick_beeper(&self) -> Result<World, WorldError> {
        if !self.on_beeper() {
            return Err(WorldError::NoBeeper);
        }
        let mut next = self.clone();
        next.beepers &= !cell(self.x, self.y);
        Ok(next)
    }

    /// Drop a beeper under the robot.
    pub fn drop_beeper(&self) -> Result<World, WorldError> {
        if self.on_beeper() {
            return Err(WorldError::BeeperAlreadyHere);
        }
        let mut next = self.clone();
        next.beepers |= cell(self.x, self.y);
        Ok(next)
    }

    // ---- sensors ----

    pub fn on_beeper(&self) -> bool {
        self.beeper_at(self.x, self.y)
    }

    /// Whether the neighboring cell ahead holds a beeper. Walls do not
    /// block the sensor; cells beyond the grid read as empty.
    pub fn beeper_ahead(&self) -> bool {
        let (dx, dy) = self.direction.delta();
        let nx = self.x as i32 + dx;
        let ny = self.y as i32 + dy;
        (0..WIDTH as i32).contains(&nx)
            && (0..HEIGHT as i32).contains(&ny)
            && self.beeper_at(nx as usize, ny as usize)
    }

    pub fn left_is_clear(&self) -> bool {
        !self.floor_plan.wall(self.x, self.y, self.direction.to_left())
    }

    pub fn front_is_clear(&self) -> bool {
        !self.floor_plan.wall(self.x, self.y, self.direction)
    }

    pub fn right_is_clear(&self) -> bool {
        !self.floor_plan.wall(self.x, self.y, self.direction.to_right())
    }

    /// Position and beeper-layout equality, disregarding which way the
    /// robot faces. Goal verification uses this so a check is not sensitive
    /// to facing after the compared event.
    pub fn equals_ignoring_direction(&self, other: &World) -> bool {
        self.x == other.x && self.y == other.y && self.beepers == other.beepers
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let glyph = if x == self.x && y == self.y {
                    self.direction.arrow()
                } else if self.beeper_at(x, y) {
                    'o'
                } else {
                    '.'
                };
                f.write_fmt(format_args!("{glyph}"))?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
