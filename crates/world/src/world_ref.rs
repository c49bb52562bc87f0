//! The shared cell holding "the current world".

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::WorldError;
use crate::world::World;

/// An atomically replaceable cell holding the current world.
///
/// Exactly one component writes at a time (the interpreter during a run,
/// the checker between runs); any number of readers may sample the current
/// value for painting or inspection. Readers see a stale-but-consistent
/// snapshot, never a partially updated one: the whole value is replaced
/// under the lock and handed out by clone.
#[derive(Debug, Clone)]
pub struct WorldRef {
    cell: Arc<RwLock<World>>,
}

impl WorldRef {
    pub fn new(world: World) -> Self {
        Self {
            cell: Arc::new(RwLock::new(world)),
        }
    }

    /// A snapshot of the current world.
    pub fn get(&self) -> World {
        self.cell
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current world wholesale.
    pub fn set(&self, world: World) {
        *self.cell.write().unwrap_or_else(PoisonError::into_inner) = world;
    }

    fn replace_with<F>(&self, op: F) -> Result<World, WorldError>
    where
        F: FnOnce(&World) -> Result<World, WorldError>,
    {
        let next = op(&self.get())?;
        self.set(next.clone());
        Ok(next)
    }

    /// Move the robot forward, replacing the cell and returning the
    /// resulting world.
    pub fn move_forward(&self) -> Result<World, WorldError> {
        self.replace_with(World::move_forward)
    }

    pub fn turn_left(&self) -> World {
        let next = self.get().turn_left();
        self.set(next.clone());
        next
    }

    pub fn turn_around(&self) -> World {
        let next = self.get().turn_around();
        self.set(next.clone());
        next
    }

    pub fn turn_right(&self) -> World {
        let next = self.get().turn_right();
        self.set(next.clone());
        next
    }

    pub fn pick_beeper(&self) -> Result<World, WorldError> {
        self.replace_with(World::pick_beeper)
    }

    pub fn drop_beeper(&self) -> Result<World, WorldError> {
        self.replace_with(World::drop_beeper)
    }

    /// World-editor hook: flip the beeper at `(x, y)`.
    pub fn toggle_beeper(&self, x: usize, y: usize) {
        let next = self.get().toggle_beeper(x, y);
        self.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use std::thread;

    #[test]
    fn mutators_replace_the_cell() {
        let world_ref = WorldRef::new(World::empty().with_robot(0, 9, Direction::East));
        let returned = world_ref.move_forward().unwrap();
        assert_eq!(returned.x(), 1);
        assert_eq!(world_ref.get().x(), 1);
    }

    #[test]
    fn failed_mutator_leaves_the_cell_untouched() {
        let world_ref = WorldRef::new(World::empty().with_robot(9, 9, Direction::East));
        assert_eq!(world_ref.move_forward(), Err(WorldError::BlockedByWall));
        assert_eq!(world_ref.get().x(), 9);
    }

    #[test]
    fn clones_share_the_cell() {
        let world_ref = WorldRef::new(World::empty());
        let alias = world_ref.clone();
        world_ref.toggle_beeper(4, 4);
        assert!(alias.get().beeper_at(4, 4));
    }

    #[test]
    fn concurrent_reader_sees_consistent_snapshots() {
        let world_ref = WorldRef::new(World::empty().with_robot(0, 9, Direction::East));
        let reader = world_ref.clone();

        let handle = thread::spawn(move || {
            // Every snapshot must be internally consistent: the robot is
            // always somewhere on row 9 in this scenario.
            for _ in 0..1000 {
                let world = reader.get();
                assert_eq!(world.y(), 9);
                assert!(world.x() < 10);
            }
        });

        for _ in 0..9 {
            world_ref.move_forward().unwrap();
        }
        handle.join().unwrap();
    }
}
