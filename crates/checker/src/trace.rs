//! World-trace recording and lock-step comparison.

use std::collections::VecDeque;

use rover_vm::WorldObserver;
use rover_world::{CheckAfter, World};

use crate::error::GoalMismatch;

/// Collects the policy-selected world snapshots while the goal program
/// runs.
pub struct TraceRecorder {
    check_after: CheckAfter,
    worlds: Vec<World>,
}

impl TraceRecorder {
    pub fn new(check_after: CheckAfter) -> Self {
        Self {
            check_after,
            worlds: Vec::new(),
        }
    }

    /// Append the goal's final world — only meaningful under
    /// [`CheckAfter::Finish`], where it is the single compared snapshot.
    pub fn push_final(&mut self, world: World) {
        self.worlds.push(world);
    }

    pub fn into_worlds(self) -> Vec<World> {
        self.worlds
    }
}

impl WorldObserver for TraceRecorder {
    fn after_move(&mut self, world: &World) -> Result<(), String> {
        if self.check_after == CheckAfter::BeeperMove {
            self.worlds.push(world.clone());
        }
        Ok(())
    }

    fn after_beeper(&mut self, world: &World) -> Result<(), String> {
        if self.check_after != CheckAfter::Finish {
            self.worlds.push(world.clone());
        }
        Ok(())
    }
}

/// Consumes a recorded goal trace one snapshot at a time while the
/// candidate runs, vetoing the run at the first divergence.
pub struct TraceComparer {
    check_after: CheckAfter,
    remaining: VecDeque<World>,
}

impl TraceComparer {
    pub fn new(check_after: CheckAfter, goal_worlds: Vec<World>) -> Self {
        Self {
            check_after,
            remaining: goal_worlds.into(),
        }
    }

    fn consume(&mut self, world: &World) -> Result<(), String> {
        let Some(expected) = self.remaining.pop_front() else {
            return Err(GoalMismatch::Overshoots.to_string());
        };
        if !expected.equals_ignoring_direction(world) {
            return Err(GoalMismatch::Deviates.to_string());
        }
        Ok(())
    }

    /// Take the next unconsumed goal snapshot, for the final comparison
    /// under [`CheckAfter::Finish`].
    pub fn take_next(&mut self) -> Option<World> {
        self.remaining.pop_front()
    }

    /// Whether every goal snapshot has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl WorldObserver for TraceComparer {
    fn after_move(&mut self, world: &World) -> Result<(), String> {
        if self.check_after == CheckAfter::BeeperMove {
            self.consume(world)?;
        }
        Ok(())
    }

    fn after_beeper(&mut self, world: &World) -> Result<(), String> {
        if self.check_after != CheckAfter::Finish {
            self.consume(world)?;
        }
        Ok(())
    }
}
