//! The built-in problem catalog.

use rand::Rng;

use crate::direction::Direction;
use crate::floor_plan::FloorPlan;
use crate::problem::{CheckAfter, Problem};
use crate::world::World;

/// One fixed world: walk to the beeper at (3, 9) and stop on it.
/// Only the final world counts.
pub fn first_steps() -> Problem {
    Problem::exhaustive(
        "first_steps",
        "Walk east until you stand on the beeper.",
        CheckAfter::Finish,
        vec![World::empty()
            .with_robot(0, 9, Direction::East)
            .with_beeper(3, 9)],
    )
}

/// Random beepers on the bottom row, cells 1 through 8. Pick up every
/// beeper on the way east; picks are compared one by one.
pub fn beeper_line() -> Problem {
    Problem::randomized(
        "beeper_line",
        "Sweep east and pick up every beeper on the row.",
        CheckAfter::Beeper,
        Some(256),
        |rng| {
            let mut world = World::empty().with_robot(0, 9, Direction::East);
            for x in 1..=8 {
                if rng.gen_bool(0.5) {
                    world = world.with_beeper(x, 9);
                }
            }
            world
        },
    )
}

/// The robot starts a random distance from a wall ahead; beeper at its
/// feet. Carry the beeper to the wall and drop it there. Moves and beeper
/// actions are both compared, so the route matters.
pub fn to_the_wall() -> Problem {
    Problem::randomized(
        "to_the_wall",
        "Carry your beeper east and drop it at the wall.",
        CheckAfter::BeeperMove,
        Some(8),
        |rng| {
            // wall_x == 9 means the border wall itself.
            let wall_x = rng.gen_range(2..10);
            let plan = if wall_x < 9 {
                FloorPlan::empty().with_wall(wall_x, 9, Direction::East)
            } else {
                FloorPlan::empty()
            };
            World::with_floor_plan(plan)
                .with_robot(0, 9, Direction::East)
                .with_beeper(0, 9)
        },
    )
}

/// Eight enumerated worlds, one per starting column of the beeper on the
/// bottom row. Fetch it and come back; every move is compared.
pub fn fetch_and_return() -> Problem {
    Problem::exhaustive(
        "fetch_and_return",
        "Fetch the beeper ahead of you and carry it home.",
        CheckAfter::BeeperMove,
        (1..=8)
            .map(|x| {
                World::empty()
                    .with_robot(0, 9, Direction::East)
                    .with_beeper(x, 9)
            })
            .collect(),
    )
}

/// All built-in problems, in teaching order.
pub fn all() -> Vec<Problem> {
    vec![first_steps(), beeper_line(), to_the_wall(), fetch_and_return()]
}

/// Look up a problem by name.
pub fn by_name(name: &str) -> Option<Problem> {
    all().into_iter().find(|problem| problem.name() == name)
}
