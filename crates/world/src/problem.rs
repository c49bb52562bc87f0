//! Problem descriptors: which worlds to check and what to compare.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::world::World;

/// Which events trigger a world-snapshot comparison during checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckAfter {
    /// Compare only the final worlds after both programs terminate.
    Finish,
    /// Compare the snapshot after every beeper pick and drop.
    Beeper,
    /// Compare the snapshot after every beeper pick/drop and every move.
    BeeperMove,
}

type Generator = Arc<dyn Fn(&mut StdRng) -> World + Send + Sync>;

enum WorldSupply {
    /// An endless stream of freshly generated worlds. The count of distinct
    /// worlds is known for some problems and unknown for others.
    Random {
        generator: Generator,
        num_worlds: Option<u64>,
    },
    /// A finite enumeration, checked exhaustively.
    Exhaustive(Vec<World>),
}

/// A named exercise: its world supply and its comparison policy.
pub struct Problem {
    name: &'static str,
    story: &'static str,
    check_after: CheckAfter,
    supply: WorldSupply,
}

impl Problem {
    /// A problem whose worlds are sampled at random.
    ///
    /// `num_worlds` is the count of distinct worlds the generator can
    /// produce, or `None` when nobody has bothered to count.
    pub fn randomized(
        name: &'static str,
        story: &'static str,
        check_after: CheckAfter,
        num_worlds: Option<u64>,
        generator: impl Fn(&mut StdRng) -> World + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            story,
            check_after,
            supply: WorldSupply::Random {
                generator: Arc::new(generator),
                num_worlds,
            },
        }
    }

    /// A problem with a small, fully enumerated world set.
    ///
    /// # Panics
    ///
    /// Panics if `worlds` is empty; every problem needs at least one world.
    pub fn exhaustive(
        name: &'static str,
        story: &'static str,
        check_after: CheckAfter,
        worlds: Vec<World>,
    ) -> Self {
        assert!(!worlds.is_empty(), "problem {name} has no worlds");
        Self {
            name,
            story,
            check_after,
            supply: WorldSupply::Exhaustive(worlds),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn story(&self) -> &'static str {
        self.story
    }

    pub fn check_after(&self) -> CheckAfter {
        self.check_after
    }

    /// Whether the world supply is randomized (as opposed to exhaustively
    /// enumerated).
    pub fn is_random(&self) -> bool {
        matches!(self.supply, WorldSupply::Random { .. })
    }

    /// Total number of distinct worlds, when known.
    pub fn num_worlds(&self) -> Option<u64> {
        match &self.supply {
            WorldSupply::Random { num_worlds, .. } => *num_worlds,
            WorldSupply::Exhaustive(worlds) => Some(worlds.len() as u64),
        }
    }

    /// One sample world, for the initial display.
    pub fn random_world(&self) -> World {
        match &self.supply {
            WorldSupply::Random { generator, .. } => generator(&mut StdRng::from_entropy()),
            WorldSupply::Exhaustive(worlds) => worlds[0].clone(),
        }
    }

    /// The sequence of initial worlds a check iterates over: endless for
    /// randomized problems, one pass for exhaustive ones.
    pub fn worlds(&self) -> Box<dyn Iterator<Item = World> + Send + '_> {
        match &self.supply {
            WorldSupply::Random { generator, .. } => {
                let generator = Arc::clone(generator);
                let mut rng = StdRng::from_entropy();
                Box::new(std::iter::repeat_with(move || generator(&mut rng)))
            }
            WorldSupply::Exhaustive(worlds) => Box::new(worlds.iter().cloned()),
        }
    }
}

impl std::fmt::Debug for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Problem")
            .field("name", &self.name)
            .field("check_after", &self.check_after)
            .field("is_random", &self.is_random())
            .field("num_worlds", &self.num_worlds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use rand::Rng;

    #[test]
    fn exhaustive_supply_is_finite_and_counted() {
        let problem = Problem::exhaustive(
            "pair",
            "two worlds",
            CheckAfter::Finish,
            vec![World::empty(), World::empty().with_beeper(1, 1)],
        );
        assert!(!problem.is_random());
        assert_eq!(problem.num_worlds(), Some(2));
        assert_eq!(problem.worlds().count(), 2);
    }

    #[test]
    fn randomized_supply_is_endless() {
        let problem = Problem::randomized("endless", "", CheckAfter::Beeper, None, |rng| {
            World::empty().with_robot(rng.gen_range(0..10), 9, Direction::East)
        });
        assert!(problem.is_random());
        assert_eq!(problem.num_worlds(), None);
        assert_eq!(problem.worlds().take(100).count(), 100);
    }

    #[test]
    fn random_world_comes_from_the_generator() {
        let problem = Problem::randomized("fixed", "", CheckAfter::Finish, Some(1), |_| {
            World::empty().with_beeper(2, 2)
        });
        assert!(problem.random_world().beeper_at(2, 2));
    }

    #[test]
    #[should_panic(expected = "has no worlds")]
    fn exhaustive_requires_at_least_one_world() {
        let _ = Problem::exhaustive("empty", "", CheckAfter::Finish, vec![]);
    }
}
