//! Observer interfaces injected into the machine.

use rover_world::World;

/// Call/return/infinite-loop notifications.
///
/// All methods default to no-ops and are invoked synchronously during
/// interpretation. They are side-effect-only: nothing a callback does can
/// influence control flow, which keeps interpretation deterministic.
pub trait Callbacks {
    /// A CALL is about to transfer control. `caller_position` is the call
    /// site's source position; `callee_return_position` is the source
    /// position of the RETURN that will eventually match it, resolved from
    /// the precomputed table.
    fn on_call(&mut self, caller_position: usize, callee_return_position: usize) {
        let _ = (caller_position, callee_return_position);
    }

    /// A RETURN is about to transfer control back.
    fn on_return(&mut self) {}

    /// A wall-clock budget expired before the program finished.
    fn on_infinite_loop(&mut self) {}
}

/// The do-nothing callbacks.
impl Callbacks for () {}

/// World-changing event hooks, fired with the *resulting* world immediately
/// after a motion or beeper instruction executes and before the program
/// counter advances.
///
/// A hook may return an error message to veto the run: the machine stops
/// with [`crate::Stop::Vetoed`] and the current instruction still pointing
/// at the offending operation. The checker uses this to compare candidate
/// worlds against the goal trace in lock-step.
pub trait WorldObserver {
    /// The robot moved forward; `world` is the world after the move.
    fn after_move(&mut self, world: &World) -> Result<(), String> {
        let _ = world;
        Ok(())
    }

    /// The robot picked or dropped a beeper; `world` is the world after.
    fn after_beeper(&mut self, world: &World) -> Result<(), String> {
        let _ = world;
        Ok(())
    }
}

/// The do-nothing observer.
impl WorldObserver for () {}
