//! Rover world model — grid worlds, the shared world cell, and problems.
//!
//! The interpreter consumes this crate through three types:
//!
//! - [`World`] — an immutable value: robot pose, beeper bitmap, shared wall
//!   layout. Mutators return a fresh world; forbidden actions return a
//!   [`WorldError`].
//! - [`WorldRef`] — the single mutable cell holding "the current world",
//!   shared between the interpreter and any painting context. Replacement
//!   is atomic; readers never see a half-written world.
//! - [`Problem`] — a named world supply plus the [`CheckAfter`] policy that
//!   tells the checker which events to compare.
//!
//! # Dependencies
//!
//! `thiserror` for the domain error type and `rand` for the randomized
//! world supplies.

pub mod direction;
pub mod error;
pub mod floor_plan;
pub mod problem;
pub mod problems;
pub mod world;
pub mod world_ref;

pub use direction::Direction;
pub use error::WorldError;
pub use floor_plan::{FloorPlan, HEIGHT, WIDTH};
pub use problem::{CheckAfter, Problem};
pub use world::World;
pub use world_ref::WorldRef;
