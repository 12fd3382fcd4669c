//! # dwarves_engine
//!
//! The core engine for a toy dwarf-mining simulation: a fixed square grid of
//! mined/unmined cells and a set of dwarves that autonomously pick the nearest
//! unmined cell, walk to a standing spot beside it, and mine it, forever.
//!
//! The simulation itself is a pure transition over immutable [`Snapshot`]s;
//! [`Game`] wraps it for timer-driven drivers.

pub mod game;
pub use game::Game;
pub use game::GameState;
pub use game::StateDwarf;

pub mod simulation;
pub use simulation::Snapshot;

pub mod entities;
pub use entities::Dwarf;

pub mod map;
pub use map::Cell;
pub use map::Grid;
pub use map::Point;
pub use map::DEFAULT_GRID_SIZE;

pub mod search;
pub use search::find_nearest;

mod replay;
