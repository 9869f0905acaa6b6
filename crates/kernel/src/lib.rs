//! World Kernel: authoritative world state, entity registry, transitions and the
//! terminal-time estimate.
//!
//! # Invariants
//! - Every transition returns a new, fully independent `World`; the source is never written.
//! - The entity registry is append-only and ids follow append order starting at 1.
//! - `0 <= entropy_level <= max_entropy` and `max_entropy > 0` for every constructed world.
//! - The terminal-time estimate is total for valid worlds and lies in `0..=i64::MAX`.

pub mod census;
pub mod constants;
pub mod registry;
pub mod terminal;
pub mod transition;
pub mod world;

pub use constants::constant_table;
pub use registry::{Entity, EntityRegistry};
pub use terminal::TerminalInputs;
pub use transition::{Transition, TransitionKind};
pub use world::{GenesisConfig, World};
