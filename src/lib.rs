//! Wildlife AI - per-tick behavior for simulated wildlife actors
//!
//! Each actor runs a guarded state machine: perception picks targets, the
//! transition gate decides which requested modes are actually entered,
//! hold-ground stimuli and the health model can force transitions, and
//! species hooks may intercept any step.

pub mod actor;
pub mod core;
pub mod health;
pub mod hold_ground;
pub mod lifecycle;
pub mod mode;
pub mod perception;
pub mod species;
pub mod transition;
pub mod world;

pub use crate::actor::{Actor, SpawnContext};
pub use crate::core::{Result, SettingsCatalog, SimulationClock, SpeciesSettings, WildlifeError};
pub use crate::mode::{FleeReason, Mode};
pub use crate::world::TickContext;
