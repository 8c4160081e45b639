//! Mode transition gate
//!
//! Maps a requested mode onto the mode actually entered, or rejects it.

pub mod gate;

pub use gate::resolve;

use crate::mode::Mode;
use serde::{Deserialize, Serialize};

/// Outcome of running a request through the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Enter(Mode),
    /// No callbacks fire and timers are untouched
    NoChange,
}

impl Resolution {
    pub fn mode(self) -> Option<Mode> {
        match self {
            Resolution::Enter(mode) => Some(mode),
            Resolution::NoChange => None,
        }
    }
}
