//! Perception and targeting
//!
//! Actors look around on a jittered interval, pick the nearest visible
//! candidate and react when the choice changes.

pub mod detection;
pub mod reaction;
pub mod targeting;

pub use detection::{effective_range, visible_distance, within_field_of_view, Viewpoint};
pub use reaction::{flee_probability, DetectionResponse};
pub use targeting::IgnoreReason;

use crate::core::types::TargetRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerceptionState {
    /// Weak reference, resolved against the world every time it is read
    pub current_target: Option<TargetRef>,
    pub next_scan_in_seconds: f32,
    /// Set by the host to stop scanning entirely
    pub suppressed: bool,
    /// Drop the target and rescan on the next pre-process
    pub retarget_after_interrupt: bool,
}
