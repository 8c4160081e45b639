//! Ptarmigan
//!
//! Sits tight rather than running: detections never make it flee.

use crate::core::config::SpeciesSettings;
use crate::core::types::{ActorClass, Disposition};

pub fn settings() -> SpeciesSettings {
    SpeciesSettings {
        class: ActorClass::Prey,
        disposition: Disposition::Passive,

        max_health: 3.0,
        can_bleed_out: false,

        detection_range: 10.0,
        eye_height: 0.15,

        idle_seconds: 6.0,
        walk_speed: 0.6,
        flee_speed: 5.0,
        ..SpeciesSettings::default()
    }
}
