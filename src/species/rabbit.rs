//! Snowshoe rabbit

use crate::core::config::SpeciesSettings;
use crate::core::types::{ActorClass, Disposition};

pub fn settings() -> SpeciesSettings {
    SpeciesSettings {
        class: ActorClass::Prey,
        disposition: Disposition::Ambient,

        max_health: 5.0,
        can_bleed_out: false,

        detection_range: 15.0,
        fov_half_angle_degrees: 170.0,
        eye_height: 0.2,

        base_flee_chance: 1.0,
        flee_seconds: 4.0,
        flee_clear_distance: 15.0,
        idle_seconds: 3.0,
        wander_seconds: 8.0,
        wander_pause_seconds: 2.0,

        walk_speed: 1.0,
        run_speed: 6.0,
        flee_speed: 7.0,
        ..SpeciesSettings::default()
    }
}
