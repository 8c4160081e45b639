//! White-tailed deer

use crate::core::config::SpeciesSettings;
use crate::core::types::{ActorClass, Disposition};

pub fn settings() -> SpeciesSettings {
    SpeciesSettings {
        class: ActorClass::Prey,
        disposition: Disposition::Ambient,

        max_health: 60.0,
        trigger_volume_bleed_out_minutes: 20.0,

        detection_range: 45.0,
        fov_half_angle_degrees: 160.0,
        eye_height: 1.3,
        crouch_detection_scale: 0.4,

        base_flee_chance: 1.0,
        feeding_seconds: 90.0,
        flee_seconds: 12.0,
        flee_clear_distance: 60.0,

        walk_speed: 1.4,
        run_speed: 9.0,
        flee_speed: 11.0,
        retreat_speed: 6.0,
        ..SpeciesSettings::default()
    }
}
