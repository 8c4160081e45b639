//! Grey wolf

use crate::core::config::{HoldGroundTriggers, SpeciesSettings};
use crate::core::types::{ActorClass, Disposition};

pub fn settings() -> SpeciesSettings {
    SpeciesSettings {
        class: ActorClass::Predator,
        disposition: Disposition::Hostile,
        pack_species: true,

        max_health: 80.0,
        min_struggle_seconds: 5.0,
        aurora_damage_scale: 0.5,

        detection_range: 40.0,
        fov_half_angle_degrees: 110.0,
        eye_height: 0.8,
        aurora_detection_scale: 1.5,
        crouch_detection_scale: 0.6,

        base_flee_chance: 0.1,
        player_flee_bonus: 0.15,
        aurora_flee_scale: 0.25,
        can_stalk: true,

        can_hold_ground: true,
        hold_ground: HoldGroundTriggers {
            torch_held: 8.0,
            torch_dropped: 6.0,
            campfire: 12.0,
            red_flare_held: 10.0,
            red_flare_dropped: 8.0,
            blue_flare_held: 10.0,
            blue_flare_dropped: 8.0,
            spear: 4.0,
            aurora_field: true,
            safe_haven: 15.0,
            struggle: 20.0,
        },
        hold_ground_cooldown_seconds: 6.0,

        attack_range: 2.5,
        attack_variants: 3,
        dodge_range: 25.0,
        dodge_chance: 0.3,

        flee_seconds: 10.0,
        howl_seconds: 5.0,
        run_speed: 8.0,
        flee_speed: 8.5,
        ..SpeciesSettings::default()
    }
}
