//! Bear

use super::hooks::{HookResult, SpeciesHooks};
use crate::actor::Actor;
use crate::core::config::{HoldGroundTriggers, SpeciesSettings};
use crate::core::types::{ActorClass, Disposition};
use crate::hold_ground::StimulusKind;
use crate::world::TickContext;

pub fn settings() -> SpeciesSettings {
    SpeciesSettings {
        class: ActorClass::Predator,
        disposition: Disposition::Hostile,

        max_health: 250.0,
        can_bleed_out: false,
        dies_from_bleed_out: false,
        aurora_damage_scale: 0.75,

        detection_range: 35.0,
        fov_half_angle_degrees: 90.0,
        eye_height: 1.2,
        ignores_moose: false,

        base_flee_chance: 0.0,
        can_stalk: true,

        can_hold_ground: true,
        hold_ground: HoldGroundTriggers {
            campfire: 8.0,
            torch_held: 3.0,
            ..HoldGroundTriggers::default()
        },
        hold_ground_max_seconds: 12.0,

        attack_range: 3.0,
        attack_variants: 2,
        fear_lockout_seconds: 4.0,

        walk_speed: 1.2,
        run_speed: 9.0,
        flee_speed: 7.0,
        ..SpeciesSettings::default()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BearHooks;

impl SpeciesHooks for BearHooks {
    fn stimulus(&self, _actor: &Actor, stimulus: StimulusKind, _ctx: &TickContext<'_>) -> HookResult<bool> {
        match stimulus {
            StimulusKind::RedFlare | StimulusKind::BlueFlare => HookResult::Override(false),
            _ => HookResult::Continue,
        }
    }
}
