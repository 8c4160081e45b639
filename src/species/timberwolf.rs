//! Timberwolf
//!
//! The only timberwolf definition. It shares the common settings shape;
//! pack spawn sizing belongs to the population manager.

use super::hooks::{HookResult, SpeciesHooks};
use crate::actor::Actor;
use crate::core::config::{HoldGroundTriggers, SpeciesSettings};
use crate::core::types::{ActorClass, Disposition};
use crate::hold_ground::StimulusKind;
use crate::world::{TargetInfo, TickContext};

pub fn settings() -> SpeciesSettings {
    SpeciesSettings {
        class: ActorClass::Predator,
        disposition: Disposition::Hostile,
        pack_species: true,

        max_health: 120.0,
        min_struggle_seconds: 8.0,
        aurora_damage_scale: 0.5,

        detection_range: 50.0,
        fov_half_angle_degrees: 120.0,
        eye_height: 0.9,
        aurora_detection_scale: 1.5,
        crouch_detection_scale: 0.7,

        base_flee_chance: 0.05,
        player_flee_bonus: 0.1,
        aurora_flee_scale: 0.25,
        can_stalk: true,

        can_hold_ground: true,
        hold_ground: HoldGroundTriggers {
            torch_held: 6.0,
            torch_dropped: 4.0,
            campfire: 10.0,
            red_flare_held: 12.0,
            red_flare_dropped: 10.0,
            blue_flare_held: 12.0,
            blue_flare_dropped: 10.0,
            spear: 3.0,
            aurora_field: true,
            safe_haven: 15.0,
            struggle: 25.0,
        },
        hold_ground_cooldown_seconds: 4.0,
        hold_ground_max_seconds: 30.0,

        attack_range: 2.5,
        attack_variants: 4,
        dodge_range: 30.0,
        dodge_chance: 0.4,
        fear_lockout_seconds: 6.0,

        flee_seconds: 8.0,
        howl_seconds: 6.0,
        run_speed: 8.5,
        flee_speed: 9.0,
        ..SpeciesSettings::default()
    }
}

/// Emboldened by their pack
#[derive(Debug, Clone, Copy, Default)]
pub struct TimberwolfHooks;

impl SpeciesHooks for TimberwolfHooks {
    fn stimulus(&self, actor: &Actor, stimulus: StimulusKind, ctx: &TickContext<'_>) -> HookResult<bool> {
        let in_pack = ctx.pack.is_in_pack(actor.id());
        match stimulus {
            StimulusKind::Torch | StimulusKind::Spear if in_pack => HookResult::Override(false),
            _ => HookResult::Continue,
        }
    }

    fn flee_probability(
        &self,
        actor: &Actor,
        _target: &TargetInfo,
        _probability: f32,
        ctx: &TickContext<'_>,
    ) -> HookResult<f32> {
        if ctx.pack.is_in_pack(actor.id()) {
            HookResult::Override(0.0)
        } else {
            HookResult::Continue
        }
    }
}
