//! Moose
//!
//! Stands its ground at anything it notices and scratches its antlers when
//! bored instead of wandering off.

use super::hooks::{HookResult, SpeciesHooks};
use crate::actor::Actor;
use crate::core::config::SpeciesSettings;
use crate::core::types::{ActorClass, Disposition};
use crate::mode::Mode;
use crate::world::TickContext;

pub fn settings() -> SpeciesSettings {
    SpeciesSettings {
        class: ActorClass::Prey,
        disposition: Disposition::Hostile,

        max_health: 300.0,
        can_bleed_out: false,
        dies_from_bleed_out: false,

        detection_range: 25.0,
        fov_half_angle_degrees: 150.0,
        eye_height: 2.0,

        hold_ground_on_detection: true,
        hold_ground_max_seconds: 15.0,

        idle_seconds: 8.0,
        walk_speed: 1.3,
        run_speed: 7.0,
        flee_speed: 7.5,
        ..SpeciesSettings::default()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MooseHooks;

impl SpeciesHooks for MooseHooks {
    fn process(&self, actor: &mut Actor, ctx: &mut TickContext<'_>) -> HookResult {
        if actor.current_mode() == Mode::Idle
            && actor.time_in_mode_seconds() >= actor.settings().idle_seconds
        {
            actor.request_mode(Mode::ScratchingAntlers, ctx);
            return HookResult::Handled;
        }
        HookResult::Continue
    }
}
