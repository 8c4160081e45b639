//! Cougar
//!
//! Solitary ambusher. Never holds ground; when told to wander while it still
//! has a target it slips into hide-and-seek instead.

use super::hooks::{HookResult, SpeciesHooks};
use crate::actor::Actor;
use crate::core::config::SpeciesSettings;
use crate::core::types::{ActorClass, Disposition};
use crate::mode::Mode;
use crate::transition::Resolution;
use crate::world::{TargetInfo, TickContext};

pub fn settings() -> SpeciesSettings {
    SpeciesSettings {
        class: ActorClass::Predator,
        disposition: Disposition::Hostile,

        max_health: 150.0,
        can_bleed_out: true,
        min_struggle_seconds: 10.0,

        detection_range: 60.0,
        fov_half_angle_degrees: 100.0,
        eye_height: 0.7,
        crouch_detection_scale: 0.8,

        base_flee_chance: 0.05,
        can_stalk: true,
        can_hold_ground: false,

        attack_range: 3.0,
        attack_variants: 2,
        stalk_timeout_seconds: 90.0,
        stalk_speed: 2.5,
        run_speed: 10.0,
        flee_speed: 10.0,
        ..SpeciesSettings::default()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CougarHooks;

impl SpeciesHooks for CougarHooks {
    fn resolve_mode(
        &self,
        actor: &mut Actor,
        requested: Mode,
        _ctx: &mut TickContext<'_>,
    ) -> HookResult<Resolution> {
        let hunting = actor.current_target().is_some()
            && actor.current_mode() != Mode::HideAndSeek
            && !actor.is_stunned();
        if requested == Mode::Wander && hunting {
            HookResult::Override(Resolution::Enter(Mode::HideAndSeek))
        } else {
            HookResult::Continue
        }
    }

    fn flee_probability(
        &self,
        _actor: &Actor,
        target: &TargetInfo,
        _probability: f32,
        _ctx: &TickContext<'_>,
    ) -> HookResult<f32> {
        // Nothing but the player scares a cougar
        if target.target.is_player() {
            HookResult::Continue
        } else {
            HookResult::Override(0.0)
        }
    }
}
