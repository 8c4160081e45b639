//! Hold-ground stimulus aggregation
//!
//! Eligible predators check every stimulus, each of which a species hook may
//! replace. One hit is enough, but all checks always run.

pub mod stimulus;

use crate::actor::Actor;
use crate::core::types::ActorClass;
use crate::mode::set::{HOLD_GROUND_EARLY_OUT, STIMULUS_IGNORING_ATTACK};
use crate::mode::Mode;
use crate::species::HookResult;
use crate::world::TickContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StimulusKind {
    Torch,
    Campfire,
    RedFlare,
    BlueFlare,
    Spear,
    AuroraField,
    SafeHaven,
    Struggle,
}

impl StimulusKind {
    pub const ALL: [StimulusKind; 8] = [
        StimulusKind::Torch,
        StimulusKind::Campfire,
        StimulusKind::RedFlare,
        StimulusKind::BlueFlare,
        StimulusKind::Spear,
        StimulusKind::AuroraField,
        StimulusKind::SafeHaven,
        StimulusKind::Struggle,
    ];
}

/// Class, capability, mode and cooldown gates
pub fn is_eligible(actor: &Actor) -> bool {
    let settings = actor.settings();
    if settings.class != ActorClass::Predator || !settings.can_hold_ground {
        return false;
    }

    let mode = actor.current_mode();
    if HOLD_GROUND_EARLY_OUT.contains(mode) {
        return false;
    }
    if actor.combat.ignore_stimuli && STIMULUS_IGNORING_ATTACK.contains(mode) {
        return false;
    }

    match actor.combat.last_hold_ground_end {
        Some(ended) => actor.now_seconds - ended >= settings.hold_ground_cooldown_seconds as f64,
        None => true,
    }
}

/// OR over every stimulus, without short-circuiting
pub fn any_stimulus(actor: &Actor, ctx: &TickContext<'_>) -> bool {
    let hooks = actor.hooks();
    let mut triggered = false;

    for kind in StimulusKind::ALL {
        let hit = match hooks.stimulus(actor, kind, ctx) {
            HookResult::Continue => stimulus::check(actor, kind, ctx.world),
            HookResult::Handled => false,
            HookResult::Override(value) => value,
        };
        if hit {
            tracing::trace!(actor = %actor.id(), stimulus = ?kind, "hold-ground stimulus");
        }
        triggered |= hit;
    }

    triggered
}

pub fn should_hold_ground(actor: &Actor, ctx: &TickContext<'_>) -> bool {
    is_eligible(actor) && any_stimulus(actor, ctx)
}

/// Enter HoldGround when a stimulus calls for it.
///
/// Returns true whenever holding ground was decided, including when the
/// actor is already holding.
pub fn evaluate(actor: &mut Actor, ctx: &mut TickContext<'_>) -> bool {
    if !should_hold_ground(actor, ctx) {
        return false;
    }
    actor.request_mode(Mode::HoldGround, ctx);
    true
}
