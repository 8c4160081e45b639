//! Per-frame behavior for each mode
//!
//! Handlers only change mode through `request_mode`. Modes not listed in
//! `run` are driven by the host (scripted sequences, props, waypoints).

use crate::actor::Actor;
use crate::core::config::SpeciesSettings;
use crate::hold_ground;
use crate::mode::{FleeReason, Mode};
use crate::world::{resolve_target, ActorEvent, TargetInfo, TickContext};
use rand::Rng;

/// Stalkers break into an attack inside this many attack ranges
pub const CHARGE_DISTANCE_FACTOR: f32 = 4.0;

pub fn run(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    match actor.current_mode() {
        Mode::Idle => after(actor, |s| s.idle_seconds, Mode::Wander, ctx),
        Mode::Wander => after(actor, |s| s.wander_seconds, Mode::WanderPaused, ctx),
        Mode::WanderPaused => after(actor, |s| s.wander_pause_seconds, Mode::Wander, ctx),
        Mode::Stalking => stalking(actor, ctx),
        Mode::Attack => attack(actor, ctx),
        Mode::PassingAttack => passing_attack(actor, ctx),
        Mode::Flee => flee(actor, ctx),
        Mode::HoldGround => hold_ground(actor, ctx),
        Mode::Stunned => stunned(actor, ctx),
        Mode::Sleep => sleep(actor, ctx),
        Mode::Feeding => timeout(actor, |s| s.feeding_seconds, ctx),
        Mode::Investigate | Mode::InvestigateFood | Mode::InvestigateSmell => {
            timeout(actor, |s| s.investigate_seconds, ctx)
        }
        Mode::Howl => timeout(actor, |s| s.howl_seconds, ctx),
        Mode::ScratchingAntlers => timeout(actor, |s| s.idle_seconds, ctx),
        _ => {}
    }
}

/// Current target, if it still exists and is alive
fn live_target(actor: &Actor, ctx: &TickContext<'_>) -> Option<TargetInfo> {
    let target = actor.current_target()?;
    match resolve_target(ctx.world, target) {
        Ok(info) if !info.is_dead => Some(info),
        Ok(_) => None,
        Err(e) => {
            tracing::trace!(actor = %actor.id(), error = %e, "target reference lost");
            None
        }
    }
}

fn after(
    actor: &mut Actor,
    seconds: fn(&SpeciesSettings) -> f32,
    next: Mode,
    ctx: &mut TickContext<'_>,
) {
    if actor.time_in_mode_seconds() >= seconds(actor.settings()) {
        actor.request_mode(next, ctx);
    }
}

fn timeout(actor: &mut Actor, seconds: fn(&SpeciesSettings) -> f32, ctx: &mut TickContext<'_>) {
    if actor.time_in_mode_seconds() >= seconds(actor.settings()) {
        actor.return_to_default(ctx);
    }
}

fn stalking(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    let Some(target) = live_target(actor, ctx) else {
        actor.return_to_default(ctx);
        return;
    };

    let charge_distance = actor.settings().attack_range * CHARGE_DISTANCE_FACTOR;
    if actor.position().distance(target.position) <= charge_distance {
        actor.request_mode(Mode::Attack, ctx);
    } else if actor.time_in_mode_seconds() >= actor.settings().stalk_timeout_seconds {
        actor.return_to_default(ctx);
    }
}

fn attack(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    let Some(target) = live_target(actor, ctx) else {
        actor.return_to_default(ctx);
        return;
    };

    if actor.position().distance(target.position) > actor.settings().attack_range {
        return;
    }

    let variants = actor.settings().attack_variants;
    let index = actor.rng.gen_range(0..variants.max(1));
    if let Err(e) = actor.choose_attack_variant(index) {
        tracing::error!(actor = %actor.id(), error = %e, "attack abandoned");
        return;
    }

    ctx.presentation
        .notify(actor.id(), ActorEvent::AttackVariant(index));
    actor.request_mode(Mode::PassingAttack, ctx);
}

fn passing_attack(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    if actor.time_in_mode_seconds() >= actor.settings().passing_attack_seconds {
        actor.request_flee(FleeReason::AfterPassingAttack, ctx);
    }
}

fn flee(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    if actor.time_in_mode_seconds() < actor.settings().flee_seconds {
        return;
    }

    let clear = match live_target(actor, ctx) {
        Some(target) => {
            actor.position().distance(target.position) >= actor.settings().flee_clear_distance
        }
        None => true,
    };
    if clear {
        actor.return_to_default(ctx);
    }
}

fn hold_ground(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    if actor.time_in_mode_seconds() >= actor.settings().hold_ground_max_seconds {
        actor.request_flee(FleeReason::Stimulus, ctx);
        return;
    }

    let threatened = hold_ground::any_stimulus(actor, ctx) || live_target(actor, ctx).is_some();
    if !threatened {
        actor.return_to_default(ctx);
    }
}

fn stunned(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    if actor.combat.stun_seconds <= 0.0 {
        actor.return_to_default(ctx);
    }
}

fn sleep(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    if actor.time_in_mode_game_hours() >= actor.settings().sleep_game_hours {
        actor.return_to_default(ctx);
    }
}
