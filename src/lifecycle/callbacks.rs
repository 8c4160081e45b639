//! Built-in enter/exit handlers
//!
//! Both run before the current mode is switched, so `actor.current_mode()`
//! still reports the mode being left.

use crate::actor::Actor;
use crate::mode::set::{INTERRUPTING, STIMULUS_IGNORING_ATTACK};
use crate::mode::{FleeReason, Mode};
use crate::world::TickContext;

pub fn enter(actor: &mut Actor, mode: Mode, _ctx: &mut TickContext<'_>) {
    match mode {
        Mode::Flee => {
            let reason = actor
                .combat
                .pending_flee_reason
                .take()
                .unwrap_or(FleeReason::Unspecified);
            actor.combat.flee_reason = reason;
            actor.recalculate_flee_speed();
            if matches!(
                reason,
                FleeReason::Stimulus | FleeReason::Damaged | FleeReason::TargetDetected
            ) {
                let lockout = actor.settings().fear_lockout_seconds;
                actor.combat.fear_seconds = actor.combat.fear_seconds.max(lockout);
            }
        }
        Mode::Attack => {
            actor.combat.attack_variant = None;
        }
        Mode::Dead => {
            actor.perception.current_target = None;
            actor.combat.stun_seconds = 0.0;
            actor.combat.dodge_pending = false;
        }
        _ => {}
    }
}

pub fn exit(actor: &mut Actor, mode: Mode, next: Mode, _ctx: &mut TickContext<'_>) {
    if INTERRUPTING.contains(mode) {
        actor.perception.retarget_after_interrupt = true;
    }

    match mode {
        Mode::Flee => {
            actor.combat.flee_reason = FleeReason::Unspecified;
            actor.combat.use_retreat_speed = false;
        }
        Mode::HoldGround => {
            actor.combat.last_hold_ground_end = Some(actor.now_seconds);
        }
        Mode::Stunned => {
            actor.combat.stun_seconds = 0.0;
        }
        Mode::Stalking | Mode::Attack | Mode::PassingAttack
            if !STIMULUS_IGNORING_ATTACK.contains(next) =>
        {
            actor.combat.ignore_stimuli = false;
        }
        _ => {}
    }
}
