//! Per-tick wound and bleed-out accumulation

use super::STRUGGLE_BLEED_MARGIN_MINUTES;
use crate::actor::Actor;
use crate::mode::Mode;
use crate::world::TickContext;

/// Advance wound recovery and bleed-out by this tick's in-world minutes
pub(crate) fn accumulate(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    let minutes = ctx.time.delta_game_minutes();

    if actor.health.wounded {
        actor.health.elapsed_wounded_minutes += minutes;
        if actor.health.elapsed_wounded_minutes >= actor.settings().wound_recovery_minutes {
            actor.health.wounded = false;
            actor.health.elapsed_wounded_minutes = 0.0;
        }
    }

    if !actor.health.bleeding_out {
        return;
    }

    let threshold = actor.health.death_after_bleeding_out_minutes;
    actor.health.elapsed_bleeding_out_minutes += minutes;

    let struggling = actor.current_mode() == Mode::Struggle
        && actor.time_in_mode_seconds() < actor.settings().min_struggle_seconds;
    if struggling {
        let ceiling = (threshold - STRUGGLE_BLEED_MARGIN_MINUTES).max(0.0);
        actor.health.elapsed_bleeding_out_minutes =
            actor.health.elapsed_bleeding_out_minutes.min(ceiling);
        return;
    }

    if actor.health.elapsed_bleeding_out_minutes >= threshold {
        actor.health.elapsed_bleeding_out_minutes = threshold;
        if actor.settings().dies_from_bleed_out {
            tracing::debug!(actor = %actor.id(), "bled out");
            actor.request_mode(Mode::Dead, ctx);
        }
    }
}
