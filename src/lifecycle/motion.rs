//! Post-process hand-off to the presentation layer

use crate::actor::Actor;
use crate::mode::Mode;
use crate::world::{resolve_target, MotionParams, TickContext};
use glam::Vec3;

fn flat_direction(from: Vec3, to: Vec3) -> Vec3 {
    let offset = to - from;
    Vec3::new(offset.x, 0.0, offset.z)
        .try_normalize()
        .unwrap_or(Vec3::ZERO)
}

/// Movement and animation parameters for the current mode
pub fn derive(actor: &Actor, ctx: &TickContext<'_>) -> MotionParams {
    let settings = actor.settings();
    let mode = actor.current_mode();
    let position = actor.position();
    let target = actor
        .current_target()
        .and_then(|t| resolve_target(ctx.world, t).ok())
        .map(|info| info.position);

    let speed = match mode {
        Mode::Wander
        | Mode::GoToPoint
        | Mode::FollowWaypoints
        | Mode::PatrolPointsOfInterest
        | Mode::Investigate
        | Mode::InvestigateFood
        | Mode::InvestigateSmell
        | Mode::JoinPack => settings.walk_speed,
        Mode::Stalking | Mode::HideAndSeek => settings.stalk_speed,
        Mode::Attack | Mode::PassingAttack => settings.run_speed,
        Mode::Flee => actor.combat.flee_speed,
        _ => 0.0,
    };

    let (heading, destination) = match (mode, target) {
        (Mode::Stalking | Mode::Attack | Mode::HideAndSeek, Some(at)) => {
            (flat_direction(position, at), Some(at))
        }
        (Mode::HoldGround, Some(at)) => (flat_direction(position, at), None),
        (Mode::Flee, Some(at)) => {
            let away = flat_direction(at, position);
            let away = if away == Vec3::ZERO { actor.forward() } else { away };
            (away, Some(position + away * settings.flee_clear_distance))
        }
        (Mode::Flee, None) => (
            actor.forward(),
            Some(position + actor.forward() * settings.flee_clear_distance),
        ),
        _ if speed > 0.0 => (actor.forward(), None),
        _ => (Vec3::ZERO, None),
    };

    MotionParams {
        mode,
        speed,
        heading,
        destination,
        dodge: actor.combat.dodge_pending,
    }
}

pub(crate) fn post_process(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    let motion = derive(actor, ctx);
    actor.combat.dodge_pending = false;
    ctx.presentation.apply_motion(actor.id(), motion);
}
