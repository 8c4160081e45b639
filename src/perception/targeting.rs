//! Target selection
//!
//! Candidates are every registry actor in enumeration order, then the
//! player. Ignored or invisible candidates score infinite distance; the
//! nearest finite one wins, ties going to the first found.

use super::detection::{effective_range, visible_distance, Viewpoint};
use super::reaction;
use crate::actor::Actor;
use crate::core::types::{Species, TargetRef};
use crate::mode::Mode;
use crate::world::{resolve_target, ActorEvent, TargetInfo, TickContext};
use ordered_float::OrderedFloat;
use std::iter;

/// Why a candidate was dropped before any distance test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    SelfTarget,
    GhostPlayer,
    FeedingIgnoresPlayer,
    Dead,
    IgnoredMoose,
    InvalidPackTarget,
    NotHostile,
    MenuOpen,
    PlayerStruggle,
}

pub fn ignore_reason(actor: &Actor, target: &TargetInfo, ctx: &TickContext<'_>) -> Option<IgnoreReason> {
    let observer = actor.id();

    match target.target {
        TargetRef::Actor(id) if id == observer => return Some(IgnoreReason::SelfTarget),
        TargetRef::Player => {
            if target.is_ghost {
                return Some(IgnoreReason::GhostPlayer);
            }
            if actor.current_mode() == Mode::Feeding {
                return Some(IgnoreReason::FeedingIgnoresPlayer);
            }
        }
        TargetRef::Actor(_) => {}
    }

    if target.is_dead {
        return Some(IgnoreReason::Dead);
    }
    if target.species == Some(Species::Moose) && actor.settings().ignores_moose {
        return Some(IgnoreReason::IgnoredMoose);
    }
    if ctx.pack.is_in_pack(observer) && !ctx.pack.is_valid_pack_target(observer, target.target) {
        return Some(IgnoreReason::InvalidPackTarget);
    }
    if !ctx.world.is_hostile_toward(target.target, observer) {
        return Some(IgnoreReason::NotHostile);
    }

    if target.target.is_player() {
        let environment = ctx.world.environment();
        if environment.menu_open {
            return Some(IgnoreReason::MenuOpen);
        }
        if environment.player_struggle_active {
            return Some(IgnoreReason::PlayerStruggle);
        }
    }

    None
}

/// Visibility-gated distance to one candidate
pub fn candidate_distance(actor: &Actor, target: TargetRef, ctx: &TickContext<'_>) -> f32 {
    let info = match resolve_target(ctx.world, target) {
        Ok(info) => info,
        Err(e) => {
            tracing::trace!(actor = %actor.id(), error = %e, "skipping stale candidate");
            return f32::INFINITY;
        }
    };

    if let Some(reason) = ignore_reason(actor, &info, ctx) {
        tracing::trace!(actor = %actor.id(), %target, ?reason, "candidate ignored");
        return f32::INFINITY;
    }

    let environment = ctx.world.environment();
    let player = match target {
        TargetRef::Player => ctx.world.player(),
        TargetRef::Actor(_) => None,
    };
    let settings = actor.settings();
    let range = effective_range(settings, &environment, player.as_ref());

    let viewer = Viewpoint {
        position: actor.position(),
        eye: actor.eye_position(),
        forward: actor.forward(),
    };
    visible_distance(
        &viewer,
        info.position,
        range,
        settings.fov_half_angle_degrees,
        ctx.navigation,
    )
}

/// Count down the scan timer and scan when it expires
pub(crate) fn tick_scan(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    actor.perception.next_scan_in_seconds -= ctx.time.delta_seconds.max(0.0);
    if actor.perception.next_scan_in_seconds > 0.0 {
        return;
    }
    actor.perception.next_scan_in_seconds = actor.roll_scan_interval();
    actor.scan_for_target(ctx);
}

impl Actor {
    /// Pick the nearest visible target now, ignoring the scan interval.
    ///
    /// Returns the target held after the scan.
    pub fn scan_for_target(&mut self, ctx: &mut TickContext<'_>) -> Option<TargetRef> {
        if self.perception.suppressed {
            return self.current_target();
        }

        let hooks = self.hooks().clone();
        if !hooks.scan_for_target(self, ctx).proceeds() {
            return self.current_target();
        }

        let world = ctx.world;
        let candidates = world
            .actor_ids()
            .iter()
            .map(|id| TargetRef::Actor(*id))
            .chain(iter::once(TargetRef::Player));

        let nearest = candidates
            .map(|target| (target, candidate_distance(self, target, &*ctx)))
            .filter(|(_, distance)| distance.is_finite())
            .min_by_key(|(_, distance)| OrderedFloat(*distance))
            .map(|(target, _)| target);

        if nearest == self.current_target() {
            return nearest;
        }

        self.set_target(nearest);
        match nearest {
            None => {
                tracing::debug!(actor = %self.id(), "target lost");
                ctx.presentation.notify(self.id(), ActorEvent::TargetLost);
            }
            Some(target) => {
                tracing::debug!(actor = %self.id(), %target, "target acquired");
                ctx.presentation
                    .notify(self.id(), ActorEvent::TargetAcquired(target));
                ctx.pack.alert(self.id(), target);
                reaction::change_mode_when_target_detected(self, target, ctx);
            }
        }

        nearest
    }
}
