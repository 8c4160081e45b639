//! Gate rules, in priority order
//!
//! 1. species hook
//! 2. custom modes pass through
//! 3. no re-flee after a passing attack
//! 4. attack: fear, pack policy, hold ground, reachability
//! 5. pack-restricted wander holds ground
//! 6. patrol defaults replace wander/flee
//! 7. none becomes idle
//! 8. same mode is rejected (retreat speed may update)
//! 9. active stun blocks all but dead/scripted
//! 10. accept
//!
//! Rules 4-7 may redirect the mode; later rules see the redirected value.

use super::Resolution;
use crate::actor::Actor;
use crate::hold_ground;
use crate::mode::set::{PATROL, STUN_BYPASS};
use crate::mode::{FleeReason, Mode};
use crate::species::HookResult;
use crate::world::{resolve_target, ActorEvent, TickContext};

pub fn resolve(actor: &mut Actor, requested: Mode, ctx: &mut TickContext<'_>) -> Resolution {
    let hooks = actor.hooks().clone();
    match hooks.resolve_mode(actor, requested, ctx) {
        HookResult::Continue => {}
        HookResult::Handled => return reject(actor, requested, "species hook"),
        HookResult::Override(resolution) => return resolution,
    }

    if requested.is_custom() {
        return Resolution::Enter(requested);
    }

    if requested == Mode::Flee
        && actor.current_mode() == Mode::Flee
        && actor.combat.flee_reason == FleeReason::AfterPassingAttack
    {
        return reject(actor, requested, "already fleeing after passing attack");
    }

    let mut mode = requested;

    if mode == Mode::Attack {
        match resolve_attack(actor, ctx) {
            Some(redirected) => mode = redirected,
            None => return Resolution::NoChange,
        }
    }

    let id = actor.id();
    if mode == Mode::Wander
        && actor.settings().pack_species
        && ctx.pack.is_in_pack(id)
        && ctx.pack.is_combat_restricted(id)
    {
        mode = Mode::HoldGround;
    }

    if matches!(mode, Mode::Wander | Mode::Flee) && PATROL.contains(actor.default_mode()) {
        mode = actor.default_mode();
    }

    if mode == Mode::None {
        mode = Mode::Idle;
    }

    if mode == actor.current_mode() {
        if mode == Mode::Flee && actor.combat.use_retreat_speed {
            actor.recalculate_flee_speed();
            actor.combat.use_retreat_speed = false;
            tracing::trace!(actor = %id, speed = actor.combat.flee_speed, "flee speed recalculated");
        }
        return reject(actor, mode, "already in mode");
    }

    if actor.is_stunned() && !STUN_BYPASS.contains(mode) {
        return reject(actor, mode, "stunned");
    }

    Resolution::Enter(mode)
}

/// Rule 4. `None` abandons the request.
fn resolve_attack(actor: &mut Actor, ctx: &mut TickContext<'_>) -> Option<Mode> {
    let id = actor.id();

    if actor.is_afraid() {
        reject(actor, Mode::Attack, "too afraid");
        return None;
    }

    if actor.settings().pack_species {
        if actor.current_mode() == Mode::Attack
            && actor.current_target().is_some_and(|t| t.is_player())
        {
            reject(actor, Mode::Attack, "already attacking player");
            return None;
        }
        if !ctx.pack.is_in_pack(id) {
            actor.combat.pending_flee_reason = Some(FleeReason::NoPack);
            return Some(Mode::Flee);
        }
        if !ctx.pack.can_pack_attack(id) {
            return Some(Mode::HoldGround);
        }
        return Some(Mode::Attack);
    }

    if hold_ground::evaluate(actor, ctx) {
        tracing::trace!(actor = %id, "attack abandoned for hold ground");
        return None;
    }

    let Some(target) = actor.current_target() else {
        tracing::trace!(actor = %id, "attack without target");
        return Some(actor.default_mode());
    };

    match resolve_target(ctx.world, target) {
        Ok(info) => {
            if !ctx.navigation.can_pathfind_to(actor.position(), info.position) {
                tracing::debug!(actor = %id, %target, "cannot reach target");
                ctx.presentation
                    .notify(id, ActorEvent::CannotReachTarget(target));
                return Some(actor.default_mode());
            }
            Some(Mode::Attack)
        }
        Err(e) => {
            tracing::trace!(actor = %id, error = %e, "attack target vanished");
            Some(actor.default_mode())
        }
    }
}

fn reject(actor: &Actor, mode: Mode, reason: &'static str) -> Resolution {
    tracing::trace!(actor = %actor.id(), from = ?actor.current_mode(), to = ?mode, reason, "mode request rejected");
    Resolution::NoChange
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::SpawnContext;
    use crate::core::types::{ActorId, Species, TargetRef};
    use crate::core::{FrameTime, SettingsCatalog, SimulationClock};
    use crate::world::{OpenNavigation, PackStatus, PackTable, RecordingPresentation, SnapshotWorld};

    fn spawn(species: Species, initial: Mode, default: Mode) -> Actor {
        let catalog = SettingsCatalog::with_defaults();
        let mut actor = Actor::from_catalog(ActorId::from_index(1), species, &catalog);
        actor.initialize(
            &SimulationClock::default(),
            SpawnContext {
                initial_mode: initial,
                default_mode: default,
                ..SpawnContext::default()
            },
        );
        actor
    }

    struct Harness {
        world: SnapshotWorld,
        nav: OpenNavigation,
        pack: PackTable,
        presentation: RecordingPresentation,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                world: SnapshotWorld::new(),
                nav: OpenNavigation::default(),
                pack: PackTable::new(),
                presentation: RecordingPresentation::new(),
            }
        }

        fn resolve(&mut self, actor: &mut Actor, mode: Mode) -> Resolution {
            let mut ctx = TickContext::new(
                FrameTime::default(),
                &self.world,
                &self.nav,
                &mut self.pack,
                &mut self.presentation,
            );
            resolve(actor, mode, &mut ctx)
        }
    }

    #[test]
    fn test_none_resolves_to_idle() {
        let mut h = Harness::new();
        let mut deer = spawn(Species::Deer, Mode::Wander, Mode::Wander);
        assert_eq!(h.resolve(&mut deer, Mode::None), Resolution::Enter(Mode::Idle));
    }

    #[test]
    fn test_custom_mode_accepted_unmodified() {
        let mut h = Harness::new();
        let mut deer = spawn(Species::Deer, Mode::Custom(3), Mode::Wander);
        assert_eq!(
            h.resolve(&mut deer, Mode::Custom(3)),
            Resolution::Enter(Mode::Custom(3))
        );
    }

    #[test]
    fn test_patrol_default_replaces_wander_and_flee() {
        let mut h = Harness::new();
        let mut deer = spawn(Species::Deer, Mode::Idle, Mode::FollowWaypoints);
        assert_eq!(
            h.resolve(&mut deer, Mode::Wander),
            Resolution::Enter(Mode::FollowWaypoints)
        );
        assert_eq!(
            h.resolve(&mut deer, Mode::Flee),
            Resolution::Enter(Mode::FollowWaypoints)
        );
    }

    #[test]
    fn test_solo_pack_species_flees_instead_of_attacking() {
        let mut h = Harness::new();
        let mut wolf = spawn(Species::Wolf, Mode::Stalking, Mode::Wander);
        assert_eq!(h.resolve(&mut wolf, Mode::Attack), Resolution::Enter(Mode::Flee));
        assert_eq!(wolf.combat.pending_flee_reason, Some(FleeReason::NoPack));
    }

    #[test]
    fn test_restricted_pack_holds_ground() {
        let mut h = Harness::new();
        let mut wolf = spawn(Species::Wolf, Mode::Stalking, Mode::Wander);
        h.pack.join(
            wolf.id(),
            PackStatus {
                can_attack: false,
                ..PackStatus::default()
            },
        );
        assert_eq!(
            h.resolve(&mut wolf, Mode::Attack),
            Resolution::Enter(Mode::HoldGround)
        );
    }

    #[test]
    fn test_pack_does_not_reenter_player_attack() {
        let mut h = Harness::new();
        let mut wolf = spawn(Species::Wolf, Mode::Attack, Mode::Wander);
        wolf.set_target(Some(TargetRef::Player));
        h.pack.join(wolf.id(), PackStatus::default());
        assert_eq!(h.resolve(&mut wolf, Mode::Attack), Resolution::NoChange);
    }

    #[test]
    fn test_afraid_actor_cannot_attack() {
        let mut h = Harness::new();
        let mut cougar = spawn(Species::Cougar, Mode::Stalking, Mode::Wander);
        cougar.combat.fear_seconds = 2.0;
        assert_eq!(h.resolve(&mut cougar, Mode::Attack), Resolution::NoChange);
    }

    #[test]
    fn test_attack_without_target_falls_back_to_default() {
        let mut h = Harness::new();
        let mut cougar = spawn(Species::Cougar, Mode::Stalking, Mode::Idle);
        assert_eq!(h.resolve(&mut cougar, Mode::Attack), Resolution::Enter(Mode::Idle));
    }

    #[test]
    fn test_hook_overrides_before_builtin_rules() {
        let mut h = Harness::new();
        let mut cougar = spawn(Species::Cougar, Mode::Stalking, Mode::Wander);
        cougar.set_target(Some(TargetRef::Player));
        assert_eq!(
            h.resolve(&mut cougar, Mode::Wander),
            Resolution::Enter(Mode::HideAndSeek)
        );
    }

    #[test]
    fn test_retreat_speed_consumed_on_repeated_flee() {
        let mut h = Harness::new();
        let mut deer = spawn(Species::Deer, Mode::Flee, Mode::Wander);
        deer.combat.use_retreat_speed = true;
        assert_eq!(h.resolve(&mut deer, Mode::Flee), Resolution::NoChange);
        assert!(!deer.combat.use_retreat_speed);
        assert_eq!(deer.combat.flee_speed, deer.settings().retreat_speed);
    }
}
