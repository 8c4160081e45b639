//! Response to a newly detected target

use crate::actor::Actor;
use crate::core::types::{ActorClass, Disposition, TargetRef};
use crate::mode::set::STALK_INELIGIBLE;
use crate::mode::{FleeReason, Mode};
use crate::species::HookResult;
use crate::world::{resolve_target, TargetInfo, TickContext};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionResponse {
    /// Humans and unresolvable targets
    Ignored,
    HoldGround,
    Flee,
    Stalk,
    /// Did not flee and could not stalk
    Unchanged,
}

/// Chance of fleeing from `target`, after every override.
///
/// Rules run in order; a rule that zeroes the chance skips the species hook,
/// leaving only the always-flee override able to raise it.
pub fn flee_probability(actor: &Actor, target: &TargetInfo, ctx: &TickContext<'_>) -> f32 {
    let mut probability = match base_flee_probability(actor, target, ctx) {
        Some(base) => match actor.hooks().flee_probability(actor, target, base, ctx) {
            HookResult::Override(value) => value,
            HookResult::Continue | HookResult::Handled => base,
        },
        None => 0.0,
    };

    if ctx.world.always_flee_from(target.target) {
        probability = 1.0;
    }

    probability.clamp(0.0, 1.0)
}

/// `None` when a zero rule fired
fn base_flee_probability(actor: &Actor, target: &TargetInfo, ctx: &TickContext<'_>) -> Option<f32> {
    let settings = actor.settings();
    let predator = settings.class == ActorClass::Predator;
    let mut probability = settings.base_flee_chance;

    if actor.current_mode() == Mode::Feeding {
        if !settings.flee_when_feeding {
            return None;
        }
        probability = 1.0;
    }

    if !matches!(settings.disposition, Disposition::Hostile | Disposition::Ambient) {
        return None;
    }

    // Feeding is never Wander, so this also cancels the feeding rule for predators
    if predator && (target.vulnerable || actor.current_mode() != Mode::Wander) {
        return None;
    }

    if target.target.is_player() {
        probability += settings.player_flee_bonus;
    }

    if predator && ctx.world.environment().aurora_active {
        probability *= settings.aurora_flee_scale;
    }

    let id = actor.id();
    if ctx.pack.is_in_pack(id) && !ctx.pack.should_pack_flee(id) {
        return None;
    }

    Some(probability)
}

/// Decide whether a fresh detection sends the actor fleeing or stalking
pub(crate) fn change_mode_when_target_detected(
    actor: &mut Actor,
    target: TargetRef,
    ctx: &mut TickContext<'_>,
) -> DetectionResponse {
    let settings = actor.settings();

    if settings.class == ActorClass::Human {
        return DetectionResponse::Ignored;
    }

    if settings.hold_ground_on_detection {
        actor.request_mode(Mode::HoldGround, ctx);
        return DetectionResponse::HoldGround;
    }

    let info = match resolve_target(ctx.world, target) {
        Ok(info) => info,
        Err(e) => {
            tracing::trace!(actor = %actor.id(), error = %e, "detected target vanished");
            return DetectionResponse::Ignored;
        }
    };

    let probability = flee_probability(actor, &info, ctx);
    let roll: f32 = actor.rng.gen();
    tracing::trace!(actor = %actor.id(), %target, probability, roll, "flee roll");

    if roll < probability {
        actor.request_flee(FleeReason::TargetDetected, ctx);
        return DetectionResponse::Flee;
    }

    let settings = actor.settings();
    let can_stalk = settings.can_stalk && settings.class == ActorClass::Predator;
    if can_stalk && !STALK_INELIGIBLE.contains(actor.current_mode()) {
        actor.request_mode(Mode::Stalking, ctx);
        return DetectionResponse::Stalk;
    }

    DetectionResponse::Unchanged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::SpawnContext;
    use crate::core::types::{ActorId, Species};
    use crate::core::{FrameTime, SettingsCatalog, SimulationClock, SpeciesSettings};
    use crate::species::{self, SpeciesHooks};
    use std::sync::Arc;
    use crate::world::{
        OpenNavigation, PackStatus, PackTable, PlayerSnapshot, RecordingPresentation, SnapshotWorld,
    };
    use glam::Vec3;

    fn spawn(species: Species, mode: Mode) -> Actor {
        let catalog = SettingsCatalog::with_defaults();
        let mut actor = Actor::from_catalog(ActorId::from_index(1), species, &catalog);
        actor.initialize(
            &SimulationClock::default(),
            SpawnContext {
                initial_mode: mode,
                default_mode: Mode::Wander,
                ..SpawnContext::default()
            },
        );
        actor
    }

    struct Fearful;

    impl SpeciesHooks for Fearful {
        fn flee_probability(
            &self,
            _actor: &Actor,
            _target: &TargetInfo,
            _probability: f32,
            _ctx: &TickContext<'_>,
        ) -> HookResult<f32> {
            HookResult::Override(1.0)
        }
    }

    fn spawn_with(species: Species, settings: SpeciesSettings, hooks: Arc<dyn SpeciesHooks>, mode: Mode) -> Actor {
        let mut actor = Actor::new(ActorId::from_index(1), species, Arc::new(settings), hooks);
        actor.initialize(
            &SimulationClock::default(),
            SpawnContext {
                initial_mode: mode,
                default_mode: Mode::Wander,
                ..SpawnContext::default()
            },
        );
        actor
    }

    fn player_info() -> TargetInfo {
        TargetInfo {
            target: TargetRef::Player,
            species: None,
            position: Vec3::new(5.0, 0.0, 0.0),
            is_dead: false,
            is_ghost: false,
            vulnerable: false,
        }
    }

    #[test]
    fn test_wolf_player_bonus_and_aurora_scale() {
        let wolf = spawn(Species::Wolf, Mode::Wander);
        let mut world = SnapshotWorld::new();
        let nav = OpenNavigation::default();
        let mut pack = PackTable::new();
        let mut presentation = RecordingPresentation::new();

        let expected = {
            let s = wolf.settings();
            s.base_flee_chance + s.player_flee_bonus
        };
        {
            let ctx = TickContext::new(FrameTime::default(), &world, &nav, &mut pack, &mut presentation);
            let p = flee_probability(&wolf, &player_info(), &ctx);
            assert!((p - expected).abs() < 1e-5);
        }

        world.environment.aurora_active = true;
        let ctx = TickContext::new(FrameTime::default(), &world, &nav, &mut pack, &mut presentation);
        let p = flee_probability(&wolf, &player_info(), &ctx);
        assert!((p - expected * wolf.settings().aurora_flee_scale).abs() < 1e-5);
    }

    #[test]
    fn test_predator_not_wandering_never_flees() {
        let wolf = spawn(Species::Wolf, Mode::Idle);
        let world = SnapshotWorld::new();
        let nav = OpenNavigation::default();
        let mut pack = PackTable::new();
        let mut presentation = RecordingPresentation::new();
        let ctx = TickContext::new(FrameTime::default(), &world, &nav, &mut pack, &mut presentation);
        assert_eq!(flee_probability(&wolf, &player_info(), &ctx), 0.0);
    }

    #[test]
    fn test_pack_vote_against_fleeing() {
        let wolf = spawn(Species::Wolf, Mode::Wander);
        let world = SnapshotWorld::new();
        let nav = OpenNavigation::default();
        let mut pack = PackTable::new();
        pack.join(
            wolf.id(),
            PackStatus {
                should_flee: false,
                ..PackStatus::default()
            },
        );
        let mut presentation = RecordingPresentation::new();
        let ctx = TickContext::new(FrameTime::default(), &world, &nav, &mut pack, &mut presentation);
        assert_eq!(flee_probability(&wolf, &player_info(), &ctx), 0.0);
    }

    #[test]
    fn test_always_flee_override_wins() {
        let wolf = spawn(Species::Wolf, Mode::Idle);
        let mut world = SnapshotWorld::new();
        world.always_flee.insert(TargetRef::Player);
        let nav = OpenNavigation::default();
        let mut pack = PackTable::new();
        let mut presentation = RecordingPresentation::new();
        let ctx = TickContext::new(FrameTime::default(), &world, &nav, &mut pack, &mut presentation);
        assert_eq!(flee_probability(&wolf, &player_info(), &ctx), 1.0);
    }

    #[test]
    fn test_passive_species_never_flees() {
        let bird = spawn(Species::Ptarmigan, Mode::Idle);
        let world = SnapshotWorld::new();
        let nav = OpenNavigation::default();
        let mut pack = PackTable::new();
        let mut presentation = RecordingPresentation::new();
        let ctx = TickContext::new(FrameTime::default(), &world, &nav, &mut pack, &mut presentation);
        assert_eq!(flee_probability(&bird, &player_info(), &ctx), 0.0);
    }

    #[test]
    fn test_deer_flees_from_player() {
        let mut deer = spawn(Species::Deer, Mode::Wander);
        let mut world = SnapshotWorld::new();
        world.player = Some(PlayerSnapshot::at(Vec3::new(5.0, 0.0, 0.0)));
        let nav = OpenNavigation::default();
        let mut pack = PackTable::new();
        let mut presentation = RecordingPresentation::new();
        let mut ctx = TickContext::new(FrameTime::default(), &world, &nav, &mut pack, &mut presentation);

        let response = change_mode_when_target_detected(&mut deer, TargetRef::Player, &mut ctx);
        assert_eq!(response, DetectionResponse::Flee);
        assert_eq!(deer.current_mode(), Mode::Flee);
        assert_eq!(deer.combat.flee_reason, FleeReason::TargetDetected);
    }

    #[test]
    fn test_moose_holds_ground_on_detection() {
        let mut moose = spawn(Species::Moose, Mode::Wander);
        let mut world = SnapshotWorld::new();
        world.player = Some(PlayerSnapshot::at(Vec3::new(5.0, 0.0, 0.0)));
        let nav = OpenNavigation::default();
        let mut pack = PackTable::new();
        let mut presentation = RecordingPresentation::new();
        let mut ctx = TickContext::new(FrameTime::default(), &world, &nav, &mut pack, &mut presentation);

        let response = change_mode_when_target_detected(&mut moose, TargetRef::Player, &mut ctx);
        assert_eq!(response, DetectionResponse::HoldGround);
        assert_eq!(moose.current_mode(), Mode::HoldGround);
    }

    #[test]
    fn test_hook_cannot_revive_zeroed_chance() {
        let idle = spawn_with(
            Species::Wolf,
            species::default_settings(Species::Wolf),
            Arc::new(Fearful),
            Mode::Idle,
        );
        let wandering = spawn_with(
            Species::Wolf,
            species::default_settings(Species::Wolf),
            Arc::new(Fearful),
            Mode::Wander,
        );
        let world = SnapshotWorld::new();
        let nav = OpenNavigation::default();
        let mut pack = PackTable::new();
        let mut presentation = RecordingPresentation::new();
        let ctx = TickContext::new(FrameTime::default(), &world, &nav, &mut pack, &mut presentation);

        assert_eq!(flee_probability(&idle, &player_info(), &ctx), 0.0);
        assert_eq!(flee_probability(&wandering, &player_info(), &ctx), 1.0);
    }

    #[test]
    fn test_feeding_predator_stays_put_while_feeding_prey_bolts() {
        let settings = SpeciesSettings {
            flee_when_feeding: true,
            ..species::default_settings(Species::Wolf)
        };
        let wolf = spawn_with(Species::Wolf, settings, species::hooks_for(Species::Wolf), Mode::Feeding);
        let deer = spawn(Species::Deer, Mode::Feeding);
        let world = SnapshotWorld::new();
        let nav = OpenNavigation::default();
        let mut pack = PackTable::new();
        let mut presentation = RecordingPresentation::new();
        let ctx = TickContext::new(FrameTime::default(), &world, &nav, &mut pack, &mut presentation);

        assert_eq!(flee_probability(&wolf, &player_info(), &ctx), 0.0);
        assert_eq!(flee_probability(&deer, &player_info(), &ctx), 1.0);
    }

    #[test]
    fn test_predator_never_flees_from_vulnerable_target() {
        let wolf = spawn(Species::Wolf, Mode::Wander);
        let world = SnapshotWorld::new();
        let nav = OpenNavigation::default();
        let mut pack = PackTable::new();
        let mut presentation = RecordingPresentation::new();
        let ctx = TickContext::new(FrameTime::default(), &world, &nav, &mut pack, &mut presentation);

        let wounded = TargetInfo {
            vulnerable: true,
            ..player_info()
        };
        assert!(flee_probability(&wolf, &player_info(), &ctx) > 0.0);
        assert_eq!(flee_probability(&wolf, &wounded, &ctx), 0.0);
    }
}
