//! Mode request scenarios driven through the public API
//!
//! Each test goes through `request_mode`/`apply_damage`/`stun` with the
//! in-memory collaborators, so callbacks and notifications are observed
//! the way a host would see them.

mod common;

use common::{counted, Harness};
use glam::Vec3;
use wildlife_ai::core::types::{Species, TargetRef};
use wildlife_ai::health::{Damage, DamageOutcome, DamageSource};
use wildlife_ai::species;
use wildlife_ai::world::{ActorEvent, PackStatus, PlayerSnapshot};
use wildlife_ai::{FleeReason, Mode};

#[test]
fn test_lethal_environment_hit_kills_without_achievement() {
    let mut h = Harness::new();
    let mut wolf = h.spawn(1, Species::Wolf, Mode::Wander, Mode::Wander);
    wolf.health.current = 5.0;

    let outcome = h.damage(&mut wolf, Damage::new(10.0, DamageSource::Environment));

    assert_eq!(outcome, DamageOutcome::Killed);
    assert!(wolf.health.current <= 0.0001);
    assert_eq!(wolf.current_mode(), Mode::Dead);
    assert_eq!(
        h.count(&wolf, |e| matches!(e, ActorEvent::KilledByPlayer { .. })),
        0
    );
}

#[test]
fn test_lethal_player_hit_reports_kill_once() {
    let mut h = Harness::new();
    let mut deer = h.spawn(2, Species::Deer, Mode::Wander, Mode::Wander);

    let outcome = h.damage(&mut deer, Damage::new(500.0, DamageSource::Player));
    assert_eq!(outcome, DamageOutcome::Killed);

    // Hits on a corpse change nothing
    let again = h.damage(&mut deer, Damage::new(500.0, DamageSource::Player));
    assert_eq!(again, DamageOutcome::Rejected);

    assert_eq!(
        h.count(&deer, |e| matches!(
            e,
            ActorEvent::KilledByPlayer {
                species: Species::Deer
            }
        )),
        1
    );
}

#[test]
fn test_flee_after_passing_attack_is_locked() {
    let mut h = Harness::new();
    let (counter, hooks) = counted(Species::Wolf);
    let mut wolf = h.spawn_with(
        3,
        Species::Wolf,
        species::default_settings(Species::Wolf),
        hooks,
        Mode::PassingAttack,
        Mode::Wander,
    );

    assert!(h.request(&mut wolf, Mode::Flee));
    wolf.combat.flee_reason = FleeReason::AfterPassingAttack;
    let enters = counter.enters();
    let exits = counter.exits();
    let changes = h.mode_changes(&wolf);

    assert!(!h.request(&mut wolf, Mode::Flee));

    assert_eq!(wolf.current_mode(), Mode::Flee);
    assert_eq!(wolf.combat.flee_reason, FleeReason::AfterPassingAttack);
    assert_eq!(counter.enters(), enters);
    assert_eq!(counter.exits(), exits);
    assert_eq!(h.mode_changes(&wolf), changes);
}

#[test]
fn test_pack_restricted_wander_holds_ground() {
    let mut h = Harness::new();
    let mut wolf = h.spawn(4, Species::Wolf, Mode::Idle, Mode::Wander);
    h.pack.join(
        wolf.id(),
        PackStatus {
            combat_restricted: true,
            ..PackStatus::default()
        },
    );

    assert!(h.request(&mut wolf, Mode::Wander));
    assert_eq!(wolf.current_mode(), Mode::HoldGround);
    assert_eq!(wolf.previous_mode(), Mode::Idle);
}

#[test]
fn test_solo_pack_species_flees_instead_of_attacking() {
    let mut h = Harness::new();
    let mut wolf = h.spawn(5, Species::Wolf, Mode::Stalking, Mode::Wander);
    h.world.player = Some(PlayerSnapshot::at(Vec3::new(3.0, 0.0, 0.0)));
    wolf.set_target(Some(TargetRef::Player));

    assert!(h.request(&mut wolf, Mode::Attack));
    assert_eq!(wolf.current_mode(), Mode::Flee);
    assert_eq!(wolf.combat.flee_reason, FleeReason::NoPack);
}

#[test]
fn test_pack_without_attack_permission_holds_ground() {
    let mut h = Harness::new();
    let mut wolf = h.spawn(6, Species::Wolf, Mode::Stalking, Mode::Wander);
    h.pack.join(
        wolf.id(),
        PackStatus {
            can_attack: false,
            ..PackStatus::default()
        },
    );

    assert!(h.request(&mut wolf, Mode::Attack));
    assert_eq!(wolf.current_mode(), Mode::HoldGround);
}

#[test]
fn test_unreachable_attack_target_falls_back_to_default() {
    let mut h = Harness::new();
    h.navigation.reachable = false;
    h.world.player = Some(PlayerSnapshot::at(Vec3::new(10.0, 0.0, 0.0)));

    let mut cougar = h.spawn(7, Species::Cougar, Mode::Stalking, Mode::Wander);
    cougar.set_target(Some(TargetRef::Player));

    assert!(h.request(&mut cougar, Mode::Attack));

    assert_eq!(cougar.current_mode(), Mode::Wander);
    assert_eq!(
        h.count(&cougar, |e| matches!(
            e,
            ActorEvent::CannotReachTarget(TargetRef::Player)
        )),
        1
    );
}

#[test]
fn test_afraid_actor_refuses_attack() {
    let mut h = Harness::new();
    h.world.player = Some(PlayerSnapshot::at(Vec3::new(2.0, 0.0, 0.0)));
    let mut cougar = h.spawn(8, Species::Cougar, Mode::Stalking, Mode::Wander);
    cougar.set_target(Some(TargetRef::Player));
    cougar.combat.fear_seconds = 3.0;

    assert!(!h.request(&mut cougar, Mode::Attack));
    assert_eq!(cougar.current_mode(), Mode::Stalking);
    assert_eq!(h.mode_changes(&cougar), 0);
}

#[test]
fn test_stun_blocks_everything_but_dead_and_scripted() {
    let mut h = Harness::new();
    let mut deer = h.spawn(9, Species::Deer, Mode::Wander, Mode::Wander);

    assert!(h.stun(&mut deer, 5.0));
    assert_eq!(deer.current_mode(), Mode::Stunned);

    assert!(!h.request(&mut deer, Mode::Attack));
    assert!(!h.request(&mut deer, Mode::Idle));
    assert!(!h.request(&mut deer, Mode::Flee));
    assert_eq!(deer.current_mode(), Mode::Stunned);

    assert!(h.request(&mut deer, Mode::ScriptedSequence));
    assert_eq!(deer.current_mode(), Mode::ScriptedSequence);

    let mut other = h.spawn(10, Species::Deer, Mode::Wander, Mode::Wander);
    assert!(h.stun(&mut other, 5.0));
    assert!(h.request(&mut other, Mode::Dead));
    assert_eq!(other.current_mode(), Mode::Dead);
}

#[test]
fn test_stun_only_extends() {
    let mut h = Harness::new();
    let mut deer = h.spawn(11, Species::Deer, Mode::Wander, Mode::Wander);

    assert!(h.stun(&mut deer, 5.0));
    assert!(h.stun(&mut deer, 2.0));
    assert_eq!(deer.combat.stun_seconds, 5.0);
    assert!(h.stun(&mut deer, 8.0));
    assert_eq!(deer.combat.stun_seconds, 8.0);
}

#[test]
fn test_dead_absorbs_every_request() {
    let mut h = Harness::new();
    let mut rabbit = h.spawn(12, Species::Rabbit, Mode::Wander, Mode::Wander);
    assert!(h.request(&mut rabbit, Mode::Dead));
    let changes = h.mode_changes(&rabbit);

    for &mode in Mode::builtin() {
        assert!(!h.request(&mut rabbit, mode), "{:?} left Dead", mode);
    }
    assert!(!h.request(&mut rabbit, Mode::Custom(40)));
    assert!(!h.stun(&mut rabbit, 3.0));

    assert_eq!(rabbit.current_mode(), Mode::Dead);
    assert_eq!(h.mode_changes(&rabbit), changes);
}

#[test]
fn test_custom_mode_is_accepted_as_is() {
    let mut h = Harness::new();
    let mut wolf = h.spawn(13, Species::Wolf, Mode::Wander, Mode::Wander);

    assert!(h.request(&mut wolf, Mode::Custom(31)));
    assert_eq!(wolf.current_mode(), Mode::Custom(31));
    assert_eq!(wolf.previous_mode(), Mode::Wander);
}

#[test]
fn test_patrol_default_replaces_flee() {
    let mut h = Harness::new();
    let mut deer = h.spawn(14, Species::Deer, Mode::Idle, Mode::FollowWaypoints);

    assert!(h.request(&mut deer, Mode::Flee));
    assert_eq!(deer.current_mode(), Mode::FollowWaypoints);
}

#[test]
fn test_cougar_hunts_instead_of_wandering() {
    let mut h = Harness::new();
    h.world.player = Some(PlayerSnapshot::at(Vec3::new(30.0, 0.0, 0.0)));
    let mut cougar = h.spawn(15, Species::Cougar, Mode::Idle, Mode::Wander);
    cougar.set_target(Some(TargetRef::Player));

    assert!(h.request(&mut cougar, Mode::Wander));
    assert_eq!(cougar.current_mode(), Mode::HideAndSeek);
}

#[test]
fn test_same_mode_request_is_a_no_op() {
    let mut h = Harness::new();
    let (counter, hooks) = counted(Species::Deer);
    let mut deer = h.spawn_with(
        16,
        Species::Deer,
        species::default_settings(Species::Deer),
        hooks,
        Mode::Wander,
        Mode::Wander,
    );

    assert!(!h.request(&mut deer, Mode::Wander));
    assert_eq!(counter.enters(), 0);
    assert_eq!(counter.exits(), 0);
    assert_eq!(h.mode_changes(&deer), 0);
}

#[test]
fn test_repeated_flee_switches_to_retreat_speed() {
    let mut h = Harness::new();
    let mut deer = h.spawn(17, Species::Deer, Mode::Wander, Mode::Wander);

    assert!(h.request(&mut deer, Mode::Flee));
    assert_eq!(deer.combat.flee_speed, deer.settings().flee_speed);

    deer.combat.use_retreat_speed = true;
    assert!(!h.request(&mut deer, Mode::Flee));
    assert_eq!(deer.combat.flee_speed, deer.settings().retreat_speed);
    assert!(!deer.combat.use_retreat_speed);
}
