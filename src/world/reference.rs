//! In-memory collaborators
//!
//! Plain data implementations of the collaborator traits. Hosts without
//! their own registry (the headless runner, tests, benches) use these.

use super::{
    ActorEvent, ActorSnapshot, Deterrent, EnvironmentState, MotionParams, NavigationQuery,
    PackCoordinator, PlayerSnapshot, PresentationLayer, WorldView,
};
use crate::core::types::{ActorId, TargetRef};
use ahash::{AHashMap, AHashSet};
use glam::Vec3;

/// Circular aurora field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuroraZone {
    pub center: Vec3,
    pub radius: f32,
}

/// World state captured once per tick
#[derive(Debug, Clone, Default)]
pub struct SnapshotWorld {
    ids: Vec<ActorId>,
    actors: AHashMap<ActorId, ActorSnapshot>,
    pub player: Option<PlayerSnapshot>,
    pub environment: EnvironmentState,
    pub deterrents: Vec<Deterrent>,
    pub aurora_zones: Vec<AuroraZone>,
    pub safe_havens: Vec<Vec3>,
    pub struggle: Option<Vec3>,
    /// (target, observer) pairs that are not hostile
    pub peaceful: AHashSet<(TargetRef, ActorId)>,
    pub always_flee: AHashSet<TargetRef>,
}

impl SnapshotWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh an actor, appending new ids to the enumeration
    pub fn insert_actor(&mut self, snapshot: ActorSnapshot) {
        if self.actors.insert(snapshot.id, snapshot).is_none() && !self.ids.contains(&snapshot.id) {
            self.ids.push(snapshot.id);
        }
    }

    /// Drop the actor's data but leave its id enumerable, as a stale registry would
    pub fn remove_actor(&mut self, id: ActorId) {
        self.actors.remove(&id);
    }

    /// Forget every id whose actor is gone
    pub fn compact(&mut self) {
        let actors = &self.actors;
        self.ids.retain(|id| actors.contains_key(id));
    }

    pub fn set_peaceful(&mut self, target: TargetRef, observer: ActorId) {
        self.peaceful.insert((target, observer));
    }
}

impl WorldView for SnapshotWorld {
    fn actor_ids(&self) -> &[ActorId] {
        &self.ids
    }

    fn actor(&self, id: ActorId) -> Option<ActorSnapshot> {
        self.actors.get(&id).copied()
    }

    fn player(&self) -> Option<PlayerSnapshot> {
        self.player
    }

    fn environment(&self) -> EnvironmentState {
        self.environment
    }

    fn is_hostile_toward(&self, target: TargetRef, observer: ActorId) -> bool {
        !self.peaceful.contains(&(target, observer))
    }

    fn always_flee_from(&self, target: TargetRef) -> bool {
        self.always_flee.contains(&target)
    }

    fn deterrents(&self) -> &[Deterrent] {
        &self.deterrents
    }

    fn aurora_field_at(&self, position: Vec3) -> bool {
        self.environment.aurora_active
            && self
                .aurora_zones
                .iter()
                .any(|zone| zone.center.distance(position) <= zone.radius)
    }

    fn nearest_safe_haven(&self, position: Vec3) -> Option<Vec3> {
        self.safe_havens.iter().copied().min_by(|a, b| {
            a.distance_squared(position)
                .total_cmp(&b.distance_squared(position))
        })
    }

    fn struggle_position(&self) -> Option<Vec3> {
        self.struggle
    }
}

/// Navigation with fixed answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenNavigation {
    pub reachable: bool,
    pub line_of_sight: bool,
}

impl Default for OpenNavigation {
    fn default() -> Self {
        Self {
            reachable: true,
            line_of_sight: true,
        }
    }
}

impl NavigationQuery for OpenNavigation {
    fn can_pathfind_to(&self, _from: Vec3, _to: Vec3) -> bool {
        self.reachable
    }

    fn has_line_of_sight(&self, _from: Vec3, _to: Vec3) -> bool {
        self.line_of_sight
    }
}

/// Pack membership and policy for one actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackStatus {
    pub can_attack: bool,
    pub combat_restricted: bool,
    pub should_flee: bool,
}

impl Default for PackStatus {
    fn default() -> Self {
        Self {
            can_attack: true,
            combat_restricted: false,
            should_flee: true,
        }
    }
}

/// Pack coordinator backed by a lookup table. Actors without an entry are solo.
#[derive(Debug, Clone, Default)]
pub struct PackTable {
    members: AHashMap<ActorId, PackStatus>,
    invalid_targets: AHashSet<(ActorId, TargetRef)>,
    pub morale_damage: AHashMap<ActorId, f32>,
    pub alerts: Vec<(ActorId, TargetRef)>,
}

impl PackTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&mut self, actor: ActorId, status: PackStatus) {
        self.members.insert(actor, status);
    }

    pub fn leave(&mut self, actor: ActorId) {
        self.members.remove(&actor);
    }

    pub fn forbid_target(&mut self, actor: ActorId, target: TargetRef) {
        self.invalid_targets.insert((actor, target));
    }
}

impl PackCoordinator for PackTable {
    fn is_in_pack(&self, actor: ActorId) -> bool {
        self.members.contains_key(&actor)
    }

    fn can_pack_attack(&self, actor: ActorId) -> bool {
        self.members.get(&actor).is_some_and(|s| s.can_attack)
    }

    fn is_combat_restricted(&self, actor: ActorId) -> bool {
        self.members.get(&actor).is_some_and(|s| s.combat_restricted)
    }

    fn should_pack_flee(&self, actor: ActorId) -> bool {
        self.members.get(&actor).map_or(true, |s| s.should_flee)
    }

    fn is_valid_pack_target(&self, actor: ActorId, target: TargetRef) -> bool {
        !self.invalid_targets.contains(&(actor, target))
    }

    fn report_morale_damage(&mut self, actor: ActorId, damage: f32) {
        *self.morale_damage.entry(actor).or_insert(0.0) += damage;
    }

    fn alert(&mut self, actor: ActorId, target: TargetRef) {
        if self.is_in_pack(actor) {
            self.alerts.push((actor, target));
        }
    }
}

/// Presentation stand-in that records everything it is told
#[derive(Debug, Clone, Default)]
pub struct RecordingPresentation {
    pub events: Vec<(ActorId, ActorEvent)>,
    pub motions: Vec<(ActorId, MotionParams)>,
    pub impostors: AHashSet<ActorId>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events for one actor, in order
    pub fn events_for(&self, actor: ActorId) -> Vec<ActorEvent> {
        self.events
            .iter()
            .filter(|(id, _)| *id == actor)
            .map(|(_, event)| *event)
            .collect()
    }

    pub fn count(&self, actor: ActorId, predicate: impl Fn(&ActorEvent) -> bool) -> usize {
        self.events
            .iter()
            .filter(|(id, event)| *id == actor && predicate(event))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.motions.clear();
    }
}

impl PresentationLayer for RecordingPresentation {
    fn is_impostor(&self, actor: ActorId) -> bool {
        self.impostors.contains(&actor)
    }

    fn notify(&mut self, actor: ActorId, event: ActorEvent) {
        self.events.push((actor, event));
    }

    fn apply_motion(&mut self, actor: ActorId, motion: MotionParams) {
        self.motions.push((actor, motion));
    }
}
