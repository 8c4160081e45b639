//! Collaborator contracts
//!
//! The behavior core never owns the world. It reads it through `WorldView`,
//! asks `NavigationQuery` for reachability, consults the `PackCoordinator`,
//! and reports to the `PresentationLayer`. All four arrive bundled in a
//! `TickContext` for the duration of one call.

pub mod reference;

pub use reference::{OpenNavigation, PackStatus, PackTable, RecordingPresentation, SnapshotWorld};

use crate::core::error::{Result, WildlifeError};
use crate::core::types::{ActorId, Species, TargetRef};
use crate::core::FrameTime;
use crate::mode::Mode;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What the registry knows about another actor this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub species: Species,
    pub position: Vec3,
    pub is_dead: bool,
    /// Injured, trapped or otherwise easy prey
    pub vulnerable: bool,
}

/// What the host knows about the player this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec3,
    pub is_dead: bool,
    /// Invisible or ghosted players are never detected
    pub is_ghost: bool,
    pub is_crouching: bool,
    /// Seconds since the player last stood up, if recently
    pub stood_up_seconds_ago: Option<f32>,
    /// Skill-based multiplier on how far away the player can be noticed
    pub detection_multiplier: f32,
    pub aiming_at: Option<ActorId>,
    pub vulnerable: bool,
}

impl PlayerSnapshot {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            is_dead: false,
            is_ghost: false,
            is_crouching: false,
            stood_up_seconds_ago: None,
            detection_multiplier: 1.0,
            aiming_at: None,
            vulnerable: false,
        }
    }
}

/// Global conditions affecting every actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentState {
    /// Weather and light multiplier on detection range
    pub detection_scale: f32,
    pub aurora_active: bool,
    pub menu_open: bool,
    pub player_struggle_active: bool,
}

impl Default for EnvironmentState {
    fn default() -> Self {
        Self {
            detection_scale: 1.0,
            aurora_active: false,
            menu_open: false,
            player_struggle_active: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeterrentKind {
    Torch,
    Campfire,
    RedFlare,
    BlueFlare,
    RaisedSpear,
}

/// A lit or brandished object predators keep their distance from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deterrent {
    pub kind: DeterrentKind,
    pub position: Vec3,
    /// Held by the player rather than lying on the ground
    pub held: bool,
}

/// Read-only view of the world shared by every actor
pub trait WorldView {
    /// Registry enumeration order. Ids may refer to actors that no longer exist.
    fn actor_ids(&self) -> &[ActorId];
    fn actor(&self, id: ActorId) -> Option<ActorSnapshot>;
    fn player(&self) -> Option<PlayerSnapshot>;
    fn environment(&self) -> EnvironmentState;
    fn is_hostile_toward(&self, target: TargetRef, observer: ActorId) -> bool;
    /// Targets every actor must flee from regardless of species
    fn always_flee_from(&self, _target: TargetRef) -> bool {
        false
    }
    fn deterrents(&self) -> &[Deterrent];
    fn aurora_field_at(&self, position: Vec3) -> bool;
    fn nearest_safe_haven(&self, position: Vec3) -> Option<Vec3>;
    fn struggle_position(&self) -> Option<Vec3>;
}

/// Spatial oracle backed by the host's navigation mesh
pub trait NavigationQuery {
    fn can_pathfind_to(&self, from: Vec3, to: Vec3) -> bool;
    fn has_line_of_sight(&self, from: Vec3, to: Vec3) -> bool;
}

/// Group combat policy
pub trait PackCoordinator {
    fn is_in_pack(&self, actor: ActorId) -> bool;
    fn can_pack_attack(&self, actor: ActorId) -> bool;
    fn is_combat_restricted(&self, actor: ActorId) -> bool;
    fn should_pack_flee(&self, actor: ActorId) -> bool;
    fn is_valid_pack_target(&self, actor: ActorId, target: TargetRef) -> bool;
    /// The only write: damage taken lowers pack morale
    fn report_morale_damage(&mut self, actor: ActorId, damage: f32);
    /// A pack member acquired a new target
    fn alert(&mut self, _actor: ActorId, _target: TargetRef) {}
}

/// Notifications sent to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActorEvent {
    ModeChanged { from: Mode, to: Mode },
    TargetAcquired(TargetRef),
    TargetLost,
    CannotReachTarget(TargetRef),
    AttackVariant(usize),
    Dodge,
    /// Achievement hook, only for player kills
    KilledByPlayer { species: Species },
    Despawned { elapsed_seconds: f64 },
}

/// Per-tick movement/animation hand-off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub mode: Mode,
    pub speed: f32,
    /// Unit vector, or zero when standing still
    pub heading: Vec3,
    pub destination: Option<Vec3>,
    pub dodge: bool,
}

pub trait PresentationLayer {
    /// LOD-reduced actors skip post-processing
    fn is_impostor(&self, actor: ActorId) -> bool;
    fn notify(&mut self, actor: ActorId, event: ActorEvent);
    fn apply_motion(&mut self, actor: ActorId, motion: MotionParams);
}

/// Collaborators for one update or damage call
pub struct TickContext<'a> {
    pub time: FrameTime,
    pub world: &'a dyn WorldView,
    pub navigation: &'a dyn NavigationQuery,
    pub pack: &'a mut dyn PackCoordinator,
    pub presentation: &'a mut dyn PresentationLayer,
}

impl<'a> TickContext<'a> {
    pub fn new(
        time: FrameTime,
        world: &'a dyn WorldView,
        navigation: &'a dyn NavigationQuery,
        pack: &'a mut dyn PackCoordinator,
        presentation: &'a mut dyn PresentationLayer,
    ) -> Self {
        Self {
            time,
            world,
            navigation,
            pack,
            presentation,
        }
    }
}

/// A target reference resolved against the world this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub target: TargetRef,
    pub species: Option<Species>,
    pub position: Vec3,
    pub is_dead: bool,
    pub is_ghost: bool,
    pub vulnerable: bool,
}

/// Resolve a weak target reference, failing if the referent is gone
pub fn resolve_target(world: &dyn WorldView, target: TargetRef) -> Result<TargetInfo> {
    match target {
        TargetRef::Player => {
            let player = world
                .player()
                .ok_or_else(|| WildlifeError::MissingReference("player".into()))?;
            Ok(TargetInfo {
                target,
                species: None,
                position: player.position,
                is_dead: player.is_dead,
                is_ghost: player.is_ghost,
                vulnerable: player.vulnerable,
            })
        }
        TargetRef::Actor(id) => {
            let actor = world
                .actor(id)
                .ok_or_else(|| WildlifeError::MissingReference(format!("actor {}", id)))?;
            Ok(TargetInfo {
                target,
                species: Some(actor.species),
                position: actor.position,
                is_dead: actor.is_dead,
                is_ghost: false,
                vulnerable: actor.vulnerable,
            })
        }
    }
}
