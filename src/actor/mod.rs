//! Simulated wildlife actor
//!
//! An `Actor` owns its mode, perception, health and combat state. It never
//! owns other actors: targets are weak references resolved each tick. The
//! update loop lives in `lifecycle`, damage in `health`.

use crate::core::config::{SettingsCatalog, SpeciesSettings};
use crate::core::error::{Result, WildlifeError};
use crate::core::types::{ActorId, Species, TargetRef};
use crate::core::SimulationClock;
use crate::health::HealthState;
use crate::mode::{FleeReason, Mode};
use crate::perception::PerceptionState;
use crate::species::{self, SpeciesHooks};
use crate::world::{ActorEvent, PresentationLayer};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::sync::Arc;

/// Everything the population manager decides when placing an actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnContext {
    pub position: Vec3,
    pub forward: Vec3,
    pub initial_mode: Mode,
    /// Mode the actor falls back to when nothing else applies
    pub default_mode: Mode,
    pub seed: u64,
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::X,
            initial_mode: Mode::Wander,
            default_mode: Mode::Wander,
            seed: 0,
        }
    }
}

/// Current and previous mode plus time spent in the current one
#[derive(Debug, Clone, PartialEq)]
pub struct ModeState {
    pub(crate) current: Mode,
    pub(crate) previous: Mode,
    pub(crate) default: Mode,
    pub(crate) time_in_mode_seconds: f32,
    pub(crate) time_in_mode_game_hours: f32,
    /// Set while exit/enter callbacks run; nested requests are refused
    pub(crate) in_transition: bool,
}

impl ModeState {
    fn new(initial: Mode, default: Mode) -> Self {
        Self {
            current: initial,
            previous: Mode::None,
            default,
            time_in_mode_seconds: 0.0,
            time_in_mode_game_hours: 0.0,
            in_transition: false,
        }
    }
}

/// Fight-or-flight bookkeeping
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombatState {
    pub flee_reason: FleeReason,
    pub(crate) pending_flee_reason: Option<FleeReason>,
    /// Next repeated Flee request recomputes speed instead of being ignored
    pub use_retreat_speed: bool,
    pub flee_speed: f32,
    /// Attack requests are refused while this is positive
    pub fear_seconds: f32,
    pub stun_seconds: f32,
    /// Committed attackers ignore deterrents
    pub ignore_stimuli: bool,
    pub last_hold_ground_end: Option<f64>,
    pub last_dodge: Option<f64>,
    pub dodge_pending: bool,
    pub attack_variant: Option<usize>,
}

pub struct Actor {
    id: ActorId,
    species: Species,
    settings: Arc<SpeciesSettings>,
    hooks: Arc<dyn SpeciesHooks>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) mode: ModeState,
    pub(crate) position: Vec3,
    pub(crate) forward: Vec3,
    pub perception: PerceptionState,
    pub health: HealthState,
    pub combat: CombatState,
    pub(crate) now_seconds: f64,
    pub(crate) despawned: bool,
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("species", &self.species)
            .field("mode", &self.mode)
            .field("health", &self.health)
            .field("target", &self.perception.current_target)
            .finish()
    }
}

impl Actor {
    pub fn new(
        id: ActorId,
        species: Species,
        settings: Arc<SpeciesSettings>,
        hooks: Arc<dyn SpeciesHooks>,
    ) -> Self {
        let health = HealthState::new(settings.max_health);
        let combat = CombatState {
            flee_speed: settings.flee_speed,
            ..CombatState::default()
        };
        Self {
            id,
            species,
            settings,
            hooks,
            rng: ChaCha8Rng::seed_from_u64(0),
            mode: ModeState::new(Mode::Idle, Mode::Idle),
            position: Vec3::ZERO,
            forward: Vec3::X,
            perception: PerceptionState::default(),
            health,
            combat,
            now_seconds: 0.0,
            despawned: false,
        }
    }

    /// Actor with catalog settings and the species' built-in hooks
    pub fn from_catalog(id: ActorId, species: Species, catalog: &SettingsCatalog) -> Self {
        Self::new(
            id,
            species,
            catalog.settings_or_default(species),
            species::hooks_for(species),
        )
    }

    /// Bind spawn state. Called once by the population manager before the first update.
    pub fn initialize(&mut self, clock: &SimulationClock, spawn: SpawnContext) {
        let default = match spawn.default_mode {
            Mode::None => Mode::Idle,
            mode => mode,
        };
        let initial = match spawn.initial_mode {
            Mode::None => default,
            mode => mode,
        };

        self.rng = ChaCha8Rng::seed_from_u64(spawn.seed);
        self.mode = ModeState::new(initial, default);
        self.position = spawn.position;
        self.forward = spawn.forward.try_normalize().unwrap_or(Vec3::X);
        self.now_seconds = clock.now();
        self.health = HealthState::new(self.settings.max_health);
        self.combat = CombatState {
            flee_speed: self.settings.flee_speed,
            ..CombatState::default()
        };
        self.perception = PerceptionState {
            next_scan_in_seconds: self.roll_scan_interval(),
            ..PerceptionState::default()
        };
        self.despawned = false;

        tracing::debug!(actor = %self.id, species = ?self.species, mode = ?initial, "actor initialized");
    }

    /// Final notification before the population manager destroys the actor
    pub fn despawn(&mut self, elapsed_seconds: f64, presentation: &mut dyn PresentationLayer) {
        if self.despawned {
            return;
        }
        self.despawned = true;
        presentation.notify(self.id, ActorEvent::Despawned { elapsed_seconds });
        tracing::debug!(actor = %self.id, elapsed_seconds, "actor despawned");
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn settings(&self) -> &SpeciesSettings {
        &self.settings
    }

    pub fn hooks(&self) -> &Arc<dyn SpeciesHooks> {
        &self.hooks
    }

    pub fn current_mode(&self) -> Mode {
        self.mode.current
    }

    pub fn previous_mode(&self) -> Mode {
        self.mode.previous
    }

    pub fn default_mode(&self) -> Mode {
        self.mode.default
    }

    pub fn time_in_mode_seconds(&self) -> f32 {
        self.mode.time_in_mode_seconds
    }

    pub fn time_in_mode_game_hours(&self) -> f32 {
        self.mode.time_in_mode_game_hours
    }

    pub fn is_dead(&self) -> bool {
        self.mode.current == Mode::Dead
    }

    pub fn is_despawned(&self) -> bool {
        self.despawned
    }

    pub fn current_target(&self) -> Option<TargetRef> {
        self.perception.current_target
    }

    pub fn set_target(&mut self, target: Option<TargetRef>) {
        self.perception.current_target = target;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Host writes back where navigation actually moved the actor
    pub fn set_transform(&mut self, position: Vec3, forward: Vec3) {
        self.position = position;
        if let Some(forward) = forward.try_normalize() {
            self.forward = forward;
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::Y * self.settings.eye_height
    }

    pub fn is_afraid(&self) -> bool {
        self.combat.fear_seconds > 0.0
    }

    pub fn is_stunned(&self) -> bool {
        self.mode.current == Mode::Stunned && self.combat.stun_seconds > 0.0
    }

    /// Speed used while fleeing, honoring a pending retreat
    pub(crate) fn recalculate_flee_speed(&mut self) {
        self.combat.flee_speed = if self.combat.use_retreat_speed {
            self.settings.retreat_speed
        } else {
            self.settings.flee_speed
        };
    }

    pub(crate) fn roll_scan_interval(&mut self) -> f32 {
        let min = self.settings.scan_interval_min_seconds;
        let max = self.settings.scan_interval_max_seconds;
        if max > min {
            self.rng.gen_range(min..=max)
        } else {
            min
        }
    }

    /// Record which attack animation to play.
    ///
    /// Fails for indices the presentation layer does not provide.
    pub fn choose_attack_variant(&mut self, index: usize) -> Result<()> {
        let len = self.settings.attack_variants;
        if index >= len {
            return Err(WildlifeError::InvalidIndex {
                what: "attack variant",
                index,
                len,
            });
        }
        self.combat.attack_variant = Some(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wolf() -> Actor {
        let catalog = SettingsCatalog::with_defaults();
        Actor::from_catalog(ActorId::from_index(1), Species::Wolf, &catalog)
    }

    #[test]
    fn test_initialize_resolves_none_modes() {
        let mut actor = wolf();
        actor.initialize(
            &SimulationClock::default(),
            SpawnContext {
                initial_mode: Mode::None,
                default_mode: Mode::None,
                ..SpawnContext::default()
            },
        );
        assert_eq!(actor.current_mode(), Mode::Idle);
        assert_eq!(actor.default_mode(), Mode::Idle);
        assert_eq!(actor.time_in_mode_seconds(), 0.0);
    }

    #[test]
    fn test_initial_scan_is_jittered_within_bounds() {
        let mut actor = wolf();
        actor.initialize(&SimulationClock::default(), SpawnContext::default());
        let next = actor.perception.next_scan_in_seconds;
        assert!(next >= actor.settings().scan_interval_min_seconds);
        assert!(next <= actor.settings().scan_interval_max_seconds);
    }

    #[test]
    fn test_same_seed_same_jitter() {
        let mut a = wolf();
        let mut b = wolf();
        let spawn = SpawnContext {
            seed: 99,
            ..SpawnContext::default()
        };
        a.initialize(&SimulationClock::default(), spawn);
        b.initialize(&SimulationClock::default(), spawn);
        assert_eq!(
            a.perception.next_scan_in_seconds,
            b.perception.next_scan_in_seconds
        );
    }

    #[test]
    fn test_attack_variant_out_of_range() {
        let mut actor = wolf();
        let len = actor.settings().attack_variants;
        assert!(actor.choose_attack_variant(0).is_ok());
        let err = actor.choose_attack_variant(len).unwrap_err();
        assert!(matches!(err, WildlifeError::InvalidIndex { .. }));
        assert_eq!(actor.combat.attack_variant, Some(0));
    }

    #[test]
    fn test_set_transform_ignores_zero_forward() {
        let mut actor = wolf();
        actor.set_transform(Vec3::new(1.0, 0.0, 2.0), Vec3::ZERO);
        assert_eq!(actor.position(), Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(actor.forward(), Vec3::X);
    }
}
