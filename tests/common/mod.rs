//! Shared harness for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wildlife_ai::core::types::{ActorId, Species};
use wildlife_ai::core::FrameTime;
use wildlife_ai::health::{Damage, DamageOutcome};
use wildlife_ai::species::{self, HookChain, HookResult, SpeciesHooks};
use wildlife_ai::world::{
    ActorEvent, OpenNavigation, PackTable, RecordingPresentation, SnapshotWorld,
};
use wildlife_ai::{Actor, Mode, SettingsCatalog, SimulationClock, SpawnContext, SpeciesSettings, TickContext};

/// Collaborators for driving actors tick by tick
pub struct Harness {
    pub clock: SimulationClock,
    pub world: SnapshotWorld,
    pub navigation: OpenNavigation,
    pub pack: PackTable,
    pub presentation: RecordingPresentation,
    pub catalog: SettingsCatalog,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            clock: SimulationClock::default(),
            world: SnapshotWorld::new(),
            navigation: OpenNavigation::default(),
            pack: PackTable::new(),
            presentation: RecordingPresentation::new(),
            catalog: SettingsCatalog::with_defaults(),
        }
    }

    /// Actor with built-in settings and hooks, facing +X at the origin
    pub fn spawn(&self, index: u128, species: Species, initial: Mode, default: Mode) -> Actor {
        let mut actor = Actor::from_catalog(ActorId::from_index(index), species, &self.catalog);
        actor.initialize(&self.clock, spawn_context(index, initial, default));
        actor
    }

    /// Actor with explicit settings and hooks
    pub fn spawn_with(
        &self,
        index: u128,
        species: Species,
        settings: SpeciesSettings,
        hooks: Arc<dyn SpeciesHooks>,
        initial: Mode,
        default: Mode,
    ) -> Actor {
        let mut actor = Actor::new(ActorId::from_index(index), species, Arc::new(settings), hooks);
        actor.initialize(&self.clock, spawn_context(index, initial, default));
        actor
    }

    pub fn ctx(&mut self, time: FrameTime) -> TickContext<'_> {
        TickContext::new(
            time,
            &self.world,
            &self.navigation,
            &mut self.pack,
            &mut self.presentation,
        )
    }

    /// Advance the clock by `dt` and update one actor
    pub fn tick(&mut self, actor: &mut Actor, dt: f32) {
        let time = self.clock.advance(dt);
        let mut ctx = self.ctx(time);
        actor.update(&mut ctx);
    }

    pub fn request(&mut self, actor: &mut Actor, mode: Mode) -> bool {
        let mut ctx = self.ctx(FrameTime::default());
        actor.request_mode(mode, &mut ctx)
    }

    pub fn damage(&mut self, actor: &mut Actor, damage: Damage) -> DamageOutcome {
        let mut ctx = self.ctx(FrameTime::default());
        actor.apply_damage(damage, &mut ctx)
    }

    pub fn stun(&mut self, actor: &mut Actor, seconds: f32) -> bool {
        let mut ctx = self.ctx(FrameTime::default());
        actor.stun(seconds, &mut ctx)
    }

    pub fn count(&self, actor: &Actor, predicate: impl Fn(&ActorEvent) -> bool) -> usize {
        self.presentation.count(actor.id(), predicate)
    }

    pub fn mode_changes(&self, actor: &Actor) -> usize {
        self.count(actor, |e| matches!(e, ActorEvent::ModeChanged { .. }))
    }
}

fn spawn_context(index: u128, initial: Mode, default: Mode) -> SpawnContext {
    SpawnContext {
        initial_mode: initial,
        default_mode: default,
        seed: index as u64,
        ..SpawnContext::default()
    }
}

/// Counts enter/exit callbacks without altering behavior
#[derive(Default)]
pub struct CountingHooks {
    pub enters: AtomicUsize,
    pub exits: AtomicUsize,
}

impl CountingHooks {
    pub fn enters(&self) -> usize {
        self.enters.load(Ordering::SeqCst)
    }

    pub fn exits(&self) -> usize {
        self.exits.load(Ordering::SeqCst)
    }
}

impl SpeciesHooks for CountingHooks {
    fn enter_mode(&self, _actor: &mut Actor, _mode: Mode, _ctx: &mut TickContext<'_>) -> HookResult {
        self.enters.fetch_add(1, Ordering::SeqCst);
        HookResult::Continue
    }

    fn exit_mode(&self, _actor: &mut Actor, _mode: Mode, _ctx: &mut TickContext<'_>) -> HookResult {
        self.exits.fetch_add(1, Ordering::SeqCst);
        HookResult::Continue
    }
}

/// Counting layer in front of the species' own hooks
pub fn counted(species: Species) -> (Arc<CountingHooks>, Arc<dyn SpeciesHooks>) {
    let counter = Arc::new(CountingHooks::default());
    let chain = HookChain::new()
        .then(counter.clone())
        .then(species::hooks_for(species));
    (counter, Arc::new(chain))
}

/// Every mode the state machine knows, custom values beyond
pub fn mode_from_index(index: u16) -> Mode {
    Mode::builtin()
        .get(index as usize)
        .copied()
        .unwrap_or(Mode::Custom(index))
}
