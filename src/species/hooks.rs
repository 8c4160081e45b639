//! Per-phase strategy interface for species variants
//!
//! Every lifecycle step asks the actor's hooks first. `Continue` runs the
//! built-in logic, `Handled` skips it, `Override` skips it and supplies a
//! value in its place.

use crate::actor::Actor;
use crate::hold_ground::StimulusKind;
use crate::mode::Mode;
use crate::transition::Resolution;
use crate::world::{TargetInfo, TickContext};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult<T = ()> {
    Continue,
    Handled,
    Override(T),
}

impl<T> HookResult<T> {
    /// Whether built-in logic should run
    pub fn proceeds(&self) -> bool {
        matches!(self, HookResult::Continue)
    }
}

pub trait SpeciesHooks: Send + Sync {
    fn pre_process(&self, _actor: &mut Actor, _ctx: &mut TickContext<'_>) -> HookResult {
        HookResult::Continue
    }

    fn process(&self, _actor: &mut Actor, _ctx: &mut TickContext<'_>) -> HookResult {
        HookResult::Continue
    }

    fn post_process(&self, _actor: &mut Actor, _ctx: &mut TickContext<'_>) -> HookResult {
        HookResult::Continue
    }

    fn enter_mode(&self, _actor: &mut Actor, _mode: Mode, _ctx: &mut TickContext<'_>) -> HookResult {
        HookResult::Continue
    }

    fn exit_mode(&self, _actor: &mut Actor, _mode: Mode, _ctx: &mut TickContext<'_>) -> HookResult {
        HookResult::Continue
    }

    /// Runs before every built-in gate rule. `Handled` rejects the request.
    fn resolve_mode(
        &self,
        _actor: &mut Actor,
        _requested: Mode,
        _ctx: &mut TickContext<'_>,
    ) -> HookResult<Resolution> {
        HookResult::Continue
    }

    fn scan_for_target(&self, _actor: &mut Actor, _ctx: &mut TickContext<'_>) -> HookResult {
        HookResult::Continue
    }

    /// Replace one hold-ground stimulus check. `Handled` counts as not triggered.
    fn stimulus(
        &self,
        _actor: &Actor,
        _stimulus: StimulusKind,
        _ctx: &TickContext<'_>,
    ) -> HookResult<bool> {
        HookResult::Continue
    }

    /// Adjust the flee chance computed so far for a newly detected target
    fn flee_probability(
        &self,
        _actor: &Actor,
        _target: &TargetInfo,
        _probability: f32,
        _ctx: &TickContext<'_>,
    ) -> HookResult<f32> {
        HookResult::Continue
    }
}

/// Built-in behavior everywhere
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl SpeciesHooks for DefaultHooks {}

/// Layers hooks; the first layer that does not `Continue` wins
#[derive(Clone, Default)]
pub struct HookChain {
    layers: Vec<Arc<dyn SpeciesHooks>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer consulted after the existing ones
    pub fn then(mut self, hooks: Arc<dyn SpeciesHooks>) -> Self {
        self.layers.push(hooks);
        self
    }

    fn first<T>(&self, mut call: impl FnMut(&dyn SpeciesHooks) -> HookResult<T>) -> HookResult<T> {
        for layer in &self.layers {
            let result = call(layer.as_ref());
            if !result.proceeds() {
                return result;
            }
        }
        HookResult::Continue
    }
}

impl SpeciesHooks for HookChain {
    fn pre_process(&self, actor: &mut Actor, ctx: &mut TickContext<'_>) -> HookResult {
        self.first(|h| h.pre_process(actor, ctx))
    }

    fn process(&self, actor: &mut Actor, ctx: &mut TickContext<'_>) -> HookResult {
        self.first(|h| h.process(actor, ctx))
    }

    fn post_process(&self, actor: &mut Actor, ctx: &mut TickContext<'_>) -> HookResult {
        self.first(|h| h.post_process(actor, ctx))
    }

    fn enter_mode(&self, actor: &mut Actor, mode: Mode, ctx: &mut TickContext<'_>) -> HookResult {
        self.first(|h| h.enter_mode(actor, mode, ctx))
    }

    fn exit_mode(&self, actor: &mut Actor, mode: Mode, ctx: &mut TickContext<'_>) -> HookResult {
        self.first(|h| h.exit_mode(actor, mode, ctx))
    }

    fn resolve_mode(
        &self,
        actor: &mut Actor,
        requested: Mode,
        ctx: &mut TickContext<'_>,
    ) -> HookResult<Resolution> {
        self.first(|h| h.resolve_mode(actor, requested, ctx))
    }

    fn scan_for_target(&self, actor: &mut Actor, ctx: &mut TickContext<'_>) -> HookResult {
        self.first(|h| h.scan_for_target(actor, ctx))
    }

    fn stimulus(&self, actor: &Actor, stimulus: StimulusKind, ctx: &TickContext<'_>) -> HookResult<bool> {
        self.first(|h| h.stimulus(actor, stimulus, ctx))
    }

    fn flee_probability(
        &self,
        actor: &Actor,
        target: &TargetInfo,
        probability: f32,
        ctx: &TickContext<'_>,
    ) -> HookResult<f32> {
        self.first(|h| h.flee_probability(actor, target, probability, ctx))
    }
}
