//! Tick orchestration and mode requests

use super::{behaviors, callbacks, motion};
use crate::actor::Actor;
use crate::core::types::ActorClass;
use crate::health::bleed;
use crate::hold_ground;
use crate::mode::set::{DODGE_ELIGIBLE, POST_PROCESS_SKIP, SCAN_SUPPRESSED};
use crate::mode::{FleeReason, Mode};
use crate::perception::targeting;
use crate::transition::{gate, Resolution};
use crate::world::{ActorEvent, TickContext};
use rand::Rng;

impl Actor {
    /// Run one tick. Never fails; problems are logged and the tick degrades.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) {
        if self.despawned {
            return;
        }
        self.now_seconds = ctx.time.now_seconds;
        let hooks = self.hooks().clone();

        if hooks.pre_process(self, ctx).proceeds() {
            self.pre_process(ctx);
        }

        if hooks.process(self, ctx).proceeds() {
            self.process(ctx);
        }

        if POST_PROCESS_SKIP.contains(self.current_mode()) || ctx.presentation.is_impostor(self.id()) {
            return;
        }

        if hooks.post_process(self, ctx).proceeds() {
            motion::post_process(self, ctx);
        }
    }

    fn pre_process(&mut self, ctx: &mut TickContext<'_>) {
        let delta = ctx.time.delta_seconds.max(0.0);
        self.mode.time_in_mode_seconds += delta;
        self.mode.time_in_mode_game_hours += ctx.time.delta_game_hours.max(0.0);
        self.combat.stun_seconds = (self.combat.stun_seconds - delta).max(0.0);
        self.combat.fear_seconds = (self.combat.fear_seconds - delta).max(0.0);

        if self.is_dead() {
            return;
        }
        if self.health.is_depleted() {
            self.request_mode(Mode::Dead, ctx);
            return;
        }

        self.recover_target_after_interrupt();
        hold_ground::evaluate(self, ctx);
        self.check_dodge_opportunity(ctx);
        bleed::accumulate(self, ctx);
    }

    fn process(&mut self, ctx: &mut TickContext<'_>) {
        if !SCAN_SUPPRESSED.contains(self.current_mode()) {
            targeting::tick_scan(self, ctx);
        }
        behaviors::run(self, ctx);
    }

    fn recover_target_after_interrupt(&mut self) {
        if !self.perception.retarget_after_interrupt {
            return;
        }
        self.perception.retarget_after_interrupt = false;
        self.perception.current_target = None;
        self.perception.next_scan_in_seconds = 0.0;
        tracing::trace!(actor = %self.id(), "retargeting after interrupt");
    }

    fn check_dodge_opportunity(&mut self, ctx: &mut TickContext<'_>) {
        let settings = self.settings();
        if settings.class != ActorClass::Predator
            || settings.dodge_range <= 0.0
            || !DODGE_ELIGIBLE.contains(self.current_mode())
        {
            return;
        }

        let Some(player) = ctx.world.player() else {
            return;
        };
        if player.aiming_at != Some(self.id())
            || player.position.distance(self.position()) > settings.dodge_range
        {
            return;
        }

        let cooldown = settings.dodge_cooldown_seconds as f64;
        let chance = settings.dodge_chance;
        if self
            .combat
            .last_dodge
            .is_some_and(|last| self.now_seconds - last < cooldown)
        {
            return;
        }

        self.combat.last_dodge = Some(self.now_seconds);
        if self.rng.gen::<f32>() < chance {
            self.combat.dodge_pending = true;
            ctx.presentation.notify(self.id(), ActorEvent::Dodge);
            tracing::debug!(actor = %self.id(), "dodging aimed shot");
        }
    }

    /// Ask for a mode change. Returns whether a transition happened.
    pub fn request_mode(&mut self, requested: Mode, ctx: &mut TickContext<'_>) -> bool {
        let changed = self.try_transition(requested, ctx);
        self.combat.pending_flee_reason = None;
        changed
    }

    fn try_transition(&mut self, requested: Mode, ctx: &mut TickContext<'_>) -> bool {
        if self.mode.in_transition {
            tracing::warn!(actor = %self.id(), to = ?requested, "mode request during transition ignored");
            return false;
        }
        if self.is_dead() {
            tracing::trace!(actor = %self.id(), to = ?requested, "dead actors stay dead");
            return false;
        }

        match gate::resolve(self, requested, ctx) {
            Resolution::NoChange => false,
            Resolution::Enter(next) => {
                self.apply_transition(next, ctx);
                true
            }
        }
    }

    /// Exit, enter and timer reset as one step
    fn apply_transition(&mut self, next: Mode, ctx: &mut TickContext<'_>) {
        let from = self.mode.current;
        let hooks = self.hooks().clone();

        self.mode.in_transition = true;
        if hooks.exit_mode(self, from, ctx).proceeds() {
            callbacks::exit(self, from, next, ctx);
        }
        if hooks.enter_mode(self, next, ctx).proceeds() {
            callbacks::enter(self, next, ctx);
        }
        self.mode.previous = from;
        self.mode.current = next;
        self.mode.time_in_mode_seconds = 0.0;
        self.mode.time_in_mode_game_hours = 0.0;
        self.mode.in_transition = false;

        tracing::debug!(actor = %self.id(), from = ?from, to = ?next, "mode changed");
        ctx.presentation
            .notify(self.id(), ActorEvent::ModeChanged { from, to: next });
    }

    /// Request Flee, recording why
    pub fn request_flee(&mut self, reason: FleeReason, ctx: &mut TickContext<'_>) -> bool {
        self.combat.pending_flee_reason = Some(reason);
        self.request_mode(Mode::Flee, ctx)
    }

    /// Stun for `seconds`. An active stun is only ever extended.
    pub fn stun(&mut self, seconds: f32, ctx: &mut TickContext<'_>) -> bool {
        if self.is_dead() || seconds <= 0.0 {
            return false;
        }
        let previous = self.combat.stun_seconds;
        self.combat.stun_seconds = previous.max(seconds);
        if self.current_mode() == Mode::Stunned {
            return true;
        }
        if self.request_mode(Mode::Stunned, ctx) {
            return true;
        }
        self.combat.stun_seconds = previous;
        false
    }

    pub fn return_to_default(&mut self, ctx: &mut TickContext<'_>) -> bool {
        let default = self.default_mode();
        self.request_mode(default, ctx)
    }
}
