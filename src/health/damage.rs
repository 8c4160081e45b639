//! Damage application

use super::{DEATH_HEALTH_EPSILON, SOFT_KILL_HEALTH};
use crate::actor::Actor;
use crate::core::types::{ActorClass, ActorId};
use crate::mode::set::DAMAGE_FLEE_EXEMPT;
use crate::mode::{FleeReason, Mode};
use crate::world::{ActorEvent, TickContext};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageSource {
    Player,
    Actor(ActorId),
    Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Damage {
    pub amount: f32,
    pub source: DamageSource,
    /// Positive values start or shorten a bleed-out
    pub bleed_out_minutes: Option<f32>,
}

impl Damage {
    pub fn new(amount: f32, source: DamageSource) -> Self {
        Self {
            amount,
            source,
            bleed_out_minutes: None,
        }
    }

    pub fn with_bleed_out(mut self, minutes: f32) -> Self {
        self.bleed_out_minutes = Some(minutes);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Dead or invulnerable; nothing changed
    Rejected,
    Applied,
    /// Lethal hit deferred to a bleed-out
    SoftKilled,
    Killed,
}

impl Actor {
    /// Apply one hit. The host never calls this re-entrantly with `update`.
    pub fn apply_damage(&mut self, damage: Damage, ctx: &mut TickContext<'_>) -> DamageOutcome {
        if self.is_dead() || self.health.invulnerable {
            tracing::trace!(actor = %self.id(), "damage rejected");
            return DamageOutcome::Rejected;
        }

        let mut amount = damage.amount.max(0.0);
        let predator = self.settings().class == ActorClass::Predator;
        if predator
            && damage.source == DamageSource::Player
            && ctx.world.environment().aurora_active
        {
            amount *= self.settings().aurora_damage_scale;
        }

        self.health.wounded = true;
        self.health.elapsed_wounded_minutes = 0.0;

        let fleeing_from_trigger = self.current_mode() == Mode::Flee
            && self.combat.flee_reason == FleeReason::TriggerVolume;
        let lethal = self.health.current - amount <= DEATH_HEALTH_EPSILON;

        if lethal && fleeing_from_trigger && self.settings().can_bleed_out {
            self.health.current = SOFT_KILL_HEALTH;
            let minutes = damage
                .bleed_out_minutes
                .filter(|m| *m > 0.0)
                .unwrap_or(self.settings().trigger_volume_bleed_out_minutes);
            self.health.begin_bleed_out(minutes);
            self.report_morale(amount, ctx);
            tracing::debug!(actor = %self.id(), minutes, "lethal hit deferred to bleed-out");
            return DamageOutcome::SoftKilled;
        }

        self.health.current -= amount;
        self.report_morale(amount, ctx);

        if self.health.is_depleted() {
            if damage.source == DamageSource::Player {
                ctx.presentation.notify(
                    self.id(),
                    ActorEvent::KilledByPlayer {
                        species: self.species(),
                    },
                );
            }
            self.request_mode(Mode::Dead, ctx);
            tracing::debug!(actor = %self.id(), source = ?damage.source, "killed");
            return DamageOutcome::Killed;
        }

        if let Some(minutes) = damage.bleed_out_minutes.filter(|m| *m > 0.0) {
            if self.settings().can_bleed_out {
                self.health.begin_bleed_out(minutes);
            }
        }

        match self.settings().class {
            ActorClass::Predator => {
                if matches!(self.current_mode(), Mode::Attack | Mode::Stalking) {
                    self.combat.ignore_stimuli = true;
                }
            }
            ActorClass::Prey if !DAMAGE_FLEE_EXEMPT.contains(self.current_mode()) => {
                self.request_flee(FleeReason::Damaged, ctx);
            }
            ActorClass::Prey => {}
            ActorClass::Human => {}
        }

        DamageOutcome::Applied
    }

    fn report_morale(&mut self, amount: f32, ctx: &mut TickContext<'_>) {
        if self.current_mode() != Mode::Struggle {
            ctx.pack.report_morale_damage(self.id(), amount);
        }
    }
}
