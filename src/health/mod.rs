//! Health and physiological state
//!
//! Two death paths: direct depletion of health, and a bleed-out timer that
//! races toward a threshold measured in in-world minutes.

pub mod bleed;
pub mod damage;

pub use damage::{Damage, DamageOutcome, DamageSource};

use serde::{Deserialize, Serialize};

/// Health at or below this counts as dead
pub const DEATH_HEALTH_EPSILON: f32 = 0.0001;

/// Health left after a soft kill converts lethal damage into bleed-out
pub const SOFT_KILL_HEALTH: f32 = 0.01;

/// A struggling actor's bleed-out is held this far short of the threshold
pub const STRUGGLE_BLEED_MARGIN_MINUTES: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthState {
    pub current: f32,
    pub invulnerable: bool,
    pub wounded: bool,
    pub elapsed_wounded_minutes: f32,
    pub bleeding_out: bool,
    pub elapsed_bleeding_out_minutes: f32,
    pub death_after_bleeding_out_minutes: f32,
}

impl HealthState {
    pub fn new(max_health: f32) -> Self {
        Self {
            current: max_health,
            invulnerable: false,
            wounded: false,
            elapsed_wounded_minutes: 0.0,
            bleeding_out: false,
            elapsed_bleeding_out_minutes: 0.0,
            death_after_bleeding_out_minutes: 0.0,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= DEATH_HEALTH_EPSILON
    }

    /// Start a bleed-out, or bring an existing one closer.
    ///
    /// An ongoing bleed is never lengthened.
    pub fn begin_bleed_out(&mut self, minutes: f32) {
        let minutes = minutes.max(0.0);
        if !self.bleeding_out {
            self.bleeding_out = true;
            self.elapsed_bleeding_out_minutes = 0.0;
            self.death_after_bleeding_out_minutes = minutes;
            return;
        }

        let remaining =
            self.death_after_bleeding_out_minutes - self.elapsed_bleeding_out_minutes;
        if minutes < remaining {
            self.death_after_bleeding_out_minutes = self.elapsed_bleeding_out_minutes + minutes;
        }
    }

    pub fn remaining_bleed_out_minutes(&self) -> Option<f32> {
        self.bleeding_out.then(|| {
            self.death_after_bleeding_out_minutes - self.elapsed_bleeding_out_minutes
        })
    }
}
