//! Core type definitions used throughout the crate

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for simulated actors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id, used by hosts that replay a recorded population
    pub fn from_index(index: u128) -> Self {
        Self(Uuid::from_u128(index))
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-owning reference to something an actor is aware of.
///
/// Resolved through the world view every time it is read; the referent may
/// have been destroyed since the reference was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    Player,
    Actor(ActorId),
}

impl TargetRef {
    pub fn is_player(&self) -> bool {
        matches!(self, TargetRef::Player)
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRef::Player => write!(f, "player"),
            TargetRef::Actor(id) => write!(f, "actor:{}", id),
        }
    }
}

/// Species tag
///
/// Only selects settings and hook tables. Core logic branches on settings,
/// never on the tag itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Wolf,
    Timberwolf,
    Cougar,
    Bear,
    Moose,
    Deer,
    Rabbit,
    Ptarmigan,
}

impl Species {
    pub fn all() -> &'static [Species] {
        &[
            Species::Wolf,
            Species::Timberwolf,
            Species::Cougar,
            Species::Bear,
            Species::Moose,
            Species::Deer,
            Species::Rabbit,
            Species::Ptarmigan,
        ]
    }

    /// Key used in configuration files
    pub fn key(&self) -> &'static str {
        match self {
            Species::Wolf => "wolf",
            Species::Timberwolf => "timberwolf",
            Species::Cougar => "cougar",
            Species::Bear => "bear",
            Species::Moose => "moose",
            Species::Deer => "deer",
            Species::Rabbit => "rabbit",
            Species::Ptarmigan => "ptarmigan",
        }
    }

    pub fn from_key(key: &str) -> Option<Species> {
        Species::all().iter().copied().find(|s| s.key() == key)
    }
}

/// Broad behavioral class of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActorClass {
    Predator,
    #[default]
    Prey,
    /// Human-type actors never react to detections
    Human,
}

/// How a species relates to things it detects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Hostile,
    #[default]
    Ambient,
    /// Never flees from a detection
    Passive,
}
