//! Behavioral modes
//!
//! An actor is always in exactly one mode. `Mode::None` is only ever a
//! request value; the transition gate resolves it before it can be entered.

pub mod set;

pub use set::ModeSet;

use serde::{Deserialize, Serialize};

/// Behavioral state of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Request sentinel, never a current mode
    None,
    Idle,
    Wander,
    WanderPaused,
    Stalking,
    Attack,
    PassingAttack,
    Flee,
    Feeding,
    Investigate,
    InvestigateFood,
    InvestigateSmell,
    HoldGround,
    Struggle,
    Sleep,
    Dead,
    GoToPoint,
    InteractWithProp,
    ScriptedSequence,
    Stunned,
    Rooted,
    FollowWaypoints,
    PatrolPointsOfInterest,
    ScratchingAntlers,
    HideAndSeek,
    JoinPack,
    Howl,
    Disabled,
    /// Species-defined mode outside the built-in range
    Custom(u16),
}

impl Mode {
    /// Number of built-in modes (everything except `Custom`)
    pub const BUILTIN_COUNT: u32 = 28;

    /// Position of a built-in mode in declaration order
    pub const fn builtin_index(self) -> Option<u32> {
        let index = match self {
            Mode::None => 0,
            Mode::Idle => 1,
            Mode::Wander => 2,
            Mode::WanderPaused => 3,
            Mode::Stalking => 4,
            Mode::Attack => 5,
            Mode::PassingAttack => 6,
            Mode::Flee => 7,
            Mode::Feeding => 8,
            Mode::Investigate => 9,
            Mode::InvestigateFood => 10,
            Mode::InvestigateSmell => 11,
            Mode::HoldGround => 12,
            Mode::Struggle => 13,
            Mode::Sleep => 14,
            Mode::Dead => 15,
            Mode::GoToPoint => 16,
            Mode::InteractWithProp => 17,
            Mode::ScriptedSequence => 18,
            Mode::Stunned => 19,
            Mode::Rooted => 20,
            Mode::FollowWaypoints => 21,
            Mode::PatrolPointsOfInterest => 22,
            Mode::ScratchingAntlers => 23,
            Mode::HideAndSeek => 24,
            Mode::JoinPack => 25,
            Mode::Howl => 26,
            Mode::Disabled => 27,
            Mode::Custom(_) => return None,
        };
        Some(index)
    }

    pub fn is_custom(self) -> bool {
        matches!(self, Mode::Custom(_))
    }

    /// All built-in modes in declaration order
    pub fn builtin() -> &'static [Mode] {
        &[
            Mode::None,
            Mode::Idle,
            Mode::Wander,
            Mode::WanderPaused,
            Mode::Stalking,
            Mode::Attack,
            Mode::PassingAttack,
            Mode::Flee,
            Mode::Feeding,
            Mode::Investigate,
            Mode::InvestigateFood,
            Mode::InvestigateSmell,
            Mode::HoldGround,
            Mode::Struggle,
            Mode::Sleep,
            Mode::Dead,
            Mode::GoToPoint,
            Mode::InteractWithProp,
            Mode::ScriptedSequence,
            Mode::Stunned,
            Mode::Rooted,
            Mode::FollowWaypoints,
            Mode::PatrolPointsOfInterest,
            Mode::ScratchingAntlers,
            Mode::HideAndSeek,
            Mode::JoinPack,
            Mode::Howl,
            Mode::Disabled,
        ]
    }
}

/// Why an actor entered `Flee`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FleeReason {
    #[default]
    Unspecified,
    /// Breaking away after a passing attack; re-requesting Flee is ignored
    AfterPassingAttack,
    /// Pushed out by a scripted trigger volume
    TriggerVolume,
    Damaged,
    /// Gave up holding ground against a deterrent
    Stimulus,
    TargetDetected,
    /// A pack species with no pack refuses to attack alone
    NoPack,
    Scripted,
}
