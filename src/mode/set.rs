//! Mode sets used as transition guards
//!
//! Each guard the core consults is declared here as data so the membership
//! of every set can be read in one place.

use super::Mode;
use serde::{Deserialize, Serialize};

/// Bitmask over the built-in modes. Custom modes are never members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ModeSet(u32);

impl ModeSet {
    pub const EMPTY: ModeSet = ModeSet(0);

    pub const fn of(modes: &[Mode]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < modes.len() {
            if let Some(index) = modes[i].builtin_index() {
                bits |= 1 << index;
            }
            i += 1;
        }
        ModeSet(bits)
    }

    pub const fn contains(self, mode: Mode) -> bool {
        match mode.builtin_index() {
            Some(index) => self.0 & (1 << index) != 0,
            None => false,
        }
    }

    pub const fn with(self, mode: Mode) -> Self {
        match mode.builtin_index() {
            Some(index) => ModeSet(self.0 | (1 << index)),
            None => self,
        }
    }

    pub const fn union(self, other: ModeSet) -> Self {
        ModeSet(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Mode> {
        Mode::builtin()
            .iter()
            .copied()
            .filter(move |mode| self.contains(*mode))
    }
}

/// Modes in which hold-ground evaluation exits early
pub const HOLD_GROUND_EARLY_OUT: ModeSet = ModeSet::of(&[
    Mode::Dead,
    Mode::Disabled,
    Mode::ScriptedSequence,
    Mode::Struggle,
    Mode::Stunned,
    Mode::Rooted,
    Mode::Sleep,
    Mode::PassingAttack,
    Mode::Flee,
]);

/// Attack modes that ignore deterrents once the actor has committed
pub const STIMULUS_IGNORING_ATTACK: ModeSet = ModeSet::of(&[Mode::Attack, Mode::PassingAttack]);

/// Modes a non-lethal hit never turns into Flee
pub const DAMAGE_FLEE_EXEMPT: ModeSet = ModeSet::of(&[
    Mode::ScriptedSequence,
    Mode::Struggle,
    Mode::Disabled,
    Mode::Rooted,
]);

/// Modes that skip the post-process hand-off to presentation
pub const POST_PROCESS_SKIP: ModeSet = ModeSet::of(&[Mode::Dead, Mode::ScriptedSequence]);

/// Requests that still go through while a stun timer is running
pub const STUN_BYPASS: ModeSet = ModeSet::of(&[Mode::Dead, Mode::ScriptedSequence]);

/// Leaving one of these schedules a retarget on the next tick
pub const INTERRUPTING: ModeSet = ModeSet::of(&[Mode::Stunned, Mode::Struggle]);

/// Modes in which target scanning does not run
pub const SCAN_SUPPRESSED: ModeSet = ModeSet::of(&[
    Mode::Dead,
    Mode::Disabled,
    Mode::ScriptedSequence,
    Mode::Struggle,
]);

/// Modes in which a predator can dodge an aimed shot
pub const DODGE_ELIGIBLE: ModeSet = ModeSet::of(&[Mode::Stalking, Mode::Attack, Mode::HoldGround]);

/// Modes a detection never downgrades into Stalking
pub const STALK_INELIGIBLE: ModeSet = ModeSet::of(&[
    Mode::Stalking,
    Mode::Attack,
    Mode::PassingAttack,
    Mode::HoldGround,
    Mode::Flee,
    Mode::HideAndSeek,
]);

/// Default modes that replace Wander/Flee requests
pub const PATROL: ModeSet = ModeSet::of(&[Mode::FollowWaypoints, Mode::PatrolPointsOfInterest]);
