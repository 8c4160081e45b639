//! Individual hold-ground stimulus checks

use super::StimulusKind;
use crate::actor::Actor;
use crate::core::config::HoldGroundTriggers;
use crate::mode::Mode;
use crate::world::{DeterrentKind, WorldView};
use glam::Vec3;

fn within(position: Vec3, point: Vec3, trigger_distance: f32) -> bool {
    trigger_distance > 0.0 && position.distance(point) <= trigger_distance
}

/// Trigger distance for one deterrent, or zero when the species ignores it
fn deterrent_distance(triggers: &HoldGroundTriggers, kind: DeterrentKind, held: bool) -> f32 {
    match (kind, held) {
        (DeterrentKind::Torch, true) => triggers.torch_held,
        (DeterrentKind::Torch, false) => triggers.torch_dropped,
        (DeterrentKind::Campfire, _) => triggers.campfire,
        (DeterrentKind::RedFlare, true) => triggers.red_flare_held,
        (DeterrentKind::RedFlare, false) => triggers.red_flare_dropped,
        (DeterrentKind::BlueFlare, true) => triggers.blue_flare_held,
        (DeterrentKind::BlueFlare, false) => triggers.blue_flare_dropped,
        (DeterrentKind::RaisedSpear, _) => triggers.spear,
    }
}

fn deterrent_kind(stimulus: StimulusKind) -> Option<DeterrentKind> {
    match stimulus {
        StimulusKind::Torch => Some(DeterrentKind::Torch),
        StimulusKind::Campfire => Some(DeterrentKind::Campfire),
        StimulusKind::RedFlare => Some(DeterrentKind::RedFlare),
        StimulusKind::BlueFlare => Some(DeterrentKind::BlueFlare),
        StimulusKind::Spear => Some(DeterrentKind::RaisedSpear),
        StimulusKind::AuroraField | StimulusKind::SafeHaven | StimulusKind::Struggle => None,
    }
}

/// Built-in test for one stimulus
pub fn check(actor: &Actor, stimulus: StimulusKind, world: &dyn WorldView) -> bool {
    let triggers = &actor.settings().hold_ground;
    let position = actor.position();

    if let Some(kind) = deterrent_kind(stimulus) {
        return world
            .deterrents()
            .iter()
            .filter(|d| d.kind == kind)
            .any(|d| within(position, d.position, deterrent_distance(triggers, kind, d.held)));
    }

    match stimulus {
        StimulusKind::AuroraField => triggers.aurora_field && world.aurora_field_at(position),
        StimulusKind::SafeHaven => world
            .nearest_safe_haven(position)
            .is_some_and(|haven| within(position, haven, triggers.safe_haven)),
        StimulusKind::Struggle => {
            actor.current_mode() != Mode::Struggle
                && world
                    .struggle_position()
                    .is_some_and(|at| within(position, at, triggers.struggle))
        }
        _ => false,
    }
}
