//! Detection range and visibility tests

use crate::core::config::SpeciesSettings;
use crate::world::{EnvironmentState, NavigationQuery, PlayerSnapshot};
use glam::Vec3;

/// Where an actor stands and looks from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub position: Vec3,
    pub eye: Vec3,
    pub forward: Vec3,
}

/// Detection range against one candidate.
///
/// `player` is `Some` only when the candidate is the player.
pub fn effective_range(
    settings: &SpeciesSettings,
    environment: &EnvironmentState,
    player: Option<&PlayerSnapshot>,
) -> f32 {
    let mut range = settings.detection_range * environment.detection_scale;

    if environment.aurora_active {
        range *= settings.aurora_detection_scale;
    }

    if let Some(player) = player {
        let recently_stood = player
            .stood_up_seconds_ago
            .is_some_and(|s| s < settings.stand_up_perception_delay_seconds);
        if player.is_crouching || recently_stood {
            range *= settings.crouch_detection_scale;
        }
        range *= player.detection_multiplier;
    }

    range.max(0.0)
}

/// Horizontal field-of-view test
pub fn within_field_of_view(forward: Vec3, to_target: Vec3, half_angle_degrees: f32) -> bool {
    if half_angle_degrees >= 180.0 {
        return true;
    }

    let flat_forward = Vec3::new(forward.x, 0.0, forward.z);
    let flat_target = Vec3::new(to_target.x, 0.0, to_target.z);
    match (flat_forward.try_normalize(), flat_target.try_normalize()) {
        (Some(f), Some(t)) => f.dot(t) >= half_angle_degrees.to_radians().cos(),
        // Directly above/below or no facing
        _ => true,
    }
}

/// Distance to a target, or infinity when it cannot be seen
pub fn visible_distance(
    viewer: &Viewpoint,
    target: Vec3,
    range: f32,
    half_angle_degrees: f32,
    navigation: &dyn NavigationQuery,
) -> f32 {
    let offset = target - viewer.position;
    let distance = offset.length();

    if distance > range {
        return f32::INFINITY;
    }
    if !within_field_of_view(viewer.forward, offset, half_angle_degrees) {
        return f32::INFINITY;
    }
    if !navigation.has_line_of_sight(viewer.eye, target) {
        return f32::INFINITY;
    }

    distance
}
