//! Species configuration
//!
//! Every tunable number an actor reads lives in `SpeciesSettings`. Settings
//! are immutable once an actor is constructed; actors share them through an
//! `Arc` handed out by the `SettingsCatalog`.

use crate::core::error::{Result, WildlifeError};
use crate::core::types::{ActorClass, Disposition, Species};
use crate::species;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Distances at which each deterrent makes a predator stand its ground.
///
/// A distance of zero (or less) disables that stimulus for the species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoldGroundTriggers {
    pub torch_held: f32,
    pub torch_dropped: f32,
    pub campfire: f32,
    pub red_flare_held: f32,
    pub red_flare_dropped: f32,
    pub blue_flare_held: f32,
    pub blue_flare_dropped: f32,
    pub spear: f32,
    /// Hold ground while standing inside an active aurora field
    pub aurora_field: bool,
    pub safe_haven: f32,
    pub struggle: f32,
}

impl Default for HoldGroundTriggers {
    fn default() -> Self {
        Self {
            torch_held: 0.0,
            torch_dropped: 0.0,
            campfire: 0.0,
            red_flare_held: 0.0,
            red_flare_dropped: 0.0,
            blue_flare_held: 0.0,
            blue_flare_dropped: 0.0,
            spear: 0.0,
            aurora_field: false,
            safe_haven: 0.0,
            struggle: 0.0,
        }
    }
}

/// Immutable per-species configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpeciesSettings {
    // === IDENTITY ===
    pub class: ActorClass,
    pub disposition: Disposition,
    /// Attack decisions are delegated to the pack coordinator
    pub pack_species: bool,

    // === HEALTH ===
    pub max_health: f32,
    /// Lethal damage may be converted into a bleed-out timer
    pub can_bleed_out: bool,
    /// Reaching the bleed-out threshold kills the actor
    pub dies_from_bleed_out: bool,
    /// Bleed-out duration used when a trigger-volume flee soft-kills the actor
    pub trigger_volume_bleed_out_minutes: f32,
    /// Bleed-out cannot kill a struggling actor before this much struggle time
    pub min_struggle_seconds: f32,
    /// In-world minutes after the last hit before the wounded flag clears
    pub wound_recovery_minutes: f32,
    /// Multiplier on player damage taken by predators during an aurora
    pub aurora_damage_scale: f32,

    // === PERCEPTION ===
    pub detection_range: f32,
    pub fov_half_angle_degrees: f32,
    pub eye_height: f32,
    /// Scans are jittered uniformly inside [min, max] seconds
    pub scan_interval_min_seconds: f32,
    pub scan_interval_max_seconds: f32,
    pub aurora_detection_scale: f32,
    /// Range multiplier against a crouching player
    pub crouch_detection_scale: f32,
    /// Grace period after standing up during which the player still counts as crouched
    pub stand_up_perception_delay_seconds: f32,
    pub ignores_moose: bool,

    // === DETECTION RESPONSE ===
    pub base_flee_chance: f32,
    /// Added to flee chance when the detected target is the player
    pub player_flee_bonus: f32,
    /// Multiplier on a predator's flee chance during an aurora
    pub aurora_flee_scale: f32,
    pub flee_when_feeding: bool,
    pub can_stalk: bool,
    /// Respond to any detection by holding ground
    pub hold_ground_on_detection: bool,

    // === HOLD GROUND ===
    pub can_hold_ground: bool,
    pub hold_ground: HoldGroundTriggers,
    pub hold_ground_cooldown_seconds: f32,
    /// After holding this long the actor gives up and flees
    pub hold_ground_max_seconds: f32,

    // === COMBAT ===
    pub attack_range: f32,
    pub passing_attack_seconds: f32,
    /// Number of attack animations the presentation layer provides
    pub attack_variants: usize,
    pub dodge_range: f32,
    pub dodge_chance: f32,
    pub dodge_cooldown_seconds: f32,
    /// Time after a scare during which attack requests are refused
    pub fear_lockout_seconds: f32,

    // === MODE TIMINGS ===
    pub idle_seconds: f32,
    pub wander_seconds: f32,
    pub wander_pause_seconds: f32,
    pub flee_seconds: f32,
    pub flee_clear_distance: f32,
    pub stalk_timeout_seconds: f32,
    pub investigate_seconds: f32,
    pub feeding_seconds: f32,
    pub howl_seconds: f32,
    pub sleep_game_hours: f32,

    // === SPEEDS ===
    pub walk_speed: f32,
    pub stalk_speed: f32,
    pub run_speed: f32,
    pub flee_speed: f32,
    pub retreat_speed: f32,
}

impl Default for SpeciesSettings {
    fn default() -> Self {
        Self {
            class: ActorClass::Prey,
            disposition: Disposition::Ambient,
            pack_species: false,

            max_health: 100.0,
            can_bleed_out: true,
            dies_from_bleed_out: true,
            trigger_volume_bleed_out_minutes: 10.0,
            min_struggle_seconds: 0.0,
            wound_recovery_minutes: 120.0,
            aurora_damage_scale: 1.0,

            detection_range: 30.0,
            fov_half_angle_degrees: 120.0,
            eye_height: 1.0,
            scan_interval_min_seconds: 0.1,
            scan_interval_max_seconds: 0.5,
            aurora_detection_scale: 1.0,
            crouch_detection_scale: 0.5,
            stand_up_perception_delay_seconds: 1.0,
            ignores_moose: true,

            base_flee_chance: 1.0,
            player_flee_bonus: 0.0,
            aurora_flee_scale: 1.0,
            flee_when_feeding: true,
            can_stalk: false,
            hold_ground_on_detection: false,

            can_hold_ground: false,
            hold_ground: HoldGroundTriggers::default(),
            hold_ground_cooldown_seconds: 5.0,
            hold_ground_max_seconds: 20.0,

            attack_range: 2.0,
            passing_attack_seconds: 1.0,
            attack_variants: 1,
            dodge_range: 0.0,
            dodge_chance: 0.0,
            dodge_cooldown_seconds: 3.0,
            fear_lockout_seconds: 10.0,

            idle_seconds: 5.0,
            wander_seconds: 20.0,
            wander_pause_seconds: 4.0,
            flee_seconds: 8.0,
            flee_clear_distance: 40.0,
            stalk_timeout_seconds: 30.0,
            investigate_seconds: 10.0,
            feeding_seconds: 60.0,
            howl_seconds: 4.0,
            sleep_game_hours: 6.0,

            walk_speed: 1.5,
            stalk_speed: 2.0,
            run_speed: 6.0,
            flee_speed: 7.0,
            retreat_speed: 4.0,
        }
    }
}

impl SpeciesSettings {
    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_health <= 0.0 {
            return Err(WildlifeError::Config(format!(
                "max_health ({}) must be positive",
                self.max_health
            )));
        }

        if self.scan_interval_min_seconds <= 0.0
            || self.scan_interval_min_seconds > self.scan_interval_max_seconds
        {
            return Err(WildlifeError::Config(format!(
                "scan interval [{}, {}] must be positive and ordered",
                self.scan_interval_min_seconds, self.scan_interval_max_seconds
            )));
        }

        if self.fov_half_angle_degrees <= 0.0 || self.fov_half_angle_degrees > 180.0 {
            return Err(WildlifeError::Config(format!(
                "fov_half_angle_degrees ({}) must be in (0, 180]",
                self.fov_half_angle_degrees
            )));
        }

        for (name, value) in [
            ("base_flee_chance", self.base_flee_chance),
            ("dodge_chance", self.dodge_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WildlifeError::Config(format!(
                    "{} ({}) must be a probability",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Settings for every species a host can spawn
#[derive(Debug, Clone, Default)]
pub struct SettingsCatalog {
    settings: AHashMap<Species, Arc<SpeciesSettings>>,
}

impl SettingsCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog populated with the built-in settings of every species
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for species in Species::all() {
            catalog.insert(*species, species::default_settings(*species));
        }
        catalog
    }

    pub fn insert(&mut self, species: Species, settings: SpeciesSettings) {
        self.settings.insert(species, Arc::new(settings));
    }

    pub fn get(&self, species: Species) -> Result<Arc<SpeciesSettings>> {
        self.settings.get(&species).cloned().ok_or_else(|| {
            WildlifeError::MissingDependency(format!("no settings for {:?}", species))
        })
    }

    /// Look up settings, degrading to generic defaults when the species is absent
    pub fn settings_or_default(&self, species: Species) -> Arc<SpeciesSettings> {
        match self.get(species) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!(?species, error = %e, "falling back to default settings");
                Arc::new(SpeciesSettings::default())
            }
        }
    }

    /// Overlay a TOML document onto the catalog.
    ///
    /// Top-level tables are keyed by species (`[wolf]`, `[deer.hold_ground]`).
    /// Keys not present in the document keep their current values.
    pub fn apply_toml(&mut self, content: &str) -> Result<()> {
        let document: toml::Table = content.parse()?;

        for (key, overlay) in document {
            let species = Species::from_key(&key)
                .ok_or_else(|| WildlifeError::Config(format!("unknown species '{}'", key)))?;

            let current = self
                .settings
                .get(&species)
                .map(|s| (**s).clone())
                .unwrap_or_else(|| species::default_settings(species));

            let mut merged = toml::Value::try_from(&current)?;
            merge_toml(&mut merged, overlay);
            let settings = merged
                .try_into::<SpeciesSettings>()
                .map_err(|e| WildlifeError::Config(format!("{}: {}", key, e)))?;
            settings
                .validate()
                .map_err(|e| WildlifeError::Config(format!("{}: {}", key, e)))?;

            self.insert(species, settings);
        }

        Ok(())
    }

    /// Built-in defaults overlaid with the TOML file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut catalog = Self::with_defaults();
        catalog.apply_toml(&content)?;
        tracing::info!(path = %path.display(), "loaded species settings");
        Ok(catalog)
    }
}

fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
