//! Species-specific settings and hook tables

pub mod hooks;

mod bear;
mod cougar;
mod deer;
mod moose;
mod ptarmigan;
mod rabbit;
mod timberwolf;
mod wolf;

pub use hooks::{DefaultHooks, HookChain, HookResult, SpeciesHooks};

use crate::core::config::SpeciesSettings;
use crate::core::types::Species;
use std::sync::Arc;

/// Built-in settings for a species
pub fn default_settings(species: Species) -> SpeciesSettings {
    match species {
        Species::Wolf => wolf::settings(),
        Species::Timberwolf => timberwolf::settings(),
        Species::Cougar => cougar::settings(),
        Species::Bear => bear::settings(),
        Species::Moose => moose::settings(),
        Species::Deer => deer::settings(),
        Species::Rabbit => rabbit::settings(),
        Species::Ptarmigan => ptarmigan::settings(),
    }
}

/// Built-in hook table for a species
pub fn hooks_for(species: Species) -> Arc<dyn SpeciesHooks> {
    match species {
        Species::Timberwolf => Arc::new(timberwolf::TimberwolfHooks),
        Species::Cougar => Arc::new(cougar::CougarHooks),
        Species::Bear => Arc::new(bear::BearHooks),
        Species::Moose => Arc::new(moose::MooseHooks),
        Species::Wolf | Species::Deer | Species::Rabbit | Species::Ptarmigan => {
            Arc::new(DefaultHooks)
        }
    }
}
