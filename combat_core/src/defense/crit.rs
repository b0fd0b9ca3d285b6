//! Crit-vs-defense modifier
//!
//! Scales the weapon's raw crit chance: a fast, higher-level attacker
//! out-crits a sluggish lower-level target, bounded to [0.5, 1.5].

use super::constants::{CRIT_ATTR_WEIGHT, CRIT_LEVEL_WEIGHT, CRIT_MOD_MAX, CRIT_MOD_MIN};
use crate::actor::Actor;
use crate::types::Attribute;

/// Multiplier applied to the weapon's crit-chance percentage
pub fn crit_vs_defense_modifier(attacker: &Actor, defender: &Actor) -> f64 {
    let dex = attacker.attribute(Attribute::Dex);
    let agi = defender.attribute(Attribute::Agi);
    let level_diff = f64::from(attacker.level - defender.level);

    let modifier = 1.0 + (dex - agi) * CRIT_ATTR_WEIGHT + level_diff * CRIT_LEVEL_WEIGHT;
    modifier.clamp(CRIT_MOD_MIN, CRIT_MOD_MAX)
}
