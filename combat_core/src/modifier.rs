//! Modifier aggregation - merging active buff/debuff sets into one map
//!
//! Songs, dances, and other temporary effects each contribute a map of
//! named percentage/flat modifiers. The pipelines only ever see the
//! aggregated sum.

use std::collections::HashMap;

/// One set of named modifiers (e.g. from a single active song)
pub type ModifierSet = HashMap<String, f64>;

/// Modifier keys read by the combat pipelines
///
/// Unknown keys aggregate like any other and are simply never read.
pub mod keys {
    /// Percentage bonus to outgoing damage
    pub const ATK_PCT: &str = "ATK_PCT";
    /// Percentage bonus to the defender's flat defense
    pub const DEF_PCT: &str = "DEF_PCT";
    /// Percentage bonus to evasion chance
    pub const EVADE_PCT: &str = "EVADE_PCT";
    /// Percentage change to damage taken (negative reduces)
    pub const DMG_TAKEN_PCT: &str = "DMG_TAKEN_PCT";
    /// Fallback for `Actor::crit_damage_reduction_pct`
    pub const CRIT_DMG_REDUCTION_PCT: &str = "CRIT_DMG_REDUCTION_PCT";
    /// Fallback for `Actor::crit_defense`
    pub const CRIT_DEFENSE: &str = "CRIT_DEFENSE";
}

/// Sum an ordered list of modifier sets into one additive map
pub fn aggregate_modifiers(sets: &[ModifierSet]) -> ModifierSet {
    let mut mods = ModifierSet::new();
    for set in sets {
        for (key, value) in set {
            *mods.entry(key.clone()).or_insert(0.0) += value;
        }
    }
    mods
}

/// Aggregated value for a key, 0 when absent
pub fn modifier(mods: &ModifierSet, key: &str) -> f64 {
    mods.get(key).copied().unwrap_or(0.0)
}
