//! Baseline evasion chance
//!
//! A linear combination of the AGI-vs-DEX delta, the proficiency delta,
//! and the level gap, scaled by the defender's performance-art training
//! (stage-trained reflexes). The pipeline applies EVADE_PCT modifiers and
//! the per-branch clamp on top of this baseline.

use super::constants::{
    EVASION_ATTR_WEIGHT, EVASION_BASE, EVASION_LEVEL_WEIGHT, EVASION_PROF_WEIGHT,
};
use crate::actor::Actor;
use crate::proficiency::{self, non_combat_scalar};
use crate::types::Attribute;

/// Baseline chance for `defender` to evade, before modifiers and clamping
///
/// `attacker_proficiency` is the attacker's training with the chosen
/// attack (weapon family for weapon attacks, element/school minimum for
/// spells). Never negative.
pub fn base_evasion_chance(attacker: &Actor, defender: &Actor, attacker_proficiency: f64) -> f64 {
    let agi = defender.attribute(Attribute::Agi);
    let dex = attacker.attribute(Attribute::Dex);
    let evasion_prof = defender.proficiency(proficiency::keys::EVASION);
    let level_gap = f64::from(defender.level - attacker.level);

    let raw = EVASION_BASE
        + (agi - dex) * EVASION_ATTR_WEIGHT
        + (evasion_prof - attacker_proficiency) * EVASION_PROF_WEIGHT
        + level_gap * EVASION_LEVEL_WEIGHT;

    (raw * non_combat_scalar(defender, true)).max(0.0)
}
