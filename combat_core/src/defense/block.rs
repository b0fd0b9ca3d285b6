//! Baseline block chance
//!
//! Bulk against strength: defender CON+VIT versus attacker STR, plus
//! block proficiency and the level gap. The pipeline clamps per branch.

use super::constants::{BLOCK_ATTR_WEIGHT, BLOCK_BASE, BLOCK_LEVEL_WEIGHT, BLOCK_PROF_WEIGHT};
use crate::actor::Actor;
use crate::proficiency;
use crate::types::Attribute;

/// Baseline chance for `defender` to block, before clamping
pub fn base_block_chance(attacker: &Actor, defender: &Actor) -> f64 {
    let block_prof = defender.proficiency(proficiency::keys::BLOCK);
    let con_vit = defender.attribute(Attribute::Con) + defender.attribute(Attribute::Vit);
    let str_atk = attacker.attribute(Attribute::Str);
    let level_gap = f64::from(defender.level - attacker.level);

    BLOCK_BASE
        + block_prof * BLOCK_PROF_WEIGHT
        + (con_vit - str_atk) * BLOCK_ATTR_WEIGHT
        + level_gap * BLOCK_LEVEL_WEIGHT
}
