//! Combat formula engine - resolving one attack exchange

mod resolution;
mod result;

pub use resolution::{resolve_attack, resolve_attack_with_rng};
pub use result::{CombatResult, DamagePath};

use crate::modifier::ModifierSet;
use crate::types::AttackKind;
use crate::weapon::WeaponCombatStats;
use thiserror::Error;

/// Fatal resolution error
///
/// Sparse or out-of-range numeric data never errors; it degrades to the
/// documented defaults and clamps. Only a missing catalog entry is fatal,
/// since any substituted base power would silently corrupt the math.
#[derive(Error, Debug)]
pub enum CombatError {
    #[error("unknown {kind:?} attack id {id:?}")]
    UnknownAttack { kind: AttackKind, id: String },
}

/// Inputs selecting and shaping one attack exchange
#[derive(Debug, Clone, Default)]
pub struct CombatOptions {
    /// Catalog id of the chosen attack
    pub attack_id: String,
    /// Which pipeline resolves the attack
    pub attack_kind: AttackKind,
    /// Active modifier sets on the attacker (songs, dances, ...)
    pub attacker_effects: Vec<ModifierSet>,
    /// Active modifier sets on the defender
    pub defender_effects: Vec<ModifierSet>,
    /// Weapon description for weapon attacks; ignored by spells
    pub weapon_stats: Option<WeaponCombatStats>,
}

impl CombatOptions {
    /// Options for a weapon attack with the given id
    pub fn weapon(attack_id: impl Into<String>) -> Self {
        CombatOptions {
            attack_id: attack_id.into(),
            attack_kind: AttackKind::Weapon,
            ..Default::default()
        }
    }

    /// Options for a spell attack with the given id
    pub fn spell(attack_id: impl Into<String>) -> Self {
        CombatOptions {
            attack_id: attack_id.into(),
            attack_kind: AttackKind::Spell,
            ..Default::default()
        }
    }
}

/// Damage pipeline coefficients
pub mod coeffs {
    /// Weight of the secondary attribute in the attribute scale
    pub const ATTR_SECONDARY_WEIGHT: f64 = 0.5;
    /// Level-factor change per level of difference
    pub const LEVEL_SLOPE: f64 = 0.05;
    /// Lower bound of the level factor
    pub const LEVEL_CLAMP_MIN: f64 = 0.5;
    /// Upper bound of the level factor
    pub const LEVEL_CLAMP_MAX: f64 = 1.5;
    /// Damage bonus per proficiency point
    pub const PROF_SCALAR: f64 = 0.01;
    /// Share of damage removed by a block at full block chance
    pub const BLOCK_MITIGATION_PER_CHANCE: f64 = 0.5;
    /// Lower bound of the total resist percentage
    pub const RESIST_CLAMP_MIN_PCT: f64 = 0.0;
    /// Upper bound of the total resist percentage
    pub const RESIST_CLAMP_MAX_PCT: f64 = 80.0;
    /// Cap on the share of defense armor penetration can bypass
    pub const AP_BYPASS_CAP_PCT: f64 = 70.0;
    /// Lower bound of the weapon attribute-resist term
    pub const ATTR_RESIST_MIN: f64 = -0.2;
    /// Upper bound of the weapon attribute-resist term
    pub const ATTR_RESIST_MAX: f64 = 0.6;
    /// Cap on the spell total-resist fraction
    pub const SPELL_RESIST_CAP: f64 = 0.8;
}
