//! Weapon combat stats - normalizing partial weapon descriptions
//!
//! Callers may supply any subset of a weapon's combat fields; the
//! resolver fills the rest so the pipeline never sees a hole. This step
//! is deterministic and reads no actor state.

use crate::onhit::OnHitConfig;
use crate::types::DamageType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named armor-penetration bands mapped to fixed fractions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorPenBand {
    Low,
    #[serde(rename = "Low-Medium")]
    LowMedium,
    Medium,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl ArmorPenBand {
    /// Fraction of defense this band penetrates
    pub fn value(self) -> f64 {
        match self {
            ArmorPenBand::Low => 0.06,
            ArmorPenBand::LowMedium => 0.12,
            ArmorPenBand::Medium => 0.20,
            ArmorPenBand::MediumHigh => 0.30,
            ArmorPenBand::High => 0.42,
            ArmorPenBand::VeryHigh => 0.52,
        }
    }

    /// Get all bands, weakest first
    pub fn all() -> &'static [ArmorPenBand] {
        &[
            ArmorPenBand::Low,
            ArmorPenBand::LowMedium,
            ArmorPenBand::Medium,
            ArmorPenBand::MediumHigh,
            ArmorPenBand::High,
            ArmorPenBand::VeryHigh,
        ]
    }
}

/// Shares of BLUNT/SLASH/PIERCE in a weapon's damage
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageMix {
    #[serde(default, rename = "BLUNT")]
    pub blunt: f64,
    #[serde(default, rename = "SLASH")]
    pub slash: f64,
    #[serde(default, rename = "PIERCE")]
    pub pierce: f64,
}

impl DamageMix {
    /// The default even split used when no mix is supplied
    pub fn even() -> Self {
        DamageMix {
            blunt: 0.34,
            slash: 0.33,
            pierce: 0.33,
        }
    }

    /// Share of the given damage type
    pub fn share(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Blunt => self.blunt,
            DamageType::Slash => self.slash,
            DamageType::Pierce => self.pierce,
        }
    }

    /// Sum of all shares
    pub fn total(&self) -> f64 {
        self.blunt + self.slash + self.pierce
    }

    /// Scale shares to sum to 1; a non-positive total falls back to the
    /// even split
    pub fn normalized(&self) -> DamageMix {
        let total = self.total();
        if total <= 0.0 {
            return DamageMix::even();
        }
        DamageMix {
            blunt: self.blunt / total,
            slash: self.slash / total,
            pierce: self.pierce / total,
        }
    }
}

/// Possibly-partial weapon stats as supplied by callers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponCombatStats {
    /// Armor penetration as a direct fraction; wins over the band
    #[serde(default)]
    pub ap: Option<f64>,
    /// Armor penetration as a named band
    #[serde(default)]
    pub armor_pen_band: Option<ArmorPenBand>,
    /// Damage-type mix; normalized during resolution
    #[serde(default)]
    pub dmg_mix: Option<DamageMix>,
    /// Critical-hit chance percentage
    #[serde(default)]
    pub crit_chance_pct: Option<f64>,
    /// Critical damage multiplier
    #[serde(default)]
    pub crit_mult: Option<f64>,
    /// Extra armor penetration on crits, as a fraction of defense
    #[serde(default)]
    pub crit_armor_bypass_pct: Option<f64>,
    /// Secondary effects rolled on a successful hit, keyed by effect name.
    /// BTreeMap keeps the roll order stable for seeded replays.
    #[serde(default)]
    pub on_hit: BTreeMap<String, OnHitConfig>,
}

/// Fully-resolved, internally-consistent weapon stats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedWeaponStats {
    pub ap: f64,
    pub dmg_mix: DamageMix,
    pub crit_chance_pct: f64,
    pub crit_mult: f64,
    pub crit_armor_bypass_pct: f64,
    pub on_hit: BTreeMap<String, OnHitConfig>,
}

/// Default critical damage multiplier
pub const DEFAULT_CRIT_MULT: f64 = 1.5;

/// Normalize a possibly-partial weapon description
///
/// A numeric `ap` wins over the named band; absent crit fields take their
/// documented defaults; the damage mix always sums to 1 afterwards.
pub fn resolve_weapon_stats(stats: Option<&WeaponCombatStats>) -> ResolvedWeaponStats {
    let ap = stats
        .and_then(|s| s.ap.or_else(|| s.armor_pen_band.map(ArmorPenBand::value)))
        .unwrap_or(0.0);

    ResolvedWeaponStats {
        ap,
        dmg_mix: stats
            .and_then(|s| s.dmg_mix)
            .map(|m| m.normalized())
            .unwrap_or_else(DamageMix::even),
        crit_chance_pct: stats.and_then(|s| s.crit_chance_pct).unwrap_or(0.0),
        crit_mult: stats.and_then(|s| s.crit_mult).unwrap_or(DEFAULT_CRIT_MULT),
        crit_armor_bypass_pct: stats.and_then(|s| s.crit_armor_bypass_pct).unwrap_or(0.0),
        on_hit: stats.map(|s| s.on_hit.clone()).unwrap_or_default(),
    }
}
