//! CombatResult - the full resolved outcome of one exchange

use crate::onhit::OnHitResult;
use serde::{Deserialize, Serialize};

/// Stage-by-stage damage figures for one mitigation path
///
/// The weapon pipeline computes two of these: the normal path and a crit
/// path with a higher effective armor penetration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamagePath {
    /// Share of defense bypassed by armor penetration
    pub ap_bypass_pct: f64,
    /// Damage after flat defense was subtracted
    pub damage_after_defense: f64,
    /// Damage after typed/attribute resists and damage-taken modifiers
    pub damage_after_resist: f64,
    /// Damage after block mitigation
    pub post_block: f64,
    /// Final figure for this path, crit multiplier and crit defense applied
    pub final_damage: f64,
}

/// Full resolved outcome of one attack exchange
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatResult {
    /// Damage actually applied this call (0 on a miss)
    pub damage: f64,
    /// Analytic expectation over hit/crit outcomes, independent of the draws
    pub expected_damage: f64,
    /// Whether the hit roll succeeded
    pub did_hit: bool,
    /// Whether the crit roll succeeded
    pub crit_occurred: bool,
    /// Crit chance after the crit-vs-defense modifier and cap
    pub crit_chance: f64,
    /// The weapon's crit multiplier when the crit occurred, else 1
    pub crit_multiplier: f64,
    /// 1 - evasion chance
    pub hit_chance: f64,
    /// Evasion chance after modifiers and the branch clamp
    pub evasion_chance: f64,
    /// Block chance after the branch clamp
    pub block_chance: f64,
    /// 1 - total resist fraction
    pub resist_multiplier: f64,
    /// Resist percentage from the damage-type mix alone
    pub typed_resist_pct: f64,
    /// Total resist percentage after clamping
    pub total_resist_pct: f64,
    /// Share of defense bypassed on the normal path
    pub ap_bypass_pct: f64,
    /// Damage before any defense was applied
    pub base_damage: f64,
    /// Stage figures for the non-crit path
    pub normal_path: DamagePath,
    /// Stage figures for the crit path (zeroed for spells)
    pub crit_path: DamagePath,
    /// One entry per configured on-hit effect (empty on a miss or spell)
    pub on_hit_results: Vec<OnHitResult>,
}

impl CombatResult {
    /// Get a one-line human summary
    pub fn summary(&self) -> String {
        if !self.did_hit {
            return format!("miss ({:.0}% hit chance)", self.hit_chance * 100.0);
        }

        let mut parts = vec![format!("{:.1} damage", self.damage)];
        if self.crit_occurred {
            parts.push(format!("critical x{:.2}", self.crit_multiplier));
        }
        for roll in &self.on_hit_results {
            if roll.triggered {
                parts.push(format!("{} triggered", roll.effect));
            }
        }
        parts.join(", ")
    }
}
