//! Defense estimators - evasion, block, and crit-vs-defense scaling

mod block;
mod crit;
mod evasion;

pub use block::base_block_chance;
pub use crit::crit_vs_defense_modifier;
pub use evasion::base_evasion_chance;

/// Chance estimator constants
pub mod constants {
    /// Flat evasion base before any deltas
    pub const EVASION_BASE: f64 = 0.1;
    /// Evasion per point of defender AGI over attacker DEX
    pub const EVASION_ATTR_WEIGHT: f64 = 0.005;
    /// Evasion per point of evasion proficiency over attack proficiency
    pub const EVASION_PROF_WEIGHT: f64 = 0.002;
    /// Evasion per level the defender has over the attacker
    pub const EVASION_LEVEL_WEIGHT: f64 = 0.01;
    /// Evasion cap for weapon attacks
    pub const EVASION_CAP_WEAPON: f64 = 0.60;
    /// Wider evasion cap retained by the spell branch
    pub const EVASION_CAP_SPELL: f64 = 0.95;

    /// Flat block base before any deltas
    pub const BLOCK_BASE: f64 = 0.05;
    /// Block per point of block proficiency
    pub const BLOCK_PROF_WEIGHT: f64 = 0.002;
    /// Block per point of defender CON+VIT over attacker STR
    pub const BLOCK_ATTR_WEIGHT: f64 = 0.002;
    /// Block per level the defender has over the attacker
    pub const BLOCK_LEVEL_WEIGHT: f64 = 0.01;
    /// Block cap for weapon attacks
    pub const BLOCK_CAP_WEAPON: f64 = 0.75;
    /// Block cap retained by the spell branch
    pub const BLOCK_CAP_SPELL: f64 = 0.80;

    /// Crit modifier per point of attacker DEX over defender AGI
    pub const CRIT_ATTR_WEIGHT: f64 = 0.01;
    /// Crit modifier per level the attacker has over the defender
    pub const CRIT_LEVEL_WEIGHT: f64 = 0.02;
    /// Lower bound of the crit-vs-defense modifier
    pub const CRIT_MOD_MIN: f64 = 0.5;
    /// Upper bound of the crit-vs-defense modifier
    pub const CRIT_MOD_MAX: f64 = 1.5;
    /// Hard cap on crit chance after all scaling
    pub const CRIT_CHANCE_CAP: f64 = 0.50;
}
