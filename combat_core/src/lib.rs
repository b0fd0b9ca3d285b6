//! combat_core - Single-exchange combat resolution for RPG actors
//!
//! This library provides:
//! - Actor: read-only combatant snapshot (level, attributes, proficiencies)
//! - WeaponCombatStats: normalized weapon description (AP, crit, damage mix)
//! - resolve_attack: the weapon and spell damage pipelines
//! - On-hit effect rolls (bleed, sunder, disarm, ...)
//! - SkillCatalog: TOML/JSON-loaded attack definitions
//!
//! One call resolves one exchange: whether the attack lands, whether it
//! crits, how much damage survives defense, resists, and block, and which
//! secondary effects trigger. Randomness is injected so callers can replay
//! outcomes with a seeded generator.

pub mod actor;
pub mod combat;
pub mod config;
pub mod defense;
pub mod modifier;
pub mod onhit;
pub mod proficiency;
pub mod skill;
pub mod types;
pub mod weapon;

// Re-export core types for convenience
pub use actor::Actor;
pub use combat::{
    resolve_attack, resolve_attack_with_rng, CombatError, CombatOptions, CombatResult, DamagePath,
};
pub use config::{default_catalog, ConfigError, SkillCatalog};
pub use modifier::{aggregate_modifiers, ModifierSet};
pub use onhit::{OnHitConfig, OnHitResult, ScalesWith};
pub use skill::SkillDef;
pub use types::{AttackKind, Attribute, DamageType};
pub use weapon::{
    resolve_weapon_stats, ArmorPenBand, DamageMix, ResolvedWeaponStats, WeaponCombatStats,
};
