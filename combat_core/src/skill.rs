//! Skill and spell definitions consumed by the combat engine
//!
//! Loaded from TOML/JSON catalogs; the engine only reads these.

use crate::types::Attribute;
use serde::{Deserialize, Serialize};

/// One attack definition from the weapon-skill or spell catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillDef {
    /// Unique attack identifier (e.g. `Sword:ST:1`, `Fire:DES:2`)
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Base power fed into the damage pipeline
    #[serde(default)]
    pub base_power: f64,
    /// Primary scaling attribute; pipelines fall back to STR (weapon)
    /// or INT (spell) when unset
    #[serde(default)]
    pub key_attribute: Option<Attribute>,
    /// Half-weighted secondary scaling attribute
    #[serde(default)]
    pub secondary_attribute: Option<Attribute>,
    /// Element tag; lowercased for proficiency and resistance lookup
    #[serde(default)]
    pub element: Option<String>,
    /// School tag; lowercased for proficiency lookup
    #[serde(default)]
    pub school: Option<String>,
    /// Weapon family tag; lowercased for proficiency lookup
    #[serde(default)]
    pub weapon: Option<String>,
    /// Flat resistance percentage folded into the typed-resist total
    #[serde(default)]
    pub elemental_resist_pct: f64,
}
