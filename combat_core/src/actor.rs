//! Actor - a read-only combatant snapshot
//!
//! An `Actor` carries everything the resolver needs to know about one side
//! of an exchange: level, attributes, proficiencies, and defensive fields.
//! The resolver never mutates an actor; callers apply outcomes to their own
//! state after the call.

use crate::types::Attribute;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A combat participant snapshot
///
/// Every numeric field degrades gracefully: absent attributes,
/// proficiencies, and resistances all read as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Actor {
    /// Character level
    #[serde(default)]
    pub level: i32,
    /// Attribute values (STR, DEX, CON, VIT, AGI, INT, WIS, CHA)
    #[serde(default)]
    pub attributes: HashMap<Attribute, f64>,
    /// Skill values keyed by weapon family, element, school, or
    /// engine-level keys such as `evasion`, `block`, `singing`
    #[serde(default)]
    pub proficiencies: HashMap<String, f64>,
    /// Flat defense override; when unset defense derives from CON + VIT
    #[serde(default)]
    pub defense: Option<f64>,
    /// Resistance percentages keyed by damage-type name (`BLUNT`, ...) or
    /// element name (`Fire`, ...)
    #[serde(default)]
    pub resists: HashMap<String, f64>,
    /// Percentage shaved off incoming critical damage
    #[serde(default)]
    pub crit_damage_reduction_pct: Option<f64>,
    /// Flat percentage mitigation applied to any hit, crit or not
    #[serde(default)]
    pub crit_defense: Option<f64>,
}

impl Actor {
    /// Create an actor at the given level with no stats
    pub fn new(level: i32) -> Self {
        Actor {
            level,
            ..Default::default()
        }
    }

    /// Attribute value, 0 when untracked
    pub fn attribute(&self, attr: Attribute) -> f64 {
        self.attributes.get(&attr).copied().unwrap_or(0.0)
    }

    /// Proficiency value for a key, 0 when untracked
    pub fn proficiency(&self, key: &str) -> f64 {
        self.proficiencies.get(key).copied().unwrap_or(0.0)
    }

    /// Resistance percentage for a damage-type or element key, 0 when untracked
    pub fn resist(&self, key: &str) -> f64 {
        self.resists.get(key).copied().unwrap_or(0.0)
    }

    /// Flat defense: the explicit override, else CON + VIT
    pub fn defense_base(&self) -> f64 {
        self.defense
            .unwrap_or_else(|| self.attribute(Attribute::Con) + self.attribute(Attribute::Vit))
    }
}
