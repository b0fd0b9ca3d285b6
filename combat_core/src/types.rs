//! Core types shared across the combat engine

use serde::{Deserialize, Serialize};

/// Primary character attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Attribute {
    Str,
    Dex,
    Con,
    Vit,
    Agi,
    Int,
    Wis,
    Cha,
}

impl Attribute {
    /// Get all attributes
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Str,
            Attribute::Dex,
            Attribute::Con,
            Attribute::Vit,
            Attribute::Agi,
            Attribute::Int,
            Attribute::Wis,
            Attribute::Cha,
        ]
    }
}

/// Physical damage types dealt by weapons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DamageType {
    Blunt,
    Slash,
    Pierce,
}

impl DamageType {
    /// Get all damage types
    pub fn all() -> &'static [DamageType] {
        &[DamageType::Blunt, DamageType::Slash, DamageType::Pierce]
    }

    /// Uppercase name used as a resistance-map key
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Blunt => "BLUNT",
            DamageType::Slash => "SLASH",
            DamageType::Pierce => "PIERCE",
        }
    }
}

/// Discriminator for the two attack pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    #[default]
    Weapon,
    Spell,
}
