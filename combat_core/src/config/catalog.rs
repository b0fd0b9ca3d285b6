//! Skill catalog loading
//!
//! The resolver reads attack definitions from a `SkillCatalog` holding
//! weapon skills and spells in separate namespaces. Catalogs load from
//! TOML or JSON `[[skills]]` tables; a built-in default covers a
//! representative slice of the full game data.

use super::ConfigError;
use crate::skill::SkillDef;
use crate::types::AttackKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for skill configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    pub skills: Vec<SkillDef>,
}

/// Attack definitions keyed by id, split by attack kind
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    weapon_skills: HashMap<String, SkillDef>,
    spells: HashMap<String, SkillDef>,
}

impl SkillCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a weapon skill, replacing any previous entry with the same id
    pub fn add_weapon_skill(&mut self, skill: SkillDef) {
        self.weapon_skills.insert(skill.id.clone(), skill);
    }

    /// Add a spell, replacing any previous entry with the same id
    pub fn add_spell(&mut self, skill: SkillDef) {
        self.spells.insert(skill.id.clone(), skill);
    }

    /// Look up an attack in the namespace for its kind
    pub fn get(&self, kind: AttackKind, id: &str) -> Option<&SkillDef> {
        match kind {
            AttackKind::Weapon => self.weapon_skills.get(id),
            AttackKind::Spell => self.spells.get(id),
        }
    }

    /// Iterate all weapon skills
    pub fn weapon_skills(&self) -> impl Iterator<Item = &SkillDef> {
        self.weapon_skills.values()
    }

    /// Iterate all spells
    pub fn spells(&self) -> impl Iterator<Item = &SkillDef> {
        self.spells.values()
    }
}

fn index_by_id(skills: Vec<SkillDef>) -> Result<HashMap<String, SkillDef>, ConfigError> {
    let mut map = HashMap::new();
    for skill in skills {
        if skill.id.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "skill {:?} has an empty id",
                skill.name
            )));
        }
        map.insert(skill.id.clone(), skill);
    }
    Ok(map)
}

/// Load skill configurations from a TOML file
pub fn load_skill_configs(path: &Path) -> Result<HashMap<String, SkillDef>, ConfigError> {
    let config: SkillsConfig = super::load_toml(path)?;
    index_by_id(config.skills)
}

/// Load skill configurations from a TOML string
pub fn parse_skill_configs(content: &str) -> Result<HashMap<String, SkillDef>, ConfigError> {
    let config: SkillsConfig = super::parse_toml(content)?;
    index_by_id(config.skills)
}

/// Load skill configurations from a JSON string
pub fn parse_skill_configs_json(content: &str) -> Result<HashMap<String, SkillDef>, ConfigError> {
    let config: SkillsConfig = super::parse_json(content)?;
    index_by_id(config.skills)
}

/// Get the built-in catalog
pub fn default_catalog() -> SkillCatalog {
    let mut catalog = SkillCatalog::new();

    let weapon_skills = parse_skill_configs(include_str!("../../config/weapon_skills.toml"))
        .unwrap_or_else(|_| {
            let mut map = HashMap::new();
            map.insert(
                "Sword:ST:1".to_string(),
                SkillDef {
                    id: "Sword:ST:1".to_string(),
                    name: "Slash".to_string(),
                    weapon: Some("Sword".to_string()),
                    base_power: 1.0,
                    ..Default::default()
                },
            );
            map
        });
    for skill in weapon_skills.into_values() {
        catalog.add_weapon_skill(skill);
    }

    let spells = parse_skill_configs(include_str!("../../config/spells.toml")).unwrap_or_default();
    for spell in spells.into_values() {
        catalog.add_spell(spell);
    }

    catalog
}
