//! Proficiency lookup for attacks and performance arts
//!
//! Weapon attacks read the actor's training with the skill's weapon
//! family. Spell attacks are limited by the weaker of the caster's
//! element and school training. Performance-art proficiencies (singing,
//! instrument, dancing) feed a small scalar applied to most rolls.

use crate::actor::Actor;
use crate::skill::SkillDef;
use crate::types::AttackKind;

/// Flat bonus per point of performance-art proficiency
pub const NON_COMBAT_SCALAR: f64 = 0.001;

/// Proficiency keys with engine-level meaning
pub mod keys {
    pub const EVASION: &str = "evasion";
    pub const BLOCK: &str = "block";
    pub const SINGING: &str = "singing";
    pub const INSTRUMENT: &str = "instrument";
    pub const DANCING: &str = "dancing";
}

/// Weapon-attack proficiency: training with the skill's weapon family tag
pub fn weapon_proficiency(actor: &Actor, skill: &SkillDef) -> f64 {
    match &skill.weapon {
        Some(weapon) => actor.proficiency(&weapon.to_lowercase()),
        None => 0.0,
    }
}

/// Spell proficiency: the minimum of element and school training
///
/// A caster is no more capable than the weaker of the two; a missing tag
/// reads as 0 training.
pub fn spell_proficiency(actor: &Actor, skill: &SkillDef) -> f64 {
    let element = skill
        .element
        .as_ref()
        .map(|e| actor.proficiency(&e.to_lowercase()))
        .unwrap_or(0.0);
    let school = skill
        .school
        .as_ref()
        .map(|s| actor.proficiency(&s.to_lowercase()))
        .unwrap_or(0.0);
    element.min(school)
}

/// Proficiency relevant to the chosen attack
pub fn proficiency_for_skill(actor: &Actor, skill: &SkillDef, kind: AttackKind) -> f64 {
    match kind {
        AttackKind::Weapon => weapon_proficiency(actor, skill),
        AttackKind::Spell => spell_proficiency(actor, skill),
    }
}

/// Performance-art scalar: 1 + (singing + instrument [+ dancing]) * 0.001
pub fn non_combat_scalar(actor: &Actor, include_dancing: bool) -> f64 {
    let mut sum = actor.proficiency(keys::SINGING) + actor.proficiency(keys::INSTRUMENT);
    if include_dancing {
        sum += actor.proficiency(keys::DANCING);
    }
    1.0 + sum * NON_COMBAT_SCALAR
}
