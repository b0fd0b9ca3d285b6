//! Attack resolution - the weapon and spell damage pipelines
//!
//! Both pipelines share the base-damage composition (attribute scale,
//! level factor, proficiency factor, offense bonus) and the half-chance
//! block rule, then diverge: the weapon branch carries armor penetration,
//! a parallel crit path, and on-hit effects; the spell branch is the
//! older deterministic model with an INT-ratio resist.
//!
//! The crit path repeats the defense/resist/block stages with a higher
//! effective armor penetration rather than post-multiplying the normal
//! figure, so a crit that ignores more armor also interacts correctly
//! with defense and block.

use super::coeffs;
use super::result::{CombatResult, DamagePath};
use super::{CombatError, CombatOptions};
use crate::actor::Actor;
use crate::config::SkillCatalog;
use crate::defense::constants::{
    BLOCK_CAP_SPELL, BLOCK_CAP_WEAPON, CRIT_CHANCE_CAP, EVASION_CAP_SPELL, EVASION_CAP_WEAPON,
};
use crate::defense::{base_block_chance, base_evasion_chance, crit_vs_defense_modifier};
use crate::modifier::{aggregate_modifiers, keys, modifier, ModifierSet};
use crate::onhit::resolve_on_hit;
use crate::proficiency::{non_combat_scalar, spell_proficiency, weapon_proficiency};
use crate::skill::SkillDef;
use crate::types::{AttackKind, Attribute, DamageType};
use rand::Rng;

/// Resolve one attack exchange using the thread-local RNG
///
/// Looks up the attack in the catalog, aggregates modifier sets, and runs
/// the pipeline for the chosen attack kind. The attacker and defender are
/// read-only; the result carries everything the caller needs to apply.
pub fn resolve_attack(
    catalog: &SkillCatalog,
    attacker: &Actor,
    defender: &Actor,
    opts: &CombatOptions,
) -> Result<CombatResult, CombatError> {
    let mut rng = rand::thread_rng();
    resolve_attack_with_rng(catalog, attacker, defender, opts, &mut rng)
}

/// Resolve an attack with a provided RNG (for deterministic testing/replay)
pub fn resolve_attack_with_rng(
    catalog: &SkillCatalog,
    attacker: &Actor,
    defender: &Actor,
    opts: &CombatOptions,
    rng: &mut impl Rng,
) -> Result<CombatResult, CombatError> {
    let skill =
        catalog
            .get(opts.attack_kind, &opts.attack_id)
            .ok_or_else(|| CombatError::UnknownAttack {
                kind: opts.attack_kind,
                id: opts.attack_id.clone(),
            })?;

    let atk_mods = aggregate_modifiers(&opts.attacker_effects);
    let def_mods = aggregate_modifiers(&opts.defender_effects);

    match opts.attack_kind {
        AttackKind::Weapon => Ok(resolve_weapon_attack(
            attacker, defender, skill, opts, &atk_mods, &def_mods, rng,
        )),
        AttackKind::Spell => Ok(resolve_spell_attack(
            attacker, defender, skill, &atk_mods, &def_mods,
        )),
    }
}

/// Stages 1-5: attribute scale, level factor, proficiency factor,
/// offense bonus, base damage
fn base_damage(
    attacker: &Actor,
    defender: &Actor,
    skill: &SkillDef,
    proficiency: f64,
    atk_mods: &ModifierSet,
    default_key: Attribute,
) -> f64 {
    let key_attr = skill.key_attribute.unwrap_or(default_key);
    let key_value = attacker.attribute(key_attr);
    let secondary_value = skill
        .secondary_attribute
        .map(|attr| attacker.attribute(attr))
        .unwrap_or(0.0);
    let attr_scale = key_value + coeffs::ATTR_SECONDARY_WEIGHT * secondary_value;

    let level_factor = (1.0 + coeffs::LEVEL_SLOPE * f64::from(attacker.level - defender.level))
        .clamp(coeffs::LEVEL_CLAMP_MIN, coeffs::LEVEL_CLAMP_MAX);
    let prof_factor = 1.0 + proficiency * coeffs::PROF_SCALAR;
    let offense_bonus =
        non_combat_scalar(attacker, true) * (1.0 + modifier(atk_mods, keys::ATK_PCT) / 100.0);

    skill.base_power * attr_scale * prof_factor * offense_bonus * level_factor
}

/// Stages 7-14 for one armor-penetration value
///
/// The crit path re-runs this with its higher bypass percentage.
fn mitigation_path(
    base_damage: f64,
    defense_base: f64,
    def_pct: f64,
    ap_bypass_pct: f64,
    resist_multiplier: f64,
    dmg_taken_mod: f64,
    block_chance: f64,
) -> DamagePath {
    let defense_bonus = (1.0 + def_pct / 100.0) * (1.0 - ap_bypass_pct / 100.0);
    let damage_after_defense = (base_damage - defense_base * defense_bonus).max(0.0);
    let damage_after_resist = damage_after_defense * resist_multiplier * dmg_taken_mod;
    let post_block =
        damage_after_resist * (1.0 - block_chance * coeffs::BLOCK_MITIGATION_PER_CHANCE);

    DamagePath {
        ap_bypass_pct,
        damage_after_defense,
        damage_after_resist,
        post_block,
        final_damage: 0.0,
    }
}

fn resolve_weapon_attack(
    attacker: &Actor,
    defender: &Actor,
    skill: &SkillDef,
    opts: &CombatOptions,
    atk_mods: &ModifierSet,
    def_mods: &ModifierSet,
    rng: &mut impl Rng,
) -> CombatResult {
    let weapon_prof = weapon_proficiency(attacker, skill);
    let weapon = crate::weapon::resolve_weapon_stats(opts.weapon_stats.as_ref());

    let base = base_damage(attacker, defender, skill, weapon_prof, atk_mods, Attribute::Str);
    let defense_base = defender.defense_base();

    let def_pct = modifier(def_mods, keys::DEF_PCT);
    let dmg_taken_mod = 1.0 + modifier(def_mods, keys::DMG_TAKEN_PCT) / 100.0;

    // Stage 10: bulk versus strength; only the positive part resists
    let con_vit = defender.attribute(Attribute::Con) + defender.attribute(Attribute::Vit);
    let attr_resist = ((con_vit / 2.0 - attacker.attribute(Attribute::Str)) / 200.0)
        .clamp(coeffs::ATTR_RESIST_MIN, coeffs::ATTR_RESIST_MAX);

    // Stage 11: typed resist weighted by the damage mix
    let mut typed_resist_pct = 0.0;
    for &damage_type in DamageType::all() {
        typed_resist_pct +=
            weapon.dmg_mix.share(damage_type) * defender.resist(damage_type.as_str());
    }

    // Stage 12
    let total_resist_pct = (typed_resist_pct
        + skill.elemental_resist_pct
        + (attr_resist * 100.0).max(0.0))
    .clamp(coeffs::RESIST_CLAMP_MIN_PCT, coeffs::RESIST_CLAMP_MAX_PCT);
    let resist_multiplier = 1.0 - total_resist_pct / 100.0;

    let evasion_chance = (base_evasion_chance(attacker, defender, weapon_prof)
        * (1.0 + modifier(def_mods, keys::EVADE_PCT) / 100.0))
        .clamp(0.0, EVASION_CAP_WEAPON);
    let hit_chance = (1.0 - evasion_chance).clamp(0.0, 1.0);
    let block_chance = base_block_chance(attacker, defender).clamp(0.0, BLOCK_CAP_WEAPON);

    // Stages 7-14, normal path
    let ap_bypass_pct = (weapon.ap * 100.0).clamp(0.0, coeffs::AP_BYPASS_CAP_PCT);
    let mut normal_path = mitigation_path(
        base,
        defense_base,
        def_pct,
        ap_bypass_pct,
        resist_multiplier,
        dmg_taken_mod,
        block_chance,
    );

    // Stage 15: parallel crit path, crit armor bypass folded in under the same cap
    let crit_ap_pct = (ap_bypass_pct + weapon.crit_armor_bypass_pct * 100.0)
        .clamp(0.0, coeffs::AP_BYPASS_CAP_PCT);
    let mut crit_path = mitigation_path(
        base,
        defense_base,
        def_pct,
        crit_ap_pct,
        resist_multiplier,
        dmg_taken_mod,
        block_chance,
    );

    let crit_chance = ((weapon.crit_chance_pct / 100.0)
        * crit_vs_defense_modifier(attacker, defender))
    .clamp(0.0, CRIT_CHANCE_CAP);

    // Actor fields win; aggregated defender modifiers are the fallback
    let crit_dr = 1.0
        - defender
            .crit_damage_reduction_pct
            .unwrap_or_else(|| modifier(def_mods, keys::CRIT_DMG_REDUCTION_PCT))
            / 100.0;
    let crit_defense = defender
        .crit_defense
        .unwrap_or_else(|| modifier(def_mods, keys::CRIT_DEFENSE));

    // A multiplier explicitly set to 0 reads as no multiplier
    let crit_mult = if weapon.crit_mult > 0.0 {
        weapon.crit_mult
    } else {
        1.0
    };

    let non_crit_damage = normal_path.post_block * (1.0 - crit_defense / 100.0);
    let crit_damage = crit_path.post_block * crit_mult * crit_dr * (1.0 - crit_defense / 100.0);
    normal_path.final_damage = non_crit_damage;
    crit_path.final_damage = crit_damage;

    // Stage 16: analytic expectation, computed before any draw
    let expected_damage =
        (crit_chance * crit_damage + (1.0 - crit_chance) * non_crit_damage) * hit_chance;

    // Stage 17: the crit roll is only drawn on a hit
    let did_hit = rng.gen::<f64>() < hit_chance;
    let crit_occurred = did_hit && rng.gen::<f64>() < crit_chance;
    let damage = if did_hit {
        if crit_occurred {
            crit_damage
        } else {
            non_crit_damage
        }
    } else {
        0.0
    };

    // Stage 18: on-hit effects scale with the damage actually applied
    let on_hit_results = if did_hit {
        resolve_on_hit(damage, &weapon.on_hit, rng)
    } else {
        Vec::new()
    };

    CombatResult {
        damage,
        expected_damage,
        did_hit,
        crit_occurred,
        crit_chance,
        crit_multiplier: if crit_occurred { crit_mult } else { 1.0 },
        hit_chance,
        evasion_chance,
        block_chance,
        resist_multiplier,
        typed_resist_pct,
        total_resist_pct,
        ap_bypass_pct,
        base_damage: base,
        normal_path,
        crit_path,
        on_hit_results,
    }
}

fn resolve_spell_attack(
    attacker: &Actor,
    defender: &Actor,
    skill: &SkillDef,
    atk_mods: &ModifierSet,
    def_mods: &ModifierSet,
) -> CombatResult {
    let spell_prof = spell_proficiency(attacker, skill);
    let base = base_damage(attacker, defender, skill, spell_prof, atk_mods, Attribute::Int);

    // Spell defense scales with the defender's performance arts (dancing
    // excluded) instead of armor penetration
    let defense_base = defender.defense_base();
    let defense_bonus =
        non_combat_scalar(defender, false) * (1.0 + modifier(def_mods, keys::DEF_PCT) / 100.0);
    let damage_after_defense = (base - defense_base * defense_bonus).max(0.0);

    // INT ratio stands in for the typed resist of the weapon branch
    let int_def = defender.attribute(Attribute::Int);
    let int_atk = attacker.attribute(Attribute::Int);
    let resist_attr = int_def / (int_def + int_atk + 1.0);
    let element_resist = skill
        .element
        .as_deref()
        .map(|element| defender.resist(element))
        .unwrap_or(0.0)
        / 100.0;
    let dmg_taken_mod = 1.0 + modifier(def_mods, keys::DMG_TAKEN_PCT) / 100.0;
    let total_resist = (resist_attr + element_resist).clamp(0.0, coeffs::SPELL_RESIST_CAP);
    let damage_after_resist = damage_after_defense * (1.0 - total_resist) * dmg_taken_mod;

    let evasion_chance = (base_evasion_chance(attacker, defender, spell_prof)
        * (1.0 + modifier(def_mods, keys::EVADE_PCT) / 100.0))
        .clamp(0.0, EVASION_CAP_SPELL);
    let hit_chance = (1.0 - evasion_chance).clamp(0.0, 1.0);
    let block_chance = base_block_chance(attacker, defender).clamp(0.0, BLOCK_CAP_SPELL);

    let post_block =
        damage_after_resist * (1.0 - block_chance * coeffs::BLOCK_MITIGATION_PER_CHANCE);

    // No hit roll is taken in this branch: `damage` is always the full
    // figure and evasion discounts only the expectation. Callers wanting
    // miss semantics must gate on hit_chance themselves.
    CombatResult {
        damage: post_block,
        expected_damage: post_block * hit_chance,
        did_hit: true,
        crit_occurred: false,
        crit_chance: 0.0,
        crit_multiplier: 1.0,
        hit_chance,
        evasion_chance,
        block_chance,
        resist_multiplier: 1.0 - total_resist,
        typed_resist_pct: 0.0,
        total_resist_pct: total_resist * 100.0,
        ap_bypass_pct: 0.0,
        base_damage: base,
        normal_path: DamagePath {
            ap_bypass_pct: 0.0,
            damage_after_defense,
            damage_after_resist,
            post_block,
            final_damage: post_block,
        },
        crit_path: DamagePath::default(),
        on_hit_results: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onhit::{OnHitConfig, ScalesWith};
    use crate::weapon::WeaponCombatStats;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// RNG yielding a fixed sequence of [0,1) draws, repeating the last
    struct SeqRng {
        draws: Vec<f64>,
        next: usize,
    }

    impl SeqRng {
        fn new(draws: &[f64]) -> Self {
            SeqRng {
                draws: draws.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for SeqRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let value = self
                .draws
                .get(self.next)
                .or_else(|| self.draws.last())
                .copied()
                .unwrap_or(0.0);
            self.next += 1;
            // Standard f64 sampling reads the top 53 bits
            ((value * (1u64 << 53) as f64) as u64) << 11
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn test_catalog() -> SkillCatalog {
        let mut catalog = SkillCatalog::new();
        catalog.add_weapon_skill(SkillDef {
            id: "strike".to_string(),
            name: "Strike".to_string(),
            weapon: Some("Sword".to_string()),
            key_attribute: Some(Attribute::Str),
            base_power: 10.0,
            ..Default::default()
        });
        catalog.add_spell(SkillDef {
            id: "ember".to_string(),
            name: "Ember Shot".to_string(),
            element: Some("Fire".to_string()),
            school: Some("Destructive".to_string()),
            key_attribute: Some(Attribute::Int),
            base_power: 20.0,
            ..Default::default()
        });
        catalog
    }

    fn swordsman() -> Actor {
        let mut actor = Actor::new(10);
        actor.attributes.insert(Attribute::Str, 20.0);
        actor.proficiencies.insert("sword".to_string(), 50.0);
        actor
    }

    fn footman() -> Actor {
        let mut actor = Actor::new(10);
        actor.attributes.insert(Attribute::Con, 10.0);
        actor.attributes.insert(Attribute::Vit, 10.0);
        actor
    }

    fn strike_opts() -> CombatOptions {
        let mut opts = CombatOptions::weapon("strike");
        opts.weapon_stats = Some(WeaponCombatStats {
            ap: Some(0.0),
            crit_chance_pct: Some(0.0),
            ..Default::default()
        });
        opts
    }

    #[test]
    fn test_unknown_attack_id_is_fatal() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let err = resolve_attack_with_rng(
            &catalog,
            &swordsman(),
            &footman(),
            &CombatOptions::weapon("no_such_skill"),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, CombatError::UnknownAttack { .. }));
    }

    #[test]
    fn test_weapon_kind_does_not_see_spells() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let err = resolve_attack_with_rng(
            &catalog,
            &swordsman(),
            &footman(),
            &CombatOptions::weapon("ember"),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, CombatError::UnknownAttack { .. }));
    }

    #[test]
    fn test_weapon_pipeline_stage_values() {
        let catalog = test_catalog();
        let mut rng = SeqRng::new(&[0.0, 0.0]);
        let result = resolve_attack_with_rng(
            &catalog,
            &swordsman(),
            &footman(),
            &strike_opts(),
            &mut rng,
        )
        .unwrap();

        // base = 10 power * 20 STR * 1.5 prof * 1.0 offense * 1.0 level
        assert!((result.base_damage - 300.0).abs() < 1e-9);
        // defense 20 (CON+VIT), no AP: 300 - 20 = 280
        assert!((result.normal_path.damage_after_defense - 280.0).abs() < 1e-9);
        // attr resist (10 - 20)/200 is negative, typed resists 0
        assert!((result.total_resist_pct - 0.0).abs() < 1e-9);
        assert!((result.normal_path.damage_after_resist - 280.0).abs() < 1e-9);
        // evasion 0.1 - 50 * 0.002 floors at 0; block base 0.05
        assert!((result.evasion_chance - 0.0).abs() < 1e-9);
        assert!((result.hit_chance - 1.0).abs() < 1e-9);
        assert!((result.block_chance - 0.05).abs() < 1e-9);
        // 280 * (1 - 0.05 * 0.5) = 273
        assert!((result.normal_path.post_block - 273.0).abs() < 1e-9);

        assert!(result.did_hit);
        assert!(!result.crit_occurred);
        assert!((result.damage - 273.0).abs() < 1e-9);
        assert!((result.expected_damage - 273.0).abs() < 1e-9);
        assert!((result.crit_multiplier - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_zero_actors_resolve_to_zero_damage() {
        let catalog = test_catalog();
        let mut rng = SeqRng::new(&[0.0, 0.0]);
        let result = resolve_attack_with_rng(
            &catalog,
            &Actor::new(0),
            &Actor::new(0),
            &CombatOptions::weapon("strike"),
            &mut rng,
        )
        .unwrap();

        assert!((result.damage - 0.0).abs() < f64::EPSILON);
        assert!((result.expected_damage - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_miss_deals_zero_and_rolls_no_effects() {
        let catalog = test_catalog();
        let mut defender = footman();
        defender.attributes.insert(Attribute::Agi, 200.0);

        let mut opts = strike_opts();
        opts.weapon_stats.as_mut().unwrap().on_hit.insert(
            "bleed".to_string(),
            OnHitConfig {
                chance_pct: 100.0,
                scales_with: Some(ScalesWith::FinalDamage),
                ..Default::default()
            },
        );

        // Evasion caps at 0.6, so a 0.99 draw always misses
        let mut rng = SeqRng::new(&[0.99]);
        let result =
            resolve_attack_with_rng(&catalog, &swordsman(), &defender, &opts, &mut rng).unwrap();

        assert!((result.evasion_chance - 0.6).abs() < 1e-9);
        assert!(!result.did_hit);
        assert!((result.damage - 0.0).abs() < f64::EPSILON);
        assert!(result.on_hit_results.is_empty());
        // The expectation still prices the 40% of hits that land
        assert!(result.expected_damage > 0.0);
    }

    #[test]
    fn test_ap_reduces_effective_defense() {
        let catalog = test_catalog();
        let mut opts = strike_opts();
        opts.weapon_stats.as_mut().unwrap().ap = Some(0.5);

        let mut rng = SeqRng::new(&[0.0, 0.0]);
        let result = resolve_attack_with_rng(
            &catalog,
            &swordsman(),
            &footman(),
            &opts,
            &mut rng,
        )
        .unwrap();

        assert!((result.ap_bypass_pct - 50.0).abs() < 1e-9);
        // 300 - 20 * 0.5 = 290
        assert!((result.normal_path.damage_after_defense - 290.0).abs() < 1e-9);
    }

    #[test]
    fn test_ap_bypass_caps_at_seventy_percent() {
        let catalog = test_catalog();
        let mut opts = strike_opts();
        opts.weapon_stats.as_mut().unwrap().ap = Some(2.5);

        let mut rng = SeqRng::new(&[0.0, 0.0]);
        let result = resolve_attack_with_rng(
            &catalog,
            &swordsman(),
            &footman(),
            &opts,
            &mut rng,
        )
        .unwrap();

        assert!((result.ap_bypass_pct - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_crit_path_exceeds_normal_path() {
        let catalog = test_catalog();
        let mut opts = strike_opts();
        {
            let weapon = opts.weapon_stats.as_mut().unwrap();
            weapon.ap = Some(0.2);
            weapon.crit_chance_pct = Some(50.0);
            weapon.crit_mult = Some(1.6);
            weapon.crit_armor_bypass_pct = Some(0.3);
        }

        // Hit draw 0, crit draw 0 -> forced crit (chance 0.5)
        let mut rng = SeqRng::new(&[0.0, 0.0]);
        let result = resolve_attack_with_rng(
            &catalog,
            &swordsman(),
            &footman(),
            &opts,
            &mut rng,
        )
        .unwrap();

        assert!(result.crit_occurred);
        assert!((result.crit_multiplier - 1.6).abs() < f64::EPSILON);
        // Crit folds 30% extra bypass on top of the 20% AP
        assert!((result.crit_path.ap_bypass_pct - 50.0).abs() < 1e-9);
        assert!(result.crit_path.final_damage >= result.normal_path.final_damage);
        assert!((result.damage - result.crit_path.final_damage).abs() < 1e-9);
    }

    #[test]
    fn test_crit_chance_caps_at_half() {
        let catalog = test_catalog();
        let mut opts = strike_opts();
        opts.weapon_stats.as_mut().unwrap().crit_chance_pct = Some(400.0);

        let mut rng = SeqRng::new(&[0.0, 0.0]);
        let result = resolve_attack_with_rng(
            &catalog,
            &swordsman(),
            &footman(),
            &opts,
            &mut rng,
        )
        .unwrap();
        assert!((result.crit_chance - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_crit_defense_fields_fall_back_to_modifiers() {
        let catalog = test_catalog();
        let mut opts = strike_opts();
        {
            let weapon = opts.weapon_stats.as_mut().unwrap();
            weapon.crit_chance_pct = Some(100.0);
        }
        opts.defender_effects.push(
            [
                (keys::CRIT_DMG_REDUCTION_PCT.to_string(), 50.0),
                (keys::CRIT_DEFENSE.to_string(), 10.0),
            ]
            .into_iter()
            .collect(),
        );

        let mut rng = SeqRng::new(&[0.0, 0.0]);
        let result = resolve_attack_with_rng(
            &catalog,
            &swordsman(),
            &footman(),
            &opts,
            &mut rng,
        )
        .unwrap();

        assert!(result.crit_occurred);
        // post_block 273; crit: 273 * 1.5 mult * 0.5 reduction * 0.9 crit defense
        assert!((result.damage - 273.0 * 1.5 * 0.5 * 0.9).abs() < 1e-9);
        // non-crit path only takes the flat crit defense
        assert!((result.normal_path.final_damage - 273.0 * 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_actor_crit_fields_win_over_modifiers() {
        let catalog = test_catalog();
        let mut defender = footman();
        defender.crit_damage_reduction_pct = Some(20.0);

        let mut opts = strike_opts();
        opts.weapon_stats.as_mut().unwrap().crit_chance_pct = Some(100.0);
        opts.defender_effects
            .push([(keys::CRIT_DMG_REDUCTION_PCT.to_string(), 90.0)].into_iter().collect());

        let mut rng = SeqRng::new(&[0.0, 0.0]);
        let result =
            resolve_attack_with_rng(&catalog, &swordsman(), &defender, &opts, &mut rng).unwrap();

        // 273 * 1.5 * (1 - 0.20), not (1 - 0.90)
        assert!((result.damage - 273.0 * 1.5 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_typed_resists_combine_through_the_mix() {
        let catalog = test_catalog();
        let mut defender = footman();
        defender.resists.insert("SLASH".to_string(), 40.0);
        defender.resists.insert("PIERCE".to_string(), 20.0);

        let mut opts = strike_opts();
        opts.weapon_stats.as_mut().unwrap().dmg_mix = Some(crate::weapon::DamageMix {
            blunt: 0.0,
            slash: 0.5,
            pierce: 0.5,
        });

        let mut rng = SeqRng::new(&[0.0, 0.0]);
        let result =
            resolve_attack_with_rng(&catalog, &swordsman(), &defender, &opts, &mut rng).unwrap();

        // 0.5 * 40 + 0.5 * 20 = 30
        assert!((result.typed_resist_pct - 30.0).abs() < 1e-9);
        assert!((result.total_resist_pct - 30.0).abs() < 1e-9);
        assert!((result.resist_multiplier - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_total_resist_caps_at_eighty() {
        let catalog = test_catalog();
        let mut defender = footman();
        for key in ["BLUNT", "SLASH", "PIERCE"] {
            defender.resists.insert(key.to_string(), 95.0);
        }

        let mut rng = SeqRng::new(&[0.0, 0.0]);
        let result = resolve_attack_with_rng(
            &catalog,
            &swordsman(),
            &defender,
            &strike_opts(),
            &mut rng,
        )
        .unwrap();

        assert!((result.total_resist_pct - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_attacker_and_defender_modifiers_apply() {
        let catalog = test_catalog();
        let mut opts = strike_opts();
        opts.attacker_effects
            .push([(keys::ATK_PCT.to_string(), 50.0)].into_iter().collect());
        opts.defender_effects
            .push([(keys::DEF_PCT.to_string(), 100.0)].into_iter().collect());

        let mut rng = SeqRng::new(&[0.0, 0.0]);
        let result = resolve_attack_with_rng(
            &catalog,
            &swordsman(),
            &footman(),
            &opts,
            &mut rng,
        )
        .unwrap();

        // base 300 * 1.5 = 450; defense 20 * 2 = 40; 450 - 40 = 410
        assert!((result.base_damage - 450.0).abs() < 1e-9);
        assert!((result.normal_path.damage_after_defense - 410.0).abs() < 1e-9);
    }

    #[test]
    fn test_expected_damage_ignores_the_draws() {
        let catalog = test_catalog();
        let mut opts = strike_opts();
        opts.weapon_stats.as_mut().unwrap().crit_chance_pct = Some(30.0);

        let mut expected = None;
        for draws in [[0.0, 0.0], [0.99, 0.99], [0.2, 0.9], [0.7, 0.1]] {
            let mut rng = SeqRng::new(&draws);
            let result = resolve_attack_with_rng(
                &catalog,
                &swordsman(),
                &footman(),
                &opts,
                &mut rng,
            )
            .unwrap();
            match expected {
                None => expected = Some(result.expected_damage),
                Some(prev) => assert!((result.expected_damage - prev).abs() < 1e-12),
            }
        }
    }

    #[test]
    fn test_guaranteed_bleed_scales_with_applied_damage() {
        let catalog = test_catalog();
        let mut opts = strike_opts();
        opts.weapon_stats.as_mut().unwrap().on_hit.insert(
            "bleed".to_string(),
            OnHitConfig {
                chance_pct: 100.0,
                power: Some(0.2),
                scales_with: Some(ScalesWith::FinalDamage),
                ..Default::default()
            },
        );

        let mut rng = SeqRng::new(&[0.0, 0.0, 0.5]);
        let result = resolve_attack_with_rng(
            &catalog,
            &swordsman(),
            &footman(),
            &opts,
            &mut rng,
        )
        .unwrap();

        assert!(result.did_hit);
        assert_eq!(result.on_hit_results.len(), 1);
        let bleed = &result.on_hit_results[0];
        assert_eq!(bleed.effect, "bleed");
        assert!(bleed.triggered);
        assert!((bleed.scaled_power.unwrap() - 0.2 * result.damage).abs() < 1e-9);
    }

    #[test]
    fn test_spell_pipeline_stage_values() {
        let catalog = test_catalog();
        let mut caster = Actor::new(10);
        caster.attributes.insert(Attribute::Int, 15.0);
        caster.proficiencies.insert("fire".to_string(), 40.0);
        caster.proficiencies.insert("destructive".to_string(), 40.0);

        let mut target = Actor::new(10);
        target.attributes.insert(Attribute::Int, 5.0);
        target.attributes.insert(Attribute::Con, 10.0);
        target.attributes.insert(Attribute::Vit, 10.0);

        let mut rng = StdRng::seed_from_u64(1);
        let result = resolve_attack_with_rng(
            &catalog,
            &caster,
            &target,
            &CombatOptions::spell("ember"),
            &mut rng,
        )
        .unwrap();

        // base = 20 power * 15 INT * 1.4 prof = 420
        assert!((result.base_damage - 420.0).abs() < 1e-9);
        // defense 20: 420 - 20 = 400
        assert!((result.normal_path.damage_after_defense - 400.0).abs() < 1e-9);
        // INT ratio 5 / (5 + 15 + 1)
        let resist = 5.0 / 21.0;
        assert!((result.total_resist_pct - resist * 100.0).abs() < 1e-9);
        assert!(
            (result.normal_path.damage_after_resist - 400.0 * (1.0 - resist)).abs() < 1e-9
        );
        // evasion: (0.1 - 40 * 0.002) = 0.02; block 0.05 + 20 * 0.002 = 0.09
        assert!((result.evasion_chance - 0.02).abs() < 1e-9);
        assert!((result.block_chance - 0.09).abs() < 1e-9);

        let post_block = 400.0 * (1.0 - resist) * (1.0 - 0.09 * 0.5);
        assert!((result.damage - post_block).abs() < 1e-9);
        assert!((result.expected_damage - post_block * 0.98).abs() < 1e-9);
    }

    #[test]
    fn test_spell_always_reports_a_hit() {
        // Pinned behavior: the spell branch takes no hit roll; evasion only
        // discounts the expectation while full damage is still reported.
        let catalog = test_catalog();
        let mut caster = Actor::new(10);
        caster.attributes.insert(Attribute::Int, 15.0);
        caster.proficiencies.insert("fire".to_string(), 40.0);
        caster.proficiencies.insert("destructive".to_string(), 40.0);

        let mut target = Actor::new(30);
        target.attributes.insert(Attribute::Agi, 100.0);

        let mut rng = SeqRng::new(&[0.999]);
        let result = resolve_attack_with_rng(
            &catalog,
            &caster,
            &target,
            &CombatOptions::spell("ember"),
            &mut rng,
        )
        .unwrap();

        assert!(result.did_hit);
        assert!(result.evasion_chance > 0.5);
        assert!(result.damage > 0.0);
        assert!(result.expected_damage < result.damage);
        assert!(result.on_hit_results.is_empty());
        // No draw was consumed at all
        assert_eq!(rng.next, 0);
    }

    #[test]
    fn test_spell_element_resist_adds_to_int_ratio() {
        let catalog = test_catalog();
        let mut caster = Actor::new(10);
        caster.attributes.insert(Attribute::Int, 20.0);

        let mut target = Actor::new(10);
        target.resists.insert("Fire".to_string(), 50.0);

        let mut rng = StdRng::seed_from_u64(1);
        let result = resolve_attack_with_rng(
            &catalog,
            &caster,
            &target,
            &CombatOptions::spell("ember"),
            &mut rng,
        )
        .unwrap();

        // INT ratio 0 / 21 = 0, element 0.5
        assert!((result.total_resist_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_spell_resist_caps_at_eighty_percent() {
        let catalog = test_catalog();
        let caster = Actor::new(10);
        let mut target = Actor::new(10);
        target.attributes.insert(Attribute::Int, 1000.0);
        target.resists.insert("Fire".to_string(), 100.0);

        let mut rng = StdRng::seed_from_u64(1);
        let result = resolve_attack_with_rng(
            &catalog,
            &caster,
            &target,
            &CombatOptions::spell("ember"),
            &mut rng,
        )
        .unwrap();

        assert!((result.total_resist_pct - 80.0).abs() < 1e-9);
    }
}
