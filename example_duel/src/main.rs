//! Example Duel - a seeded exchange-by-exchange fight on the command line
//!
//! This demo shows:
//! - Building actors and weapon stats by hand
//! - Resolving weapon and spell attacks against the built-in catalog
//! - Replayable outcomes through a seeded RNG

use combat_core::{
    default_catalog, resolve_attack_with_rng, Actor, Attribute, CombatOptions, DamageMix,
    OnHitConfig, ScalesWith, SkillCatalog, WeaponCombatStats,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn knight() -> Actor {
    let mut actor = Actor::new(12);
    actor.attributes.insert(Attribute::Str, 18.0);
    actor.attributes.insert(Attribute::Dex, 13.0);
    actor.attributes.insert(Attribute::Con, 14.0);
    actor.attributes.insert(Attribute::Vit, 12.0);
    actor.attributes.insert(Attribute::Agi, 9.0);
    actor.proficiencies.insert("sword".to_string(), 45.0);
    actor.proficiencies.insert("block".to_string(), 30.0);
    actor
}

fn pyromancer() -> Actor {
    let mut actor = Actor::new(11);
    actor.attributes.insert(Attribute::Int, 19.0);
    actor.attributes.insert(Attribute::Wis, 15.0);
    actor.attributes.insert(Attribute::Agi, 12.0);
    actor.attributes.insert(Attribute::Con, 8.0);
    actor.attributes.insert(Attribute::Vit, 8.0);
    actor.proficiencies.insert("fire".to_string(), 40.0);
    actor.proficiencies.insert("destructive".to_string(), 35.0);
    actor.proficiencies.insert("evasion".to_string(), 20.0);
    actor.proficiencies.insert("dancing".to_string(), 15.0);
    actor.resists.insert("SLASH".to_string(), 10.0);
    actor
}

fn arming_sword() -> WeaponCombatStats {
    let mut stats = WeaponCombatStats {
        ap: Some(0.2),
        dmg_mix: Some(DamageMix {
            blunt: 0.1,
            slash: 0.7,
            pierce: 0.2,
        }),
        crit_chance_pct: Some(9.0),
        crit_mult: Some(1.55),
        ..Default::default()
    };
    stats.on_hit.insert(
        "bleed".to_string(),
        OnHitConfig {
            chance_pct: 12.0,
            power: Some(0.15),
            scales_with: Some(ScalesWith::FinalDamage),
            ..Default::default()
        },
    );
    stats
}

fn run_weapon_round(
    catalog: &SkillCatalog,
    attacker: &Actor,
    defender: &Actor,
    attack_id: &str,
    rng: &mut ChaCha8Rng,
) {
    let mut opts = CombatOptions::weapon(attack_id);
    opts.weapon_stats = Some(arming_sword());

    match resolve_attack_with_rng(catalog, attacker, defender, &opts, rng) {
        Ok(result) => {
            let name = catalog
                .get(opts.attack_kind, attack_id)
                .map(|s| s.name.as_str())
                .unwrap_or(attack_id);
            println!(
                "  Knight uses {:<14} -> {} (expected {:.1})",
                name,
                result.summary(),
                result.expected_damage
            );
        }
        Err(err) => println!("  Knight fumbles: {}", err),
    }
}

fn run_spell_round(
    catalog: &SkillCatalog,
    attacker: &Actor,
    defender: &Actor,
    attack_id: &str,
    rng: &mut ChaCha8Rng,
) {
    let opts = CombatOptions::spell(attack_id);

    match resolve_attack_with_rng(catalog, attacker, defender, &opts, rng) {
        Ok(result) => {
            let name = catalog
                .get(opts.attack_kind, attack_id)
                .map(|s| s.name.as_str())
                .unwrap_or(attack_id);
            println!(
                "  Pyromancer casts {:<12} -> {} ({:.0}% would land)",
                name,
                result.summary(),
                result.hit_chance * 100.0
            );
        }
        Err(err) => println!("  Pyromancer fizzles: {}", err),
    }
}

fn main() {
    let catalog = default_catalog();
    let knight = knight();
    let pyromancer = pyromancer();
    let mut rng = ChaCha8Rng::seed_from_u64(0xD0E1);

    println!("=== Knight vs Pyromancer (seeded duel) ===");
    let weapon_line = ["Sword:ST:1", "Sword:ST:2", "Sword:ST:3"];
    let spell_line = ["Fire:DES:1", "Fire:DES:2", "Fire:DES:3"];

    for round in 0..3 {
        println!("Round {}:", round + 1);
        run_weapon_round(&catalog, &knight, &pyromancer, weapon_line[round], &mut rng);
        run_spell_round(&catalog, &pyromancer, &knight, spell_line[round], &mut rng);
    }
}
