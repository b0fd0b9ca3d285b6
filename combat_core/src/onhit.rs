//! On-hit effects - secondary rolls made after a successful weapon hit
//!
//! Each configured effect rolls once against its own trigger chance;
//! effects are independent and any number may trigger on the same hit.
//! Recognized effect names carry built-in defaults (stack caps, tick
//! rates, cooldowns) that caller-supplied configs are merged over.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What an effect's magnitude scales with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalesWith {
    /// Magnitude = power x applied damage
    #[serde(rename = "finalDamage")]
    FinalDamage,
}

/// Per-effect configuration carried on a weapon
///
/// All fields are optional so sparse armory data parses directly; unset
/// fields fall back to the glossary defaults for recognized names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnHitConfig {
    /// Trigger chance percentage (0 never, >=100 always)
    #[serde(default)]
    pub chance_pct: f64,
    /// Flat power, or the damage coefficient when scaling with final damage
    #[serde(default)]
    pub power: Option<f64>,
    /// Power as a percentage of applied damage
    #[serde(default)]
    pub power_pct: Option<f64>,
    /// Effect duration in seconds
    #[serde(default)]
    pub duration_sec: Option<f64>,
    /// Maximum concurrent stacks
    #[serde(default)]
    pub stacks_max: Option<u32>,
    /// Re-trigger cooldown in seconds
    #[serde(default)]
    pub cd_sec: Option<f64>,
    /// Tick interval for periodic effects
    #[serde(default)]
    pub tick_sec: Option<f64>,
    /// Which quantity the magnitude scales with
    #[serde(default)]
    pub scales_with: Option<ScalesWith>,
    /// Short glossary description
    #[serde(default)]
    pub description: Option<String>,
    /// Categorization tags (e.g. `dot`, `disable`)
    #[serde(default)]
    pub tags: Vec<String>,
}

impl OnHitConfig {
    /// Fill unset fields from `defaults`; the trigger chance always comes
    /// from `self`
    pub fn merged_over(&self, defaults: &OnHitConfig) -> OnHitConfig {
        OnHitConfig {
            chance_pct: self.chance_pct,
            power: self.power.or(defaults.power),
            power_pct: self.power_pct.or(defaults.power_pct),
            duration_sec: self.duration_sec.or(defaults.duration_sec),
            stacks_max: self.stacks_max.or(defaults.stacks_max),
            cd_sec: self.cd_sec.or(defaults.cd_sec),
            tick_sec: self.tick_sec.or(defaults.tick_sec),
            scales_with: self.scales_with.or(defaults.scales_with),
            description: self.description.clone().or_else(|| defaults.description.clone()),
            tags: if self.tags.is_empty() {
                defaults.tags.clone()
            } else {
                self.tags.clone()
            },
        }
    }
}

/// One rolled on-hit effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnHitResult {
    /// Canonical effect name
    pub effect: String,
    /// Whether the roll succeeded
    pub triggered: bool,
    /// Trigger chance as a fraction
    pub chance: f64,
    /// The random draw compared against the chance
    pub roll: f64,
    /// The merged config the roll was made with
    pub config: OnHitConfig,
    /// Scaled magnitude, present only when triggered and a power rule applies
    pub scaled_power: Option<f64>,
}

/// Canonical, lowercased name for an effect, resolving glossary aliases
pub fn canonical_name(effect: &str) -> String {
    let name = effect.trim().to_lowercase();
    match name.as_str() {
        "hemorrhage" => "bleed".to_string(),
        _ => name,
    }
}

/// Built-in default config for a recognized effect, `None` for open names
pub fn default_config(effect: &str) -> Option<OnHitConfig> {
    let config = match effect {
        "bleed" => OnHitConfig {
            stacks_max: Some(5),
            tick_sec: Some(2.0),
            scales_with: Some(ScalesWith::FinalDamage),
            description: Some("Stacking damage over time from an open wound".to_string()),
            tags: vec!["dot".to_string()],
            ..Default::default()
        },
        "sunder" => OnHitConfig {
            stacks_max: Some(5),
            duration_sec: Some(12.0),
            description: Some("Stacking armor break reducing defense per stack".to_string()),
            tags: vec!["debuff".to_string()],
            ..Default::default()
        },
        "disarm" => OnHitConfig {
            duration_sec: Some(4.0),
            cd_sec: Some(8.0),
            description: Some("Short attack penalty or off-hand disable".to_string()),
            tags: vec!["disable".to_string()],
            ..Default::default()
        },
        "sever" => OnHitConfig {
            cd_sec: Some(14.0),
            description: Some("Heavy bleed with limb impairment".to_string()),
            tags: vec!["dot".to_string(), "disable".to_string()],
            ..Default::default()
        },
        "daze" => OnHitConfig {
            duration_sec: Some(2.0),
            description: Some("Brief disorientation from a concussive blow".to_string()),
            tags: vec!["disable".to_string()],
            ..Default::default()
        },
        "rend" => OnHitConfig {
            duration_sec: Some(8.0),
            tick_sec: Some(2.0),
            description: Some("Torn defenses bleeding a share of the hit over time".to_string()),
            tags: vec!["dot".to_string()],
            ..Default::default()
        },
        "entangle" => OnHitConfig {
            duration_sec: Some(5.0),
            description: Some("Movement pinned by chain or line".to_string()),
            tags: vec!["disable".to_string()],
            ..Default::default()
        },
        _ => return None,
    };
    Some(config)
}

/// Roll every configured effect against its trigger chance
///
/// `applied_damage` is the scaling basis for effects whose config scales
/// with final damage. One draw is consumed per configured effect, in
/// map-key order.
pub fn resolve_on_hit(
    applied_damage: f64,
    on_hit: &BTreeMap<String, OnHitConfig>,
    rng: &mut impl Rng,
) -> Vec<OnHitResult> {
    let mut results = Vec::with_capacity(on_hit.len());

    for (name, raw) in on_hit {
        let effect = canonical_name(name);
        let merged = match default_config(&effect) {
            Some(defaults) => raw.merged_over(&defaults),
            None => raw.clone(),
        };

        let chance = merged.chance_pct / 100.0;
        let roll = rng.gen::<f64>();
        let triggered = roll < chance;

        let scaled_power = if triggered {
            scaled_magnitude(&merged, applied_damage)
        } else {
            None
        };

        results.push(OnHitResult {
            effect,
            triggered,
            chance,
            roll,
            config: merged,
            scaled_power,
        });
    }

    results
}

/// Magnitude rule: finalDamage scaling first, then power_pct, then flat power
fn scaled_magnitude(config: &OnHitConfig, applied_damage: f64) -> Option<f64> {
    if config.scales_with == Some(ScalesWith::FinalDamage) {
        return Some(config.power.unwrap_or(1.0) * applied_damage);
    }
    if let Some(power_pct) = config.power_pct {
        return Some(power_pct / 100.0 * applied_damage);
    }
    config.power
}
