//! Planet encounter events: selection and resolution.
//!
//! Each planet has at most one event. Whether it exists and which template it
//! uses depend only on the planet seed, so the same planet always offers the
//! same encounter until it is resolved.
//!
//! # Selection draw order
//!
//! Stream `Mulberry32::new(hash_int(planet.seed, salts::EVENT))`:
//!
//! 1. occurrence roll (no event when above `EVENT_CHANCE`)
//! 2. index into the rarity-weighted pool of eligible templates
//!
//! # Resolution draw order
//!
//! Stream `Mulberry32::new(hash_int(planet.seed, choice * 1000 + salts::EVENT_RESOLVE))`:
//!
//! 1. success roll
//! 2. fuel interpolation
//! 3. data interpolation

use crate::constants::{gameplay, salts};
use crate::event_catalog::TEMPLATES;
use crate::galaxy::Star;
use crate::planet_types::PlanetType;
use crate::rng::{hash_int, lerp, round_half_up, Mulberry32};
use crate::state::{PlanetKey, PlayerState, ResolvedEvent};
use crate::system::Planet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Safe,
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
            Self::Extreme => "Extreme Risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    /// Copies of a template placed in the selection pool.
    pub fn weight(self) -> usize {
        match self {
            Self::Common => 6,
            Self::Uncommon => 3,
            Self::Rare => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Universal,
    Only(&'static [PlanetType]),
}

impl Applicability {
    pub fn matches(self, kind: PlanetType) -> bool {
        match self {
            Self::Universal => true,
            Self::Only(kinds) => kinds.contains(&kind),
        }
    }
}

/// Inclusive ranges an outcome's deltas are interpolated from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome {
    pub fuel: [i32; 2],
    pub data: [i32; 2],
    pub lore: Option<&'static str>,
}

impl Outcome {
    pub const fn new(fuel: [i32; 2], data: [i32; 2], lore: Option<&'static str>) -> Self {
        Self { fuel, data, lore }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub label: &'static str,
    pub risk: RiskTier,
    pub success_rate: f64,
    pub success: Outcome,
    /// Falls back to `success` ranges when absent.
    pub failure: Option<Outcome>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub applies_to: Applicability,
    pub rarity: Rarity,
    pub choices: &'static [Choice],
}

/// Templates that never get the diplomatic option.
const NO_DIPLOMACY: &[&str] = &["mineral_vein"];

pub const DIPLOMATIC_CHOICE: Choice = Choice {
    label: "Diplomatic approach",
    risk: RiskTier::Low,
    success_rate: 0.80,
    success: Outcome::new(
        [3, 8],
        [8, 16],
        Some("A measured diplomatic approach yields cooperative results."),
    ),
    failure: None,
};

/// An event as presented for one planet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInstance {
    pub template_id: &'static str,
    pub title: &'static str,
    pub description: String,
    pub choices: Vec<Choice>,
    pub planet_key: PlanetKey,
    pub planet_seed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventResult {
    pub success: bool,
    pub fuel: i64,
    /// Already scaled by the data-gain multiplier.
    pub data: i64,
    pub lore: Option<&'static str>,
}

impl EventResult {
    pub fn neutral() -> Self {
        Self {
            success: false,
            fuel: 0,
            data: 0,
            lore: None,
        }
    }
}

// ============================================================================
// SELECTION
// ============================================================================

fn fill_placeholders(text: &str, planet: &Planet, star: &Star) -> String {
    text.replace("{planetName}", &planet.name)
        .replace("{planetType}", planet.label())
        .replace("{starName}", &star.name)
        .replace("{starClass}", star.spectral_class.letter())
}

/// The event waiting on `planet`, or `None` if it has none or it was
/// already resolved.
pub fn generate_planet_event(planet: &Planet, star: &Star, state: &PlayerState) -> Option<EventInstance> {
    let key = PlanetKey::new(star.id, planet.id);
    if state.is_event_resolved(key) {
        return None;
    }

    let mut rng = Mulberry32::new(hash_int(planet.seed, salts::EVENT));
    if rng.next_f64() > gameplay::EVENT_CHANCE {
        return None;
    }

    let pool: Vec<&EventTemplate> = TEMPLATES
        .iter()
        .filter(|t| t.applies_to.matches(planet.kind))
        .flat_map(|t| std::iter::repeat(t).take(t.rarity.weight()))
        .collect();
    let template = *rng.pick(&pool)?;

    let mut choices = template.choices.to_vec();
    if state.effects().diplomacy && !NO_DIPLOMACY.contains(&template.id) {
        choices.push(DIPLOMATIC_CHOICE);
    }

    Some(EventInstance {
        template_id: template.id,
        title: template.title,
        description: fill_placeholders(template.description, planet, star),
        choices,
        planet_key: key,
        planet_seed: planet.seed,
    })
}

/// True if `planet` holds an unresolved event. Same rolls as
/// [`generate_planet_event`] without building the instance.
pub fn has_pending_event(planet: &Planet, star: &Star, state: &PlayerState) -> bool {
    if state.is_event_resolved(PlanetKey::new(star.id, planet.id)) {
        return false;
    }
    let mut rng = Mulberry32::new(hash_int(planet.seed, salts::EVENT));
    rng.next_f64() <= gameplay::EVENT_CHANCE
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Success probability after the sensor bonus. Choices that are certain
/// stay certain; everything else is capped below 1.
pub fn effective_success_rate(choice: &Choice, bonus: f64) -> f64 {
    if choice.success_rate >= 1.0 {
        1.0
    } else {
        (choice.success_rate + bonus).min(gameplay::MAX_SUCCESS_RATE)
    }
}

fn roll_range(rng: &mut Mulberry32, range: [i32; 2]) -> i64 {
    round_half_up(lerp(range[0] as f64, range[1] as f64, rng.next_f64())) as i64
}

/// Roll the outcome of `choice_index`. Does not touch `state`; call
/// [`record_resolution`] and credit the result to make it permanent.
///
/// An out-of-range index yields [`EventResult::neutral`].
pub fn resolve_choice(event: &EventInstance, choice_index: usize, state: &PlayerState) -> EventResult {
    let Some(choice) = event.choices.get(choice_index) else {
        return EventResult::neutral();
    };

    let salt = (choice_index as u32)
        .wrapping_mul(1000)
        .wrapping_add(salts::EVENT_RESOLVE);
    let mut rng = Mulberry32::new(hash_int(event.planet_seed, salt));
    let effects = state.effects();

    let rate = effective_success_rate(choice, effects.success_rate_bonus);
    let success = rng.next_f64() < rate;
    let outcome = if success {
        choice.success
    } else {
        choice.failure.unwrap_or(choice.success)
    };

    let fuel = roll_range(&mut rng, outcome.fuel);
    let data_raw = roll_range(&mut rng, outcome.data);
    let data = round_half_up(data_raw as f64 * effects.data_gain_mult) as i64;

    EventResult {
        success,
        fuel,
        data,
        lore: outcome.lore,
    }
}

/// Mark the event as resolved so it is never offered again.
pub fn record_resolution(state: &mut PlayerState, event: &EventInstance, choice_index: usize, result: &EventResult) {
    state.resolved_events.insert(
        event.planet_key,
        ResolvedEvent {
            template_id: Some(event.template_id.to_string()),
            choice: Some(choice_index),
            success: result.success,
            fuel: result.fuel,
            data: result.data,
        },
    );
}
