//! Fuel and data economy.
//!
//! Pure helpers over [`PlayerState`]. Rolls are seeded from the planet's
//! seed and a per-purpose salt (see [`crate::constants::salts`]) so the same
//! planet always yields the same amount for the same action.

use crate::constants::{gameplay, salts};
use crate::galaxy::{star_distance, Star};
use crate::planet_types::PlanetType;
use crate::rng::{hash_int, lerp, round_half_up, Mulberry32};
use crate::state::PlayerState;
use crate::system::Planet;
use crate::upgrades::UpgradeEffects;

pub fn upgrade_effects(state: &PlayerState) -> UpgradeEffects {
    state.effects()
}

pub fn max_fuel(state: &PlayerState) -> f64 {
    round_half_up(gameplay::BASE_MAX_FUEL * state.effects().max_fuel_mult)
}

/// Fuel needed to jump between two stars.
pub fn jump_fuel_cost(state: &PlayerState, from: &Star, to: &Star) -> u32 {
    let raw = star_distance(from, to) * gameplay::FUEL_PER_LY * state.effects().fuel_cost_mult;
    round_half_up(raw).max(0.0) as u32
}

pub fn can_jump(state: &PlayerState, from: &Star, to: &Star) -> bool {
    state.fuel >= jump_fuel_cost(state, from, to) as f64
}

/// Subtract fuel, never going below zero.
pub fn consume_fuel(state: &mut PlayerState, amount: f64) {
    state.fuel = (state.fuel - amount).max(0.0);
}

/// Add fuel, clamped to `[0, max_fuel]`. Negative amounts drain.
pub fn add_fuel(state: &mut PlayerState, amount: f64) {
    let cap = max_fuel(state);
    state.fuel = (state.fuel + amount).clamp(0.0, cap);
}

/// Add data scaled by the data-gain multiplier. Returns the amount credited.
pub fn add_data(state: &mut PlayerState, amount: i64) -> i64 {
    let scaled = round_half_up(amount as f64 * state.effects().data_gain_mult) as i64;
    state.data += scaled;
    scaled
}

/// Passive stellar fuel absorption for one tick of `dt` seconds.
pub fn update_solar_regen(state: &mut PlayerState, dt: f64) {
    let cap = max_fuel(state);
    if state.fuel >= cap || dt <= 0.0 {
        return;
    }
    let rate = state.effects().regen_rate;
    state.fuel = (state.fuel + rate * dt).min(cap);
}

pub fn fuel_fraction(state: &PlayerState) -> f64 {
    let cap = max_fuel(state);
    if cap <= 0.0 {
        0.0
    } else {
        state.fuel / cap
    }
}

pub fn is_low_fuel(state: &PlayerState) -> bool {
    state.fuel < gameplay::LOW_FUEL_THRESHOLD
}

/// Apply an already-resolved event outcome. `data` has been scaled during
/// resolution and is credited as is.
pub fn credit_event_outcome(state: &mut PlayerState, fuel: i64, data: i64) {
    add_fuel(state, fuel as f64);
    state.data = (state.data + data).max(0);
}

// ============================================================================
// PLANET ROLLS
// ============================================================================

fn roll_stream(planet: &Planet, salt: u32) -> Mulberry32 {
    Mulberry32::new(hash_int(planet.seed, salt))
}

pub fn fuel_range_for(kind: PlanetType) -> [f64; 2] {
    kind.info().fuel_yield
}

/// Fuel harvested by mining a planet, before the fuel-gain multiplier.
pub fn roll_planet_fuel(planet: &Planet) -> i64 {
    let [lo, hi] = fuel_range_for(planet.kind);
    let mut rng = roll_stream(planet, salts::FUEL);
    round_half_up(lerp(lo, hi, rng.next_f64())) as i64
}

/// Data earned by scanning, before the data-gain multiplier.
pub fn roll_scan_data(planet: &Planet) -> i64 {
    let [lo, hi] = gameplay::SCAN_DATA_REWARD;
    let mut rng = roll_stream(planet, salts::SCAN);
    round_half_up(lerp(lo, hi, rng.next_f64())) as i64
}

/// Data from ore assays while mining. Metal-rich worlds yield more; never
/// less than 1.
pub fn roll_mining_yield(planet: &Planet) -> i64 {
    let [lo, hi] = gameplay::MINING_YIELD;
    let mut rng = roll_stream(planet, salts::MINING);
    let base = lerp(lo, hi, rng.next_f64());
    let scale = 0.5 + planet.metal_richness as f64 / 100.0;
    (round_half_up(base * scale) as i64).max(1)
}

pub fn roll_explore_data(planet: &Planet) -> i64 {
    let [lo, hi] = gameplay::EXPLORE_DATA_REWARD;
    let mut rng = roll_stream(planet, salts::EXPLORE);
    round_half_up(lerp(lo, hi, rng.next_f64())) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::generate_galaxy;
    use crate::state::create_state;
    use crate::system::generate_planets;
    use glam::DVec3;

    fn two_stars(distance: f64) -> (Star, Star) {
        let galaxy = generate_galaxy(42);
        let mut a = galaxy.stars[0].clone();
        let mut b = galaxy.stars[1].clone();
        a.position = DVec3::ZERO;
        b.position = DVec3::new(distance, 0.0, 0.0);
        (a, b)
    }

    fn some_planet() -> Planet {
        let galaxy = generate_galaxy(42);
        galaxy
            .stars
            .iter()
            .find(|s| s.planet_count > 0)
            .map(|s| generate_planets(s).remove(0))
            .unwrap()
    }

    #[test]
    fn test_jump_cost_ten_ly() {
        let (a, b) = two_stars(10.0);
        let mut state = create_state(42);
        let base = jump_fuel_cost(&state, &a, &b);
        assert_eq!(base, 5);
        state.upgrades.engines = 1;
        assert!(jump_fuel_cost(&state, &a, &b) < base);
    }

    #[test]
    fn test_can_jump_guard() {
        let (a, b) = two_stars(40.0);
        let mut state = create_state(42);
        state.fuel = 19.0;
        assert!(!can_jump(&state, &a, &b));
        state.fuel = 20.0;
        assert!(can_jump(&state, &a, &b));
    }

    #[test]
    fn test_fuel_stays_in_bounds() {
        let mut state = create_state(42);
        consume_fuel(&mut state, 500.0);
        assert_eq!(state.fuel, 0.0);
        add_fuel(&mut state, 1_000.0);
        assert_eq!(state.fuel, max_fuel(&state));
        add_fuel(&mut state, -1_000.0);
        assert_eq!(state.fuel, 0.0);
    }

    #[test]
    fn test_tank_expansion_raises_cap() {
        let mut state = create_state(42);
        assert_eq!(max_fuel(&state), 100.0);
        state.upgrades.fuel_systems = 1;
        assert_eq!(max_fuel(&state), 150.0);
        add_fuel(&mut state, 200.0);
        assert_eq!(state.fuel, 150.0);
    }

    #[test]
    fn test_data_gain_scaling() {
        let mut state = create_state(42);
        assert_eq!(add_data(&mut state, 10), 10);
        state.upgrades.comms = 2;
        assert_eq!(add_data(&mut state, 10), 13);
        assert_eq!(state.data, 23);
    }

    #[test]
    fn test_solar_regen_capped() {
        let mut state = create_state(42);
        state.fuel = 50.0;
        update_solar_regen(&mut state, 10.0);
        assert!((state.fuel - 51.5).abs() < 1e-9);
        state.upgrades.fuel_systems = 3;
        update_solar_regen(&mut state, 10.0);
        assert!((state.fuel - 56.5).abs() < 1e-9);
        update_solar_regen(&mut state, 10_000.0);
        assert_eq!(state.fuel, max_fuel(&state));
    }

    #[test]
    fn test_rolls_deterministic_and_in_range() {
        let planet = some_planet();
        assert_eq!(roll_planet_fuel(&planet), roll_planet_fuel(&planet));
        let [lo, hi] = fuel_range_for(planet.kind);
        let fuel = roll_planet_fuel(&planet) as f64;
        assert!(fuel >= lo && fuel <= hi);
        let scan = roll_scan_data(&planet);
        assert!((3..=8).contains(&scan));
        let explore = roll_explore_data(&planet);
        assert!((3..=6).contains(&explore));
        assert!(roll_mining_yield(&planet) >= 1);
    }

    #[test]
    fn test_low_fuel_flag() {
        let mut state = create_state(42);
        assert!(!is_low_fuel(&state));
        state.fuel = 10.0;
        assert!(is_low_fuel(&state));
        assert!((fuel_fraction(&state) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_credit_event_outcome_unscaled() {
        let mut state = create_state(42);
        state.upgrades.comms = 2;
        state.fuel = 50.0;
        credit_event_outcome(&mut state, -5, 13);
        assert_eq!(state.fuel, 45.0);
        assert_eq!(state.data, 13);
    }
}
