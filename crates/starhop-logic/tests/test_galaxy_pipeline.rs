//! Integration tests for the generation pipeline.
//!
//! Exercises: seed → Galaxy → per-star planets, belt and comets → events.
//!
//! Golden values pin the draw order; if one of them changes, every saved
//! galaxy changes with it.

use starhop_logic::events::{generate_planet_event, resolve_choice};
use starhop_logic::galaxy::{generate_galaxy, star_distance, Galaxy};
use starhop_logic::names::star_name;
use starhop_logic::planet_types::PlanetType;
use starhop_logic::rng::{hash_int, Mulberry32};
use starhop_logic::state::create_state;
use starhop_logic::stellar::SpectralClass;
use starhop_logic::system::{generate_asteroid_belt, generate_comets, generate_planets};

// ── Helpers ────────────────────────────────────────────────────────────

const SEEDS: [u32; 5] = [1, 7, 42, 1234, 99_999];

fn galaxies() -> Vec<Galaxy> {
    SEEDS.iter().map(|&s| generate_galaxy(s)).collect()
}

// ── Golden values ──────────────────────────────────────────────────────

#[test]
fn prng_golden_sequence() {
    let mut rng = Mulberry32::new(42);
    assert_eq!(rng.next_word(), 2_581_720_956);
    assert_eq!(rng.next_word(), 1_925_393_290);
    assert_eq!(hash_int(42, 0), 301_225_621);
}

#[test]
fn first_placed_star_keeps_its_seed_and_name() {
    let galaxy = generate_galaxy(42);
    let seed = hash_int(42, 0);
    let star = galaxy
        .stars
        .iter()
        .find(|s| s.seed == seed)
        .expect("first placement always succeeds");
    assert_eq!(star.name, star_name(seed));
    assert_eq!(star.name, "Tauor");
}

#[test]
fn home_star_golden() {
    let galaxy = generate_galaxy(42);
    assert_eq!(galaxy.stars.len(), 100);
    let home = galaxy.home().unwrap();
    assert_eq!(home.name, "Pola");
    assert_eq!(home.seed, 3_570_802_828);
    assert!((home.position.x - -4.875_987_280_407_04).abs() < 1e-9);
    assert!((home.position.y - 3.897_482_213_649_041).abs() < 1e-9);
    assert!((home.position.z - 0.905_340_048_128_027_3).abs() < 1e-9);
    assert_eq!(home.spectral_class, SpectralClass::M);
    assert_eq!(home.planet_count, 2);
    assert_eq!(home.adjacent_ids, vec![20, 22, 44, 60, 67, 99]);
}

#[test]
fn home_planets_golden() {
    let galaxy = generate_galaxy(42);
    let planets = generate_planets(&galaxy.stars[0]);
    assert_eq!(planets.len(), 2);

    let first = &planets[0];
    assert_eq!(first.kind, PlanetType::Water);
    assert_eq!(first.size, 5);
    assert_eq!(first.habitability, 7);
    assert_eq!(first.seed, 606_346_981);
    assert!((first.orbit_radius - 15.224_114_320_660_01).abs() < 1e-9);

    assert_eq!(planets[1].kind, PlanetType::Ice);
    assert!((planets[1].orbit_radius - 21.870_142_632_047_774).abs() < 1e-9);
}

#[test]
fn home_event_golden() {
    let galaxy = generate_galaxy(42);
    let home = &galaxy.stars[0];
    let planets = generate_planets(home);
    let state = create_state(42);

    let event = generate_planet_event(&planets[0], home, &state).expect("first home planet has an event");
    assert_eq!(event.template_id, "temporal_echo");
    assert_eq!(event.choices.len(), 2);
    let bold = resolve_choice(&event, 0, &state);
    assert!(bold.success);
    assert_eq!((bold.fuel, bold.data), (0, 45));
    let safe = resolve_choice(&event, 1, &state);
    assert!(safe.success);
    assert_eq!((safe.fuel, safe.data), (0, 5));

    let second = generate_planet_event(&planets[1], home, &state).map(|e| e.template_id);
    assert_eq!(second, Some("smuggler_stash"));
}

// ── Galaxy invariants ──────────────────────────────────────────────────

#[test]
fn galaxy_is_deterministic() {
    for &seed in &SEEDS {
        assert_eq!(generate_galaxy(seed), generate_galaxy(seed));
    }
}

#[test]
fn graph_connected_and_symmetric() {
    for galaxy in galaxies() {
        assert!(galaxy.is_connected(), "seed {}", galaxy.seed);
        for star in &galaxy.stars {
            assert!(!star.adjacent_ids.is_empty());
            assert!(!star.adjacent_ids.contains(&star.id));
            for &n in &star.adjacent_ids {
                assert!(galaxy.stars[n as usize].adjacent_ids.contains(&star.id));
            }
        }
    }
}

#[test]
fn home_star_is_closest_and_ordinary() {
    for galaxy in galaxies() {
        let home = galaxy.home().unwrap();
        assert_eq!(home.id, 0);
        assert!(home.remnant.is_none());
        let home_r = home.position.length();
        for star in &galaxy.stars {
            assert!(star.position.length() >= home_r);
        }
    }
}

#[test]
fn distances_are_euclidean() {
    let galaxy = generate_galaxy(42);
    let a = &galaxy.stars[0];
    let b = &galaxy.stars[1];
    let expected = (a.position - b.position).length();
    assert_eq!(star_distance(a, b), expected);
    assert_eq!(star_distance(a, a), 0.0);
}

// ── System content ─────────────────────────────────────────────────────

#[test]
fn systems_regenerate_identically() {
    let galaxy = generate_galaxy(7);
    for star in &galaxy.stars {
        let planets = generate_planets(star);
        assert_eq!(planets, generate_planets(star));
        assert_eq!(planets.len(), star.planet_count as usize);
        assert_eq!(
            generate_asteroid_belt(star, &planets),
            generate_asteroid_belt(star, &planets)
        );
        assert_eq!(generate_comets(star), generate_comets(star));
    }
}

#[test]
fn orbits_strictly_monotonic() {
    for galaxy in galaxies() {
        for star in &galaxy.stars {
            let planets = generate_planets(star);
            for pair in planets.windows(2) {
                assert!(pair[1].orbit_radius > pair[0].orbit_radius);
                assert!(pair[1].orbit_speed < pair[0].orbit_speed);
            }
        }
    }
}

#[test]
fn precomputed_flags_match_content() {
    let galaxy = generate_galaxy(1234);
    for star in &galaxy.stars {
        let planets = generate_planets(star);
        assert_eq!(star.has_belt, generate_asteroid_belt(star, &planets).is_some());
        assert_eq!(star.has_comets, !generate_comets(star).is_empty());
    }
}

#[test]
fn belts_sit_between_orbits() {
    let galaxy = generate_galaxy(42);
    let mut seen = 0;
    for star in &galaxy.stars {
        let planets = generate_planets(star);
        if let Some(belt) = generate_asteroid_belt(star, &planets) {
            seen += 1;
            assert!(belt.inner_radius < belt.outer_radius);
            assert!(!planets
                .iter()
                .any(|p| p.orbit_radius > belt.inner_radius && p.orbit_radius < belt.outer_radius));
        }
    }
    assert!(seen > 0);
}

// ── Events over generated content ──────────────────────────────────────

#[test]
fn events_are_stable_per_planet() {
    let galaxy = generate_galaxy(42);
    let state = create_state(42);
    let mut count = 0;
    for star in galaxy.stars.iter().take(20) {
        for planet in generate_planets(star) {
            let a = generate_planet_event(&planet, star, &state);
            let b = generate_planet_event(&planet, star, &state);
            assert_eq!(a, b);
            if a.is_some() {
                count += 1;
            }
        }
    }
    assert!(count > 0);
}
