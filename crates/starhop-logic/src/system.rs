//! Per-star system content: planets with moons, the asteroid belt and comets.
//!
//! Nothing here is persisted. Every function derives its output from the
//! star alone, so a system can be regenerated identically at any time.
//!
//! # Planet draw order
//!
//! One stream, `Mulberry32::new(star.seed)`, shared by all planets in index
//! order. For each planet:
//!
//! 1. type roll
//! 2. size, habitability, metal richness, atmosphere
//! 3. ring roll (only for types with a non-zero ring chance)
//! 4. special roll, then a special pick when it hits
//! 5. spin rate, visual size
//! 6. moon roll; on a hit: moon count, then orbit radius, speed, phase and
//!    size for each moon
//! 7. orbit spacing jitter, orbit speed jitter, orbit phase
//!
//! The belt and comets each use their own stream derived from the star seed.

use crate::constants::{asteroid_belt, comets as comet_cfg, moons as moon_cfg, planets as cfg, salts};
use crate::galaxy::Star;
use crate::names;
use crate::planet_types::{pick_planet_type, Atmosphere, PlanetType};
use crate::rng::{hash_int, lerp, Mulberry32};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moon {
    pub id: u32,
    /// Distance from the planet center.
    pub orbit_radius: f64,
    pub orbit_speed: f64,
    pub orbit_phase: f64,
    pub size: f64,
    pub seed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    /// Ordinal within the star.
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlanetType,
    pub size: u32,
    /// 0-100.
    pub habitability: u32,
    /// 0-100.
    pub metal_richness: u32,
    pub atmosphere: Atmosphere,
    pub has_rings: bool,
    pub special: Option<String>,
    pub seed: u32,
    pub orbit_radius: f64,
    /// Radians per second.
    pub orbit_speed: f64,
    pub orbit_phase: f64,
    pub spin_rate: f64,
    pub visual_size: f64,
    pub moons: Vec<Moon>,
}

impl Planet {
    pub fn label(&self) -> &'static str {
        self.kind.info().label
    }

    /// Orbit angle at `time` seconds.
    pub fn angle_at(&self, time: f64) -> f64 {
        self.orbit_phase + self.orbit_speed * time
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsteroidBelt {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub seed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comet {
    pub id: u32,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    /// Tilt of the orbit plane, radians.
    pub inclination: f64,
    /// Longitude of the ascending node, radians.
    pub node_angle: f64,
    /// Mean anomaly at time zero.
    pub phase: f64,
    pub seed: u32,
}

impl Comet {
    pub fn perihelion(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn aphelion(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}

// ============================================================================
// PLANETS
// ============================================================================

pub fn generate_planets(star: &Star) -> Vec<Planet> {
    let mut rng = Mulberry32::new(star.seed);
    let count = star.planet_count as usize;
    let star_scale = star.spectral_class.info().star_scale;
    let mut planets: Vec<Planet> = Vec::with_capacity(count);
    let mut radius = cfg::STAR_CLEARANCE * star_scale + cfg::ORBIT_BASE;
    let mut prev_speed = f64::INFINITY;

    for i in 0..count {
        let inner = (i as f64) < count as f64 * cfg::INNER_FRACTION;
        let kind = pick_planet_type(star.spectral_class, inner, rng.next_f64());
        let info = kind.info();

        let size = rng.range_int(info.size[0], info.size[1]);
        let habitability = lerp(info.habitability[0], info.habitability[1], rng.next_f64()).floor() as u32;
        let metal_richness = lerp(info.metal[0], info.metal[1], rng.next_f64()).floor() as u32;
        let atmosphere = info.atmospheres[rng.index(info.atmospheres.len())];
        let has_rings = info.ring_chance > 0.0 && rng.chance(info.ring_chance);
        let special = if rng.chance(cfg::SPECIAL_CHANCE) {
            rng.pick(names::SPECIALS).map(|s| (*s).to_string())
        } else {
            None
        };
        let seed = hash_int(
            star.seed,
            (i as u32)
                .wrapping_mul(cfg::PLANET_SEED_STRIDE)
                .wrapping_add(cfg::PLANET_SEED_SALT),
        );

        let spin_rate = match kind {
            PlanetType::GasGiant => rng.range_f64(1.2, 1.8),
            _ => rng.range_f64(0.7, 1.3),
        };
        let visual_size = match kind {
            PlanetType::GasGiant => rng.range_f64(0.8, 1.3),
            PlanetType::Water => rng.range_f64(0.55, 0.95),
            _ => rng.range_f64(0.35, 0.7),
        };

        let moons = generate_moons(&mut rng, kind, seed, visual_size);

        // Spacing grows with index so gaps widen outward.
        let spacing = (cfg::SPACING_MIN + rng.next_f64() * cfg::SPACING_JITTER)
            * ((i + 1) as f64).powf(cfg::SPACING_GROWTH);
        radius += spacing;
        let raw_speed = (cfg::SPEED_MIN + rng.next_f64() * cfg::SPEED_JITTER)
            / ((i + 1) as f64).powf(cfg::SPEED_FALLOFF);
        let orbit_speed = raw_speed.min(prev_speed * cfg::SPEED_STEP_CAP);
        prev_speed = orbit_speed;
        let orbit_phase = rng.next_f64() * TAU;

        planets.push(Planet {
            id: i as u32,
            name: names::planet_name(&star.name, i),
            kind,
            size,
            habitability,
            metal_richness,
            atmosphere,
            has_rings,
            special,
            seed,
            orbit_radius: radius,
            orbit_speed,
            orbit_phase,
            spin_rate,
            visual_size,
            moons,
        });
    }
    planets
}

fn generate_moons(rng: &mut Mulberry32, kind: PlanetType, planet_seed: u32, visual_size: f64) -> Vec<Moon> {
    let info = kind.info();
    if !rng.chance(info.moon_chance) || info.max_moons == 0 {
        return Vec::new();
    }
    let count = rng.range_int(1, info.max_moons);
    (0..count)
        .map(|m| Moon {
            id: m,
            orbit_radius: visual_size * rng.range_f64(moon_cfg::ORBIT_MIN, moon_cfg::ORBIT_MAX),
            orbit_speed: rng.range_f64(moon_cfg::SPEED_MIN, moon_cfg::SPEED_MAX),
            orbit_phase: rng.next_f64() * TAU,
            size: rng.range_f64(moon_cfg::SIZE_MIN, moon_cfg::SIZE_MAX),
            seed: hash_int(
                planet_seed,
                m.wrapping_mul(moon_cfg::SEED_STRIDE)
                    .wrapping_add(moon_cfg::SEED_SALT),
            ),
        })
        .collect()
}

// ============================================================================
// ASTEROID BELT
// ============================================================================

/// Place a belt in the widest gap between consecutive orbits.
///
/// Draws once from `Mulberry32::new(star.seed + 500)` before looking at the
/// planets, so the roll is independent of the planet list.
pub fn generate_asteroid_belt(star: &Star, planets: &[Planet]) -> Option<AsteroidBelt> {
    let mut rng = Mulberry32::new(star.seed.wrapping_add(salts::BELT_STREAM));
    if rng.next_f64() > asteroid_belt::CHANCE {
        return None;
    }
    if planets.len() < 2 {
        return None;
    }

    let mut radii: Vec<f64> = planets.iter().map(|p| p.orbit_radius).collect();
    radii.sort_by(f64::total_cmp);

    let mut best: Option<(f64, f64, f64)> = None;
    for pair in radii.windows(2) {
        let gap = pair[1] - pair[0];
        if best.map_or(true, |(g, _, _)| gap > g) {
            best = Some((gap, pair[0], pair[1]));
        }
    }

    let (gap, inner, outer) = best?;
    if gap < asteroid_belt::MIN_GAP {
        return None;
    }
    Some(AsteroidBelt {
        inner_radius: inner + gap * asteroid_belt::GAP_MARGIN,
        outer_radius: outer - gap * asteroid_belt::GAP_MARGIN,
        seed: hash_int(star.seed, salts::BELT_SEED),
    })
}

// ============================================================================
// COMETS
// ============================================================================

/// Draw comets from `Mulberry32::new(hash_int(star.seed, 601))`.
///
/// Each of the `MAX_PER_SYSTEM` candidates takes an acceptance roll (the
/// first `MIN_PER_SYSTEM` are accepted regardless); accepted candidates then
/// draw semi-major axis, eccentricity, inclination, node angle and phase.
pub fn generate_comets(star: &Star) -> Vec<Comet> {
    let mut rng = Mulberry32::new(hash_int(star.seed, salts::COMET_STREAM));
    let mut comets = Vec::new();
    for i in 0..comet_cfg::MAX_PER_SYSTEM {
        let roll = rng.next_f64();
        if i >= comet_cfg::MIN_PER_SYSTEM && roll >= comet_cfg::CHANCE {
            continue;
        }
        let id = comets.len() as u32;
        comets.push(Comet {
            id,
            semi_major_axis: rng.range_f64(comet_cfg::SEMI_MAJOR_MIN, comet_cfg::SEMI_MAJOR_MAX),
            eccentricity: rng.range_f64(comet_cfg::ECCENTRICITY_MIN, comet_cfg::ECCENTRICITY_MAX),
            inclination: rng.range_f64(-comet_cfg::MAX_INCLINATION, comet_cfg::MAX_INCLINATION),
            node_angle: rng.next_f64() * TAU,
            phase: rng.next_f64() * TAU,
            seed: hash_int(star.seed, salts::COMET_SEED_BASE + i as u32),
        });
    }
    comets
}

// ============================================================================
// POSITIONS
// ============================================================================

/// Live planet position in the star's XZ plane.
pub fn planet_position(planet: &Planet, time: f64) -> DVec3 {
    let a = planet.angle_at(time);
    DVec3::new(a.cos() * planet.orbit_radius, 0.0, a.sin() * planet.orbit_radius)
}

pub fn moon_position(planet: &Planet, moon: &Moon, time: f64) -> DVec3 {
    let a = moon.orbit_phase + moon.orbit_speed * time;
    planet_position(planet, time)
        + DVec3::new(a.cos() * moon.orbit_radius, 0.0, a.sin() * moon.orbit_radius)
}

/// Solve Kepler's equation `E - e sin E = M` by Newton iteration.
pub fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    let m = mean_anomaly.rem_euclid(TAU);
    let mut ea = if e < 0.8 { m } else { PI };
    for _ in 0..12 {
        let f = ea - e * ea.sin() - m;
        let fp = 1.0 - e * ea.cos();
        let step = f / fp;
        ea -= step;
        if step.abs() < 1e-12 {
            break;
        }
    }
    ea
}

/// Comet position on its inclined ellipse, with the star at one focus.
pub fn comet_position(comet: &Comet, time: f64) -> DVec3 {
    let a = comet.semi_major_axis;
    let e = comet.eccentricity;
    let mean_motion = comet_cfg::MEAN_MOTION_UNIT * a.powf(-1.5);
    let ea = eccentric_anomaly(comet.phase + mean_motion * time, e);

    // Orbit-plane coordinates, periapsis along +x.
    let px = a * (ea.cos() - e);
    let pz = a * (1.0 - e * e).sqrt() * ea.sin();

    let (si, ci) = comet.inclination.sin_cos();
    let tilted = DVec3::new(px, pz * si, pz * ci);
    let (sn, cn) = comet.node_angle.sin_cos();
    DVec3::new(
        tilted.x * cn - tilted.z * sn,
        tilted.y,
        tilted.x * sn + tilted.z * cn,
    )
}
