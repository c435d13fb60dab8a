//! Galaxy generation: star placement, classification, adjacency graph,
//! connectivity repair and stellar remnants.
//!
//! # Draw order
//!
//! The main stream is `Mulberry32::new(seed)`. For every placement attempt it
//! draws, in order: radius, angle, height. When a candidate is accepted it then
//! draws: spectral class, pulsar roll, planet count, and (only for pulsars)
//! pulse rate. Remnants use a separate stream seeded with
//! `seed + REMNANT_SEED_OFFSET`: one shuffle of the candidate ids, then one
//! count draw per remnant type in [`Remnant::ALL`] order. Per-star seeds come
//! from `hash_int(seed, placement_index)` and never touch either stream.
//!
//! Reordering any of these draws changes every galaxy.

use crate::constants::{galaxy as cfg, pulsars};
use crate::names;
use crate::rng::{hash_int, Mulberry32};
use crate::stellar::{Remnant, SpectralClass};
use crate::system;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::f64::consts::TAU;

/// Layout parameters for galaxy generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyConfig {
    pub star_count: usize,
    pub field_radius: f64,
    pub field_height: f64,
    pub min_star_distance: f64,
    pub max_connections: usize,
    pub connection_range: f64,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            star_count: cfg::STAR_COUNT,
            field_radius: cfg::FIELD_RADIUS,
            field_height: cfg::FIELD_HEIGHT,
            min_star_distance: cfg::MIN_STAR_DISTANCE,
            max_connections: cfg::MAX_CONNECTIONS,
            connection_range: cfg::CONNECTION_RANGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    /// Equal to the star's index in [`Galaxy::stars`].
    pub id: u32,
    pub name: String,
    pub position: DVec3,
    pub spectral_class: SpectralClass,
    pub planet_count: u32,
    pub seed: u32,
    pub visited: bool,
    /// Undirected neighbors, ascending.
    pub adjacent_ids: Vec<u32>,
    pub remnant: Option<Remnant>,
    pub is_pulsar: bool,
    /// Pulses per second; zero unless `is_pulsar`.
    pub pulse_rate: f64,
    pub has_belt: bool,
    pub has_comets: bool,
}

impl Star {
    pub fn is_remnant(&self) -> bool {
        self.remnant.is_some()
    }

    /// Display label: the remnant's label, else the spectral class description.
    pub fn type_label(&self) -> &'static str {
        match self.remnant {
            Some(r) => r.info().label,
            None => self.spectral_class.info().temp_label,
        }
    }
}

/// Generated galaxy. Immutable after generation apart from `visited` flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    pub seed: u32,
    pub name: String,
    pub stars: Vec<Star>,
}

/// Euclidean distance between two stars, in light-years.
pub fn star_distance(a: &Star, b: &Star) -> f64 {
    a.position.distance(b.position)
}

/// Generate a galaxy with the default layout.
pub fn generate_galaxy(seed: u32) -> Galaxy {
    generate_galaxy_with(seed, &GalaxyConfig::default())
}

pub fn generate_galaxy_with(seed: u32, config: &GalaxyConfig) -> Galaxy {
    let mut rng = Mulberry32::new(seed);
    let mut stars = place_stars(seed, config, &mut rng);

    if stars.len() < config.star_count {
        log::warn!(
            "galaxy {}: placed {} of {} stars before exhausting attempts",
            seed,
            stars.len(),
            config.star_count
        );
    }

    promote_home_star(&mut stars);
    build_adjacency(&mut stars, config);
    let repairs = repair_connectivity(&mut stars);
    let remnants = assign_remnants(seed, &mut stars);

    for star in stars.iter_mut() {
        let planets = system::generate_planets(star);
        star.has_belt = system::generate_asteroid_belt(star, &planets).is_some();
        star.has_comets = !system::generate_comets(star).is_empty();
    }

    let galaxy = Galaxy {
        seed,
        name: names::cluster_name(seed),
        stars,
    };
    log::info!(
        "galaxy {} ({}): {} stars, {} links, {} repair links, {} remnants",
        seed,
        galaxy.name,
        galaxy.stars.len(),
        galaxy.edge_count(),
        repairs,
        remnants
    );
    galaxy
}

// ============================================================================
// PLACEMENT
// ============================================================================

fn place_stars(seed: u32, config: &GalaxyConfig, rng: &mut Mulberry32) -> Vec<Star> {
    let mut stars: Vec<Star> = Vec::with_capacity(config.star_count);
    let budget = config.star_count * cfg::ATTEMPTS_PER_STAR;
    let min_sq = config.min_star_distance * config.min_star_distance;

    for _ in 0..budget {
        if stars.len() >= config.star_count {
            break;
        }
        let r = rng.next_f64().sqrt() * config.field_radius;
        let theta = rng.next_f64() * TAU;
        let taper = if config.field_radius > 0.0 {
            1.0 - r / config.field_radius * cfg::HEIGHT_TAPER
        } else {
            1.0
        };
        let y = (rng.next_f64() - 0.5) * config.field_height * taper;
        let position = DVec3::new(theta.cos() * r, y, theta.sin() * r);

        if stars
            .iter()
            .any(|s| s.position.distance_squared(position) < min_sq)
        {
            continue;
        }

        let index = stars.len() as u32;
        let star_seed = hash_int(seed, index);
        let spectral_class = SpectralClass::from_roll(rng.next_f64());
        let info = spectral_class.info();
        let is_pulsar = rng.chance(pulsars::CHANCE);
        let planet_count = rng.range_int(info.min_planets, info.max_planets);
        let pulse_rate = if is_pulsar {
            rng.range_f64(pulsars::MIN_RATE, pulsars::MAX_RATE)
        } else {
            0.0
        };

        stars.push(Star {
            id: index,
            name: names::star_name(star_seed),
            position,
            spectral_class,
            planet_count,
            seed: star_seed,
            visited: false,
            adjacent_ids: Vec::new(),
            remnant: None,
            is_pulsar,
            pulse_rate,
            has_belt: false,
            has_comets: false,
        });
    }
    stars
}

/// Move the star nearest the origin to index 0 and renumber ids.
fn promote_home_star(stars: &mut [Star]) {
    if stars.is_empty() {
        return;
    }
    let mut best = 0;
    let mut best_len = f64::INFINITY;
    for (i, star) in stars.iter().enumerate() {
        let len = star.position.length_squared();
        if len < best_len {
            best_len = len;
            best = i;
        }
    }
    stars.swap(0, best);
    for (i, star) in stars.iter_mut().enumerate() {
        star.id = i as u32;
    }
}

// ============================================================================
// ADJACENCY
// ============================================================================

fn link(stars: &mut [Star], a: usize, b: usize) -> bool {
    if a == b || stars[a].adjacent_ids.contains(&(b as u32)) {
        return false;
    }
    stars[a].adjacent_ids.push(b as u32);
    stars[b].adjacent_ids.push(a as u32);
    true
}

fn build_adjacency(stars: &mut [Star], config: &GalaxyConfig) {
    let n = stars.len();
    for i in 0..n {
        let mut candidates: Vec<(f64, usize)> = (0..n)
            .filter(|&j| j != i)
            .map(|j| (stars[i].position.distance(stars[j].position), j))
            .filter(|&(d, _)| d <= config.connection_range)
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        for &(_, j) in candidates.iter().take(config.max_connections) {
            link(stars, i, j);
        }
    }
    for star in stars.iter_mut() {
        star.adjacent_ids.sort_unstable();
    }
}

/// Mark every star reachable from `start` through existing links.
fn absorb(stars: &[Star], start: usize, visited: &mut [bool]) {
    let mut queue = VecDeque::from([start]);
    visited[start] = true;
    while let Some(cur) = queue.pop_front() {
        for &next in &stars[cur].adjacent_ids {
            let next = next as usize;
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }
}

/// Link every component not reachable from star 0 to its nearest reachable
/// star. Returns the number of links added.
fn repair_connectivity(stars: &mut [Star]) -> usize {
    let n = stars.len();
    if n == 0 {
        return 0;
    }
    let mut visited = vec![false; n];
    absorb(stars, 0, &mut visited);

    let mut repairs = 0;
    for u in 0..n {
        if visited[u] {
            continue;
        }
        let nearest = (0..n)
            .filter(|&v| visited[v])
            .min_by(|&a, &b| {
                let da = stars[u].position.distance_squared(stars[a].position);
                let db = stars[u].position.distance_squared(stars[b].position);
                da.total_cmp(&db).then(a.cmp(&b))
            });
        if let Some(v) = nearest {
            link(stars, u, v);
            log::debug!("repair link {} <-> {}", u, v);
            repairs += 1;
        }
        absorb(stars, u, &mut visited);
    }
    for star in stars.iter_mut() {
        star.adjacent_ids.sort_unstable();
    }
    repairs
}

// ============================================================================
// REMNANTS
// ============================================================================

/// Designate remnants among stars 1.. and apply their side effects.
fn assign_remnants(seed: u32, stars: &mut [Star]) -> usize {
    let mut rng = Mulberry32::new(seed.wrapping_add(cfg::REMNANT_SEED_OFFSET));
    let mut candidates: Vec<usize> = (1..stars.len()).collect();
    for i in (1..candidates.len()).rev() {
        let j = rng.index(i + 1);
        candidates.swap(i, j);
    }

    let mut next = candidates.into_iter();
    let mut assigned = 0;
    for remnant in Remnant::ALL {
        let info = remnant.info();
        let count = rng.range_int(info.min_count, info.max_count);
        for _ in 0..count {
            let Some(idx) = next.next() else { break };
            let star = &mut stars[idx];
            star.remnant = Some(remnant);
            match remnant {
                Remnant::BlackHole => {
                    star.planet_count = (star.planet_count / 2).max(1);
                    star.is_pulsar = false;
                    star.pulse_rate = 0.0;
                }
                Remnant::NeutronStar => {
                    star.is_pulsar = true;
                    star.pulse_rate = pulsars::NEUTRON_STAR_RATE;
                }
                Remnant::WhiteDwarf => {}
            }
            assigned += 1;
        }
    }
    assigned
}

// ============================================================================
// QUERIES
// ============================================================================

impl Galaxy {
    pub fn star(&self, id: u32) -> Option<&Star> {
        self.stars.get(id as usize)
    }

    pub fn home(&self) -> Option<&Star> {
        self.stars.first()
    }

    /// Number of undirected links.
    pub fn edge_count(&self) -> usize {
        self.stars.iter().map(|s| s.adjacent_ids.len()).sum::<usize>() / 2
    }

    /// True when a breadth-first walk from star 0 reaches every star.
    pub fn is_connected(&self) -> bool {
        if self.stars.is_empty() {
            return true;
        }
        let mut visited = vec![false; self.stars.len()];
        absorb(&self.stars, 0, &mut visited);
        visited.iter().all(|v| *v)
    }

    /// Stars within `hops` links of `id`, excluding `id` itself.
    pub fn neighbors_within(&self, id: u32, hops: u32) -> BTreeSet<u32> {
        let mut found = BTreeSet::new();
        if self.star(id).is_none() || hops == 0 {
            return found;
        }
        let mut depth = vec![u32::MAX; self.stars.len()];
        depth[id as usize] = 0;
        let mut queue = VecDeque::from([id as usize]);
        while let Some(cur) = queue.pop_front() {
            if depth[cur] == hops {
                continue;
            }
            for &next in &self.stars[cur].adjacent_ids {
                let n = next as usize;
                if depth[n] == u32::MAX {
                    depth[n] = depth[cur] + 1;
                    found.insert(next);
                    queue.push_back(n);
                }
            }
        }
        found
    }

    /// Copy visited flags from a set of star ids.
    pub fn sync_visited(&mut self, visited: &BTreeSet<u32>) {
        for star in self.stars.iter_mut() {
            star.visited = visited.contains(&star.id);
        }
    }
}
