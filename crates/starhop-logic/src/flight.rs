//! In-system ship flight.
//!
//! The ship is a small state machine around the active star:
//!
//! ```text
//! Parking ──fly_to_planet──► BurnDepart ──► Transfer ──► BurnArrive ──► Approach ──► Docked
//!    ▲                                                                                  │
//!    └───────────────────── (target vanished) ◄──────────────── fly_to_planet ◄──────────┘
//! ```
//!
//! Only `Transfer` is physically integrated: star gravity, planet gravity
//! and a guidance term that ramps up with progress. All other phases are
//! kinematic. [`ShipOrbit::update`] reports transitions as a returned
//! [`FlightEvent`] instead of calling back into the caller.

use crate::constants::flight as cfg;
use crate::orbit::{
    derive_star_mu, hohmann_transfer_time, quadratic_bezier, softened_gravity, verlet_step,
    vis_viva_speed,
};
use crate::rng::{ease_in_out_cubic, lerp, wrap_angle};
use crate::system::{planet_position, Planet};
use glam::DVec3;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightPhase {
    Parking,
    BurnDepart,
    Transfer,
    BurnArrive,
    Approach,
    Docked,
}

impl FlightPhase {
    pub fn is_flying(self) -> bool {
        matches!(
            self,
            Self::BurnDepart | Self::Transfer | Self::BurnArrive | Self::Approach
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEvent {
    TransferStarted { planet_id: u32 },
    /// Reached the target's orbit radius; approach follows.
    Arrived { planet_id: u32 },
    Docked { planet_id: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightError {
    InFlight,
    UnknownPlanet(u32),
    AlreadyDocked(u32),
}

impl fmt::Display for FlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightError::InFlight => write!(f, "ship is already in flight"),
            FlightError::UnknownPlanet(id) => write!(f, "no planet {} in this system", id),
            FlightError::AlreadyDocked(id) => write!(f, "already docked at planet {}", id),
        }
    }
}

impl std::error::Error for FlightError {}

/// Bezier path bent toward an intermediate planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slingshot {
    pub via_planet_id: u32,
    pub start: DVec3,
    pub control: DVec3,
    pub end: DVec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub target_planet_id: u32,
    pub from_radius: f64,
    pub to_radius: f64,
    pub position: DVec3,
    pub velocity: DVec3,
    /// Star parameter scaled so the transfer ellipse completes in `duration`.
    pub mu: f64,
    pub start_time: f64,
    pub elapsed: f64,
    pub duration: f64,
    pub timeout: f64,
    /// Target planet position at `start_time + duration`.
    pub arrival_point: DVec3,
    pub slingshot: Option<Slingshot>,
}

impl Transfer {
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn outward(&self) -> bool {
        self.to_radius >= self.from_radius
    }

    /// Point guidance steers toward at progress `f`, and the time left to
    /// reach it.
    fn aim(&self, f: f64) -> (DVec3, f64) {
        match self.slingshot {
            Some(s) => {
                let param = (f + cfg::SLINGSHOT_LOOKAHEAD).min(1.0);
                (
                    quadratic_bezier(s.start, s.control, s.end, param),
                    (param - f) * self.duration,
                )
            }
            None => (self.arrival_point, (1.0 - f) * self.duration),
        }
    }

    fn acceleration(&self, planets: &[Planet], pos: DVec3, vel: DVec3, elapsed: f64, time: f64) -> DVec3 {
        let mut acc = softened_gravity(pos, DVec3::ZERO, self.mu, cfg::STAR_SOFTENING);
        for planet in planets {
            let mu = self.mu * cfg::PLANET_MASS_RATIO * planet.visual_size.powi(3);
            acc += softened_gravity(pos, planet_position(planet, time), mu, planet.visual_size);
        }
        let f = if self.duration > 0.0 {
            (elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let (aim, lead) = self.aim(f);
        let desired = (aim - pos) / lead.max(cfg::GUIDANCE_MIN_LEAD);
        acc + (desired - vel) * (cfg::GUIDANCE_GAIN * f * f)
    }
}

/// Parking orbit radius for a system.
pub fn parking_radius(planets: &[Planet]) -> f64 {
    planets
        .iter()
        .map(|p| p.orbit_radius)
        .max_by(f64::total_cmp)
        .map(|r| r + cfg::PARKING_BUFFER)
        .unwrap_or(cfg::NOMINAL_RADIUS)
}

/// Transfer duration and the scaled gravitational parameter that makes a
/// Keplerian half-ellipse between `r1` and `r2` take exactly that long.
pub fn transfer_timing(r1: f64, r2: f64, star_mu: f64, speed_mult: f64) -> (f64, f64) {
    let hohmann = hohmann_transfer_time(r1, r2, star_mu);
    let duration = hohmann.clamp(cfg::MIN_TRANSFER_SECS, cfg::MAX_TRANSFER_SECS) / speed_mult;
    let mu = if hohmann > 0.0 && hohmann.is_finite() {
        star_mu * (hohmann / duration).powi(2)
    } else {
        star_mu
    };
    (duration, mu)
}

/// Intermediate planet a transfer can bend toward, if one orbits clear of
/// both ends.
fn plan_slingshot(
    planets: &[Planet],
    target_id: u32,
    r1: f64,
    r2: f64,
    start: DVec3,
    end: DVec3,
    mid_time: f64,
) -> Option<Slingshot> {
    let lo = r1.min(r2) + cfg::SLINGSHOT_CLEARANCE;
    let hi = r1.max(r2) - cfg::SLINGSHOT_CLEARANCE;
    if lo >= hi {
        return None;
    }
    let mid_r = 0.5 * (r1 + r2);
    let via = planets
        .iter()
        .filter(|p| p.id != target_id && p.orbit_radius > lo && p.orbit_radius < hi)
        .min_by(|a, b| {
            (a.orbit_radius - mid_r)
                .abs()
                .total_cmp(&(b.orbit_radius - mid_r).abs())
        })?;

    let mid = (start + end) * 0.5;
    let assist = planet_position(via, mid_time);
    Some(Slingshot {
        via_planet_id: via.id,
        start,
        control: mid + (assist - mid) * cfg::SLINGSHOT_PULL,
        end,
    })
}

fn find(planets: &[Planet], id: u32) -> Option<&Planet> {
    planets.iter().find(|p| p.id == id)
}

// ============================================================================
// SHIP ORBIT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ShipOrbit {
    phase: FlightPhase,
    radius: f64,
    angle: f64,
    angular_speed: f64,
    phase_elapsed: f64,
    burn_start_radius: f64,
    burn_start_speed: f64,
    target_planet_id: Option<u32>,
    docked_planet_id: Option<u32>,
    transfer: Option<Transfer>,
    star_mu: f64,
    parking_radius: f64,
    speed_mult: f64,
    position: DVec3,
    heading: DVec3,
}

impl ShipOrbit {
    /// Ship in the parking orbit beyond the outermost planet.
    pub fn parked(planets: &[Planet]) -> Self {
        let mut ship = Self {
            phase: FlightPhase::Parking,
            radius: 0.0,
            angle: 0.0,
            angular_speed: cfg::PARKING_ANGULAR_SPEED,
            phase_elapsed: 0.0,
            burn_start_radius: 0.0,
            burn_start_speed: 0.0,
            target_planet_id: None,
            docked_planet_id: None,
            transfer: None,
            star_mu: derive_star_mu(planets),
            parking_radius: parking_radius(planets),
            speed_mult: 1.0,
            position: DVec3::ZERO,
            heading: DVec3::Z,
        };
        ship.park();
        ship
    }

    /// Ship docked at `planet_id`; parked if the planet does not exist.
    pub fn docked_at(planets: &[Planet], planet_id: u32, time: f64) -> Self {
        let mut ship = Self::parked(planets);
        if find(planets, planet_id).is_some() {
            ship.phase = FlightPhase::Docked;
            ship.docked_planet_id = Some(planet_id);
            ship.update_docked(planets, time);
        }
        ship
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn is_flying(&self) -> bool {
        self.phase.is_flying()
    }

    pub fn docked_planet_id(&self) -> Option<u32> {
        self.docked_planet_id
    }

    pub fn target_planet_id(&self) -> Option<u32> {
        self.target_planet_id
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Unit direction of travel.
    pub fn heading(&self) -> DVec3 {
        self.heading
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn star_mu(&self) -> f64 {
        self.star_mu
    }

    pub fn parking_radius(&self) -> f64 {
        self.parking_radius
    }

    pub fn transfer(&self) -> Option<&Transfer> {
        self.transfer.as_ref()
    }

    /// Start a flight to `planet_id`. `speed_mult` shortens the transfer.
    pub fn fly_to_planet(&mut self, planets: &[Planet], planet_id: u32, speed_mult: f64) -> Result<(), FlightError> {
        if self.is_flying() {
            return Err(FlightError::InFlight);
        }
        if find(planets, planet_id).is_none() {
            return Err(FlightError::UnknownPlanet(planet_id));
        }
        if self.docked_planet_id == Some(planet_id) {
            return Err(FlightError::AlreadyDocked(planet_id));
        }

        self.phase = FlightPhase::BurnDepart;
        self.phase_elapsed = 0.0;
        self.burn_start_radius = self.radius;
        self.burn_start_speed = self.angular_speed;
        self.target_planet_id = Some(planet_id);
        self.docked_planet_id = None;
        self.transfer = None;
        self.speed_mult = if speed_mult.is_finite() && speed_mult > 0.0 {
            speed_mult
        } else {
            1.0
        };
        log::debug!(
            "flight: departing r={:.2} for planet {}",
            self.radius,
            planet_id
        );
        Ok(())
    }

    /// Advance by `dt` seconds ending at `time`. Returns the phase
    /// transition that happened this frame, if any.
    pub fn update(&mut self, planets: &[Planet], time: f64, dt: f64) -> Option<FlightEvent> {
        let dt = dt.max(0.0);
        match self.phase {
            FlightPhase::Parking => {
                self.angle = wrap_angle(self.angle + self.angular_speed * dt);
                self.place_on_circle();
                None
            }
            FlightPhase::Docked => {
                self.update_docked(planets, time);
                None
            }
            FlightPhase::BurnDepart => self.update_burn_depart(planets, time, dt),
            FlightPhase::Transfer => self.update_transfer(planets, time, dt),
            FlightPhase::BurnArrive => self.update_burn_arrive(planets, dt),
            FlightPhase::Approach => self.update_approach(planets, time, dt),
        }
    }

    fn target<'a>(&self, planets: &'a [Planet]) -> Option<&'a Planet> {
        self.target_planet_id.and_then(|id| find(planets, id))
    }

    fn park(&mut self) {
        self.phase = FlightPhase::Parking;
        self.radius = self.parking_radius;
        self.angular_speed = cfg::PARKING_ANGULAR_SPEED;
        self.phase_elapsed = 0.0;
        self.target_planet_id = None;
        self.docked_planet_id = None;
        self.transfer = None;
        self.place_on_circle();
    }

    fn abort(&mut self) -> Option<FlightEvent> {
        log::warn!(
            "flight: target planet {:?} missing, returning to parking orbit",
            self.target_planet_id
        );
        self.park();
        None
    }

    fn place_on_circle(&mut self) {
        let (s, c) = self.angle.sin_cos();
        self.position = DVec3::new(c * self.radius, 0.0, s * self.radius);
        self.heading = if self.angular_speed < 0.0 {
            DVec3::new(s, 0.0, -c)
        } else {
            DVec3::new(-s, 0.0, c)
        };
    }

    fn update_docked(&mut self, planets: &[Planet], time: f64) {
        let Some(planet) = self.docked_planet_id.and_then(|id| find(planets, id)) else {
            self.park();
            return;
        };
        // Keep the star-relative orbit in sync so undocking starts from here.
        self.radius = planet.orbit_radius;
        self.angle = wrap_angle(planet.angle_at(time));
        self.angular_speed = planet.orbit_speed;

        let r = planet.visual_size * cfg::DOCK_RADIUS_FACTOR;
        let (s, c) = (cfg::DOCK_ANGULAR_RATE * time).sin_cos();
        self.position =
            planet_position(planet, time) + DVec3::new(c * r, s * r * cfg::DOCK_TILT, s * r);
        self.heading = DVec3::new(-s, c * cfg::DOCK_TILT, c).normalize_or_zero();
    }

    fn update_burn_depart(&mut self, planets: &[Planet], time: f64, dt: f64) -> Option<FlightEvent> {
        let Some(target) = self.target(planets) else {
            return self.abort();
        };
        self.phase_elapsed += dt;
        let t = (self.phase_elapsed / cfg::BURN_DURATION).min(1.0);
        let drift = (target.orbit_radius - self.burn_start_radius) * cfg::BURN_RADIAL_DRIFT;
        self.radius = self.burn_start_radius + drift * ease_in_out_cubic(t);
        self.angle = wrap_angle(self.angle + self.angular_speed * dt);
        self.place_on_circle();

        if self.phase_elapsed < cfg::BURN_DURATION {
            return None;
        }
        self.begin_transfer(planets, target, time);
        Some(FlightEvent::TransferStarted {
            planet_id: target.id,
        })
    }

    fn begin_transfer(&mut self, planets: &[Planet], target: &Planet, time: f64) {
        let r1 = self.radius;
        let r2 = target.orbit_radius;
        let (duration, mu) = transfer_timing(r1, r2, self.star_mu, self.speed_mult);
        let speed = vis_viva_speed(r1, 0.5 * (r1 + r2), mu);

        let (s, c) = self.angle.sin_cos();
        let position = DVec3::new(c * r1, 0.0, s * r1);
        let tangent = DVec3::new(-s, 0.0, c);
        let arrival_point = planet_position(target, time + duration);
        let slingshot = plan_slingshot(
            planets,
            target.id,
            r1,
            r2,
            position,
            arrival_point,
            time + 0.5 * duration,
        );

        log::debug!(
            "flight: transfer {:.2} -> {:.2} over {:.2}s (mu {:.1}, slingshot {:?})",
            r1,
            r2,
            duration,
            mu,
            slingshot.map(|s| s.via_planet_id)
        );

        self.transfer = Some(Transfer {
            target_planet_id: target.id,
            from_radius: r1,
            to_radius: r2,
            position,
            velocity: tangent * speed,
            mu,
            start_time: time,
            elapsed: 0.0,
            duration,
            timeout: duration * cfg::TIMEOUT_MULTIPLE,
            arrival_point,
            slingshot,
        });
        self.phase = FlightPhase::Transfer;
        self.phase_elapsed = 0.0;
        self.position = position;
        self.heading = tangent;
    }

    fn update_transfer(&mut self, planets: &[Planet], time: f64, dt: f64) -> Option<FlightEvent> {
        let Some(mut tr) = self.transfer.take() else {
            return self.abort();
        };
        if find(planets, tr.target_planet_id).is_none() {
            return self.abort();
        }

        let steps = ((dt / cfg::MAX_SUBSTEP).ceil() as usize).max(1);
        let h = dt / steps as f64;
        let frame_start = time - dt;
        let mut arrived = false;

        for i in 0..steps {
            let t0 = frame_start + i as f64 * h;
            let elapsed0 = tr.elapsed;
            let prev_r = tr.position.length();
            let (pos, vel) = verlet_step(tr.position, tr.velocity, h, |p, v, off| {
                tr.acceleration(planets, p, v, elapsed0 + off, t0 + off)
            });
            tr.position = pos;
            tr.velocity = vel;
            tr.elapsed += h;

            let r = pos.length();
            let crossed = if tr.outward() {
                prev_r < tr.to_radius && r >= tr.to_radius
            } else {
                prev_r > tr.to_radius && r <= tr.to_radius
            };
            if crossed && tr.progress() >= cfg::ARRIVAL_MIN_PROGRESS {
                arrived = true;
                break;
            }
            if tr.elapsed >= tr.timeout {
                log::warn!(
                    "flight: transfer to planet {} timed out after {:.2}s at r={:.2}",
                    tr.target_planet_id,
                    tr.elapsed,
                    r
                );
                arrived = true;
                break;
            }
        }

        self.position = tr.position;
        self.heading = tr.velocity.normalize_or_zero();
        self.radius = tr.position.length();
        self.angle = tr.position.z.atan2(tr.position.x);

        if !arrived {
            self.transfer = Some(tr);
            return None;
        }
        Some(self.finish_transfer(&tr, planets))
    }

    fn finish_transfer(&mut self, tr: &Transfer, planets: &[Planet]) -> FlightEvent {
        let p = tr.position;
        let r2 = p.x * p.x + p.z * p.z;
        let omega = if r2 > 0.0 {
            (p.x * tr.velocity.z - p.z * tr.velocity.x) / r2
        } else {
            0.0
        };
        let fallback = find(planets, tr.target_planet_id).map_or(0.0, |t| t.orbit_speed);

        self.radius = tr.to_radius;
        self.angle = p.z.atan2(p.x);
        self.angular_speed = if omega.is_finite() && omega > 0.0 {
            omega
        } else {
            fallback
        };
        self.burn_start_speed = self.angular_speed;
        self.phase = FlightPhase::BurnArrive;
        self.phase_elapsed = 0.0;
        self.place_on_circle();
        FlightEvent::Arrived {
            planet_id: tr.target_planet_id,
        }
    }

    fn update_burn_arrive(&mut self, planets: &[Planet], dt: f64) -> Option<FlightEvent> {
        let Some(target) = self.target(planets) else {
            return self.abort();
        };
        self.phase_elapsed += dt;
        let t = (self.phase_elapsed / cfg::BURN_DURATION).min(1.0);
        self.radius = target.orbit_radius;
        self.angular_speed = lerp(self.burn_start_speed, target.orbit_speed, ease_in_out_cubic(t));
        self.angle = wrap_angle(self.angle + self.angular_speed * dt);
        self.place_on_circle();
        if self.phase_elapsed >= cfg::BURN_DURATION {
            self.phase = FlightPhase::Approach;
            self.phase_elapsed = 0.0;
        }
        None
    }

    fn update_approach(&mut self, planets: &[Planet], time: f64, dt: f64) -> Option<FlightEvent> {
        let Some(target) = self.target(planets) else {
            return self.abort();
        };
        self.radius = target.orbit_radius;
        self.angular_speed = target.orbit_speed;
        self.angle += target.orbit_speed * dt;

        let gap = wrap_angle(target.angle_at(time) - self.angle);
        let step = cfg::CATCH_UP_RATE * dt;
        if gap.abs() <= step {
            let planet_id = target.id;
            self.phase = FlightPhase::Docked;
            self.docked_planet_id = Some(planet_id);
            self.target_planet_id = None;
            self.phase_elapsed = 0.0;
            self.update_docked(planets, time);
            log::debug!("flight: docked at planet {}", planet_id);
            return Some(FlightEvent::Docked { planet_id });
        }
        self.angle = wrap_angle(self.angle + step * gap.signum());
        self.place_on_circle();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planet_types::{Atmosphere, PlanetType};

    fn planet(id: u32, radius: f64, speed: f64) -> Planet {
        Planet {
            id,
            name: format!("P{}", id),
            kind: PlanetType::Terran,
            size: 5,
            habitability: 50,
            metal_richness: 50,
            atmosphere: Atmosphere::Standard,
            has_rings: false,
            special: None,
            seed: id * 31 + 1,
            orbit_radius: radius,
            orbit_speed: speed,
            orbit_phase: id as f64,
            spin_rate: 1.0,
            visual_size: 0.5,
            moons: Vec::new(),
        }
    }

    fn system() -> Vec<Planet> {
        vec![planet(0, 18.0, 0.30), planet(1, 28.0, 0.18), planet(2, 40.0, 0.11)]
    }

    const DT: f64 = 1.0 / 60.0;

    /// Tick until docked or `limit` seconds pass; returns the events and the
    /// end time.
    fn run(ship: &mut ShipOrbit, planets: &[Planet], start: f64, limit: f64) -> (Vec<FlightEvent>, f64) {
        let mut events = Vec::new();
        let mut time = start;
        while time < start + limit {
            time += DT;
            if let Some(ev) = ship.update(planets, time, DT) {
                events.push(ev);
                if matches!(ev, FlightEvent::Docked { .. }) {
                    break;
                }
            }
        }
        (events, time)
    }

    // ── setup ──

    #[test]
    fn test_parking_radius() {
        assert_eq!(parking_radius(&system()), 40.0 + cfg::PARKING_BUFFER);
        assert_eq!(parking_radius(&[]), cfg::NOMINAL_RADIUS);
        let ship = ShipOrbit::parked(&system());
        assert_eq!(ship.radius(), 46.0);
        assert_eq!(ship.phase(), FlightPhase::Parking);
    }

    #[test]
    fn test_star_mu_from_innermost() {
        let ship = ShipOrbit::parked(&system());
        assert!((ship.star_mu() - 0.09 * 18.0f64.powi(3)).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_mu_without_planets() {
        let mut ship = ShipOrbit::parked(&[]);
        assert_eq!(ship.star_mu(), cfg::FALLBACK_GRAVITATIONAL_PARAMETER);
        ship.update(&[], 1.0, 1.0);
        assert!((ship.position().length() - cfg::NOMINAL_RADIUS).abs() < 1e-9);
        assert_eq!(
            ship.fly_to_planet(&[], 0, 1.0),
            Err(FlightError::UnknownPlanet(0))
        );
    }

    #[test]
    fn test_transfer_timing_scales_mu() {
        let mu = 500.0;
        let (duration, scaled) = transfer_timing(46.0, 18.0, mu, 1.0);
        assert!(duration >= cfg::MIN_TRANSFER_SECS && duration <= cfg::MAX_TRANSFER_SECS);
        assert!((hohmann_transfer_time(46.0, 18.0, scaled) - duration).abs() < 1e-9);
        let (fast, _) = transfer_timing(46.0, 18.0, mu, 1.5);
        assert!((fast - duration / 1.5).abs() < 1e-12);
    }

    // ── commands ──

    #[test]
    fn test_fly_errors() {
        let planets = system();
        let mut ship = ShipOrbit::parked(&planets);
        assert_eq!(
            ship.fly_to_planet(&planets, 9, 1.0),
            Err(FlightError::UnknownPlanet(9))
        );
        ship.fly_to_planet(&planets, 1, 1.0).unwrap();
        assert!(ship.is_flying());
        assert_eq!(ship.fly_to_planet(&planets, 2, 1.0), Err(FlightError::InFlight));

        let mut docked = ShipOrbit::docked_at(&planets, 2, 0.0);
        assert_eq!(
            docked.fly_to_planet(&planets, 2, 1.0),
            Err(FlightError::AlreadyDocked(2))
        );
    }

    #[test]
    fn test_docked_at_missing_planet_parks() {
        let ship = ShipOrbit::docked_at(&system(), 7, 0.0);
        assert_eq!(ship.phase(), FlightPhase::Parking);
        assert_eq!(ship.docked_planet_id(), None);
    }

    // ── full flights ──

    #[test]
    fn test_flight_from_parking_docks() {
        let planets = system();
        let mut ship = ShipOrbit::parked(&planets);
        ship.fly_to_planet(&planets, 0, 1.0).unwrap();
        let (events, _) = run(&mut ship, &planets, 0.0, 60.0);
        assert_eq!(
            events,
            vec![
                FlightEvent::TransferStarted { planet_id: 0 },
                FlightEvent::Arrived { planet_id: 0 },
                FlightEvent::Docked { planet_id: 0 },
            ]
        );
        assert_eq!(ship.docked_planet_id(), Some(0));
        assert!(!ship.is_flying());
        assert!(ship.position().is_finite());
    }

    #[test]
    fn test_docked_ship_follows_planet() {
        let planets = system();
        let mut ship = ShipOrbit::docked_at(&planets, 1, 0.0);
        let mut time = 0.0;
        for _ in 0..240 {
            time += DT;
            assert_eq!(ship.update(&planets, time, DT), None);
            let d = ship.position().distance(planet_position(&planets[1], time));
            let r = planets[1].visual_size * cfg::DOCK_RADIUS_FACTOR;
            assert!((d - r).abs() < 0.05, "dock distance {}", d);
        }
        assert!((ship.radius() - planets[1].orbit_radius).abs() < 1e-12);
    }

    #[test]
    fn test_outward_flight_between_planets() {
        let planets = system();
        let mut ship = ShipOrbit::docked_at(&planets, 0, 5.0);
        ship.fly_to_planet(&planets, 2, 1.5).unwrap();
        assert_eq!(ship.docked_planet_id(), None);
        let (events, _) = run(&mut ship, &planets, 5.0, 60.0);
        assert_eq!(events.last(), Some(&FlightEvent::Docked { planet_id: 2 }));
        assert_eq!(ship.docked_planet_id(), Some(2));
    }

    #[test]
    fn test_transfer_times_out() {
        let planets = system();
        let mut ship = ShipOrbit::parked(&planets);
        ship.fly_to_planet(&planets, 0, 1.0).unwrap();
        let mut time = 0.0;
        while ship.phase() != FlightPhase::Transfer {
            time += DT;
            ship.update(&planets, time, DT);
        }
        let timeout = {
            let tr = ship.transfer.as_mut().unwrap();
            tr.to_radius = 1.0e6;
            tr.timeout
        };
        let start = time;
        let mut arrived_at = None;
        while time < start + timeout + 1.0 {
            time += DT;
            if let Some(FlightEvent::Arrived { .. }) = ship.update(&planets, time, DT) {
                arrived_at = Some(time);
                break;
            }
        }
        let arrived_at = arrived_at.expect("transfer never completed");
        assert!(arrived_at - start >= timeout - DT);
        assert_eq!(ship.phase(), FlightPhase::BurnArrive);
    }

    #[test]
    fn test_slingshot_only_with_intermediate_planet() {
        let planets = system();
        let mut ship = ShipOrbit::parked(&planets);
        ship.fly_to_planet(&planets, 0, 1.0).unwrap();
        let mut time = 0.0;
        let mut events = Vec::new();
        while ship.phase() != FlightPhase::Transfer {
            time += DT;
            events.extend(ship.update(&planets, time, DT));
        }
        assert_eq!(events, vec![FlightEvent::TransferStarted { planet_id: 0 }]);
        let via = ship.transfer().and_then(|t| t.slingshot).map(|s| s.via_planet_id);
        assert_eq!(via, Some(1));

        let mut direct = ShipOrbit::parked(&planets);
        direct.fly_to_planet(&planets, 2, 1.0).unwrap();
        let mut time = 0.0;
        while direct.phase() != FlightPhase::Transfer {
            time += DT;
            direct.update(&planets, time, DT);
        }
        assert!(direct.transfer().unwrap().slingshot.is_none());
    }

    #[test]
    fn test_zero_dt_is_stable() {
        let planets = system();
        let mut ship = ShipOrbit::parked(&planets);
        let before = ship.position();
        assert_eq!(ship.update(&planets, 0.0, 0.0), None);
        assert_eq!(ship.position(), before);
    }
}
