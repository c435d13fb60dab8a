//! Two-body orbital mechanics primitives in game units.
//!
//! Distances are scene units, times are seconds and `mu` is the central
//! body's gravitational parameter in units³/s².

use crate::constants::flight;
use crate::system::Planet;
use glam::DVec3;
use std::f64::consts::PI;

/// Orbital period `T = 2π √(a³/μ)`.
pub fn orbital_period(semi_major_axis: f64, mu: f64) -> f64 {
    2.0 * PI * (semi_major_axis.powi(3) / mu).sqrt()
}

/// Vis-viva speed `v = √(μ (2/r - 1/a))`. Clamped at zero for points
/// outside the ellipse.
pub fn vis_viva_speed(r: f64, semi_major_axis: f64, mu: f64) -> f64 {
    (mu * (2.0 / r - 1.0 / semi_major_axis)).max(0.0).sqrt()
}

pub fn circular_speed(r: f64, mu: f64) -> f64 {
    (mu / r).sqrt()
}

/// Time for a Hohmann transfer between two circular orbits (half the
/// transfer ellipse's period).
pub fn hohmann_transfer_time(r1: f64, r2: f64, mu: f64) -> f64 {
    let a = 0.5 * (r1 + r2);
    PI * (a.powi(3) / mu).sqrt()
}

/// Gravitational parameter implied by a circular orbit: `μ = ω² r³`.
pub fn mu_from_circular_orbit(angular_speed: f64, radius: f64) -> f64 {
    angular_speed * angular_speed * radius.powi(3)
}

/// Star gravitational parameter inferred from the innermost planet, or
/// [`flight::FALLBACK_GRAVITATIONAL_PARAMETER`] when there is none.
pub fn derive_star_mu(planets: &[Planet]) -> f64 {
    planets
        .iter()
        .min_by(|a, b| a.orbit_radius.total_cmp(&b.orbit_radius))
        .map(|p| mu_from_circular_orbit(p.orbit_speed, p.orbit_radius))
        .filter(|mu| mu.is_finite() && *mu > 0.0)
        .unwrap_or(flight::FALLBACK_GRAVITATIONAL_PARAMETER)
}

/// Inverse-square pull toward `center`, softened by `softening` so it stays
/// finite at zero distance.
pub fn softened_gravity(pos: DVec3, center: DVec3, mu: f64, softening: f64) -> DVec3 {
    let d = center - pos;
    let denom = (d.length_squared() + softening * softening).powf(1.5);
    if denom <= 0.0 {
        return DVec3::ZERO;
    }
    d * (mu / denom)
}

/// Specific orbital energy `v²/2 - μ/r`.
pub fn specific_energy(pos: DVec3, vel: DVec3, mu: f64) -> f64 {
    let r = pos.length();
    if r <= 0.0 {
        return f64::NEG_INFINITY;
    }
    0.5 * vel.length_squared() - mu / r
}

/// One velocity-Verlet step of length `h`.
///
/// `accel(pos, vel, t)` is evaluated at the start (`t = 0`) and end
/// (`t = h`) of the step; the end evaluation sees the half-step velocity.
pub fn verlet_step<F>(pos: DVec3, vel: DVec3, h: f64, mut accel: F) -> (DVec3, DVec3)
where
    F: FnMut(DVec3, DVec3, f64) -> DVec3,
{
    let a0 = accel(pos, vel, 0.0);
    let next_pos = pos + vel * h + a0 * (0.5 * h * h);
    let half_vel = vel + a0 * (0.5 * h);
    let a1 = accel(next_pos, half_vel, h);
    (next_pos, half_vel + a1 * (0.5 * h))
}

/// Point on a quadratic Bezier curve.
pub fn quadratic_bezier(p0: DVec3, p1: DVec3, p2: DVec3, t: f64) -> DVec3 {
    let omt = 1.0 - t;
    p0 * (omt * omt) + p1 * (2.0 * omt * t) + p2 * (t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_and_hohmann() {
        let mu = 100.0;
        let t = orbital_period(10.0, mu);
        assert!((t - 2.0 * PI * (1000.0f64 / 100.0).sqrt()).abs() < 1e-9);
        assert!((hohmann_transfer_time(5.0, 15.0, mu) - t / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_vis_viva_circular() {
        let v = vis_viva_speed(10.0, 10.0, 250.0);
        assert!((v - circular_speed(10.0, 250.0)).abs() < 1e-12);
        // Periapsis of a wider ellipse is faster than circular.
        assert!(vis_viva_speed(10.0, 20.0, 250.0) > v);
        assert_eq!(vis_viva_speed(100.0, 10.0, 250.0), 0.0);
    }

    #[test]
    fn test_mu_from_orbit() {
        assert!((mu_from_circular_orbit(0.2, 10.0) - 40.0).abs() < 1e-9);
        assert_eq!(derive_star_mu(&[]), flight::FALLBACK_GRAVITATIONAL_PARAMETER);
    }

    #[test]
    fn test_softened_gravity_finite_at_center() {
        let a = softened_gravity(DVec3::ZERO, DVec3::ZERO, 100.0, 1.0);
        assert_eq!(a, DVec3::ZERO);
        let b = softened_gravity(DVec3::new(10.0, 0.0, 0.0), DVec3::ZERO, 100.0, 0.0);
        assert!((b.x + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_verlet_circular_orbit_stays_circular() {
        let mu = 100.0;
        let r = 10.0;
        let mut pos = DVec3::new(r, 0.0, 0.0);
        let mut vel = DVec3::new(0.0, 0.0, circular_speed(r, mu));
        let e0 = specific_energy(pos, vel, mu);
        let h = flight::MAX_SUBSTEP;
        let steps = (orbital_period(r, mu) / h) as usize;
        for _ in 0..steps {
            (pos, vel) = verlet_step(pos, vel, h, |p, _, _| softened_gravity(p, DVec3::ZERO, mu, 0.0));
        }
        assert!((pos.length() - r).abs() < 1e-3, "radius {}", pos.length());
        assert!((specific_energy(pos, vel, mu) - e0).abs() < 1e-4);
    }

    #[test]
    fn test_bezier_endpoints() {
        let p0 = DVec3::ZERO;
        let p1 = DVec3::new(5.0, 5.0, 0.0);
        let p2 = DVec3::new(10.0, 0.0, 0.0);
        assert_eq!(quadratic_bezier(p0, p1, p2, 0.0), p0);
        assert_eq!(quadratic_bezier(p0, p1, p2, 1.0), p2);
        assert_eq!(quadratic_bezier(p0, p1, p2, 0.5), DVec3::new(5.0, 2.5, 0.0));
    }
}
