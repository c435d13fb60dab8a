//! Game constants: galaxy layout defaults, economy tuning, roll salts,
//! content-generation ranges and flight tuning.
//!
//! Plain `const` values with no runtime dependency. Per-type tables live on
//! the enums in [`crate::stellar`] and [`crate::planet_types`].

pub mod galaxy {
    pub const DEFAULT_SEED: u32 = 42;
    pub const STAR_COUNT: usize = 100;
    pub const FIELD_RADIUS: f64 = 80.0;
    pub const FIELD_HEIGHT: f64 = 12.0;
    pub const MIN_STAR_DISTANCE: f64 = 8.0;
    pub const MAX_CONNECTIONS: usize = 5;
    pub const CONNECTION_RANGE: f64 = 28.0;
    /// Placement attempts per requested star.
    pub const ATTEMPTS_PER_STAR: usize = 100;
    /// Vertical extent shrinks toward the rim by this fraction.
    pub const HEIGHT_TAPER: f64 = 0.6;
    /// Offset added to the galaxy seed for the remnant stream.
    pub const REMNANT_SEED_OFFSET: u32 = 900;
}

pub mod pulsars {
    pub const CHANCE: f64 = 0.03;
    pub const MIN_RATE: f64 = 1.5;
    pub const MAX_RATE: f64 = 3.5;
    /// Neutron stars always pulse at this rate.
    pub const NEUTRON_STAR_RATE: f64 = 4.0;
}

pub mod gameplay {
    pub const BASE_FUEL: f64 = 100.0;
    pub const BASE_MAX_FUEL: f64 = 100.0;
    pub const STARTING_DATA: i64 = 0;
    pub const FUEL_PER_LY: f64 = 0.5;
    pub const BASE_REGEN_RATE: f64 = 0.15;
    pub const SOLAR_REGEN_RATE: f64 = 0.5;
    pub const LOW_FUEL_THRESHOLD: f64 = 20.0;
    pub const EVENT_CHANCE: f64 = 0.7;
    pub const SCAN_DATA_REWARD: [f64; 2] = [3.0, 8.0];
    pub const EXPLORE_DATA_REWARD: [f64; 2] = [3.0, 6.0];
    pub const MINING_YIELD: [f64; 2] = [1.0, 4.0];
    pub const DEFAULT_FUEL_RANGE: [f64; 2] = [2.0, 6.0];
    /// Upper bound on an event choice's success rate after bonuses.
    pub const MAX_SUCCESS_RATE: f64 = 0.98;
    pub const MAX_UPGRADE_TIER: u8 = 3;
}

/// Salts passed to `hash_int(planet.seed, salt)` to separate roll purposes.
pub mod salts {
    pub const FUEL: u32 = 8888;
    pub const SCAN: u32 = 7777;
    pub const MINING: u32 = 6666;
    pub const EXPLORE: u32 = 5555;
    pub const EVENT: u32 = 9999;
    pub const EVENT_RESOLVE: u32 = 7777;
    pub const BELT_STREAM: u32 = 500;
    pub const BELT_SEED: u32 = 501;
    pub const COMET_STREAM: u32 = 601;
    pub const COMET_SEED_BASE: u32 = 700;
}

pub mod planets {
    /// Base orbit radius is `STAR_CLEARANCE * star_scale + ORBIT_BASE`.
    pub const STAR_CLEARANCE: f64 = 12.0;
    pub const ORBIT_BASE: f64 = 3.0;
    pub const SPACING_MIN: f64 = 3.5;
    pub const SPACING_JITTER: f64 = 2.5;
    pub const SPACING_GROWTH: f64 = 0.35;
    pub const SPEED_MIN: f64 = 0.15;
    pub const SPEED_JITTER: f64 = 0.15;
    pub const SPEED_FALLOFF: f64 = 1.4;
    /// Each orbit is at most this fraction of the previous one's speed.
    pub const SPEED_STEP_CAP: f64 = 0.95;
    pub const SPECIAL_CHANCE: f64 = 0.10;
    pub const PLANET_SEED_STRIDE: u32 = 7;
    pub const PLANET_SEED_SALT: u32 = 3;
    /// Fraction of the planet list treated as inner system.
    pub const INNER_FRACTION: f64 = 0.4;
}

pub mod moons {
    pub const ORBIT_MIN: f64 = 1.6;
    pub const ORBIT_MAX: f64 = 3.2;
    pub const SPEED_MIN: f64 = 0.6;
    pub const SPEED_MAX: f64 = 1.6;
    pub const SIZE_MIN: f64 = 0.06;
    pub const SIZE_MAX: f64 = 0.16;
    pub const SEED_STRIDE: u32 = 13;
    pub const SEED_SALT: u32 = 7;
}

pub mod asteroid_belt {
    /// A belt is considered only when the stream's first draw is at most this.
    pub const CHANCE: f64 = 0.6;
    /// Smallest orbit gap that can hold a belt.
    pub const MIN_GAP: f64 = 3.0;
    /// Margin left on each side of the gap.
    pub const GAP_MARGIN: f64 = 0.2;
}

pub mod comets {
    pub const CHANCE: f64 = 0.5;
    pub const MIN_PER_SYSTEM: usize = 0;
    pub const MAX_PER_SYSTEM: usize = 3;
    pub const SEMI_MAJOR_MIN: f64 = 25.0;
    pub const SEMI_MAJOR_MAX: f64 = 60.0;
    pub const ECCENTRICITY_MIN: f64 = 0.5;
    pub const ECCENTRICITY_MAX: f64 = 0.85;
    pub const MAX_INCLINATION: f64 = 0.5;
    /// Mean motion at unit semi-major axis; scaled by `a^-1.5`.
    pub const MEAN_MOTION_UNIT: f64 = 2.0;
}

pub mod flight {
    /// Parking orbit sits this far beyond the outermost planet.
    pub const PARKING_BUFFER: f64 = 6.0;
    /// Orbit radius used when a system has no planets.
    pub const NOMINAL_RADIUS: f64 = 20.0;
    pub const PARKING_ANGULAR_SPEED: f64 = 0.05;
    pub const BURN_DURATION: f64 = 1.2;
    /// Fraction of the radial distance covered while the departure burn runs.
    pub const BURN_RADIAL_DRIFT: f64 = 0.04;
    /// Star mass used when no planet defines one via `omega^2 r^3`.
    pub const FALLBACK_GRAVITATIONAL_PARAMETER: f64 = 60.0;
    pub const STAR_SOFTENING: f64 = 1.5;
    /// Planet gravitational parameter per unit of visual size cubed,
    /// relative to the star's.
    pub const PLANET_MASS_RATIO: f64 = 0.002;
    pub const GUIDANCE_GAIN: f64 = 4.0;
    /// Shortest time horizon guidance plans over, seconds.
    pub const GUIDANCE_MIN_LEAD: f64 = 0.25;
    pub const MAX_SUBSTEP: f64 = 1.0 / 120.0;
    pub const TIMEOUT_MULTIPLE: f64 = 2.5;
    /// Radius crossings before this fraction of the transfer are ignored.
    pub const ARRIVAL_MIN_PROGRESS: f64 = 0.5;
    pub const MIN_TRANSFER_SECS: f64 = 3.0;
    pub const MAX_TRANSFER_SECS: f64 = 8.0;
    /// Radians per second the ship gains on the target planet while approaching.
    pub const CATCH_UP_RATE: f64 = 0.6;
    pub const DOCK_RADIUS_FACTOR: f64 = 1.8;
    pub const DOCK_TILT: f64 = 0.25;
    pub const DOCK_ANGULAR_RATE: f64 = 1.1;
    /// Guidance aims this far ahead along a slingshot curve.
    pub const SLINGSHOT_LOOKAHEAD: f64 = 0.15;
    /// Control point is pulled toward the assisting body by this fraction.
    pub const SLINGSHOT_PULL: f64 = 0.6;
    /// An assisting planet must orbit at least this far from both the
    /// departure and arrival radii.
    pub const SLINGSHOT_CLEARANCE: f64 = 2.0;
}
