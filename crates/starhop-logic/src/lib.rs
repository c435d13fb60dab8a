//! Pure generation and simulation logic for Starhop.
//!
//! This crate contains everything that is independent of rendering, input or
//! storage. Functions take plain data and return results, so every piece is
//! unit-testable and deterministic: the same seed always produces the same
//! galaxy, systems, events and rolls.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Galaxy layout, economy tuning, roll salts, flight tuning |
//! | [`economy`] | Fuel costs, fuel/data gain, passive regen, per-planet rolls |
//! | [`event_catalog`] | Static encounter templates |
//! | [`events`] | Per-planet event selection and choice resolution |
//! | [`flight`] | Ship orbit state machine and integrated transfers |
//! | [`galaxy`] | Star placement, spectral classes, remnants, star graph |
//! | [`names`] | Star, cluster and planet names |
//! | [`orbit`] | Two-body orbital mechanics primitives |
//! | [`persistence`] | Save codec with schema versioning and migration |
//! | [`planet_types`] | Planet type table and type selection |
//! | [`rng`] | Seeded 32-bit PRNG and integer hashing |
//! | [`state`] | Player state, planet keys, journal, reachability |
//! | [`stellar`] | Spectral class and remnant tables |
//! | [`system`] | Planets, moons, asteroid belts, comets and their positions |
//! | [`upgrades`] | Upgrade tree, effect fold, purchasing |

pub mod constants;
pub mod economy;
pub mod event_catalog;
pub mod events;
pub mod flight;
pub mod galaxy;
pub mod names;
pub mod orbit;
pub mod persistence;
pub mod planet_types;
pub mod rng;
pub mod state;
pub mod stellar;
pub mod system;
pub mod upgrades;
