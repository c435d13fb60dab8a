//! Game engine - owns a play session and drives it
//!
//! [`GameEngine`] is the single owned object a presentation layer talks to.
//! It holds the generated galaxy, the player state, the system currently on
//! screen and the ship's orbit, and turns player intents (jump, scan, fly,
//! resolve an event, buy an upgrade) into validated state changes.
//!
//! Time only advances through [`GameEngine::update`], which returns the
//! flight transitions that happened during the tick.

use std::cmp::Reverse;
use std::fmt;
use std::io::{Read, Write};

use glam::DVec3;
use rand::Rng;
use serde::Serialize;

use starhop_logic::economy::{
    self, add_data, add_fuel, can_jump, consume_fuel, credit_event_outcome, jump_fuel_cost,
};
use starhop_logic::events::{
    generate_planet_event, has_pending_event, record_resolution, resolve_choice, EventInstance,
    EventResult,
};
use starhop_logic::flight::{FlightError, FlightEvent, ShipOrbit};
use starhop_logic::galaxy::{generate_galaxy, star_distance, Galaxy, Star};
use starhop_logic::planet_types::PlanetType;
use starhop_logic::rng::round_half_up;
use starhop_logic::state::{
    create_state, ensure_home_reachable, mark_visited, refresh_reachable, JournalEntry,
    PlanetAction, PlanetKey, PlayerState, ViewMode,
};
use starhop_logic::system::{
    generate_asteroid_belt, generate_comets, generate_planets, AsteroidBelt, Comet, Planet,
};
use starhop_logic::upgrades::{self, PurchaseError, UpgradeCategory};

use crate::persistence::{self, SaveBackend, SaveError};

/// Generated content of the system currently on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemView {
    pub star_id: u32,
    pub planets: Vec<Planet>,
    pub belt: Option<AsteroidBelt>,
    pub comets: Vec<Comet>,
}

impl SystemView {
    pub fn build(star: &Star) -> Self {
        let planets = generate_planets(star);
        let belt = generate_asteroid_belt(star, &planets);
        Self {
            star_id: star.id,
            belt,
            comets: generate_comets(star),
            planets,
        }
    }

    pub fn planet(&self, id: u32) -> Option<&Planet> {
        self.planets.iter().find(|p| p.id == id)
    }
}

/// Something the presentation layer should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    TransferStarted { star_id: u32, planet_id: u32 },
    Arrived { star_id: u32, planet_id: u32 },
    Docked { star_id: u32, planet_id: u32 },
}

/// Fuel and data gained by mining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Haul {
    pub fuel: i64,
    pub data: i64,
}

/// Result of exploring a planet's surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exploration {
    pub data: i64,
    /// The encounter now waiting for [`GameEngine::resolve_event`].
    pub event: Option<EventInstance>,
}

// ============================================================================
// ERRORS
// ============================================================================

/// A player action that was refused. The state is unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    UnknownStar(u32),
    UnknownPlanet(u32),
    NotReachable(u32),
    /// The ship is at another star.
    ShipElsewhere { star_id: u32 },
    InsufficientFuel { cost: u32, fuel: f64 },
    NotInSystem,
    NotDocked(u32),
    AlreadyDone(PlanetAction),
    NoPendingEvent,
    Flight(FlightError),
    Purchase(PurchaseError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::UnknownStar(id) => write!(f, "no star {}", id),
            ActionError::UnknownPlanet(id) => write!(f, "no planet {} here", id),
            ActionError::NotReachable(id) => write!(f, "star {} is not reachable", id),
            ActionError::ShipElsewhere { star_id } => {
                write!(f, "the ship is at star {}", star_id)
            }
            ActionError::InsufficientFuel { cost, fuel } => {
                write!(f, "jump needs {} fuel, have {:.0}", cost, fuel)
            }
            ActionError::NotInSystem => write!(f, "not viewing a system"),
            ActionError::NotDocked(id) => write!(f, "not docked at planet {}", id),
            ActionError::AlreadyDone(action) => write!(f, "{:?} already done here", action),
            ActionError::NoPendingEvent => write!(f, "no event to resolve"),
            ActionError::Flight(e) => write!(f, "{}", e),
            ActionError::Purchase(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<FlightError> for ActionError {
    fn from(e: FlightError) -> Self {
        ActionError::Flight(e)
    }
}

impl From<PurchaseError> for ActionError {
    fn from(e: PurchaseError) -> Self {
        ActionError::Purchase(e)
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// One play session.
pub struct GameEngine {
    galaxy: Galaxy,
    state: PlayerState,
    system: Option<SystemView>,
    ship: Option<ShipOrbit>,
    /// Seconds of simulated time since the engine was created.
    clock: f64,
    pending_event: Option<EventInstance>,
}

impl GameEngine {
    /// Start a new game on `seed`.
    pub fn new(seed: u32) -> Self {
        let galaxy = generate_galaxy(seed);
        let mut engine = Self::with_parts(galaxy, create_state(seed));
        engine.begin_voyage();
        engine
    }

    /// Start a new game on a random seed.
    pub fn new_random() -> Self {
        let seed: u32 = rand::thread_rng().gen();
        log::info!("new game on random seed {}", seed);
        Self::new(seed)
    }

    /// Resume a session from loaded state.
    pub fn from_state(mut state: PlayerState) -> Self {
        let galaxy = generate_galaxy(state.galaxy_seed);
        if galaxy.star(state.ship_star_id).is_none() {
            log::warn!(
                "saved ship star {} not in galaxy {}, returning home",
                state.ship_star_id,
                galaxy.seed
            );
            state.ship_star_id = 0;
            state.ship_planet_id = None;
        }
        Self::with_parts(galaxy, state)
    }

    /// Resume the session stored in `backend`, or start a new game on
    /// `seed` when there is none.
    pub fn resume_or_new(backend: &dyn SaveBackend, seed: u32) -> Self {
        match persistence::restore_state(backend) {
            Some(state) => Self::from_state(state),
            None => Self::new(seed),
        }
    }

    fn with_parts(mut galaxy: Galaxy, mut state: PlayerState) -> Self {
        ensure_home_reachable(&mut state, &galaxy);
        galaxy.sync_visited(&state.visited_stars);
        Self {
            galaxy,
            state,
            system: None,
            ship: None,
            clock: 0.0,
            pending_event: None,
        }
    }

    /// First session: visit home and dock at its most habitable terran world.
    fn begin_voyage(&mut self) {
        mark_visited(&mut self.state, &self.galaxy, 0);
        self.galaxy.sync_visited(&self.state.visited_stars);
        let planets = self.galaxy.home().map(generate_planets).unwrap_or_default();
        let terran = planets
            .iter()
            .filter(|p| p.kind == PlanetType::Terran)
            .min_by_key(|p| Reverse(p.habitability));
        self.state.ship_planet_id = terran.or(planets.first()).map(|p| p.id);
        self.state.log(JournalEntry::Start {
            star_id: 0,
            planet_id: self.state.ship_planet_id,
        });
    }

    // ── accessors ──

    pub fn galaxy(&self) -> &Galaxy {
        &self.galaxy
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn system(&self) -> Option<&SystemView> {
        self.system.as_ref()
    }

    pub fn ship(&self) -> Option<&ShipOrbit> {
        self.ship.as_ref()
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn pending_event(&self) -> Option<&EventInstance> {
        self.pending_event.as_ref()
    }

    pub fn ship_star(&self) -> Option<&Star> {
        self.galaxy.star(self.state.ship_star_id)
    }

    pub fn max_fuel(&self) -> f64 {
        economy::max_fuel(&self.state)
    }

    /// Ship position relative to the active star.
    pub fn ship_position(&self) -> Option<DVec3> {
        self.ship.as_ref().map(|s| s.position())
    }

    pub fn is_ship_flying(&self) -> bool {
        self.ship.as_ref().is_some_and(|s| s.is_flying())
    }

    /// Fuel a jump from the ship's star to `star_id` would cost.
    pub fn jump_cost(&self, star_id: u32) -> Option<u32> {
        let from = self.ship_star()?;
        let to = self.galaxy.star(star_id)?;
        Some(jump_fuel_cost(&self.state, from, to))
    }

    // ── galaxy travel ──

    /// Jump to `star_id` and open its system. Jumping to the ship's own
    /// star just opens the system. Returns the fuel spent.
    pub fn jump_to_star(&mut self, star_id: u32) -> Result<u32, ActionError> {
        let to = self
            .galaxy
            .star(star_id)
            .ok_or(ActionError::UnknownStar(star_id))?;
        if star_id == self.state.ship_star_id {
            self.enter_system(star_id)?;
            return Ok(0);
        }
        if !self.state.is_reachable(star_id) {
            log::debug!("jump to {} rejected: not reachable", star_id);
            return Err(ActionError::NotReachable(star_id));
        }
        if self.is_ship_flying() {
            return Err(ActionError::Flight(FlightError::InFlight));
        }
        let from = self
            .ship_star()
            .ok_or(ActionError::UnknownStar(self.state.ship_star_id))?;
        let cost = jump_fuel_cost(&self.state, from, to);
        if !can_jump(&self.state, from, to) {
            log::debug!("jump to {} rejected: needs {} fuel", star_id, cost);
            return Err(ActionError::InsufficientFuel {
                cost,
                fuel: self.state.fuel,
            });
        }
        let distance = round_half_up(star_distance(from, to) * 10.0) / 10.0;

        self.state.log(JournalEntry::Jump {
            from_star_id: self.state.ship_star_id,
            to_star_id: star_id,
            distance,
            fuel_cost: cost,
        });
        consume_fuel(&mut self.state, cost as f64);
        self.state.total_jumps += 1;
        self.state.ship_star_id = star_id;
        self.state.ship_planet_id = None;
        mark_visited(&mut self.state, &self.galaxy, star_id);
        self.galaxy.sync_visited(&self.state.visited_stars);

        self.close_system();
        self.enter_system(star_id)?;
        Ok(cost)
    }

    /// Open the ship's current system.
    pub fn enter_system(&mut self, star_id: u32) -> Result<(), ActionError> {
        let star = self
            .galaxy
            .star(star_id)
            .ok_or(ActionError::UnknownStar(star_id))?;
        if star_id != self.state.ship_star_id {
            return Err(ActionError::ShipElsewhere {
                star_id: self.state.ship_star_id,
            });
        }
        if self.system.as_ref().is_some_and(|s| s.star_id == star_id) {
            return Ok(());
        }

        let view = SystemView::build(star);
        let ship = match self.state.ship_planet_id {
            Some(pid) => ShipOrbit::docked_at(&view.planets, pid, self.clock),
            None => ShipOrbit::parked(&view.planets),
        };
        log::debug!(
            "entering {} ({} planets, ship {:?})",
            star.name,
            view.planets.len(),
            ship.phase()
        );
        self.system = Some(view);
        self.ship = Some(ship);
        self.state.current_view = ViewMode::System;
        self.state.current_star_id = Some(star_id);
        if let Some(pid) = self.state.ship_planet_id {
            self.reopen_event(pid);
        }

        if !self.state.is_visited(star_id) {
            mark_visited(&mut self.state, &self.galaxy, star_id);
            self.galaxy.sync_visited(&self.state.visited_stars);
        }
        self.state.log(JournalEntry::EnterSystem { star_id });
        Ok(())
    }

    /// Return to the galaxy map. A flight in progress is abandoned and the
    /// ship is left undocked.
    pub fn leave_system(&mut self) -> Result<(), ActionError> {
        if self.system.is_none() {
            return Err(ActionError::NotInSystem);
        }
        if self.is_ship_flying() {
            self.state.ship_planet_id = None;
        }
        self.close_system();
        Ok(())
    }

    fn close_system(&mut self) {
        self.system = None;
        self.ship = None;
        self.pending_event = None;
        self.state.current_view = ViewMode::Galaxy;
        self.state.current_star_id = None;
    }

    // ── in-system flight ──

    pub fn fly_to_planet(&mut self, planet_id: u32) -> Result<(), ActionError> {
        let (Some(system), Some(ship)) = (self.system.as_ref(), self.ship.as_mut()) else {
            return Err(ActionError::NotInSystem);
        };
        let speed = self.state.effects().system_speed_mult;
        ship.fly_to_planet(&system.planets, planet_id, speed)?;
        self.state.ship_planet_id = None;
        self.pending_event = None;
        Ok(())
    }

    /// Advance the session by `dt` seconds.
    pub fn update(&mut self, dt: f64) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        if dt <= 0.0 {
            return events;
        }
        self.clock += dt;
        economy::update_solar_regen(&mut self.state, dt);

        let (Some(system), Some(ship)) = (self.system.as_ref(), self.ship.as_mut()) else {
            return events;
        };
        let star_id = system.star_id;
        let mut docked = None;
        if let Some(ev) = ship.update(&system.planets, self.clock, dt) {
            events.push(match ev {
                FlightEvent::TransferStarted { planet_id } => {
                    EngineEvent::TransferStarted { star_id, planet_id }
                }
                FlightEvent::Arrived { planet_id } => EngineEvent::Arrived { star_id, planet_id },
                FlightEvent::Docked { planet_id } => {
                    self.state.ship_planet_id = Some(planet_id);
                    docked = Some(planet_id);
                    EngineEvent::Docked { star_id, planet_id }
                }
            });
        }
        if let Some(planet_id) = docked {
            self.reopen_event(planet_id);
        }
        events
    }

    // ── planet actions ──

    fn docked_planet(&self, planet_id: u32, remote_ok: bool) -> Result<&Planet, ActionError> {
        let system = self.system.as_ref().ok_or(ActionError::NotInSystem)?;
        let planet = system
            .planet(planet_id)
            .ok_or(ActionError::UnknownPlanet(planet_id))?;
        let docked = self
            .ship
            .as_ref()
            .and_then(|s| s.docked_planet_id())
            .is_some_and(|id| id == planet_id);
        if !docked && !remote_ok {
            return Err(ActionError::NotDocked(planet_id));
        }
        Ok(planet)
    }

    fn planet_key(&self, planet_id: u32) -> PlanetKey {
        PlanetKey::new(self.state.ship_star_id, planet_id)
    }

    /// Scan a planet for data. Requires docking unless the orbital scanner
    /// is installed. Returns the data credited.
    pub fn scan_planet(&mut self, planet_id: u32) -> Result<i64, ActionError> {
        let orbital = self.state.effects().orbital_scan;
        let planet = self.docked_planet(planet_id, orbital)?.clone();
        let key = self.planet_key(planet_id);
        if !self.state.mark_action(key, PlanetAction::Scan) {
            return Err(ActionError::AlreadyDone(PlanetAction::Scan));
        }
        self.state.total_scans += 1;
        let data = add_data(&mut self.state, economy::roll_scan_data(&planet));
        self.state.log(JournalEntry::ScanPlanet {
            star_id: key.star_id,
            planet_id,
            data,
        });
        if let Some(special) = planet.special {
            self.state.log(JournalEntry::Discovery {
                star_id: key.star_id,
                planet_id,
                special,
            });
        }
        Ok(data)
    }

    /// Harvest fuel and ore data from the docked planet.
    pub fn mine_planet(&mut self, planet_id: u32) -> Result<Haul, ActionError> {
        let planet = self.docked_planet(planet_id, false)?.clone();
        let key = self.planet_key(planet_id);
        if !self.state.mark_action(key, PlanetAction::Mine) {
            return Err(ActionError::AlreadyDone(PlanetAction::Mine));
        }
        let gain = self.state.effects().fuel_gain_mult;
        let fuel = round_half_up(economy::roll_planet_fuel(&planet) as f64 * gain) as i64;
        add_fuel(&mut self.state, fuel as f64);
        let data = add_data(&mut self.state, economy::roll_mining_yield(&planet));
        self.state.log(JournalEntry::Mine {
            star_id: key.star_id,
            planet_id,
            fuel,
            data,
        });
        Ok(Haul { fuel, data })
    }

    /// Survey the docked planet's surface. Any encounter found there becomes
    /// the pending event.
    pub fn explore_planet(&mut self, planet_id: u32) -> Result<Exploration, ActionError> {
        let planet = self.docked_planet(planet_id, false)?.clone();
        let key = self.planet_key(planet_id);
        if !self.state.mark_action(key, PlanetAction::Explore) {
            return Err(ActionError::AlreadyDone(PlanetAction::Explore));
        }
        let data = add_data(&mut self.state, economy::roll_explore_data(&planet));
        self.state.log(JournalEntry::Explore {
            star_id: key.star_id,
            planet_id,
            data,
        });

        let star = self
            .ship_star()
            .ok_or(ActionError::UnknownStar(key.star_id))?;
        let event = generate_planet_event(&planet, star, &self.state);
        self.pending_event = event;
        Ok(Exploration {
            data,
            event: self.pending_event.clone(),
        })
    }

    /// Make the encounter on an explored planet pending again. Leaving the
    /// system or flying elsewhere drops a pending event without resolving it.
    pub fn open_event(&mut self, planet_id: u32) -> Result<EventInstance, ActionError> {
        self.docked_planet(planet_id, false)?;
        self.reopen_event(planet_id);
        self.pending_event.clone().ok_or(ActionError::NoPendingEvent)
    }

    fn reopen_event(&mut self, planet_id: u32) {
        let key = self.planet_key(planet_id);
        if !self.state.actions(key).explored {
            return;
        }
        let (Some(system), Some(star)) = (self.system.as_ref(), self.galaxy.star(key.star_id)) else {
            return;
        };
        if let Some(planet) = system.planet(planet_id) {
            self.pending_event = generate_planet_event(planet, star, &self.state);
        }
    }

    /// Resolve the pending event with `choice`. An index outside the
    /// choice list yields a neutral result and leaves the event pending.
    pub fn resolve_event(&mut self, choice: usize) -> Result<EventResult, ActionError> {
        let event = self
            .pending_event
            .as_ref()
            .ok_or(ActionError::NoPendingEvent)?;
        if choice >= event.choices.len() {
            return Ok(EventResult::neutral());
        }
        let result = resolve_choice(event, choice, &self.state);
        record_resolution(&mut self.state, event, choice, &result);
        credit_event_outcome(&mut self.state, result.fuel, result.data);
        self.state.log(JournalEntry::Event {
            star_id: event.planet_key.star_id,
            planet_id: event.planet_key.planet_id,
            template_id: event.template_id.to_string(),
            choice,
            success: result.success,
            fuel: result.fuel,
            data: result.data,
        });
        self.pending_event = None;
        Ok(result)
    }

    /// Whether `planet_id` holds an unresolved event, if the event scanner
    /// is installed. `None` when the player cannot tell.
    pub fn event_hint(&self, planet_id: u32) -> Option<bool> {
        if !self.state.effects().reveal_events {
            return None;
        }
        let planet = self.system.as_ref()?.planet(planet_id)?;
        let star = self.ship_star()?;
        Some(has_pending_event(planet, star, &self.state))
    }

    // ── upgrades ──

    /// Buy an upgrade tier. Returns the data spent.
    pub fn purchase_upgrade(
        &mut self,
        category: UpgradeCategory,
        tier: u8,
    ) -> Result<u32, ActionError> {
        let cost = upgrades::purchase_upgrade(&mut self.state, category, tier).map_err(|e| {
            log::debug!("purchase rejected: {}", e);
            e
        })?;
        refresh_reachable(&mut self.state, &self.galaxy);
        self.state.log(JournalEntry::Upgrade {
            category,
            tier,
            cost,
        });
        Ok(cost)
    }

    // ── persistence ──

    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_game(writer, &self.state)
    }

    pub fn load<R: Read>(reader: R) -> Result<Self, SaveError> {
        persistence::load_game(reader).map(Self::from_state)
    }

    pub fn save_to(&self, backend: &mut dyn SaveBackend) -> Result<(), SaveError> {
        persistence::store_state(backend, &self.state)
    }
}
