//! Starhop Core - session engine for the Starhop exploration sandbox
//!
//! Wraps the pure rules in `starhop_logic` into one owned [`GameEngine`]
//! that a front end drives: it validates player actions, ticks the ship's
//! flight and persists the player's progress.
//!
//! # Example
//!
//! ```rust,no_run
//! use starhop_core::prelude::*;
//!
//! let mut engine = GameEngine::new(42);
//! engine.enter_system(0).unwrap();
//!
//! loop {
//!     for event in engine.update(1.0 / 60.0) {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod engine;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::{ActionError, EngineEvent, GameEngine, SystemView};
    pub use crate::persistence::{FileBackend, MemoryBackend, SaveBackend, SaveError};
}
