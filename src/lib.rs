//! CircleBear Revolution: a four-lane arrow rhythm game.
//!
//! Core modules:
//! - `entities`: pure data (positions, directions, arrows, targets)
//! - `track`: the live arrow set, moved and despawned once per tick
//! - `scoring`: proximity scoring against the target row
//! - `scheduler`: fixed-period game loop with catch-up ticks
//! - `input`: key presses to score checks
//! - `session`: one game on one timeline, plus the render seam
//! - `map`: chart files and random charts

pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod map;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod track;

pub use config::GameConfig;
pub use error::GameError;
