//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drawing and input go through the traits in [`ports`]; time goes through [`clock`].

pub mod action;
pub mod candy;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod ports;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use candy::{Candy, CandyKind};
pub use clock::{Scheduled, Scheduler, Wakeup};
pub use config::{GameConfig, Rgb};
pub use engine::{FrameOutcome, GameEngine, TimerEvent};
pub use error::{ConfigError, GameError};
pub use geometry::{Grid, Point};
pub use ports::{InputPort, Presenter};
pub use snake::Snake;
pub use state::{DeathSequence, GameSession, GameState};
