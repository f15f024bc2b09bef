//! Torus Snake - Snake on a wrap-around grid
//!
//! This library provides:
//! - Core game logic: geometry, snake, candy, state machine and frame engine (game module)
//! - Keyboard input adapter (input module)
//! - TUI rendering (render module)
//! - Session clock and counters for the score board (metrics module)
//! - The interactive terminal driver (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
