//! Cosmic Clash: the terminal-agnostic core of a vertical space shooter.
//!
//! Everything here is pure simulation.  The session advances in fixed steps
//! from a caller-supplied `dt`, takes randomness through an injected RNG and
//! never draws, so the whole campaign can run headless under test.  The
//! companion binary wires this core to a crossterm front-end.

pub mod config;
pub mod difficulty;
pub mod entities;
pub mod levels;
pub mod session;

pub use difficulty::Difficulty;
pub use session::{GameSession, GameState};
