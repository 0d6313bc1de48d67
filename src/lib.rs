//! Grid-based snake with a decaying food timer and a persistent score
//! history.
//!
//! The simulation core ([`round::RoundController`]) is a discrete-time
//! state machine driven entirely by elapsed wall-clock time the host feeds
//! in; the terminal frontend, key handling, and the JSON score store are
//! thin adapters around it.

pub mod board;
pub mod config;
pub mod food;
pub mod input;
pub mod renderer;
pub mod round;
pub mod scheduler;
pub mod snake;
pub mod store;
pub mod ui;
