//! Two grid games on one deterministic core: a crate-pushing puzzle and
//! snake.
//!
//! The simulations ([`crate_sim`], [`snake`]) are plain owned state with
//! total, synchronous operations. A [`snapshot::Snapshot`] is rendered from
//! them on demand, and [`arcade::Session`] routes [`input::GameInput`]
//! commands to whichever game is active. The terminal front end lives in
//! [`renderer`], [`ui`] and [`terminal_runtime`].

pub mod arcade;
pub mod config;
pub mod crate_sim;
pub mod error;
pub mod food;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod snake;
pub mod snapshot;
pub mod terminal_runtime;
pub mod ui;
