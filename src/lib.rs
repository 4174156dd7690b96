//! Riverlands - tile-based exploration and turn-based battles.
//!
//! The simulation core (exploration, battle, progression, menu and the scene
//! coordinator) is pure over injected time, input and randomness. The
//! terminal front end in `ui` and the binaries only feed it and draw it.

pub mod battle;
pub mod core;
pub mod data;
pub mod exploration;
pub mod input;
pub mod logging;
pub mod menu;
pub mod progression;
pub mod scene;
pub mod ui;
