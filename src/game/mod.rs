//! Core game module containing shared values, resources, events, and constants.

mod components;
mod config;
mod constants;
mod events;
mod geometry;
mod resources;

pub use components::*;
pub use config::*;
pub use constants::*;
pub use events::*;
pub use geometry::*;
pub use resources::*;
