//! skycast - weather, forecast and air quality in the terminal
//!
//! The binary wires these modules to a terminal; they are exposed here for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod format;
pub mod handler;
pub mod location;
pub mod model;
pub mod preferences;
pub mod reducer;
pub mod state;
