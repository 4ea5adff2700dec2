//! Pokemon browser TUI
//!
//! Paginated PokeAPI listing with debounced local search. The library exposes
//! the store pieces (state, actions, reducer) and the fetcher for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod state;
