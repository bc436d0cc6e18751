//! Whodunit Engine library.
//!
//! Server-side code for the murder mystery game.
//!
//! ## Structure
//!
//! - `use_cases/` - Case generation, dialogue, evidence, accusation and session flow
//! - `stores/` - In-memory session storage with idle eviction
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// Test fixtures shared by unit and scenario tests.
#[cfg(test)]
pub mod test_fixtures;

/// Scenario tests across the whole game flow.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
