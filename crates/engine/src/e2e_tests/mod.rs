//! End-to-end game tests.
//!
//! These drive a complete `App` through the session orchestrator using:
//! - The hand-built three-suspect case (Basil is guilty)
//! - A scripted LLM
//! - A manual clock, so idle eviction happens on demand
//!
//! # Running
//!
//! ```bash
//! cargo test -p whodunit-engine --lib e2e_tests
//! ```

mod concurrency_tests;
mod e2e_helpers;
mod gameplay_flow_tests;

pub use e2e_helpers::*;
