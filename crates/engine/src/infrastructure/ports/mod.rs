//! Port traits for infrastructure boundaries.
//!
//! Use cases depend on these traits, never on concrete clients, so tests can swap in
//! scripted models and manual clocks.

mod environment;
mod error;
mod llm;

pub use environment::{ClockPort, RandomPort};
pub use error::LlmError;
pub use llm::{ChatMessage, LlmPort, LlmRequest, LlmResponse, MessageRole};

#[cfg(test)]
pub use environment::MockClockPort;
#[cfg(test)]
pub use llm::MockLlmPort;
