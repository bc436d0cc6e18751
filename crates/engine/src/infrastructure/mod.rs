//! Infrastructure: concrete adapters behind the port traits.

pub mod clock;
pub mod openai;
pub mod ports;
pub mod resilient_llm;
pub mod settings;
