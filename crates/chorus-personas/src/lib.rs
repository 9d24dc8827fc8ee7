//! Automated board participants: the fixed personality roster, the canned
//! replies used when generation is unavailable, and the chat prompt each
//! personality is driven with.

pub mod prompt;
pub mod registry;
pub mod templates;

pub use registry::{Personality, PersonalityRegistry, Style};
