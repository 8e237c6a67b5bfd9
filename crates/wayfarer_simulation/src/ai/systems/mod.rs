//! AI systems (validation, decision tick, alert propagation)

pub mod alert;
pub mod decision;

// Re-export all systems
pub use alert::*;
pub use decision::*;
