//! AI components

pub mod controller;
pub mod patrol;


// Re-export all components
pub use controller::*;
pub use patrol::*;
