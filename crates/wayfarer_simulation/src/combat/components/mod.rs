//! Combat components

pub mod fighter;
pub mod projectile;
pub mod target;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod fighter_tests;

// Re-export all components
pub use fighter::*;
pub use projectile::*;
pub use target::*;
