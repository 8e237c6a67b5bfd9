//! Combat systems (validation, fighter tick, projectiles, damage)

mod damage;
mod fighter;
mod projectile;


// Re-export all systems
pub use damage::*;
pub use fighter::*;
pub use projectile::*;
