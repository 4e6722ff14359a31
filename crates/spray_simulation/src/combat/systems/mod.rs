//! Combat systems (FixedUpdate, chained в CombatPlugin)

pub mod damage;
pub mod sync;
pub mod weapon;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod damage_tests;

// Re-export all systems
pub use damage::*;
pub use sync::*;
pub use weapon::*;
