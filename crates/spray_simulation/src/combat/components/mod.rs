//! Combat components

pub mod fire_control;
pub mod ownership;
pub mod weapon;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod weapon_tests;

// Re-export all components
pub use fire_control::*;
pub use ownership::*;
pub use weapon::*;
