//! ECS Components для игровых entity
//!
//! - actor: базовые характеристики (faction, health)
//!
//! Оружие и всё, что с ним связано, живёт в `crate::combat`.

pub mod actor;

pub use actor::*;
