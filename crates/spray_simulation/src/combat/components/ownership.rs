//! Ownership: кто держит оружие, откуда стреляет, можно ли подобрать.

use bevy::prelude::*;

/// Оружие в руках у entity (ActiveStart срабатывает на `Added<HeldBy>`)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct HeldBy(pub Entity);

/// Стрелок: позиция и ориентация глаз (источник hitscan)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Shooter {
    pub eye_position: Vec3,
    pub eye_rotation: Quat,
}

impl Default for Shooter {
    fn default() -> Self {
        Self {
            eye_position: Vec3::ZERO,
            eye_rotation: Quat::IDENTITY,
        }
    }
}

impl Shooter {
    pub fn new(eye_position: Vec3, eye_rotation: Quat) -> Self {
        Self {
            eye_position,
            eye_rotation,
        }
    }

    /// Стрелок смотрит в точку
    pub fn looking_at(eye_position: Vec3, target: Vec3) -> Self {
        let eye = Transform::from_translation(eye_position).looking_at(target, Vec3::Y);
        Self::new(eye_position, eye.rotation)
    }

    /// Forward глаз (Bevy convention: -Z)
    pub fn aim_direction(&self) -> Vec3 {
        self.eye_rotation * Vec3::NEG_Z
    }
}

/// Маркер: спусковой крючок зажат (выставляет input / AI слой)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TriggerHeld;

/// Pickup trigger: оружие лежит в мире и его можно подобрать.
/// Снимается при pickup.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PickupTrigger;

impl PickupTrigger {
    /// Любой user подходит
    pub fn is_usable(&self, _user: Entity) -> bool {
        true
    }

    /// Попытка использовать (подобрать) оружие.
    ///
    /// Уже есть владелец → false. Невалидный user → false.
    /// Иначе user забирает оружие.
    pub fn try_use(&self, holder: Option<&HeldBy>, user_is_valid: bool) -> bool {
        if holder.is_some() {
            return false;
        }

        user_is_valid
    }
}
