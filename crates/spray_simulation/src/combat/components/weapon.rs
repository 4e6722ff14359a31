//! Spray weapon component (automatic / rapid-fire hitscan)
//!
//! Architecture:
//! - `SprayStats` — tuning (reload, rate, spread, force, damage, pellets)
//! - `FireControl` — runtime state (deploy/reload таймеры)
//! - `WeaponLifecycle` — явные hooks, которые дёргает scheduler (FixedUpdate systems)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::fire_control::{FireControl, TickOutcome, WeaponPhase, WeaponStateSnapshot};
use crate::combat::hitscan::ShotRequest;
use crate::config::ConfigError;

/// Tuning spray оружия
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct SprayStats {
    /// Длительность reload (секунды)
    pub reload_time: f32,

    /// Выстрелов в секунду
    pub fire_rate: f32,

    /// Spread (0 = почти прямой выстрел)
    pub spread: f32,

    /// Сила импульса на весь выстрел (делится между pellets)
    pub force: f32,

    /// Урон одной пули
    pub damage: f32,

    /// Радиус пули для trace
    pub bullet_radius: f32,

    /// Пуль за выстрел
    pub pellets: u32,
}

impl Default for SprayStats {
    fn default() -> Self {
        Self::smg()
    }
}

impl SprayStats {
    /// Автомат: быстрый, узкий spread, одна пуля
    pub fn smg() -> Self {
        Self {
            reload_time: 3.0,
            fire_rate: 10.0,
            spread: 0.1,
            force: 1.5,
            damage: 9.0,
            bullet_radius: 3.0,
            pellets: 1,
        }
    }

    /// Дробовик: медленный, широкий spread, пачка pellets
    pub fn shotgun() -> Self {
        Self {
            reload_time: 3.0,
            fire_rate: 1.0,
            spread: 0.3,
            force: 10.0,
            damage: 6.0,
            bullet_radius: 3.0,
            pellets: 8,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, value| Err(ConfigError::InvalidWeapon { field, value });

        if !(self.reload_time.is_finite() && self.reload_time >= 0.0) {
            return invalid("reload_time", self.reload_time);
        }
        if !(self.fire_rate.is_finite() && self.fire_rate > 0.0) {
            return invalid("fire_rate", self.fire_rate);
        }
        if self.bullet_radius < 0.0 {
            return invalid("bullet_radius", self.bullet_radius);
        }
        Ok(())
    }

    /// Собрать ShotRequest из stats + глаз стрелка
    pub fn shot(&self, origin: Vec3, direction: Vec3) -> ShotRequest {
        ShotRequest {
            origin,
            direction,
            spread: self.spread,
            force: self.force,
            damage: self.damage,
            bullet_radius: self.bullet_radius,
            count: self.pellets,
        }
    }
}

/// Lifecycle hooks оружия
///
/// Вызываются caller-owned scheduler'ом (у нас — FixedUpdate systems),
/// а не неявной виртуальной диспетчеризацией движка.
pub trait WeaponLifecycle {
    /// Оружие появилось в мире
    fn on_spawn(&mut self) {}

    /// Оружие стало активным у владельца (equip / pickup)
    fn on_activate(&mut self);

    /// Один шаг симуляции
    fn on_tick(&mut self, delta: f32) -> TickOutcome;
}

/// Spray weapon entity component
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(ReplicatedWeaponState)]
pub struct SprayWeapon {
    pub stats: SprayStats,
    pub control: FireControl,
}

impl SprayWeapon {
    pub fn new(stats: SprayStats) -> Self {
        Self {
            stats,
            control: FireControl::default(),
        }
    }

    pub fn phase(&self) -> WeaponPhase {
        self.control.phase()
    }

    /// Reload (idempotent). `true` — reload стартовал сейчас
    pub fn begin_reload(&mut self) -> bool {
        self.control.begin_reload()
    }

    /// Fire rate gate
    pub fn can_primary_attack(&self) -> bool {
        self.control.can_primary_attack(self.stats.fire_rate)
    }
}

impl WeaponLifecycle for SprayWeapon {
    fn on_spawn(&mut self) {
        // Свежий экземпляр: не в reload, deploy начнётся при активации
        self.control = FireControl::default();
    }

    fn on_activate(&mut self) {
        self.control.on_deploy();
    }

    fn on_tick(&mut self, delta: f32) -> TickOutcome {
        self.control.tick(delta, self.stats.reload_time)
    }
}

/// Реплицируемое состояние оружия (state-sync boundary)
///
/// Authority: `publish_weapon_state` пишет snapshot каждый tick.
/// Observer: transport пишет сюда authoritative snapshot,
/// `mirror_weapon_state` применяет его к локальному `FireControl`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct ReplicatedWeaponState(pub WeaponStateSnapshot);
