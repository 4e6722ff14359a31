//! Fire control: deploy lockout + reload timing.
//!
//! State machine:
//! ```text
//! Deploying ──(since_deployed >= DEPLOY_DELAY)──▶ Idle
//! Idle ──(begin_reload)──▶ Reloading
//! Reloading ──(since_reload > reload_time)──▶ Idle
//! ```
//! Reload нельзя отменить. Повторный `begin_reload` во время reload — no-op.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Задержка после активации оружия (draw animation lockout), секунды
pub const DEPLOY_DELAY: f32 = 0.6;

/// Текущая фаза оружия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum WeaponPhase {
    Deploying,
    Idle,
    Reloading,
}

/// Результат одного tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Deploy lockout ещё активен — ничего не делаем (reload тоже не завершается)
    Deploying,
    /// Можно выполнять fire path
    Ready,
    /// Reload в процессе
    Reloading,
    /// Reload завершился на этом tick (hook on_reload_finish)
    ReloadFinished,
}

/// Состояние оружия (WeaponState): таймеры "time since" + флаг reload
///
/// Владелец — один экземпляр оружия. Мутируется только через
/// `tick` / `begin_reload` / `on_deploy`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct FireControl {
    /// Секунд с начала reload
    pub since_reload: f32,

    pub reloading: bool,

    /// Секунд с момента активации (deploy)
    pub since_deployed: f32,

    /// Секунд с последнего выстрела (fire rate gate)
    pub since_primary_attack: f32,
}

impl Default for FireControl {
    fn default() -> Self {
        Self {
            since_reload: 0.0,
            reloading: false,
            since_deployed: 0.0,
            // Ещё не стреляли — первый выстрел доступен сразу после deploy
            since_primary_attack: f32::MAX,
        }
    }
}

impl FireControl {
    /// Оружие только что стало активным: сброс deploy таймера
    pub fn on_deploy(&mut self) {
        self.since_deployed = 0.0;
    }

    /// Начать reload. Возвращает `true` если reload действительно стартовал
    /// (вызывающий сигналит presentation только в этом случае).
    pub fn begin_reload(&mut self) -> bool {
        if self.reloading {
            return false;
        }

        self.since_reload = 0.0;
        self.reloading = true;
        true
    }

    /// Deploy lockout закончился?
    pub fn is_deployed(&self) -> bool {
        self.since_deployed >= DEPLOY_DELAY
    }

    pub fn phase(&self) -> WeaponPhase {
        if !self.is_deployed() {
            WeaponPhase::Deploying
        } else if self.reloading {
            WeaponPhase::Reloading
        } else {
            WeaponPhase::Idle
        }
    }

    /// Один шаг симуляции: продвигаем таймеры на `delta` и вычисляем outcome
    pub fn tick(&mut self, delta: f32, reload_time: f32) -> TickOutcome {
        let delta = delta.max(0.0);
        self.since_deployed += delta;
        self.since_primary_attack += delta;
        if self.reloading {
            self.since_reload += delta;
        }

        if !self.is_deployed() {
            return TickOutcome::Deploying;
        }

        if !self.reloading {
            return TickOutcome::Ready;
        }

        if self.since_reload > reload_time {
            self.on_reload_finish();
            return TickOutcome::ReloadFinished;
        }

        TickOutcome::Reloading
    }

    fn on_reload_finish(&mut self) {
        self.reloading = false;
    }

    /// Fire rate gate: прошло ли `1 / fire_rate` секунд с прошлого выстрела
    pub fn can_primary_attack(&self, fire_rate: f32) -> bool {
        if fire_rate <= 0.0 {
            return false;
        }
        self.since_primary_attack >= 1.0 / fire_rate
    }

    pub fn on_primary_attack(&mut self) {
        self.since_primary_attack = 0.0;
    }

    /// Snapshot для зеркалирования на observers
    pub fn snapshot(&self) -> WeaponStateSnapshot {
        WeaponStateSnapshot {
            since_reload: self.since_reload,
            reloading: self.reloading,
            since_deployed: self.since_deployed,
        }
    }

    /// Применить authoritative snapshot (observer side).
    /// `since_primary_attack` локальный — не реплицируется.
    pub fn apply_snapshot(&mut self, snapshot: &WeaponStateSnapshot) {
        self.since_reload = snapshot.since_reload;
        self.reloading = snapshot.reloading;
        self.since_deployed = snapshot.since_deployed;
    }
}

/// Реплицируемая часть состояния оружия
///
/// Контракт: authority публикует snapshot каждый tick,
/// observers перезаписывают им свой локальный `FireControl` перед prediction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
pub struct WeaponStateSnapshot {
    pub since_reload: f32,
    pub reloading: bool,
    pub since_deployed: f32,
}
