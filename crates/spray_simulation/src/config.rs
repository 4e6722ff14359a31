//! Конфигурация симуляции (RON)
//!
//! Пример `simulation.ron`:
//! ```ron
//! (
//!     seed: 42,
//!     tick_hz: 60.0,
//!     role: Authority,
//!     log_level: Info,
//!     weapon: (reload_time: 3.0, fire_rate: 10.0, spread: 0.1),
//! )
//! ```
//! Все поля опциональны — отсутствующие берутся из `Default`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::combat::SprayStats;
use crate::logger::LogLevel;

/// Ошибки загрузки конфигурации
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("tick_hz must be positive, got {0}")]
    InvalidTickRate(f64),

    #[error("invalid weapon stats: {field} = {value}")]
    InvalidWeapon { field: &'static str, value: f32 },
}

/// Роль инстанса симуляции
///
/// Authority — канонический результат (применяет урон).
/// Observer — реплика: только impact effects, состояние оружия зеркалится с authority.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimulationRole {
    #[default]
    Authority,
    Observer,
}

impl SimulationRole {
    pub fn is_authority(&self) -> bool {
        matches!(self, SimulationRole::Authority)
    }
}

/// Корневой config (insert как Resource в `create_headless_app`)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed для `DeterministicRng`
    pub seed: u64,

    /// Частота FixedUpdate (Гц)
    pub tick_hz: f64,

    pub role: SimulationRole,

    pub log_level: LogLevel,

    /// Stats оружия по умолчанию (для headless demo и spawn helpers)
    pub weapon: SprayStats,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_hz: 60.0,
            role: SimulationRole::Authority,
            log_level: LogLevel::Debug,
            weapon: SprayStats::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            return Err(ConfigError::InvalidTickRate(self.tick_hz));
        }
        self.weapon.validate()
    }
}
