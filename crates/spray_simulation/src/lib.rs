//! Spray Simulation Core
//!
//! Headless ECS-симуляция spray (automatic / rapid-fire) оружия на Bevy 0.16.
//!
//! - ECS = game state (fire control, ownership, health) + combat rules (spread hitscan)
//! - Host = physics trace, animation, particles, transport (через traits и события)

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;

// Re-export базовых типов для удобства
pub use combat::{
    spawn_shooter, spawn_spray_weapon, CombatPlugin, DamageDealt, DamageEvent, Dead, EntityDied,
    FireControl, HeldBy, HitResult, Shooter, ShotRequest, SprayStats, SprayWeapon, TickOutcome,
    TriggerHeld, WeaponPhase, DEPLOY_DELAY,
};
pub use components::*;
pub use config::{ConfigError, SimulationConfig, SimulationRole};
pub use logger::{log, log_error, log_info, log_warning};

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep (по умолчанию 60Hz)
            .insert_resource(Time::<Fixed>::from_hz(self.config.tick_hz))
            // Детерминистичный RNG (seed из config)
            .insert_resource(DeterministicRng::new(self.config.seed))
            .insert_resource(self.config.role)
            .insert_resource(self.config.clone())
            .add_plugins(CombatPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(SimulationConfig::default().seed)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(config: SimulationConfig) -> App {
    logger::init_logger();
    logger::set_log_level(config.log_level);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin::new(config));

    app
}

/// Headless App, где каждый `app.update()` = ровно один FixedUpdate tick
///
/// Время не берётся с часов: каждый update продвигает его на `1 / tick_hz`.
pub fn create_stepped_app(config: SimulationConfig) -> App {
    let step = Duration::from_secs_f64(1.0 / config.tick_hz);

    let mut app = create_headless_app(config);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));

    // Первый update только запускает часы (delta = 0, FixedUpdate не срабатывает)
    app.update();

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
