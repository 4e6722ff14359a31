//! Combat module: spray weapons (hitscan)
//!
//! ECS ответственность:
//! - Weapon state: FireControl (deploy lockout, reload), fire rate
//! - Combat rules: spread sampling, hitscan resolution, damage application
//! - Events: presentation (ReloadStarted / WeaponFired / SurfaceImpact), DamageDealt, EntityDied
//!
//! Host ответственность (вне симуляции):
//! - Animation, particles, view model — слушают presentation события
//! - Transport — переносит ReplicatedWeaponState authority → observers

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod hitscan;
pub mod systems;
pub mod tracer;

// Re-export основных типов
pub use components::*;
pub use events::*;
pub use hitscan::{
    spread_direction, DamageEvent, DamageSink, HitResult, HitTest, Presentation, ShotReport,
    ShotRequest, ShotSource, SpreadHitscanResolver,
};
pub use systems::Dead;
pub use tracer::{HitSphere, SphereTarget, SphereTracer};

use crate::config::SimulationRole;
use crate::DeterministicRng;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. mirror_weapon_state — (observer) authoritative snapshot → FireControl
/// 2. init_spawned_weapons — on_spawn + PickupTrigger
/// 3. process_remove_intents / process_pickup_intents — ownership
/// 4. activate_held_weapons — on_activate (deploy lockout)
/// 5. process_reload_intents — begin_reload + ReloadStarted
/// 6. simulate_spray_weapons — tick + fire (spread hitscan)
/// 7. apply_bullet_damage / mark_dead — Health, DamageDealt, EntityDied
/// 8. publish_weapon_state — (authority) FireControl → snapshot
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationRole>()
            .init_resource::<DeterministicRng>();

        // Регистрация событий
        app.add_event::<ReloadIntent>()
            .add_event::<PickupIntent>()
            .add_event::<RemoveWeaponIntent>()
            .add_event::<ReloadStarted>()
            .add_event::<ReloadFinished>()
            .add_event::<WeaponFired>()
            .add_event::<SurfaceImpact>()
            .add_event::<DamageEvent>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.register_type::<SprayWeapon>()
            .register_type::<HeldBy>()
            .register_type::<Shooter>()
            .register_type::<HitSphere>();

        app.add_systems(
            FixedUpdate,
            (
                systems::mirror_weapon_state.run_if(systems::is_observer),
                systems::init_spawned_weapons,
                systems::process_remove_intents,
                systems::process_pickup_intents,
                systems::activate_held_weapons,
                systems::process_reload_intents,
                systems::simulate_spray_weapons,
                systems::apply_bullet_damage,
                systems::mark_dead,
                systems::publish_weapon_state.run_if(systems::is_authority),
            )
                .chain(), // Последовательное выполнение
        );
    }
}

/// Spawn helper: стрелок (Actor + Shooter)
pub fn spawn_shooter(commands: &mut Commands, shooter: Shooter, faction_id: u64) -> Entity {
    commands
        .spawn((
            Transform::from_translation(shooter.eye_position),
            crate::components::Actor { faction_id },
            shooter,
        ))
        .id()
}

/// Spawn helper: оружие (в руках у `holder`, либо лежащее в мире)
pub fn spawn_spray_weapon(commands: &mut Commands, stats: SprayStats, holder: Option<Entity>) -> Entity {
    let mut weapon = commands.spawn(SprayWeapon::new(stats));
    if let Some(holder) = holder {
        weapon.insert(HeldBy(holder));
    }
    weapon.id()
}
