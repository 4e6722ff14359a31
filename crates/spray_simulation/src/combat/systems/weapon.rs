//! Weapon systems (spawn, pickup, activation, reload, fire).

use bevy::prelude::*;

use crate::combat::{
    DamageEvent, HeldBy, HitSphere, PickupIntent, PickupTrigger, PresentationEvents,
    ReloadFinished, ReloadIntent, RemoveWeaponIntent, Shooter, ShotSource, SphereTarget,
    SphereTracer, SprayWeapon, SpreadHitscanResolver, TickOutcome, TriggerHeld, WeaponLifecycle,
    WeaponPresentation,
};
use crate::combat::hitscan::Presentation;
use crate::combat::systems::Dead;
use crate::config::SimulationRole;
use crate::DeterministicRng;

/// System: spawn hook (Spawn)
///
/// Новое оружие получает `on_spawn`. Лежащее в мире (без владельца) — PickupTrigger.
pub fn init_spawned_weapons(
    mut commands: Commands,
    mut weapons: Query<(Entity, &mut SprayWeapon, Has<HeldBy>), Added<SprayWeapon>>,
) {
    for (entity, mut weapon, held) in weapons.iter_mut() {
        weapon.on_spawn();

        if !held {
            commands.entity(entity).insert(PickupTrigger);
        }

        crate::logger::log(&format!(
            "🔫 Spray weapon {:?} spawned (held: {}, pellets: {})",
            entity, held, weapon.stats.pellets
        ));
    }
}

/// System: удалить оружие из мира
pub fn process_remove_intents(
    mut commands: Commands,
    mut intents: EventReader<RemoveWeaponIntent>,
    weapons: Query<(), With<SprayWeapon>>,
) {
    let mut removed: Vec<Entity> = Vec::new();

    for intent in intents.read() {
        if removed.contains(&intent.weapon) || !weapons.contains(intent.weapon) {
            continue;
        }

        commands.entity(intent.weapon).despawn();
        removed.push(intent.weapon);

        crate::logger::log(&format!("🗑️ Weapon {:?} removed", intent.weapon));
    }
}

/// System: pickup (use) оружия
///
/// Оружие с владельцем не подбирается. Невалидный user (не Shooter / мёртв) — тоже.
/// Два user'а в один tick — побеждает первый intent.
pub fn process_pickup_intents(
    mut commands: Commands,
    mut intents: EventReader<PickupIntent>,
    weapons: Query<(Option<&HeldBy>, &PickupTrigger), With<SprayWeapon>>,
    users: Query<(), (With<Shooter>, Without<Dead>)>,
) {
    let mut claimed: Vec<Entity> = Vec::new();

    for intent in intents.read() {
        let Ok((holder, trigger)) = weapons.get(intent.weapon) else {
            crate::logger::log(&format!(
                "Pickup ignored: weapon {:?} is not lying in the world",
                intent.weapon
            ));
            continue;
        };

        if claimed.contains(&intent.weapon) || !trigger.is_usable(intent.user) {
            continue;
        }

        if !trigger.try_use(holder, users.contains(intent.user)) {
            crate::logger::log(&format!(
                "Pickup rejected: user {:?} can't take weapon {:?}",
                intent.user, intent.weapon
            ));
            continue;
        }

        commands
            .entity(intent.weapon)
            .insert(HeldBy(intent.user))
            .remove::<PickupTrigger>();
        claimed.push(intent.weapon);

        crate::logger::log_info(&format!(
            "✋ User {:?} picked up weapon {:?}",
            intent.user, intent.weapon
        ));
    }
}

/// System: активация (ActiveStart) — стартует deploy lockout
pub fn activate_held_weapons(mut weapons: Query<(Entity, &mut SprayWeapon, &HeldBy), Added<HeldBy>>) {
    for (entity, mut weapon, holder) in weapons.iter_mut() {
        weapon.on_activate();

        crate::logger::log(&format!(
            "Weapon {:?} deployed by {:?}",
            entity, holder.0
        ));
    }
}

/// System: reload intents
///
/// Повторный intent во время reload — no-op (без presentation).
pub fn process_reload_intents(
    mut intents: EventReader<ReloadIntent>,
    mut weapons: Query<&mut SprayWeapon>,
    mut presentation: PresentationEvents,
) {
    for intent in intents.read() {
        let Ok(mut weapon) = weapons.get_mut(intent.weapon) else {
            continue;
        };

        if !weapon.begin_reload() {
            continue;
        }

        WeaponPresentation::new(intent.weapon, &mut presentation).on_reload_start();

        crate::logger::log(&format!(
            "🔄 Weapon {:?} reloading ({}s)",
            intent.weapon, weapon.stats.reload_time
        ));
    }
}

/// System: tick оружия в руках + fire path
///
/// 1. `on_tick` (deploy lockout / reload finish)
/// 2. Ready + TriggerHeld + fire rate → WeaponFired + spread hitscan по всем pellets
///
/// Цели снимаются один раз на tick: все выстрелы tick'а видят одно состояние мира.
/// Трупы (`Dead`) остаются в scene: пули дают по ним impact, урон отсекает `apply_bullet_damage`.
pub fn simulate_spray_weapons(
    mut weapons: Query<(Entity, &mut SprayWeapon, &HeldBy, Has<TriggerHeld>)>,
    shooters: Query<&Shooter>,
    targets: Query<(Entity, &Transform, &HitSphere)>,
    time: Res<Time>,
    role: Res<SimulationRole>,
    mut rng: ResMut<DeterministicRng>,
    mut damage_events: EventWriter<DamageEvent>,
    mut finished_events: EventWriter<ReloadFinished>,
    mut presentation: PresentationEvents,
) {
    let delta = time.delta_secs();

    let scene: Vec<SphereTarget> = targets
        .iter()
        .map(|(entity, transform, sphere)| SphereTarget {
            entity: Some(entity),
            center: transform.translation,
            radius: sphere.radius,
        })
        .collect();

    for (weapon_entity, mut weapon, holder, trigger_held) in weapons.iter_mut() {
        match weapon.on_tick(delta) {
            TickOutcome::Deploying | TickOutcome::Reloading => continue,
            TickOutcome::ReloadFinished => {
                finished_events.write(ReloadFinished {
                    weapon: weapon_entity,
                });
                crate::logger::log(&format!("✅ Weapon {:?} reload finished", weapon_entity));
                continue;
            }
            TickOutcome::Ready => {}
        }

        if !trigger_held || !weapon.can_primary_attack() {
            continue;
        }

        // Holder без глаз (despawned / не Shooter) — стрелять неоткуда
        let Ok(shooter) = shooters.get(holder.0) else {
            crate::logger::log_warning(&format!(
                "⚠️ Weapon {:?}: holder {:?} is not a valid shooter",
                weapon_entity, holder.0
            ));
            continue;
        };

        weapon.control.on_primary_attack();

        let shot = weapon.stats.shot(shooter.eye_position, shooter.aim_direction());
        let tracer = SphereTracer::new(scene.iter().copied()).ignoring(Some(holder.0));

        let mut fx = WeaponPresentation::new(weapon_entity, &mut presentation).aimed(
            holder.0,
            shot.origin,
            shot.direction,
        );
        fx.on_fire();

        let report = SpreadHitscanResolver::new(
            &tracer,
            &mut damage_events,
            &mut fx,
            *role,
            ShotSource {
                attacker: Some(holder.0),
                weapon: weapon_entity,
            },
        )
        .resolve_shots(&mut rng.rng, &shot);

        crate::logger::log(&format!(
            "💥 Weapon {:?} fired: {} traces, {} impacts, {} damage events",
            weapon_entity, report.traces, report.impacts, report.damage_events
        ));
    }
}
