//! Damage application and death systems.
//!
//! `DamageEvent` (от hitscan resolver, только authority) → Health → DamageDealt / EntityDied.

use bevy::prelude::*;

use crate::combat::{DamageDealt, DamageEvent, EntityDied, HeldBy, TriggerHeld};
use crate::components::Health;

/// Компонент-маркер: entity мертв (Health <= 0)
///
/// Деспавн не автоматический — трупы остаются на месте, но в них больше не попадают.
#[derive(Component, Debug)]
pub struct Dead;

/// System: применить урон от пуль
///
/// Цель без Health (или уже мёртвая) — урон игнорируется, это не ошибка.
pub fn apply_bullet_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut targets: Query<&mut Health, Without<Dead>>,
    mut dealt_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<EntityDied>,
) {
    for event in damage_events.read() {
        let Some(target) = event.hit.entity else {
            continue;
        };

        // Self-hit не должен происходить (tracer игнорирует стрелка)
        if event.attacker == Some(target) {
            crate::logger::log_warning(&format!(
                "⚠️ SELF-HIT DETECTED! Entity {:?} hit itself!",
                target
            ));
            continue;
        }

        let Ok(mut health) = targets.get_mut(target) else {
            continue;
        };

        let was_alive = health.is_alive();
        let applied = health.take_damage(event.amount);
        let target_died = was_alive && !health.is_alive();

        dealt_events.write(DamageDealt {
            attacker: event.attacker,
            target,
            weapon: event.weapon,
            damage: applied,
            force: event.force,
            impact_point: event.hit.point,
            impact_normal: event.hit.normal,
            target_died,
        });

        crate::logger::log(&format!(
            "🎯 {:?} → {:?}: {:.1} damage (HP: {:.1}/{:.1})",
            event.attacker, target, applied, health.current, health.max
        ));

        if target_died {
            died_events.write(EntityDied {
                entity: target,
                killer: event.attacker,
            });

            crate::logger::log_info(&format!(
                "💀 Entity {:?} killed by {:?}",
                target, event.attacker
            ));
        }
    }
}

/// System: пометить мёртвых (Dead) и отпустить спусковой крючок их оружия
pub fn mark_dead(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    triggered_weapons: Query<(Entity, &HeldBy), With<TriggerHeld>>,
) {
    for event in death_events.read() {
        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
        }

        for (weapon, holder) in triggered_weapons.iter() {
            if holder.0 == event.entity {
                commands.entity(weapon).remove::<TriggerHeld>();
            }
        }
    }
}
