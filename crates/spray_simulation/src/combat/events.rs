//! Combat events
//!
//! - Intents (input/AI → ECS): ReloadIntent, PickupIntent, RemoveWeaponIntent
//! - Presentation (ECS → host, fire-and-forget): ReloadStarted, WeaponFired, SurfaceImpact
//! - Outcome: ReloadFinished, DamageDealt, EntityDied
//!
//! Presentation события не упорядочены относительно друг друга.

use bevy::prelude::*;

use crate::combat::hitscan::{DamageEvent, DamageSink, HitResult, Presentation};

/// Intent: перезарядить оружие
#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadIntent {
    pub weapon: Entity,
}

/// Intent: user пытается подобрать (use) оружие
#[derive(Event, Debug, Clone, Copy)]
pub struct PickupIntent {
    pub weapon: Entity,
    pub user: Entity,
}

/// Intent: убрать оружие из мира (despawn)
#[derive(Event, Debug, Clone, Copy)]
pub struct RemoveWeaponIntent {
    pub weapon: Entity,
}

/// Presentation: reload начался (animation / sound)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ReloadStarted {
    pub weapon: Entity,
}

/// Reload закончился (hook для логики вроде магазина)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ReloadFinished {
    pub weapon: Entity,
}

/// Presentation: выстрел (muzzle flash, view kick)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WeaponFired {
    pub weapon: Entity,
    pub shooter: Option<Entity>,
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Presentation: пуля ударила поверхность (decal, particles)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceImpact {
    pub weapon: Entity,
    pub hit: HitResult,
}

/// Урон нанесён (после apply к Health)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub weapon: Entity,
    pub damage: f32,
    pub force: Vec3,
    pub impact_point: Vec3,
    pub impact_normal: Vec3,
    pub target_died: bool,
}

/// Entity умер (health <= 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Все presentation writers одним SystemParam
#[derive(bevy::ecs::system::SystemParam)]
pub struct PresentationEvents<'w> {
    pub reloads: EventWriter<'w, ReloadStarted>,
    pub fired: EventWriter<'w, WeaponFired>,
    pub impacts: EventWriter<'w, SurfaceImpact>,
}

/// Presentation collaborator поверх ECS событий для конкретного оружия
pub struct WeaponPresentation<'p, 'w> {
    pub weapon: Entity,
    pub shooter: Option<Entity>,
    pub origin: Vec3,
    pub direction: Vec3,
    pub events: &'p mut PresentationEvents<'w>,
}

impl<'p, 'w> WeaponPresentation<'p, 'w> {
    pub fn new(weapon: Entity, events: &'p mut PresentationEvents<'w>) -> Self {
        Self {
            weapon,
            shooter: None,
            origin: Vec3::ZERO,
            direction: Vec3::ZERO,
            events,
        }
    }

    /// Откуда и куда стреляют (для WeaponFired)
    pub fn aimed(mut self, shooter: Entity, origin: Vec3, direction: Vec3) -> Self {
        self.shooter = Some(shooter);
        self.origin = origin;
        self.direction = direction;
        self
    }
}

impl Presentation for WeaponPresentation<'_, '_> {
    fn on_reload_start(&mut self) {
        self.events.reloads.write(ReloadStarted {
            weapon: self.weapon,
        });
    }

    fn on_fire(&mut self) {
        self.events.fired.write(WeaponFired {
            weapon: self.weapon,
            shooter: self.shooter,
            origin: self.origin,
            direction: self.direction,
        });
    }

    fn on_surface_impact(&mut self, hit: &HitResult) {
        self.events.impacts.write(SurfaceImpact {
            weapon: self.weapon,
            hit: *hit,
        });
    }
}

/// DamageSink поверх EventWriter: урон применяет `apply_bullet_damage`
impl DamageSink for EventWriter<'_, DamageEvent> {
    fn apply_damage(&mut self, event: DamageEvent) {
        self.write(event);
    }
}

