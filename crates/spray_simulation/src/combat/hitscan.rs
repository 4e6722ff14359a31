//! Spread hitscan resolution
//!
//! Архитектура:
//! - Resolver не знает про физику: trace делает внешний `HitTest` collaborator
//! - Урон уходит в `DamageSink` (только на authority)
//! - Impact effects уходят в `Presentation` (на обеих сторонах)
//!
//! Spread: сумма 4 независимых случайных unit векторов × `spread * 0.25`.
//! Сумма даёт center-weighted распределение (ближе к gaussian), а не плоское.

use bevy::prelude::*;
use rand::Rng;

use crate::config::SimulationRole;

/// Длина trace луча
pub const TRACE_DISTANCE: f32 = 5000.0;

/// Сколько случайных unit векторов суммируем для spread
pub const SPREAD_SAMPLES: usize = 4;

/// Множитель силы импульса в DamageEvent (direction × 100 × force)
pub const IMPACT_FORCE_SCALE: f32 = 100.0;

/// Запрос на выстрел (transient, живёт один fire event)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub origin: Vec3,
    /// Направление прицела (нормализуется перед использованием)
    pub direction: Vec3,
    pub spread: f32,
    pub force: f32,
    pub damage: f32,
    pub bullet_radius: f32,
    /// Пуль за выстрел (для `resolve_shots`)
    pub count: u32,
}

/// Результат trace (производит HitTest collaborator)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub point: Vec3,
    pub normal: Vec3,
    /// None = world geometry / невалидная entity
    pub entity: Option<Entity>,
    pub distance: f32,
}

/// Урон от пули (DamageSink → apply)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    pub amount: f32,
    /// direction × 100 × force
    pub force: Vec3,
    pub attacker: Option<Entity>,
    pub weapon: Entity,
    pub hit: HitResult,
}

impl DamageEvent {
    pub fn from_bullet(hit: HitResult, force: Vec3, amount: f32) -> Self {
        Self {
            amount,
            force,
            attacker: None,
            weapon: Entity::PLACEHOLDER,
            hit,
        }
    }

    pub fn with_attacker(mut self, attacker: Option<Entity>) -> Self {
        self.attacker = attacker;
        self
    }

    pub fn with_weapon(mut self, weapon: Entity) -> Self {
        self.weapon = weapon;
        self
    }
}

/// Hit-test collaborator (physics trace)
///
/// Контракт: результаты упорядочены по возрастанию distance, могут быть пустыми.
pub trait HitTest {
    fn trace(&self, origin: Vec3, end: Vec3, radius: f32) -> impl Iterator<Item = HitResult> + '_;
}

/// Damage-dispatch collaborator (вызывается только на authority)
pub trait DamageSink {
    fn apply_damage(&mut self, event: DamageEvent);
}

impl DamageSink for Vec<DamageEvent> {
    fn apply_damage(&mut self, event: DamageEvent) {
        self.push(event);
    }
}

/// Presentation collaborator: fire-and-forget уведомления
///
/// Безопасно вызывать на обеих сторонах, повторные вызовы допустимы.
pub trait Presentation {
    fn on_reload_start(&mut self) {}
    fn on_fire(&mut self) {}
    fn on_surface_impact(&mut self, _hit: &HitResult) {}
}

/// No-op presentation (headless authority без визуала)
impl Presentation for () {}

/// Кто стреляет
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotSource {
    pub attacker: Option<Entity>,
    pub weapon: Entity,
}

/// Статистика одного fire event (для логов и тестов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShotReport {
    pub traces: u32,
    pub impacts: u32,
    pub damage_events: u32,
}

impl std::ops::AddAssign for ShotReport {
    fn add_assign(&mut self, other: Self) {
        self.traces += other.traces;
        self.impacts += other.impacts;
        self.damage_events += other.damage_events;
    }
}

/// Равномерный случайный unit vector на сфере
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let phi: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(ring * phi.cos(), ring * phi.sin(), z)
}

/// Возмущённое направление выстрела (всегда unit vector).
///
/// `direction` должен быть нормализован. Отрицательный spread clamp'ится в 0.
pub fn spread_direction<R: Rng + ?Sized>(rng: &mut R, direction: Vec3, spread: f32) -> Vec3 {
    let spread = spread.max(0.0);
    let jitter: Vec3 = (0..SPREAD_SAMPLES).map(|_| random_unit_vector(rng)).sum();

    // Вырожденная сумма (огромный spread против direction) → базовое направление
    (direction + jitter * spread * 0.25).normalize_or(direction)
}

/// Spread hitscan resolver
///
/// Держит ссылки на collaborators на время одного fire event.
pub struct SpreadHitscanResolver<'a, T, D, P> {
    pub tracer: &'a T,
    pub damage: &'a mut D,
    pub presentation: &'a mut P,
    pub role: SimulationRole,
    pub source: ShotSource,
}

impl<'a, T, D, P> SpreadHitscanResolver<'a, T, D, P>
where
    T: HitTest,
    D: DamageSink,
    P: Presentation,
{
    pub fn new(
        tracer: &'a T,
        damage: &'a mut D,
        presentation: &'a mut P,
        role: SimulationRole,
        source: ShotSource,
    ) -> Self {
        Self {
            tracer,
            damage,
            presentation,
            role,
            source,
        }
    }

    /// Одна пуля: spread → trace → impact effects → damage (authority only).
    /// `shot.count` игнорируется.
    pub fn resolve_shot<R: Rng + ?Sized>(&mut self, rng: &mut R, shot: &ShotRequest) -> ShotReport {
        let mut report = ShotReport::default();

        // Precondition: caller даёт валидный origin/direction
        let Some(direction) = shot.direction.try_normalize() else {
            crate::logger::log_warning(&format!(
                "⚠️ Shot skipped: degenerate direction {:?} (weapon {:?})",
                shot.direction, self.source.weapon
            ));
            return report;
        };
        if !shot.origin.is_finite() {
            crate::logger::log_warning(&format!(
                "⚠️ Shot skipped: non-finite origin {:?} (weapon {:?})",
                shot.origin, self.source.weapon
            ));
            return report;
        }

        let forward = spread_direction(rng, direction, shot.spread);
        let end = shot.origin + forward * TRACE_DISTANCE;

        let tracer = self.tracer;
        report.traces += 1;

        for hit in tracer.trace(shot.origin, end, shot.bullet_radius) {
            self.presentation.on_surface_impact(&hit);
            report.impacts += 1;

            if !self.role.is_authority() {
                continue;
            }
            if hit.entity.is_none() {
                continue;
            }

            let event = DamageEvent::from_bullet(hit, forward * IMPACT_FORCE_SCALE * shot.force, shot.damage)
                .with_attacker(self.source.attacker)
                .with_weapon(self.source.weapon);

            self.damage.apply_damage(event);
            report.damage_events += 1;
        }

        report
    }

    /// `shot.count` пуль за один шаг. Force делится на count, damage и spread — нет.
    pub fn resolve_shots<R: Rng + ?Sized>(&mut self, rng: &mut R, shot: &ShotRequest) -> ShotReport {
        let mut report = ShotReport::default();
        if shot.count == 0 {
            return report;
        }

        let bullet = ShotRequest {
            force: shot.force / shot.count as f32,
            ..*shot
        };

        for _ in 0..shot.count {
            report += self.resolve_shot(rng, &bullet);
        }

        report
    }
}
