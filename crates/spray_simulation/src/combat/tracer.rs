//! Sphere tracer — headless HitTest collaborator.
//!
//! Физический движок в симуляции не подключён, поэтому цели — сферы (`HitSphere`).
//! Луч "толстый": радиус пули добавляется к радиусу цели.

use bevy::prelude::*;

use crate::combat::hitscan::{HitResult, HitTest};

/// Hit volume цели (сфера вокруг Transform.translation)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HitSphere {
    pub radius: f32,
}

impl Default for HitSphere {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

/// Одна цель в snapshot'е tracer'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereTarget {
    /// None — статичная геометрия мира (impact без урона)
    pub entity: Option<Entity>,
    pub center: Vec3,
    pub radius: f32,
}

/// Snapshot целей на момент выстрела
#[derive(Debug, Clone, Default)]
pub struct SphereTracer {
    targets: Vec<SphereTarget>,
    ignore: Option<Entity>,
}

impl SphereTracer {
    pub fn new(targets: impl IntoIterator<Item = SphereTarget>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            ignore: None,
        }
    }

    /// Не попадать в самого стрелка
    pub fn ignoring(mut self, entity: Option<Entity>) -> Self {
        self.ignore = entity;
        self
    }

    fn intersect(origin: Vec3, dir: Vec3, max_distance: f32, target: &SphereTarget, bullet_radius: f32) -> Option<HitResult> {
        let radius = target.radius + bullet_radius.max(0.0);
        let to_center = target.center - origin;
        let along = to_center.dot(dir);
        let closest_sq = to_center.length_squared() - along * along;
        let radius_sq = radius * radius;

        if closest_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - closest_sq).max(0.0).sqrt();
        // Origin внутри сферы → hit в точке старта
        let distance = if to_center.length_squared() <= radius_sq {
            0.0
        } else {
            along - half_chord
        };

        if distance < 0.0 || distance > max_distance {
            return None;
        }

        let point = origin + dir * distance;
        let normal = (point - target.center).normalize_or(-dir);

        Some(HitResult {
            point,
            normal,
            entity: target.entity,
            distance,
        })
    }
}

impl HitTest for SphereTracer {
    fn trace(&self, origin: Vec3, end: Vec3, radius: f32) -> impl Iterator<Item = HitResult> + '_ {
        let delta = end - origin;
        let max_distance = delta.length();
        let dir = delta.normalize_or_zero();

        let mut hits: Vec<HitResult> = if dir == Vec3::ZERO {
            Vec::new()
        } else {
            self.targets
                .iter()
                .filter(|target| target.entity.is_none() || target.entity != self.ignore)
                .filter_map(|target| Self::intersect(origin, dir, max_distance, target, radius))
                .collect()
        };

        // Nearest-first
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(index: u32, center: Vec3) -> SphereTarget {
        SphereTarget {
            entity: Some(Entity::from_raw(index)),
            center,
            radius: 1.0,
        }
    }

    #[test]
    fn test_hits_sorted_by_distance() {
        let tracer = SphereTracer::new([
            target(2, Vec3::new(30.0, 0.0, 0.0)),
            target(1, Vec3::new(10.0, 0.0, 0.0)),
        ]);

        let hits: Vec<_> = tracer.trace(Vec3::ZERO, Vec3::X * 100.0, 0.0).collect();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, Some(Entity::from_raw(1)));
        assert!((hits[0].distance - 9.0).abs() < 1e-4);
        assert!((hits[1].distance - 29.0).abs() < 1e-4);
        assert!((hits[0].normal - Vec3::NEG_X).length() < 1e-4);
    }

    #[test]
    fn test_miss_outside_radius() {
        let tracer = SphereTracer::new([target(1, Vec3::new(10.0, 3.0, 0.0))]);
        assert_eq!(tracer.trace(Vec3::ZERO, Vec3::X * 100.0, 0.0).count(), 0);
    }

    #[test]
    fn test_bullet_radius_inflates_target() {
        let tracer = SphereTracer::new([target(1, Vec3::new(10.0, 3.0, 0.0))]);
        assert_eq!(tracer.trace(Vec3::ZERO, Vec3::X * 100.0, 2.5).count(), 1);
    }

    #[test]
    fn test_behind_and_beyond_are_ignored() {
        let tracer = SphereTracer::new([
            target(1, Vec3::new(-10.0, 0.0, 0.0)),
            target(2, Vec3::new(200.0, 0.0, 0.0)),
        ]);
        assert_eq!(tracer.trace(Vec3::ZERO, Vec3::X * 100.0, 0.0).count(), 0);
    }

    #[test]
    fn test_ignores_shooter() {
        let tracer = SphereTracer::new([
            target(1, Vec3::ZERO),
            target(2, Vec3::new(10.0, 0.0, 0.0)),
        ])
        .ignoring(Some(Entity::from_raw(1)));

        let hits: Vec<_> = tracer.trace(Vec3::ZERO, Vec3::X * 100.0, 0.0).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, Some(Entity::from_raw(2)));
    }

    #[test]
    fn test_world_geometry_has_no_entity() {
        let tracer = SphereTracer::new([SphereTarget {
            entity: None,
            center: Vec3::new(5.0, 0.0, 0.0),
            radius: 1.0,
        }]);

        let hits: Vec<_> = tracer.trace(Vec3::ZERO, Vec3::X * 100.0, 0.0).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, None);
    }
}
