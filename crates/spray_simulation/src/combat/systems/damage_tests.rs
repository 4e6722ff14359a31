//! Tests for damage systems.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::{
        DamageDealt, DamageEvent, Dead, EntityDied, HeldBy, HitResult, SprayStats, SprayWeapon,
        TriggerHeld,
    };
    use crate::components::{Actor, Health};
    use crate::config::SimulationConfig;
    use crate::create_stepped_app;
    use crate::logger::LogLevel;

    #[derive(Resource, Default)]
    struct Recorded {
        dealt: Vec<DamageDealt>,
        died: Vec<EntityDied>,
    }

    fn record(
        mut recorded: ResMut<Recorded>,
        mut dealt: EventReader<DamageDealt>,
        mut died: EventReader<EntityDied>,
    ) {
        recorded.dealt.extend(dealt.read().copied());
        recorded.died.extend(died.read().copied());
    }

    fn test_app() -> App {
        let config = SimulationConfig {
            log_level: LogLevel::Warning,
            ..default()
        };
        let mut app = create_stepped_app(config);
        app.init_resource::<Recorded>()
            .add_systems(FixedPostUpdate, record);
        app
    }

    fn bullet(target: Option<Entity>, attacker: Option<Entity>, amount: f32) -> DamageEvent {
        let hit = HitResult {
            point: Vec3::new(0.0, 1.0, -10.0),
            normal: Vec3::Z,
            entity: target,
            distance: 10.0,
        };
        DamageEvent::from_bullet(hit, Vec3::NEG_Z * 150.0, amount)
            .with_attacker(attacker)
            .with_weapon(Entity::PLACEHOLDER)
    }

    fn spawn_actor(app: &mut App) -> Entity {
        app.world_mut().spawn(Actor { faction_id: 1 }).id()
    }

    #[test]
    fn test_bullet_damage_reduces_health() {
        let mut app = test_app();
        let attacker = spawn_actor(&mut app);
        let target = spawn_actor(&mut app);

        app.world_mut()
            .send_event(bullet(Some(target), Some(attacker), 9.0));
        app.update();

        let health = app.world().get::<Health>(target).unwrap();
        assert_eq!(health.current, 91.0);

        let recorded = app.world().resource::<Recorded>();
        assert_eq!(recorded.dealt.len(), 1);

        let dealt = recorded.dealt[0];
        assert_eq!(dealt.target, target);
        assert_eq!(dealt.attacker, Some(attacker));
        assert_eq!(dealt.damage, 9.0);
        assert_eq!(dealt.force, Vec3::NEG_Z * 150.0);
        assert_eq!(dealt.impact_normal, Vec3::Z);
        assert!(!dealt.target_died);
        assert!(recorded.died.is_empty());
    }

    #[test]
    fn test_lethal_damage_kills_and_marks_dead() {
        let mut app = test_app();
        let attacker = spawn_actor(&mut app);
        let target = spawn_actor(&mut app);

        app.world_mut()
            .send_event(bullet(Some(target), Some(attacker), 250.0));
        app.update();

        let recorded = app.world().resource::<Recorded>();
        // Overkill clamp: списывается только остаток HP
        assert_eq!(recorded.dealt[0].damage, 100.0);
        assert!(recorded.dealt[0].target_died);
        assert_eq!(recorded.died.len(), 1);
        assert_eq!(recorded.died[0].entity, target);
        assert_eq!(recorded.died[0].killer, Some(attacker));

        assert!(app.world().get::<Dead>(target).is_some());
    }

    #[test]
    fn test_dead_target_ignores_damage() {
        let mut app = test_app();
        let target = spawn_actor(&mut app);

        app.world_mut().send_event(bullet(Some(target), None, 150.0));
        app.update();
        app.world_mut().send_event(bullet(Some(target), None, 10.0));
        app.update();

        let recorded = app.world().resource::<Recorded>();
        assert_eq!(recorded.dealt.len(), 1);
        assert_eq!(recorded.died.len(), 1);
    }

    #[test]
    fn test_self_hit_ignored() {
        let mut app = test_app();
        let shooter = spawn_actor(&mut app);

        app.world_mut()
            .send_event(bullet(Some(shooter), Some(shooter), 50.0));
        app.update();

        assert_eq!(app.world().get::<Health>(shooter).unwrap().current, 100.0);
        assert!(app.world().resource::<Recorded>().dealt.is_empty());
    }

    #[test]
    fn test_world_hit_and_non_damageable_ignored() {
        let mut app = test_app();
        let prop = app.world_mut().spawn(Transform::default()).id();

        app.world_mut().send_event(bullet(None, None, 50.0));
        app.world_mut().send_event(bullet(Some(prop), None, 50.0));
        app.update();

        assert!(app.world().resource::<Recorded>().dealt.is_empty());
    }

    #[test]
    fn test_death_releases_trigger() {
        let mut app = test_app();
        let holder = spawn_actor(&mut app);
        let weapon = app
            .world_mut()
            .spawn((SprayWeapon::new(SprayStats::smg()), HeldBy(holder), TriggerHeld))
            .id();

        app.world_mut().send_event(bullet(Some(holder), None, 100.0));
        app.update();

        assert!(app.world().get::<Dead>(holder).is_some());
        assert!(app.world().get::<TriggerHeld>(weapon).is_none());
        // Оружие остаётся в руках трупа
        assert_eq!(app.world().get::<HeldBy>(weapon), Some(&HeldBy(holder)));
    }
}
