//! Tests for SprayWeapon component.

#[cfg(test)]
mod tests {
    use super::super::fire_control::{TickOutcome, WeaponPhase, DEPLOY_DELAY};
    use super::super::weapon::*;
    use bevy::prelude::*;
    use crate::config::ConfigError;

    #[test]
    fn test_spray_stats_presets() {
        let smg = SprayStats::smg();
        assert_eq!(smg.reload_time, 3.0);
        assert_eq!(smg.pellets, 1);
        assert!(smg.validate().is_ok());

        let shotgun = SprayStats::shotgun();
        assert_eq!(shotgun.pellets, 8);
        assert!(shotgun.spread > smg.spread);
        assert!(shotgun.validate().is_ok());
    }

    #[test]
    fn test_spray_stats_validation() {
        let mut stats = SprayStats::smg();
        stats.fire_rate = 0.0;
        assert!(matches!(
            stats.validate(),
            Err(ConfigError::InvalidWeapon { field: "fire_rate", .. })
        ));

        let mut stats = SprayStats::smg();
        stats.reload_time = -1.0;
        assert!(matches!(
            stats.validate(),
            Err(ConfigError::InvalidWeapon { field: "reload_time", value }) if value == -1.0
        ));

        let mut stats = SprayStats::smg();
        stats.bullet_radius = -0.5;
        assert!(stats.validate().is_err());
    }

    #[test]
    fn test_shot_request_from_stats() {
        let stats = SprayStats::shotgun();
        let shot = stats.shot(Vec3::Y, Vec3::NEG_Z);

        assert_eq!(shot.origin, Vec3::Y);
        assert_eq!(shot.direction, Vec3::NEG_Z);
        assert_eq!(shot.count, 8);
        assert_eq!(shot.force, stats.force);
        assert_eq!(shot.damage, stats.damage);
    }

    #[test]
    fn test_lifecycle_activate_starts_deploy() {
        let mut weapon = SprayWeapon::new(SprayStats::smg());
        weapon.on_spawn();
        weapon.on_activate();

        assert_eq!(weapon.phase(), WeaponPhase::Deploying);
        assert_eq!(weapon.on_tick(DEPLOY_DELAY / 2.0), TickOutcome::Deploying);
        assert_eq!(weapon.on_tick(DEPLOY_DELAY), TickOutcome::Ready);
        assert_eq!(weapon.phase(), WeaponPhase::Idle);
    }

    #[test]
    fn test_lifecycle_reload_uses_stats_reload_time() {
        let mut stats = SprayStats::smg();
        stats.reload_time = 1.0;
        let mut weapon = SprayWeapon::new(stats);
        weapon.on_activate();
        weapon.on_tick(1.0);

        assert!(weapon.begin_reload());
        assert_eq!(weapon.on_tick(0.5), TickOutcome::Reloading);
        assert_eq!(weapon.on_tick(0.75), TickOutcome::ReloadFinished);
    }

    #[test]
    fn test_spawn_resets_state() {
        let mut weapon = SprayWeapon::new(SprayStats::smg());
        weapon.on_activate();
        weapon.on_tick(1.0);
        weapon.begin_reload();

        weapon.on_spawn();
        assert!(!weapon.control.reloading);
    }
}
