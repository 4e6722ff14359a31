//! Weapon state sync (authority → observers).
//!
//! Transport вне симуляции: он читает `ReplicatedWeaponState` на authority
//! и пишет его в тот же component на observer.

use bevy::prelude::*;

use crate::combat::{ReplicatedWeaponState, SprayWeapon};
use crate::config::SimulationRole;

/// Run condition: этот инстанс authoritative
pub fn is_authority(role: Res<SimulationRole>) -> bool {
    role.is_authority()
}

/// Run condition: этот инстанс — observer / replica
pub fn is_observer(role: Res<SimulationRole>) -> bool {
    !role.is_authority()
}

/// System (authority): snapshot FireControl → ReplicatedWeaponState
pub fn publish_weapon_state(mut weapons: Query<(&SprayWeapon, &mut ReplicatedWeaponState)>) {
    for (weapon, mut replicated) in weapons.iter_mut() {
        let snapshot = weapon.control.snapshot();
        // Не трогаем change detection если ничего не поменялось
        if replicated.0 != snapshot {
            replicated.0 = snapshot;
        }
    }
}

/// System (observer): пришедший snapshot → локальный FireControl
pub fn mirror_weapon_state(
    mut weapons: Query<(&mut SprayWeapon, &ReplicatedWeaponState), Changed<ReplicatedWeaponState>>,
) {
    for (mut weapon, replicated) in weapons.iter_mut() {
        weapon.control.apply_snapshot(&replicated.0);
    }
}
