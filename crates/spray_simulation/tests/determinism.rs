//! Тесты детерминизма
//!
//! Одинаковый seed → одинаковый spread → идентичное состояние мира

use bevy::prelude::*;
use spray_simulation::logger::LogLevel;
use spray_simulation::*;

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 600;

    // Первый прогон
    let snapshot1 = run_simulation(SEED, TICK_COUNT);

    // Второй прогон с тем же seed
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 300;

    // Запускаем 3 раза — все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    // Широкий spread: попадания зависят от seed
    let a = run_simulation(1, 300);
    let b = run_simulation(2, 300);

    assert_ne!(a, b, "Разные seed дали одинаковый разброс");
}

/// Дробовик с широким разбросом по ряду манекенов → snapshot Health
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let config = SimulationConfig {
        seed,
        log_level: LogLevel::Error,
        weapon: SprayStats {
            spread: 0.6,
            bullet_radius: 0.1,
            damage: 1.0,
            ..SprayStats::shotgun()
        },
        ..default()
    };
    let stats = config.weapon;
    let mut app = create_stepped_app(config);

    {
        let mut commands = app.world_mut().commands();
        let shooter = spawn_shooter(&mut commands, Shooter::default(), 1);
        let weapon = spawn_spray_weapon(&mut commands, stats, Some(shooter));
        commands.entity(weapon).insert(TriggerHeld);

        for i in 0..10 {
            commands.spawn((
                Transform::from_xyz(i as f32 - 4.5, 0.0, -8.0),
                Actor { faction_id: 2 },
            ));
        }
    }
    app.world_mut().flush();

    for _ in 0..tick_count {
        app.update();
    }

    world_snapshot::<Health>(app.world_mut())
}
