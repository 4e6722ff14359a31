//! Headless симуляция spray оружия
//!
//! Стрелок с зажатым курком против ряда манекенов. 1000 тиков, потом статистика.
//! Использование: `spray_simulation [config.ron]`

use std::process::ExitCode;

use bevy::prelude::*;
use spray_simulation::combat::{ReloadIntent, WeaponFired};
use spray_simulation::*;

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };

    let stats = config.weapon;
    println!(
        "Starting spray simulation (seed: {}, role: {:?}, {} Hz)",
        config.seed, config.role, config.tick_hz
    );

    let mut app = create_stepped_app(config);

    let (weapon, dummies) = {
        let mut commands = app.world_mut().commands();
        let shooter = spawn_shooter(
            &mut commands,
            Shooter::looking_at(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.0, 1.6, -20.0)),
            1,
        );
        let weapon = spawn_spray_weapon(&mut commands, stats, Some(shooter));
        commands.entity(weapon).insert(TriggerHeld);

        let dummies: Vec<Entity> = (0..5)
            .map(|i| {
                commands
                    .spawn((
                        Transform::from_xyz(i as f32 * 0.8 - 1.6, 1.6, -20.0 - i as f32 * 5.0),
                        Actor { faction_id: 2 },
                    ))
                    .id()
            })
            .collect();

        (weapon, dummies)
    };
    app.world_mut().flush();

    let mut shots_fired = 0usize;

    for tick in 0..1000 {
        // Каждые 4 секунды — reload
        if tick % 240 == 239 {
            app.world_mut().send_event(ReloadIntent { weapon });
        }

        app.update();

        shots_fired += app
            .world()
            .resource::<Events<WeaponFired>>()
            .iter_current_update_events()
            .count();

        if tick % 100 == 0 {
            let alive = dummies
                .iter()
                .filter(|&&dummy| app.world().get::<Dead>(dummy).is_none())
                .count();
            println!("Tick {}: {} shots fired, {} dummies alive", tick, shots_fired, alive);
        }
    }

    println!("Simulation complete! {} shots fired", shots_fired);
    ExitCode::SUCCESS
}
