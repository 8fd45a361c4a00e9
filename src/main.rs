//! Aberred Motion headless runner.
//!
//! Loads a physics configuration and a scene, then runs the collision tick a
//! fixed number of times and reports where every body ended up. Useful for
//! checking scene layouts and cell sizes without a renderer.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config demos/physics.ini --scene demos/corridor.json
//! cargo run --release -- --random 500 --seed 42 --debug
//! ```

use std::path::PathBuf;

use aberredmotion::components::mapposition::MapPosition;
use aberredmotion::events::collision::observe_log_blocked;
use aberredmotion::game::{
    SceneDesc, init_physics, physics_schedule, spawn_random_bodies, spawn_scene, step,
};
use aberredmotion::resources::debugmode::DebugMode;
use aberredmotion::resources::physicsconfig::PhysicsConfig;
use aberredmotion::resources::relations::{RelationKind, Relations};
use aberredmotion::spatial::rect::Rect;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;

/// Aberred Motion 2D
#[derive(Parser)]
#[command(version, about = "Headless runner for the Aberred Motion collision tick")]
struct Cli {
    /// INI file with world bounds, cell sizes and tick length.
    #[arg(long, value_name = "PATH", default_value = "./physics.ini")]
    config: PathBuf,

    /// JSON scene to spawn.
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// Spawn this many random moving solids.
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    random: usize,

    /// Seed for --random.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Speed limit for random bodies, in units per second.
    #[arg(long, default_value_t = 120.0)]
    max_speed: f32,

    /// Number of fixed ticks to run.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Log relation counts every tick.
    #[arg(long)]
    debug: bool,

    /// Write the default configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: dump defaults and quit
    if let Some(path) = cli.write_config {
        let config = PhysicsConfig::with_path(&path);
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Physics config written to {}", path.display());
        return;
    }

    let mut config = PhysicsConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{e}; using defaults");
        config = PhysicsConfig::with_path(&cli.config);
    }

    let mut world = World::new();
    init_physics(&mut world, &config);
    if cli.debug {
        world.insert_resource(DebugMode {});
    }
    world.spawn(Observer::new(observe_log_blocked));
    world.flush();

    if let Some(path) = &cli.scene {
        match SceneDesc::load(path) {
            Ok(scene) => {
                spawn_scene(&mut world, &scene);
            }
            Err(e) => {
                eprintln!("Error loading scene {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }
    if cli.random > 0 {
        let mut rng = fastrand::Rng::with_seed(cli.seed);
        let bounds = Rect::new(
            config.world_x,
            config.world_y,
            config.world_width,
            config.world_height,
        );
        spawn_random_bodies(&mut world, &mut rng, bounds, cli.random, cli.max_speed);
    }

    let mut schedule = physics_schedule();
    log::info!(
        "Running {} ticks of {:.4}s",
        cli.ticks,
        config.fixed_delta
    );
    for _ in 0..cli.ticks {
        step(&mut world, &mut schedule, config.fixed_delta);
    }

    let relations = world.resource::<Relations>();
    log::info!(
        "Finished: {} colliding edges, {} touching edges",
        relations.count(RelationKind::Colliding),
        relations.touching_count()
    );

    let mut positions = world.query::<(Entity, &MapPosition)>();
    for (entity, position) in positions.iter(&world) {
        let coords = position.coords();
        log::info!("{:?} at ({}, {})", entity, coords.x, coords.y);
    }
}
