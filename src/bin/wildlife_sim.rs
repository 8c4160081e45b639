//! Headless Wildlife Simulation
//!
//! Spawns a wolf pack and a deer herd around a hunter and runs the behavior
//! core for a fixed number of ticks. Outputs a summary of final modes.

use clap::Parser;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use wildlife_ai::core::types::{ActorId, Species, TargetRef};
use wildlife_ai::health::{Damage, DamageOutcome, DamageSource};
use wildlife_ai::world::{
    ActorEvent, ActorSnapshot, Deterrent, DeterrentKind, OpenNavigation, PackStatus, PackTable,
    PlayerSnapshot, RecordingPresentation, SnapshotWorld,
};
use wildlife_ai::{Actor, Mode, SettingsCatalog, SimulationClock, SpawnContext, TickContext};

/// Headless wildlife simulation
#[derive(Parser, Debug)]
#[command(name = "wildlife_sim")]
#[command(about = "Run wildlife actors against a stationary hunter and report outcomes")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Seconds per tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Real seconds per in-world day
    #[arg(long, default_value_t = 3600.0)]
    day_length: f32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Wolves in the pack
    #[arg(long, default_value_t = 3)]
    wolves: usize,

    /// Deer in the herd
    #[arg(long, default_value_t = 6)]
    deer: usize,

    /// The hunter shoots the nearest animal every this many ticks (0 disables)
    #[arg(long, default_value_t = 50)]
    shot_interval: u64,

    /// The hunter carries a lit torch
    #[arg(long)]
    torch: bool,

    /// TOML overlay for species settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct ActorSummary {
    id: String,
    species: Species,
    mode: Mode,
    health: f32,
    bleeding_out: bool,
}

#[derive(Serialize)]
struct SimulationResult {
    ticks: u64,
    seed: u64,
    elapsed_seconds: f64,
    mode_changes: usize,
    deaths: usize,
    player_kills: usize,
    final_modes: BTreeMap<String, usize>,
    actors: Vec<ActorSummary>,
}

const HUNTER_POSITION: Vec3 = Vec3::ZERO;
const SHOT_RANGE: f32 = 40.0;
const SHOT_DAMAGE: f32 = 30.0;
const SHOT_BLEED_MINUTES: f32 = 45.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let catalog = match &args.config {
        Some(path) => SettingsCatalog::load(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load '{}': {}", path.display(), e);
            eprintln!("Using built-in species settings");
            SettingsCatalog::with_defaults()
        }),
        None => SettingsCatalog::with_defaults(),
    };

    let mut clock = SimulationClock::new(args.day_length);
    let mut pack = PackTable::new();
    let mut presentation = RecordingPresentation::new();
    let navigation = OpenNavigation::default();

    let mut actors = Vec::with_capacity(args.wolves + args.deer);
    let roster = std::iter::repeat(Species::Wolf)
        .take(args.wolves)
        .chain(std::iter::repeat(Species::Deer).take(args.deer));
    for (index, species) in roster.enumerate() {
        let id = ActorId::from_index(index as u128 + 1);
        let mut actor = Actor::from_catalog(id, species, &catalog);
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = rng.gen_range(20.0..60.0);
        let position = Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance);
        actor.initialize(
            &clock,
            SpawnContext {
                position,
                forward: HUNTER_POSITION - position,
                initial_mode: Mode::Wander,
                default_mode: Mode::Wander,
                seed: rng.gen(),
            },
        );
        if species == Species::Wolf {
            pack.join(id, PackStatus::default());
        }
        actors.push(actor);
    }

    tracing::info!(seed, actors = actors.len(), "starting wildlife simulation");

    for tick in 0..args.ticks {
        let time = clock.advance(args.dt);
        let world = snapshot_world(&actors, args.torch);

        for actor in actors.iter_mut() {
            let mut ctx = TickContext::new(time, &world, &navigation, &mut pack, &mut presentation);
            actor.update(&mut ctx);
        }

        if args.shot_interval > 0 && tick > 0 && tick % args.shot_interval == 0 {
            let mut ctx = TickContext::new(time, &world, &navigation, &mut pack, &mut presentation);
            shoot_nearest(&mut actors, &mut ctx);
        }

        for (id, motion) in presentation.motions.drain(..) {
            if let Some(actor) = actors.iter_mut().find(|a| a.id() == id) {
                let position = actor.position() + motion.heading * motion.speed * time.delta_seconds;
                let forward = if motion.heading == Vec3::ZERO {
                    actor.forward()
                } else {
                    motion.heading
                };
                actor.set_transform(position, forward);
            }
        }
    }

    let result = summarize(&actors, &presentation, args.ticks, seed, clock.now());

    match args.format.as_str() {
        "text" => print_text(&result),
        "json" => print_json(&result),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            print_json(&result);
        }
    }
}

fn snapshot_world(actors: &[Actor], torch: bool) -> SnapshotWorld {
    let mut world = SnapshotWorld::new();
    for actor in actors {
        world.insert_actor(ActorSnapshot {
            id: actor.id(),
            species: actor.species(),
            position: actor.position(),
            is_dead: actor.is_dead(),
            vulnerable: actor.health.wounded,
        });
    }
    world.player = Some(PlayerSnapshot::at(HUNTER_POSITION));
    if torch {
        world.deterrents.push(Deterrent {
            kind: DeterrentKind::Torch,
            position: HUNTER_POSITION,
            held: true,
        });
    }
    world
}

fn shoot_nearest(actors: &mut [Actor], ctx: &mut TickContext<'_>) {
    let nearest = actors
        .iter_mut()
        .filter(|a| !a.is_dead() && a.position().distance(HUNTER_POSITION) <= SHOT_RANGE)
        .min_by(|a, b| {
            a.position()
                .distance_squared(HUNTER_POSITION)
                .total_cmp(&b.position().distance_squared(HUNTER_POSITION))
        });

    let Some(actor) = nearest else {
        return;
    };

    let damage = Damage::new(SHOT_DAMAGE, DamageSource::Player).with_bleed_out(SHOT_BLEED_MINUTES);
    let outcome = actor.apply_damage(damage, ctx);
    if outcome != DamageOutcome::Rejected {
        tracing::info!(actor = %actor.id(), species = ?actor.species(), ?outcome, "hunter fired");
    }
    if actor.current_target().is_none() {
        actor.set_target(Some(TargetRef::Player));
    }
}

fn summarize(
    actors: &[Actor],
    presentation: &RecordingPresentation,
    ticks: u64,
    seed: u64,
    elapsed_seconds: f64,
) -> SimulationResult {
    let mut final_modes = BTreeMap::new();
    for actor in actors {
        *final_modes
            .entry(format!("{:?}", actor.current_mode()))
            .or_insert(0) += 1;
    }

    let count = |predicate: fn(&ActorEvent) -> bool| {
        presentation
            .events
            .iter()
            .filter(|(_, event)| predicate(event))
            .count()
    };

    SimulationResult {
        ticks,
        seed,
        elapsed_seconds,
        mode_changes: count(|e| matches!(e, ActorEvent::ModeChanged { .. })),
        deaths: actors.iter().filter(|a| a.is_dead()).count(),
        player_kills: count(|e| matches!(e, ActorEvent::KilledByPlayer { .. })),
        final_modes,
        actors: actors
            .iter()
            .map(|a| ActorSummary {
                id: a.id().to_string(),
                species: a.species(),
                mode: a.current_mode(),
                health: a.health.current,
                bleeding_out: a.health.bleeding_out,
            })
            .collect(),
    }
}

fn print_json(result: &SimulationResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize result: {}", e),
    }
}

fn print_text(result: &SimulationResult) {
    println!("Wildlife Simulation");
    println!("===================");
    println!("Ticks: {} ({:.1}s simulated)", result.ticks, result.elapsed_seconds);
    println!("Mode changes: {}", result.mode_changes);
    println!("Deaths: {} ({} by player)", result.deaths, result.player_kills);
    println!();
    println!("Final modes:");
    for (mode, count) in &result.final_modes {
        println!("  {:<16} {}", mode, count);
    }
    println!();
    for actor in &result.actors {
        println!(
            "  {:?} {} mode={:?} health={:.1}{}",
            actor.species,
            actor.id,
            actor.mode,
            actor.health,
            if actor.bleeding_out { " (bleeding)" } else { "" }
        );
    }
    println!();
    println!("Seed: {}", result.seed);
}
