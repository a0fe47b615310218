//! Webster headless runner
//!
//! Drives a session at the fixed tick rate with a simple autopilot standing
//! in for the player, logging events as a renderer/audio layer would see
//! them. Useful for soak-testing tuning tables.
//!
//! ```sh
//! RUST_LOG=info cargo run -- --seed 7 --ticks 7200 --tuning balance.json
//! ```

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use webster::consts::TICKS_PER_SECOND;
use webster::sim::{GameEvent, GamePhase, GameState, TetherPhase, TickInput, tick};
use webster::{ConfigError, Tuning};

#[derive(Parser, Debug)]
#[command(name = "webster", about = "Run the Webster simulation headless")]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 60 * 60)]
    ticks: u64,

    /// JSON tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    dump: bool,
}

/// Picks aim points and release timing from the current state
struct Autopilot;

impl Autopilot {
    fn input(&self, state: &GameState, now_ms: f64) -> TickInput {
        let mut input = TickInput {
            now_ms,
            ..Default::default()
        };

        match state.phase {
            GamePhase::Start => input.begin = true,
            GamePhase::GameOver => input.restart = true,
            GamePhase::Countdown => {}
            GamePhase::Playing => match state.tether_phase() {
                TetherPhase::Idle => {
                    // Aim at the first platform comfortably ahead
                    let entity = &state.entity;
                    if let Some(obs) = state.obstacles.iter().find(|o| o.x + o.width / 2.0 > entity.pos.x + 120.0) {
                        let world = Vec2::new(obs.x + obs.width / 2.0, state.wobble_top(obs));
                        input.shoot_at = Some(state.camera.world_to_screen(world));
                    }
                }
                TetherPhase::Aiming => {}
                TetherPhase::Attached => {
                    // Let go on the upswing past the anchor
                    if let Some(anchor) = state.tether.anchor() {
                        if state.entity.pos.x > anchor.x + 60.0 && state.entity.vel.y < 0.0 {
                            input.release = true;
                        }
                    }
                }
            },
        }
        input
    }
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut state = GameState::with_tuning(seed, tuning)?;
    log::info!("Webster starting with seed {}", seed);

    let autopilot = Autopilot;
    let ms_per_tick = 1000.0 / f64::from(TICKS_PER_SECOND);
    let mut runs = 0u32;
    let mut best_score = 0u64;

    for i in 0..args.ticks {
        let now_ms = i as f64 * ms_per_tick;
        let input = autopilot.input(&state, now_ms);
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::GameOver => {
                    runs += 1;
                    best_score = best_score.max(state.score);
                    log::info!("Run {} over: score {}, bonuses {}", runs, state.score, state.bonus_count);
                }
                GameEvent::PhaseChanged { .. } => {}
                other => log::debug!("{:?} at tick {}", other, state.time_ticks),
            }
        }
    }

    log::info!(
        "Simulated {} ticks: {} finished runs, best score {}, current score {}",
        args.ticks,
        runs,
        best_score.max(state.score),
        state.score
    );

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    }
    Ok(())
}
