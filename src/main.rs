use anyhow::Result;
use clap::Parser;
use std::time::{Duration, Instant};

use time_trial::simulation::{Circuit, DemoDriver, KinematicCar, RaceSession};

#[derive(Parser)]
#[command(name = "time_trial")]
#[command(about = "Time trial racing demo with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "3600")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    delta: f32,

    /// Seed for the scripted driver's reaction jitter
    #[arg(long, default_value = "7")]
    seed: u64,

    /// Pace ticks in wall-clock time and time laps with the 1ms timer thread
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui();
        }
        #[cfg(not(feature = "ui"))]
        {
            anyhow::bail!("UI feature is not enabled. Rebuild with --features ui");
        }
    } else {
        // Bevy installs its own logger in UI mode
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("warn,time_trial=info"),
        )
        .init();
        run_headless(cli.ticks, cli.delta, cli.seed, cli.realtime)?;
    }

    Ok(())
}

/// Run a scripted drive around the test circuit (no graphics)
fn run_headless(ticks: u32, delta: f32, seed: u64, realtime: bool) -> Result<()> {
    let tick_duration = match Duration::try_from_secs_f32(delta) {
        Ok(duration) if !duration.is_zero() => duration,
        _ => anyhow::bail!("--delta must be a positive number of seconds, got {}", delta),
    };

    println!("Running time trial in headless mode...");
    println!("Ticks: {}, Delta: {:.4}s, Seed: {}", ticks, delta, seed);

    // Calculate how many ticks equal 1 second of simulation time
    let ticks_per_second = (1.0 / delta).ceil() as u32;
    println!(
        "Lap clock: {}",
        if realtime {
            "1ms timer thread (real time)"
        } else {
            "simulation tick"
        }
    );
    println!();

    let circuit = Circuit::default();
    let (start, yaw) = circuit.start_position();
    let mut car = KinematicCar::new(start, yaw);
    let mut driver = DemoDriver::new(&circuit, seed);
    let mut session = if realtime {
        RaceSession::with_timer()
    } else {
        RaceSession::simulated()
    };

    for tick in 1..=ticks {
        let started = Instant::now();

        for event in driver.drive(&car) {
            session.apply_input(event);
        }

        let output = session.tick(delta, &car.snapshot())?;
        output.apply_to(&mut car);
        car.integrate(delta);

        for best in session.drain_best_lap_events() {
            println!("*** New Lap Record! {} ***", best.formatted);
        }

        // Print a status line after every second of simulated time
        if tick % ticks_per_second == 0 {
            let hud = session.hud();
            println!(
                "--- {:.1}s | {} | current {} | best {} | {} MPH ---",
                tick as f32 * delta,
                hud.lap_label,
                hud.current_lap,
                hud.best_lap,
                hud.speed_mph
            );
        }

        if realtime {
            if let Some(remaining) = tick_duration.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
    }

    println!();
    println!("=== Final State ===");
    session.print_summary();
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui() {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Time Trial UI...");
    println!();
    println!("Controls:");
    println!("  W           - Accelerate");
    println!("  S           - Brake / reverse");
    println!("  A/D         - Steer left/right");
    println!("  C           - Change camera");
    println!("  ESC         - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,time_trial=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Time Trial".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(time_trial::ui::TimeTrialUIPlugin)
        .run();
}
