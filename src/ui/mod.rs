//! UI module that drives and visualizes the race session using Bevy
//!
//! This module is purely for input and visualization - all control and timing logic is in
//! the `simulation` module. The UI feeds key events into `RaceSession`, ticks it on
//! Bevy's fixed timestep and renders the car and HUD.

mod components;
mod hud;
mod input;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{CarBodyResource, SessionResource};

use hud::{expire_best_lap_banner, setup_hud, show_best_lap_banner, update_hud_text};
use input::{handle_driving_input, handle_input, release_keys_on_focus_loss};
use sync::{follow_car, sync_car, tick_simulation};
use world::setup_world;

/// Simulation tick rate; the steering animation is tuned for 60 Hz
const SIMULATION_HZ: f64 = 60.0;

/// Plugin to register all UI systems
pub struct TimeTrialUIPlugin;

impl Plugin for TimeTrialUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionResource>()
            .init_resource::<CarBodyResource>()
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .add_systems(Startup, (setup_world, setup_hud))
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    handle_input,
                    handle_driving_input,
                    release_keys_on_focus_loss.after(handle_driving_input),
                    sync_car,
                    follow_car.after(sync_car),
                    update_hud_text,
                    show_best_lap_banner,
                    expire_best_lap_banner.after(show_best_lap_banner),
                ),
            );
    }
}
