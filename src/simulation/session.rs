//! Race session that ties the control and timing pieces together
//!
//! This is the composition root for one user-controlled car: it owns the
//! car's input state, the lap detector and the lap clock, and runs them in a
//! fixed order on every simulation tick.

use anyhow::Result;
use log::{debug, info, warn};
use std::time::Duration;

use super::hud::HudSnapshot;
use super::input::{ControlIntent, InputEvent, InputState};
use super::lap_clock::{format_lap_time, BestLapEvent, LapClock};
use super::lap_zone::{LapZone, LapZoneDetector};
use super::race_car::{CameraView, ControlOutput, HostSnapshot, RaceCar};
use super::types::{CarId, SimId};

/// A time trial session for a single user-controlled car
#[derive(Debug)]
pub struct RaceSession {
    /// The user's car
    pub car: RaceCar,

    /// Held intents for the user's car, fed by the host's key events
    pub input: InputState,

    /// Start/finish line detector
    pub lap_zone: LapZoneDetector,

    /// Current and best lap timing
    pub clock: LapClock,

    /// Lap boundary crossings so far
    pub lap_count: u32,

    /// Simulation time in seconds
    pub time: f64,

    /// Speed reported by the host on the last tick
    pub last_speed_kph: f32,

    /// New best laps not yet picked up by the display layer
    best_lap_events: Vec<BestLapEvent>,

    warned_missing_nose: bool,
}

impl RaceSession {
    pub fn new(clock: LapClock) -> Self {
        Self::with_zone(clock, LapZone::default())
    }

    pub fn with_zone(clock: LapClock, zone: LapZone) -> Self {
        Self {
            car: RaceCar::new(CarId(SimId(0)), true),
            input: InputState::new(),
            lap_zone: LapZoneDetector::new(zone),
            clock,
            lap_count: 0,
            time: 0.0,
            last_speed_kph: 0.0,
            best_lap_events: Vec::new(),
            warned_missing_nose: false,
        }
    }

    /// Session whose lap clock advances with the simulation tick
    pub fn simulated() -> Self {
        Self::new(LapClock::simulated())
    }

    /// Session whose lap clock runs on its own 1ms timer thread
    pub fn with_timer() -> Self {
        Self::new(LapClock::with_timer())
    }

    pub fn press(&mut self, intent: ControlIntent) {
        self.input.press(intent);
    }

    pub fn release(&mut self, intent: ControlIntent) {
        self.input.release(intent);
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    pub fn camera(&self) -> CameraView {
        self.car.camera
    }

    /// Run one simulation tick.
    /// Order: camera toggle, drivetrain + steering, lap clock, lap zone.
    /// Returns the per-wheel values to forward to the physics engine.
    pub fn tick(&mut self, delta_secs: f32, snapshot: &HostSnapshot) -> Result<ControlOutput> {
        let dt = match Duration::try_from_secs_f32(delta_secs) {
            Ok(dt) => dt,
            Err(e) => {
                warn!("Ignoring invalid tick delta {}: {}", delta_secs, e);
                Duration::ZERO
            }
        };
        self.time += dt.as_secs_f64();
        self.last_speed_kph = snapshot.speed_kph;

        if self.input.take_camera_toggle() {
            self.car.toggle_camera();
        }

        let output = self.car.tick(&self.input, snapshot);

        self.clock.advance(dt);

        if snapshot.nose_position.is_none() && !self.warned_missing_nose {
            warn!("Host reported no nose position; lap detection paused");
            self.warned_missing_nose = true;
        }

        if self.lap_zone.check(snapshot.nose_position, self.time) {
            self.lap_count += 1;
            debug!("Lap boundary crossed at {:.3}s", self.time);
            if let Some(event) = self.clock.on_lap_boundary_crossed()? {
                self.best_lap_events.push(event);
            }
            info!("Starting lap {}", self.lap_count);
        }

        Ok(output)
    }

    /// Hand over the best-lap events produced since the last call
    pub fn drain_best_lap_events(&mut self) -> Vec<BestLapEvent> {
        std::mem::take(&mut self.best_lap_events)
    }

    /// Values for the heads-up display
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::new(
            self.lap_count,
            self.clock.current_lap_string(),
            self.clock.best_lap_string(),
            self.last_speed_kph,
        )
    }

    pub fn print_summary(&self) {
        let hud = self.hud();
        let record = self.clock.snapshot();
        println!("=== Time Trial Summary ===");
        println!("Time: {:.2}s", self.time);
        println!("{}", hud.lap_label);
        println!("Current lap: {}", hud.current_lap);
        println!("Best lap: {}", hud.best_lap);
        println!(
            "Speed: {} MPH ({:.0}% of gauge)",
            hud.speed_mph,
            hud.speed_ratio * 100.0
        );
        println!(
            "Steering: {:?} at {:.3} rad, camera {:?}",
            self.car.steering.state,
            self.car.steering_angle(),
            self.car.camera
        );
        if let Some(best) = record.best_time {
            println!("Best lap (raw): {} ({:?})", format_lap_time(best), best);
        }
    }
}
