//! Standalone vehicle control and race timing module
//!
//! This module contains all the core driving and lap timing logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full game.

mod drivetrain;
mod hud;
mod input;
mod kinematics;
mod lap_clock;
mod lap_zone;
mod race_car;
mod session;
mod steering;
mod track;
mod types;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use drivetrain::{
    compute_forces, DrivetrainForces, BRAKE_FORCE, ENGINE_FORCE_ACCELERATE, ENGINE_FORCE_REVERSE,
};
#[allow(unused_imports)]
pub use hud::{mph_from_kph, speed_ratio, HudSnapshot, MAX_SPEED_KPH};
pub use input::{ControlIntent, InputEvent, InputState};
#[allow(unused_imports)]
pub use kinematics::{KinematicCar, CAR_MASS, NOSE_OFFSET, WHEELBASE};
#[allow(unused_imports)]
pub use lap_clock::{
    format_lap_time, BestLapEvent, LapClock, LapRecord, TickSource, LAP_CLOCK_TICK,
    LAP_TIME_PLACEHOLDER,
};
#[allow(unused_imports)]
pub use lap_zone::{
    LapZone, LapZoneDetector, LAP_ZONE_ALONG_TRACK, LAP_ZONE_COOLDOWN, LAP_ZONE_LATERAL_THRESHOLD,
};
#[allow(unused_imports)]
pub use race_car::{CameraView, ControlOutput, HostSnapshot, RaceCar, VehicleActuators};
pub use session::RaceSession;
#[allow(unused_imports)]
pub use steering::{SteeringAnimator, SteeringState, MAX_STEERING_LOCK, STEERING_ANIMATION_FRAMES};
pub use track::{Circuit, DemoDriver};
#[allow(unused_imports)]
pub use types::{
    CarId, Position, SimId, DRIVEN_WHEELS, STEERED_WHEELS, WHEEL_COUNT, WHEEL_FRONT_LEFT,
    WHEEL_FRONT_RIGHT, WHEEL_REAR_LEFT, WHEEL_REAR_RIGHT,
};
