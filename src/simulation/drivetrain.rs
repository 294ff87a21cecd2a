//! Engine and brake force decision table
//!
//! Pure function of the held intents and the car's signed speed. The values
//! are forwarded verbatim to the physics engine's per-wheel force model.

use super::input::InputState;

/// Engine force added while accelerating, per driven wheel
pub const ENGINE_FORCE_ACCELERATE: f32 = 410.0;

/// Braking force applied to every wheel while braking at forward speed
pub const BRAKE_FORCE: f32 = 5.0;

/// Engine force subtracted when reversing from standstill
pub const ENGINE_FORCE_REVERSE: f32 = 50.0;

/// Forces produced for one simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrivetrainForces {
    /// Applied to both rear wheels
    pub engine_force: f32,
    /// Applied to all four wheels
    pub brake_force: f32,
}

/// Compute engine and brake force for the current input and speed.
///
/// Braking is evaluated after acceleration and may override the engine force,
/// so brakes always win over throttle while rolling forward.
pub fn compute_forces(input: &InputState, speed: f32) -> DrivetrainForces {
    let mut forces = DrivetrainForces::default();

    if input.accelerate_active() {
        forces.engine_force += ENGINE_FORCE_ACCELERATE;
    }

    if input.brake_reverse_active() {
        if speed > 0.0 {
            forces.engine_force = 0.0;
            forces.brake_force += BRAKE_FORCE;
        } else {
            forces.engine_force -= ENGINE_FORCE_REVERSE;
        }
    }

    forces
}
