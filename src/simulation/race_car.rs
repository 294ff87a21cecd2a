//! Per-car control: turns held intents into forces and steering angles
//!
//! Standalone implementation that doesn't depend on any physics engine. The
//! host hands in a `HostSnapshot` each tick and applies the returned
//! `ControlOutput` through its own `VehicleActuators` implementation.

use log::debug;

use super::drivetrain::{compute_forces, DrivetrainForces};
use super::input::InputState;
use super::steering::SteeringAnimator;
use super::types::{CarId, Position, DRIVEN_WHEELS, WHEEL_COUNT};

/// Values read from the physics host at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostSnapshot {
    /// Signed speed; negative while reversing
    pub speed_kph: f32,
    /// Car reference point (the nose), if the host can locate it
    pub nose_position: Option<Position>,
}

/// Per-wheel values for the physics engine, indexed front-left, front-right, rear-left, rear-right
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlOutput {
    pub engine_forces: [f32; WHEEL_COUNT],
    pub brake_forces: [f32; WHEEL_COUNT],
    pub steering_angles: [f32; WHEEL_COUNT],
}

impl ControlOutput {
    /// Spread drivetrain forces over the wheels: engine to the rear axle, brakes to all four
    pub fn from_parts(forces: DrivetrainForces, steering_angles: [f32; WHEEL_COUNT]) -> Self {
        let mut engine_forces = [0.0; WHEEL_COUNT];
        for wheel in DRIVEN_WHEELS {
            engine_forces[wheel] = forces.engine_force;
        }
        Self {
            engine_forces,
            brake_forces: [forces.brake_force; WHEEL_COUNT],
            steering_angles,
        }
    }

    /// Forward every value verbatim to the physics engine
    pub fn apply_to<A: VehicleActuators + ?Sized>(&self, actuators: &mut A) {
        for wheel in 0..WHEEL_COUNT {
            actuators.apply_engine_force(wheel, self.engine_forces[wheel]);
            actuators.apply_brake_force(wheel, self.brake_forces[wheel]);
            actuators.set_steering_angle(wheel, self.steering_angles[wheel]);
        }
    }
}

/// The physics engine's per-wheel control surface
pub trait VehicleActuators {
    fn apply_engine_force(&mut self, wheel: usize, force: f32);
    fn apply_brake_force(&mut self, wheel: usize, force: f32);
    fn set_steering_angle(&mut self, wheel: usize, angle: f32);
}

/// Camera attached to the car's chassis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraView {
    /// Behind and above the car
    #[default]
    Chase,
    /// Low camera on the roll hoop
    TCam,
}

impl CameraView {
    pub fn toggled(self) -> Self {
        match self {
            CameraView::Chase => CameraView::TCam,
            CameraView::TCam => CameraView::Chase,
        }
    }
}

/// A race car's control state
#[derive(Debug, Clone)]
pub struct RaceCar {
    pub id: CarId,
    pub steering: SteeringAnimator,
    /// Only user-controlled cars respond to input
    pub user_controlled: bool,
    pub camera: CameraView,
}

impl RaceCar {
    pub fn new(id: CarId, user_controlled: bool) -> Self {
        Self {
            id,
            steering: SteeringAnimator::new(),
            user_controlled,
            camera: CameraView::default(),
        }
    }

    /// Run one control tick: drivetrain first, then one steering animation step
    pub fn tick(&mut self, input: &InputState, snapshot: &HostSnapshot) -> ControlOutput {
        if !self.user_controlled {
            return ControlOutput::default();
        }

        let forces = compute_forces(input, snapshot.speed_kph);
        self.steering.step(input.steering_state());
        ControlOutput::from_parts(forces, self.steering.steering_angles())
    }

    pub fn toggle_camera(&mut self) -> CameraView {
        self.camera = self.camera.toggled();
        debug!("Car {:?} camera switched to {:?}", self.id.0, self.camera);
        self.camera
    }

    pub fn steering_angle(&self) -> f32 {
        self.steering.current_angle
    }
}
