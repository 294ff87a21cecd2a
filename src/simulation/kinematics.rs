//! Minimal vehicle model standing in for the physics engine
//!
//! Used by the headless runner, the Bevy preview and the tests. It accepts the
//! same per-wheel commands a real physics vehicle would and integrates a
//! simple bicycle model from them. Wheel contact, suspension and collisions
//! are out of scope.

use super::race_car::{HostSnapshot, VehicleActuators};
use super::types::{Position, DRIVEN_WHEELS, STEERED_WHEELS, WHEEL_COUNT};

/// Chassis mass
pub const CAR_MASS: f32 = 140.0;

/// Distance between front and rear axle
pub const WHEELBASE: f32 = 2.5;

/// Distance from the chassis origin to the nose locator
pub const NOSE_OFFSET: f32 = 2.2;

/// Quadratic aerodynamic drag coefficient (per unit mass)
const DRAG: f32 = 0.0005;

/// Linear rolling resistance (per unit mass)
const ROLLING_RESISTANCE: f32 = 0.02;

/// Deceleration per unit of braking force
const BRAKE_DECEL_PER_FORCE: f32 = 0.6;

/// Meters per second to kilometers per hour
const MPS_TO_KPH: f32 = 3.6;

/// A car moving on the ground plane
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicCar {
    pub position: Position,
    /// Heading around the Y axis; 0 faces +Z, positive turns toward +X (left)
    pub yaw: f32,
    /// Signed speed along the heading, meters per second
    pub speed: f32,
    engine_forces: [f32; WHEEL_COUNT],
    brake_forces: [f32; WHEEL_COUNT],
    steering_angles: [f32; WHEEL_COUNT],
}

impl KinematicCar {
    pub fn new(position: Position, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            speed: 0.0,
            engine_forces: [0.0; WHEEL_COUNT],
            brake_forces: [0.0; WHEEL_COUNT],
            steering_angles: [0.0; WHEEL_COUNT],
        }
    }

    pub fn speed_kph(&self) -> f32 {
        self.speed * MPS_TO_KPH
    }

    /// Unit vector the car is facing, on the XZ plane
    pub fn forward(&self) -> (f32, f32) {
        (self.yaw.sin(), self.yaw.cos())
    }

    pub fn nose_position(&self) -> Position {
        let (fx, fz) = self.forward();
        Position::new(
            self.position.x + fx * NOSE_OFFSET,
            self.position.y,
            self.position.z + fz * NOSE_OFFSET,
        )
    }

    pub fn snapshot(&self) -> HostSnapshot {
        HostSnapshot {
            speed_kph: self.speed_kph(),
            nose_position: Some(self.nose_position()),
        }
    }

    pub fn steering_angle(&self) -> f32 {
        let [front_left, front_right] = STEERED_WHEELS.map(|wheel| self.steering_angles[wheel]);
        (front_left + front_right) / 2.0
    }

    /// Step the model forward using the last commanded forces and angles
    pub fn integrate(&mut self, delta_secs: f32) {
        let engine: f32 = DRIVEN_WHEELS
            .iter()
            .map(|&wheel| self.engine_forces[wheel])
            .sum();
        let brake: f32 = self.brake_forces.iter().sum();

        let resistance = DRAG * self.speed * self.speed.abs() + ROLLING_RESISTANCE * self.speed;
        self.speed += (engine / CAR_MASS - resistance) * delta_secs;

        // Brakes slow the car down but never push it backwards
        let brake_delta = brake * BRAKE_DECEL_PER_FORCE * delta_secs;
        if self.speed.abs() <= brake_delta {
            self.speed = 0.0;
        } else {
            self.speed -= brake_delta * self.speed.signum();
        }

        let yaw_rate = self.speed * self.steering_angle().tan() / WHEELBASE;
        self.yaw += yaw_rate * delta_secs;

        let (fx, fz) = self.forward();
        self.position.x += fx * self.speed * delta_secs;
        self.position.z += fz * self.speed * delta_secs;
    }
}

impl VehicleActuators for KinematicCar {
    fn apply_engine_force(&mut self, wheel: usize, force: f32) {
        if let Some(slot) = self.engine_forces.get_mut(wheel) {
            *slot = force;
        }
    }

    fn apply_brake_force(&mut self, wheel: usize, force: f32) {
        if let Some(slot) = self.brake_forces.get_mut(wheel) {
            *slot = force;
        }
    }

    fn set_steering_angle(&mut self, wheel: usize, angle: f32) {
        if let Some(slot) = self.steering_angles.get_mut(wheel) {
            *slot = angle;
        }
    }
}
