//! Core types for the time trial simulation
//!
//! These are standalone types that don't depend on Bevy.

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimId(pub usize);

/// A wrapper type for car IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarId(pub SimId);

/// A 3D position in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Signed difference in x from this position to another
    pub fn x_distance(&self, other: &Position) -> f32 {
        other.x - self.x
    }

    /// Signed difference in z from this position to another
    pub fn z_distance(&self, other: &Position) -> f32 {
        other.z - self.z
    }

    /// Calculate the angle from this position to another (Y-axis rotation)
    pub fn angle_to(&self, other: &Position) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        if dx == 0.0 && dz == 0.0 {
            0.0
        } else {
            dx.atan2(dz)
        }
    }
}

/// Number of wheels on a car
pub const WHEEL_COUNT: usize = 4;

/// Wheel indices, in the order the physics vehicle registers them
pub const WHEEL_FRONT_LEFT: usize = 0;
pub const WHEEL_FRONT_RIGHT: usize = 1;
pub const WHEEL_REAR_LEFT: usize = 2;
pub const WHEEL_REAR_RIGHT: usize = 3;

/// Wheels that receive engine force (rear-wheel drive)
pub const DRIVEN_WHEELS: [usize; 2] = [WHEEL_REAR_LEFT, WHEEL_REAR_RIGHT];

/// Wheels that follow the steering angle
pub const STEERED_WHEELS: [usize; 2] = [WHEEL_FRONT_LEFT, WHEEL_FRONT_RIGHT];
