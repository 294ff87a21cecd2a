//! Test circuit and a scripted driver for headless runs
//!
//! The circuit is a rounded rectangle whose main straight runs along Z at
//! x = 0 and passes through the start/finish line at the world origin. The
//! back straight sits well outside the lap zone's X window.

use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::input::{ControlIntent, InputEvent, InputState};
use super::kinematics::KinematicCar;
use super::types::Position;

/// Spacing between waypoints on straights
const WAYPOINT_SPACING: f32 = 10.0;

/// Segments per quarter-circle corner
const CORNER_SEGMENTS: usize = 8;

/// A rounded-rectangle circuit
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    /// Half the length of the main straight (Z extent)
    pub half_length: f32,
    /// Distance from the main straight to the back straight (X extent)
    pub width: f32,
    pub corner_radius: f32,
}

impl Default for Circuit {
    fn default() -> Self {
        Self {
            half_length: 150.0,
            width: 200.0,
            corner_radius: 40.0,
        }
    }
}

impl Circuit {
    /// Grid slot on the main straight, before the line, facing +Z
    pub fn start_position(&self) -> (Position, f32) {
        (Position::new(0.0, 0.0, -30.0), 0.0)
    }

    /// Waypoints in driving order, starting on the main straight
    pub fn waypoints(&self) -> Vec<Position> {
        let l = self.half_length;
        let w = self.width;
        let r = self.corner_radius;
        let mut points = Vec::new();

        push_straight(&mut points, (0.0, -l + r), (0.0, l - r));
        push_arc(&mut points, (r, l - r), |t| (-t.cos(), t.sin()), r);
        push_straight(&mut points, (r, l), (w - r, l));
        push_arc(&mut points, (w - r, l - r), |t| (t.sin(), t.cos()), r);
        push_straight(&mut points, (w, l - r), (w, -l + r));
        push_arc(&mut points, (w - r, -l + r), |t| (t.cos(), -t.sin()), r);
        push_straight(&mut points, (w - r, -l), (r, -l));
        push_arc(&mut points, (r, -l + r), |t| (-t.sin(), -t.cos()), r);

        points
    }

    /// Approximate length of one lap
    pub fn lap_length(&self) -> f32 {
        let straights = 2.0 * (2.0 * self.half_length - 2.0 * self.corner_radius)
            + 2.0 * (self.width - 2.0 * self.corner_radius);
        straights + TAU * self.corner_radius
    }
}

fn push_straight(points: &mut Vec<Position>, from: (f32, f32), to: (f32, f32)) {
    let start = Position::new(from.0, 0.0, from.1);
    let end = Position::new(to.0, 0.0, to.1);
    let steps = (start.distance(&end) / WAYPOINT_SPACING).ceil().max(1.0) as usize;
    // End point is left to the following arc
    for i in 0..steps {
        let t = i as f32 / steps as f32;
        points.push(Position::new(
            from.0 + (to.0 - from.0) * t,
            0.0,
            from.1 + (to.1 - from.1) * t,
        ));
    }
}

fn push_arc(
    points: &mut Vec<Position>,
    center: (f32, f32),
    offset: impl Fn(f32) -> (f32, f32),
    radius: f32,
) {
    for i in 0..CORNER_SEGMENTS {
        let t = FRAC_PI_2 * i as f32 / CORNER_SEGMENTS as f32;
        let (dx, dz) = offset(t);
        points.push(Position::new(
            center.0 + dx * radius,
            0.0,
            center.1 + dz * radius,
        ));
    }
}

/// Wrap an angle into (-PI, PI]
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Target speed on straights, meters per second
const STRAIGHT_SPEED: f32 = 42.0;

/// Target speed through corners, meters per second
const CORNER_SPEED: f32 = 20.0;

/// Heading error below which the driver keeps the wheel straight
const STEERING_DEADBAND: f32 = 0.04;

/// Waypoints ahead of the nearest one to steer toward
const STEERING_LOOKAHEAD: usize = 3;

/// Waypoints ahead to look for an upcoming corner
const BRAKING_LOOKAHEAD: usize = 9;

/// Scripted driver that follows the circuit by pressing and releasing keys,
/// with seeded reaction jitter so laps aren't identical
pub struct DemoDriver {
    waypoints: Vec<Position>,
    held: InputState,
    rng: StdRng,
    /// Ticks left before the throttle/brake decision is revisited
    reaction_ticks: u32,
}

impl DemoDriver {
    pub fn new(circuit: &Circuit, seed: u64) -> Self {
        Self {
            waypoints: circuit.waypoints(),
            held: InputState::new(),
            rng: StdRng::seed_from_u64(seed),
            reaction_ticks: 0,
        }
    }

    fn nearest_waypoint(&self, position: &Position) -> usize {
        self.waypoints
            .iter()
            .enumerate()
            .min_by_key(|(_, waypoint)| OrderedFloat(waypoint.distance(position)))
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    fn waypoint_after(&self, index: usize, ahead: usize) -> Position {
        self.waypoints[(index + ahead) % self.waypoints.len()]
    }

    /// Decide the inputs for this tick.
    /// Returns only the changes relative to what the driver already holds.
    pub fn drive(&mut self, car: &KinematicCar) -> Vec<InputEvent> {
        if self.waypoints.is_empty() {
            return Vec::new();
        }

        let mut wanted = self.held.clone();
        let nearest = self.nearest_waypoint(&car.position);

        // Steering: point the nose at a waypoint a little way ahead
        let target = self.waypoint_after(nearest, STEERING_LOOKAHEAD);
        let heading_error = wrap_angle(car.position.angle_to(&target) - car.yaw);
        wanted.release(ControlIntent::Left);
        wanted.release(ControlIntent::Right);
        if heading_error > STEERING_DEADBAND {
            wanted.press(ControlIntent::Left);
        } else if heading_error < -STEERING_DEADBAND {
            wanted.press(ControlIntent::Right);
        }

        // Throttle and brake, revisited after a random reaction delay
        if self.reaction_ticks == 0 {
            let far = self.waypoint_after(nearest, BRAKING_LOOKAHEAD);
            let corner_ahead = wrap_angle(target.angle_to(&far) - car.yaw).abs() > 0.5;
            let base_speed = if corner_ahead { CORNER_SPEED } else { STRAIGHT_SPEED };
            let target_speed = base_speed * self.rng.random_range(0.9..1.1);

            wanted.release(ControlIntent::Accelerate);
            wanted.release(ControlIntent::BrakeOrReverse);
            if car.speed < target_speed {
                wanted.press(ControlIntent::Accelerate);
            } else if car.speed > target_speed * 1.1 {
                wanted.press(ControlIntent::BrakeOrReverse);
            }
            self.reaction_ticks = self.rng.random_range(0..=3);
        } else {
            self.reaction_ticks -= 1;
        }

        let mut events = Vec::new();
        for intent in ControlIntent::ALL {
            match (self.held.is_active(intent), wanted.is_active(intent)) {
                (false, true) => events.push(InputEvent::Pressed(intent)),
                (true, false) => events.push(InputEvent::Released(intent)),
                _ => {}
            }
        }
        self.held = wanted;
        events
    }
}
