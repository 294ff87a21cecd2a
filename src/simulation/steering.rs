//! Steering-angle animation for a single car
//!
//! Discrete steering intents (left / right / none) are turned into a steering
//! angle that blends over a fixed number of ticks instead of jumping. A new
//! intent can interrupt a blend at any frame; the next blend starts from
//! wherever the wheels currently are.

use log::debug;

use super::types::{STEERED_WHEELS, WHEEL_COUNT};

/// Maximum steering angle magnitude the front wheels are commanded to (radians)
pub const MAX_STEERING_LOCK: f32 = 0.35;

/// Number of ticks a steering transition takes (0.1s at 60 Hz)
pub const STEERING_ANIMATION_FRAMES: u32 = 6;

/// Steering state derived from the held steering intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteeringState {
    #[default]
    Idle,
    Left,
    Right,
}

impl SteeringState {
    /// Angle the wheels settle at for this state.
    /// Positive angles steer left on the physics engine's steering axis.
    pub fn destination_angle(self) -> f32 {
        match self {
            SteeringState::Idle => 0.0,
            SteeringState::Left => MAX_STEERING_LOCK,
            SteeringState::Right => -MAX_STEERING_LOCK,
        }
    }
}

/// Per-car steering animation state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SteeringAnimator {
    pub state: SteeringState,
    pub previous_state: SteeringState,
    pub current_angle: f32,
    pub frame_count: u32,
    pub animation_start_angle: f32,
}

impl SteeringAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the animation by one tick toward the given steering state.
    /// Returns the steering angle to apply to the front wheels.
    pub fn step(&mut self, target: SteeringState) -> f32 {
        self.reset_if_needed(target);
        self.update_animation();
        self.current_angle
    }

    /// Start a new animation if the steering state changed
    fn reset_if_needed(&mut self, new_state: SteeringState) {
        if new_state != self.state {
            debug!("Steering {:?} -> {:?}", self.state, new_state);
            self.frame_count = 0;
            self.previous_state = self.state;
            self.state = new_state;
        }
    }

    fn update_animation(&mut self) {
        if self.frame_count == 0 {
            self.animation_start_angle = self.current_angle;
        }

        if self.frame_count < STEERING_ANIMATION_FRAMES {
            let destination = self.state.destination_angle();
            let next_angle = if self.frame_count + 1 == STEERING_ANIMATION_FRAMES {
                // Last frame lands exactly on the destination rather than
                // wherever the accumulated steps would leave it
                destination
            } else {
                self.current_angle + self.frame_delta()
            };
            self.current_angle = next_angle.clamp(-MAX_STEERING_LOCK, MAX_STEERING_LOCK);
        }

        self.frame_count = self.frame_count.saturating_add(1);
    }

    /// Direction of travel, derived from the transition rather than the
    /// destination alone: +1 when moving from {Right, Idle} into {Idle, Left}
    fn multiplier(&self) -> f32 {
        let from_right_side = matches!(
            self.previous_state,
            SteeringState::Right | SteeringState::Idle
        );
        let to_left_side = matches!(self.state, SteeringState::Idle | SteeringState::Left);
        if from_right_side && to_left_side {
            1.0
        } else {
            -1.0
        }
    }

    fn frame_delta(&self) -> f32 {
        let total_delta = self.multiplier()
            * (self.animation_start_angle.abs() + self.state.destination_angle().abs());
        total_delta / STEERING_ANIMATION_FRAMES as f32
    }

    /// Whether the current transition has finished
    pub fn is_settled(&self) -> bool {
        self.frame_count >= STEERING_ANIMATION_FRAMES
    }

    /// Per-wheel steering angles: front wheels follow the animation, rear wheels stay straight
    pub fn steering_angles(&self) -> [f32; WHEEL_COUNT] {
        let mut angles = [0.0; WHEEL_COUNT];
        for wheel in STEERED_WHEELS {
            angles[wheel] = self.current_angle;
        }
        angles
    }
}
