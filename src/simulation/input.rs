//! Driving intents and the input state that aggregates them
//!
//! Raw key codes are mapped to `ControlIntent`s by whatever host owns the
//! window (see `ui::input` for the Bevy keyboard mapping). The core only ever
//! sees intents.

use std::collections::HashSet;

use super::steering::SteeringState;

/// A semantic driving action, independent of the key that triggers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlIntent {
    Accelerate,
    Left,
    Right,
    BrakeOrReverse,
    ToggleCamera,
}

impl ControlIntent {
    pub const ALL: [ControlIntent; 5] = [
        ControlIntent::Accelerate,
        ControlIntent::Left,
        ControlIntent::Right,
        ControlIntent::BrakeOrReverse,
        ControlIntent::ToggleCamera,
    ];
}

/// A key-down or key-up, already mapped to an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(ControlIntent),
    Released(ControlIntent),
}

/// The set of intents currently held for one car
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    active: HashSet<ControlIntent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an intent as held. Pressing a held intent does nothing.
    pub fn press(&mut self, intent: ControlIntent) {
        self.active.insert(intent);
    }

    /// Mark an intent as released. Releasing an intent that isn't held does nothing.
    pub fn release(&mut self, intent: ControlIntent) {
        self.active.remove(&intent);
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(intent) => self.press(intent),
            InputEvent::Released(intent) => self.release(intent),
        }
    }

    /// Drop every held intent (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_active(&self, intent: ControlIntent) -> bool {
        self.active.contains(&intent)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn accelerate_active(&self) -> bool {
        self.is_active(ControlIntent::Accelerate)
    }

    pub fn left_active(&self) -> bool {
        self.is_active(ControlIntent::Left)
    }

    pub fn right_active(&self) -> bool {
        self.is_active(ControlIntent::Right)
    }

    pub fn brake_reverse_active(&self) -> bool {
        self.is_active(ControlIntent::BrakeOrReverse)
    }

    pub fn toggle_camera_active(&self) -> bool {
        self.is_active(ControlIntent::ToggleCamera)
    }

    /// Consume a pending camera toggle.
    /// Returns true at most once per key press, so a held key swaps the camera once.
    pub fn take_camera_toggle(&mut self) -> bool {
        self.active.remove(&ControlIntent::ToggleCamera)
    }

    /// Steering state implied by the held steering intents
    pub fn steering_state(&self) -> SteeringState {
        match (self.left_active(), self.right_active()) {
            (true, false) => SteeringState::Left,
            (false, true) => SteeringState::Right,
            // Both or neither: the inputs cancel out
            _ => SteeringState::Idle,
        }
    }
}
