//! Input handling systems

use bevy::prelude::*;
use bevy::window::WindowFocused;

use super::components::SessionResource;
use crate::simulation::ControlIntent;

/// Keyboard mapping for the driving intents
const KEY_BINDINGS: [(KeyCode, ControlIntent); 5] = [
    (KeyCode::KeyW, ControlIntent::Accelerate),
    (KeyCode::KeyA, ControlIntent::Left),
    (KeyCode::KeyS, ControlIntent::BrakeOrReverse),
    (KeyCode::KeyD, ControlIntent::Right),
    (KeyCode::KeyC, ControlIntent::ToggleCamera),
];

/// Feed key-down/key-up into the session's input state
pub fn handle_driving_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<SessionResource>,
) {
    for (key, intent) in KEY_BINDINGS {
        if keyboard.just_pressed(key) {
            session.0.press(intent);
        }
        if keyboard.just_released(key) {
            session.0.release(intent);
        }
    }
}

/// Release every held intent when the window loses focus, since the key-up
/// events for keys held at that moment never arrive
pub fn release_keys_on_focus_loss(
    mut focus_events: MessageReader<WindowFocused>,
    mut session: ResMut<SessionResource>,
) {
    if focus_events.read().any(|event| !event.focused) {
        session.0.input.clear();
    }
}

/// Handle basic keyboard input
pub fn handle_input(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
