//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;

use crate::simulation::{Circuit, KinematicCar, RaceSession};

/// Resource wrapper for the race session
#[derive(Resource)]
pub struct SessionResource(pub RaceSession);

impl Default for SessionResource {
    fn default() -> Self {
        // The 1ms timer thread keeps lap time independent of the frame rate
        Self(RaceSession::with_timer())
    }
}

/// Resource wrapper for the vehicle model standing in for the physics engine
#[derive(Resource)]
pub struct CarBodyResource(pub KinematicCar);

impl Default for CarBodyResource {
    fn default() -> Self {
        let (start, yaw) = Circuit::default().start_position();
        Self(KinematicCar::new(start, yaw))
    }
}

/// Marker component for ground plane
#[derive(Component)]
pub struct Ground;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for the user-controlled car's chassis
#[derive(Component)]
pub struct PlayerCar;

/// Marker for HUD text elements
#[derive(Component)]
pub enum HudText {
    LapCounter,
    CurrentLap,
    BestLap,
    Speed,
}

/// "New Lap Record!" banner, shown for a few seconds after a best lap
#[derive(Component, Default)]
pub struct BestLapBanner {
    pub remaining_secs: f32,
}

/// How long the best lap banner stays up
pub const BEST_LAP_BANNER_SECS: f32 = 3.5;
