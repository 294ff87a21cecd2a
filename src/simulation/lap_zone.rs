//! Start/finish line crossing detection
//!
//! The geometric check fires on every tick while the car's nose is near the
//! line, so a cooldown turns that into one trigger per physical crossing.

use super::types::Position;

/// Along-track window (exclusive) in which the line counts: the main straight only
pub const LAP_ZONE_ALONG_TRACK: (f32, f32) = (-48.0, 75.0);

/// Maximum lateral distance from the line for a crossing
pub const LAP_ZONE_LATERAL_THRESHOLD: f32 = 5.0;

/// Minimum simulation time between two triggers, in seconds
pub const LAP_ZONE_COOLDOWN: f64 = 5.0;

/// Geometry of the start/finish line.
/// The line extends along world X through `origin` and the main straight crosses
/// it along Z. Other parts of the circuit that reach the line's Z fall outside the X window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LapZone {
    pub origin: Position,
}

impl LapZone {
    pub fn new(origin: Position) -> Self {
        Self { origin }
    }

    /// Signed distance from the line origin along the line
    pub fn along_track_distance(&self, position: &Position) -> f32 {
        self.origin.x_distance(position)
    }

    /// Signed distance from the line itself
    pub fn lateral_distance(&self, position: &Position) -> f32 {
        self.origin.z_distance(position)
    }

    /// Whether a position lies inside the detection zone
    pub fn contains(&self, position: &Position) -> bool {
        let along = self.along_track_distance(position);
        let (min, max) = LAP_ZONE_ALONG_TRACK;
        along > min
            && along < max
            && self.lateral_distance(position).abs() < LAP_ZONE_LATERAL_THRESHOLD
    }
}

/// Decides when a pass through the zone counts as a new lap
#[derive(Debug, Clone, Default)]
pub struct LapZoneDetector {
    pub zone: LapZone,
    /// Simulation time of the last accepted crossing
    pub last_trigger_time: Option<f64>,
}

impl LapZoneDetector {
    pub fn new(zone: LapZone) -> Self {
        Self {
            zone,
            last_trigger_time: None,
        }
    }

    /// Check the car's reference point at simulation time `now` (seconds).
    /// Returns true exactly when a lap boundary crossing should be signalled.
    pub fn check(&mut self, position: Option<Position>, now: f64) -> bool {
        let Some(position) = position else {
            return false;
        };

        if !self.zone.contains(&position) || self.cooling_down(now) {
            return false;
        }

        self.last_trigger_time = Some(now);
        true
    }

    fn cooling_down(&self, now: f64) -> bool {
        match self.last_trigger_time {
            Some(last) => now - last <= LAP_ZONE_COOLDOWN,
            None => false,
        }
    }
}
