//! Display-facing values for the heads-up display
//!
//! The display layer only formats and draws; everything it shows is computed here.

/// Top speed of the car, used to scale the speedometer
pub const MAX_SPEED_KPH: f32 = 389.346_86;

/// Convert a speed reading to the speedometer's MPH figure.
/// The factor of two matches the speedometer calibration of the car model.
pub fn mph_from_kph(kph: f32) -> f32 {
    (kph / 1.621_371) * 2.0
}

/// Normalized speed for the speedometer gauge, in [0, 1].
/// The gauge is full at half the top speed.
pub fn speed_ratio(kph: f32) -> f32 {
    (kph.abs() / (MAX_SPEED_KPH / 2.0)).clamp(0.0, 1.0)
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub lap_count: u32,
    pub lap_label: String,
    pub current_lap: String,
    pub best_lap: String,
    pub speed_mph: i32,
    pub speed_ratio: f32,
}

impl HudSnapshot {
    pub fn new(lap_count: u32, current_lap: String, best_lap: String, speed_kph: f32) -> Self {
        Self {
            lap_count,
            lap_label: format!("LAP {}", lap_count),
            current_lap,
            best_lap,
            speed_mph: mph_from_kph(speed_kph) as i32,
            speed_ratio: speed_ratio(speed_kph),
        }
    }
}
