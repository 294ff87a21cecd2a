//! Time Trial Library
//!
//! Vehicle control and lap timing for a time-trial racing demo that can run
//! headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
