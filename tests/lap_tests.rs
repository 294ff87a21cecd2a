//! Lap detection and lap timing tests

use std::thread;
use std::time::{Duration, Instant};

use time_trial::simulation::{
    format_lap_time, LapClock, LapRecord, LapZone, LapZoneDetector, Position, TickSource,
    LAP_TIME_PLACEHOLDER, LAP_ZONE_COOLDOWN,
};

fn on_line(x: f32) -> Option<Position> {
    Some(Position::new(x, 0.0, 0.0))
}

#[test]
fn test_format_lap_time() {
    assert_eq!(format_lap_time(Duration::from_secs_f64(65.4321)), "1:05.432");
    assert_eq!(format_lap_time(Duration::ZERO), "0:00.000");
    assert_eq!(format_lap_time(Duration::from_millis(754_321)), "12:34.321");
    assert_eq!(format_lap_time(Duration::from_secs(7200)), "120:00.000");
    assert_eq!(format_lap_time(Duration::from_micros(59_999_999)), "0:59.999");
}

#[test]
fn test_lap_record_first_crossing_starts_timing() {
    let mut record = LapRecord::new();
    record.advance(Duration::from_secs(3));
    assert_eq!(record.current_time, Duration::ZERO);

    assert_eq!(record.complete_lap(), None);
    assert!(record.running);
    assert_eq!(record.best_time, None);

    record.advance(Duration::from_millis(1500));
    assert_eq!(record.current_time, Duration::from_millis(1500));
}

#[test]
fn test_best_time_is_minimum_of_completed_laps() {
    let laps_ms = [72_500, 70_100, 75_000, 69_900, 69_900, 80_000, 41_250];
    let mut record = LapRecord::new();
    record.complete_lap();

    let mut fastest = u64::MAX;
    for lap_ms in laps_ms {
        record.advance(Duration::from_millis(lap_ms));
        let new_best = record.complete_lap();

        if lap_ms < fastest {
            assert_eq!(new_best, Some(Duration::from_millis(lap_ms)));
        } else {
            assert_eq!(new_best, None, "{}ms is not a new best", lap_ms);
        }
        fastest = fastest.min(lap_ms);
        assert_eq!(record.best_time, Some(Duration::from_millis(fastest)));
        assert_eq!(record.current_time, Duration::ZERO);
    }
}

#[test]
fn test_simulated_clock_reports_best_lap_event() {
    let mut clock = LapClock::simulated();
    assert_eq!(clock.source(), TickSource::Simulation);
    assert!(!clock.is_running());
    assert_eq!(clock.current_lap_string(), LAP_TIME_PLACEHOLDER);
    assert_eq!(clock.best_lap_string(), LAP_TIME_PLACEHOLDER);

    assert_eq!(clock.on_lap_boundary_crossed().unwrap(), None);
    assert!(clock.is_running());
    assert_eq!(clock.current_lap_string(), "0:00.000");

    clock.advance(Duration::from_millis(61_500));
    let event = clock
        .on_lap_boundary_crossed()
        .unwrap()
        .expect("first completed lap is a best lap");
    assert_eq!(event.lap_time, Duration::from_millis(61_500));
    assert_eq!(event.formatted, "1:01.500");
    assert_eq!(clock.current_time(), Duration::ZERO);
    assert_eq!(clock.best_lap_string(), "1:01.500");

    clock.advance(Duration::from_secs(70));
    assert_eq!(clock.on_lap_boundary_crossed().unwrap(), None);
    assert_eq!(clock.best_time(), Some(Duration::from_millis(61_500)));
}

#[test]
fn test_timer_clock_ignores_external_advance() {
    let mut clock = LapClock::with_timer();
    clock.advance(Duration::from_secs(1));
    assert_eq!(clock.current_time(), Duration::ZERO);

    clock.on_lap_boundary_crossed().unwrap();
    clock.advance(Duration::from_secs(10));
    assert!(clock.current_time() < Duration::from_secs(10));
}

#[test]
fn test_timer_clock_counts_and_restarts() {
    let mut clock = LapClock::with_timer();
    clock.on_lap_boundary_crossed().unwrap();
    thread::sleep(Duration::from_millis(100));
    assert!(clock.current_time() > Duration::ZERO);

    let event = clock.on_lap_boundary_crossed().unwrap();
    let lap_time = event.expect("first completed lap is a best lap").lap_time;
    assert!(lap_time > Duration::ZERO);
    assert!(lap_time < Duration::from_secs(5));
    assert!(clock.current_time() < lap_time + Duration::from_millis(50));
}

#[test]
fn test_timer_is_replaced_not_doubled() {
    let mut clock = LapClock::with_timer();
    for _ in 0..5 {
        clock.on_lap_boundary_crossed().unwrap();
    }

    let started = Instant::now();
    clock.on_lap_boundary_crossed().unwrap();
    thread::sleep(Duration::from_millis(150));
    let counted = clock.current_time();
    let elapsed = started.elapsed();

    // One timer ticks at most once per elapsed millisecond; overlapping timers would exceed that
    assert!(
        counted <= elapsed,
        "counted {:?} in {:?} of wall time",
        counted,
        elapsed
    );
    assert!(counted > Duration::ZERO);
}

#[test]
fn test_timer_keeps_pace_with_wall_clock() {
    let mut clock = LapClock::with_timer();
    let started = Instant::now();
    clock.on_lap_boundary_crossed().unwrap();
    thread::sleep(Duration::from_millis(1000));
    let counted = clock.current_time();
    let elapsed = started.elapsed();

    assert!(counted <= elapsed, "counted {:?} in {:?}", counted, elapsed);
    // Late wakeups are caught up, so at most the partial tick in progress is missing
    assert!(
        counted.as_secs_f64() >= elapsed.as_secs_f64() * 0.95,
        "counted {:?} in {:?} of wall time",
        counted,
        elapsed
    );
}

#[test]
fn test_lap_zone_window() {
    let zone = LapZone::default();
    assert!(zone.contains(&Position::new(0.0, 0.0, 0.0)));
    assert!(zone.contains(&Position::new(-47.9, 0.0, 4.9)));
    assert!(zone.contains(&Position::new(74.9, 3.0, -4.9)));
    assert!(!zone.contains(&Position::new(-48.0, 0.0, 0.0)));
    assert!(!zone.contains(&Position::new(75.0, 0.0, 0.0)));
    assert!(!zone.contains(&Position::new(0.0, 0.0, 5.0)));
    assert!(!zone.contains(&Position::new(0.0, 0.0, -5.0)));
    // Back straight crosses the same line plane but far outside the window
    assert!(!zone.contains(&Position::new(200.0, 0.0, 0.0)));
}

#[test]
fn test_lap_zone_with_offset_origin() {
    let zone = LapZone::new(Position::new(100.0, 0.0, 50.0));
    assert!(zone.contains(&Position::new(100.0, 0.0, 52.0)));
    assert!(!zone.contains(&Position::new(0.0, 0.0, 0.0)));
    assert_eq!(zone.along_track_distance(&Position::new(90.0, 0.0, 50.0)), -10.0);
    assert_eq!(zone.lateral_distance(&Position::new(100.0, 0.0, 47.0)), -3.0);
}

#[test]
fn test_lap_zone_cooldown() {
    let mut detector = LapZoneDetector::new(LapZone::default());
    assert!(detector.check(on_line(0.0), 1.0));
    assert!(!detector.check(on_line(0.0), 1.0 + 2.0));
    assert!(!detector.check(on_line(0.0), 1.0 + LAP_ZONE_COOLDOWN));
    assert!(detector.check(on_line(0.0), 1.0 + LAP_ZONE_COOLDOWN + 0.5));
    assert_eq!(detector.last_trigger_time, Some(1.0 + LAP_ZONE_COOLDOWN + 0.5));
}

#[test]
fn test_lap_zone_first_crossing_needs_no_history() {
    let mut detector = LapZoneDetector::new(LapZone::default());
    assert!(detector.check(on_line(10.0), 0.0));
}

#[test]
fn test_lap_zone_missing_position() {
    let mut detector = LapZoneDetector::new(LapZone::default());
    assert!(!detector.check(None, 10.0));
    assert_eq!(detector.last_trigger_time, None);
}

/// Drive the nose through the line at `speed` (units/s) starting at `start_time`;
/// returns how many triggers the pass produced
fn sweep_through_line(detector: &mut LapZoneDetector, start_time: f64, speed: f32) -> usize {
    let dt = 1.0 / 60.0;
    let mut triggers = 0;
    let mut z = -20.0_f32;
    let mut time = start_time;
    while z < 20.0 {
        if detector.check(Some(Position::new(3.0, 0.0, z)), time) {
            triggers += 1;
        }
        z += speed * dt as f32;
        time += dt;
    }
    triggers
}

#[test]
fn test_one_trigger_per_physical_crossing() {
    let mut detector = LapZoneDetector::new(LapZone::default());
    // Slow pass keeps the nose in the zone for many ticks
    assert_eq!(sweep_through_line(&mut detector, 0.0, 5.0), 1);

    let mut detector = LapZoneDetector::new(LapZone::default());
    assert_eq!(sweep_through_line(&mut detector, 0.0, 60.0), 1);
    // Back across the line 3 seconds later: inside the cooldown
    assert_eq!(sweep_through_line(&mut detector, 3.0, 60.0), 0);
    // And again well after it
    assert_eq!(sweep_through_line(&mut detector, 12.0, 60.0), 1);
}
