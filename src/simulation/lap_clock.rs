//! Lap timing with best-lap tracking
//!
//! The lap record is shared between the tick source (a free-running 1ms timer
//! thread, or the simulation tick itself) and the lap boundary handler, so
//! every access goes through one mutex.

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Granularity of the free-running lap timer
pub const LAP_CLOCK_TICK: Duration = Duration::from_millis(1);

/// Shown in place of a lap time when there is none to show
pub const LAP_TIME_PLACEHOLDER: &str = "-:--.---";

/// Render a lap time as `minutes:seconds.milliseconds`, e.g. `1:05.432`.
/// Minutes are unbounded; seconds always have 2 digits, milliseconds 3.
pub fn format_lap_time(time: Duration) -> String {
    let total_secs = time.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    let milliseconds = time.subsec_millis();
    format!("{}:{:02}.{:03}", minutes, seconds, milliseconds)
}

/// Current and best lap time for one car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LapRecord {
    pub current_time: Duration,
    pub best_time: Option<Duration>,
    /// Whether a lap is being timed
    pub running: bool,
}

impl LapRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a lap boundary crossing.
    /// Returns the new best time if the lap that just finished beat it.
    pub fn complete_lap(&mut self) -> Option<Duration> {
        let mut new_best = None;

        if self.running {
            // No best yet compares as infinitely slow
            let beats_best = self.best_time.is_none_or(|best| self.current_time < best);
            if beats_best {
                self.best_time = Some(self.current_time);
                new_best = Some(self.current_time);
            }
        }

        self.current_time = Duration::ZERO;
        self.running = true;
        new_best
    }

    /// Add elapsed time to the running lap
    pub fn advance(&mut self, by: Duration) {
        if self.running {
            self.current_time += by;
        }
    }
}

/// Emitted when a finished lap sets a new best time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestLapEvent {
    pub lap_time: Duration,
    pub formatted: String,
}

impl BestLapEvent {
    fn new(lap_time: Duration) -> Self {
        Self {
            lap_time,
            formatted: format_lap_time(lap_time),
        }
    }
}

/// What drives the current lap time forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSource {
    /// A dedicated thread adds `LAP_CLOCK_TICK` every period, independent of the simulation tick
    Timer,
    /// The host calls `LapClock::advance` from its own tick
    Simulation,
}

/// A running periodic timer thread
struct LapTimer {
    stop: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl LapTimer {
    fn start(record: Arc<Mutex<LapRecord>>) -> Result<Self> {
        let (stop, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("lap-clock".to_string())
            .spawn(move || {
                // Deadlines are fixed multiples of the tick from the start, so
                // late wakeups catch up instead of losing time
                let mut deadline = Instant::now() + LAP_CLOCK_TICK;
                loop {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {
                            let now = Instant::now();
                            let mut elapsed_ticks = 0;
                            while deadline <= now {
                                deadline += LAP_CLOCK_TICK;
                                elapsed_ticks += 1;
                            }
                            lock_record(&record).advance(LAP_CLOCK_TICK * elapsed_ticks);
                        }
                        // Stop requested or the clock was dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .context("Failed to spawn lap clock timer thread")?;
        Ok(Self { stop, handle })
    }

    /// Stop the thread and wait for it to exit, so no tick can land afterwards
    fn stop(self) {
        let _ = self.stop.send(());
        if self.handle.join().is_err() {
            warn!("Lap clock timer thread panicked");
        }
    }
}

fn lock_record(record: &Mutex<LapRecord>) -> MutexGuard<'_, LapRecord> {
    // A panic mid-update can't leave the record invalid, so keep using it
    record.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lap clock: NotRunning until the first boundary crossing, Running afterwards
pub struct LapClock {
    record: Arc<Mutex<LapRecord>>,
    source: TickSource,
    timer: Option<LapTimer>,
}

impl LapClock {
    pub fn new(source: TickSource) -> Self {
        Self {
            record: Arc::new(Mutex::new(LapRecord::new())),
            source,
            timer: None,
        }
    }

    /// Clock driven by a free-running 1ms timer thread
    pub fn with_timer() -> Self {
        Self::new(TickSource::Timer)
    }

    /// Clock driven by the host's simulation tick
    pub fn simulated() -> Self {
        Self::new(TickSource::Simulation)
    }

    pub fn source(&self) -> TickSource {
        self.source
    }

    /// Finish the current lap (if any) and start timing a new one.
    /// The previous timer is fully stopped before the record is touched and a
    /// fresh one is started afterwards, so two timers never run at once.
    pub fn on_lap_boundary_crossed(&mut self) -> Result<Option<BestLapEvent>> {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }

        let (finished, new_best) = {
            let mut record = lock_record(&self.record);
            let finished = record.running.then_some(record.current_time);
            (finished, record.complete_lap())
        };

        if let Some(lap_time) = finished {
            info!("Lap finished in {}", format_lap_time(lap_time));
        }

        if self.source == TickSource::Timer {
            self.timer = Some(LapTimer::start(Arc::clone(&self.record))?);
        }

        Ok(new_best.map(|lap_time| {
            info!("New best lap: {}", format_lap_time(lap_time));
            BestLapEvent::new(lap_time)
        }))
    }

    /// Advance a simulation-driven clock by `dt`.
    /// Ignored for timer-driven clocks, which keep their own time.
    pub fn advance(&self, dt: Duration) {
        if self.source == TickSource::Simulation {
            lock_record(&self.record).advance(dt);
        }
    }

    /// Consistent copy of the whole record
    pub fn snapshot(&self) -> LapRecord {
        *lock_record(&self.record)
    }

    pub fn current_time(&self) -> Duration {
        lock_record(&self.record).current_time
    }

    pub fn best_time(&self) -> Option<Duration> {
        lock_record(&self.record).best_time
    }

    pub fn is_running(&self) -> bool {
        lock_record(&self.record).running
    }

    /// Current lap time for display, or the placeholder before the first crossing
    pub fn current_lap_string(&self) -> String {
        let record = self.snapshot();
        if record.running {
            format_lap_time(record.current_time)
        } else {
            LAP_TIME_PLACEHOLDER.to_string()
        }
    }

    /// Best lap time for display, or the placeholder if no lap has finished
    pub fn best_lap_string(&self) -> String {
        self.best_time()
            .map(format_lap_time)
            .unwrap_or_else(|| LAP_TIME_PLACEHOLDER.to_string())
    }
}

impl Drop for LapClock {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
    }
}

impl std::fmt::Debug for LapClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LapClock")
            .field("record", &self.snapshot())
            .field("source", &self.source)
            .field("timer_running", &self.timer.is_some())
            .finish()
    }
}
