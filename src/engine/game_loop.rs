/// Fixed-rate sampling loop
///
/// Bodies integrate lazily, so nothing has to tick them. This loop only
/// decides how often a host observes them: each frame it accumulates clock
/// time and reports how many fixed-rate samples are due.
use std::time::{Duration, Instant};

/// Default sample rate (60 samples per second)
pub const DEFAULT_SAMPLE_RATE: u32 = 60;

/// Maximum number of samples per frame to prevent spiral of death
pub const MAX_SAMPLES_PER_FRAME: u32 = 5;

/// Sampling loop timing state
#[derive(Debug, Clone)]
pub struct GameLoop {
    /// Time between two samples
    timestep: Duration,

    /// Accumulated time not yet turned into samples
    accumulator: Duration,

    /// Instant of last frame
    last_frame_time: Instant,

    /// Instant when the loop started
    start_time: Instant,

    /// Whether sampling is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total samples handed out
    sample_count: u64,
}

impl GameLoop {
    /// Create a loop sampling at `DEFAULT_SAMPLE_RATE`, starting at `now`
    pub fn new(now: Instant) -> Self {
        Self::with_rate(now, DEFAULT_SAMPLE_RATE)
    }

    /// Create a loop sampling `rate` times per second. A rate of 0 is
    /// treated as 1.
    pub fn with_rate(now: Instant, rate: u32) -> Self {
        Self {
            timestep: Duration::from_secs(1) / rate.max(1),
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            paused: false,
            frame_count: 0,
            sample_count: 0,
        }
    }

    /// Begin a new frame at `now`, returns the number of samples to take
    pub fn begin_frame(&mut self, now: Instant) -> u32 {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        // If paused, don't accumulate time
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut samples = 0;
        while self.accumulator >= self.timestep && samples < MAX_SAMPLES_PER_FRAME {
            self.accumulator -= self.timestep;
            samples += 1;
        }

        self.sample_count += samples as u64;
        samples
    }

    /// Time between samples
    pub fn timestep(&self) -> Duration {
        self.timestep
    }

    /// Fraction of a timestep accumulated but not yet sampled
    pub fn alpha(&self) -> f64 {
        self.accumulator.as_secs_f64() / self.timestep.as_secs_f64()
    }

    /// Time elapsed between the start of the loop and `now`
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start_time)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Sampling paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent a sample burst
            self.accumulator = Duration::ZERO;
            log::info!("Sampling resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}
