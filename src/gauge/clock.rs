use crate::gauge::buffer::{SampleRing, SampleSnapshot};
use crate::gauge::GaugeError;
/// Everything the inspect mode freezes when it is switched on.
#[derive(Clone, Debug)]
pub struct ClockSnapshot {
    pub samples: SampleSnapshot,
    pub rate: f64,
    pub average: f64,
}
/// Per-frame rate measurement feeding a [`SampleRing`].
///
/// Times are milliseconds on any monotonic clock.
pub struct FrameClock {
    max_rate: f64,
    rate: f64,
    average: f64,
    now: f64,
    last: f64,
    delta: f64,
    ring: SampleRing,
}
impl FrameClock {
    pub fn new(buffer_size: usize, max_rate: f64, now: f64) -> Result<Self, GaugeError> {
        if !max_rate.is_finite() || max_rate <= 0.0 {
            return Err(GaugeError::InvalidMaxRate);
        }
        let min_interval = 1000.0 / max_rate;
        let ring = SampleRing::new(buffer_size, max_rate, now, min_interval)?;
        Ok(Self {
            max_rate,
            rate: max_rate,
            average: max_rate,
            now,
            last: now - min_interval,
            delta: min_interval,
            ring,
        })
    }
    /// Measures the frame ending at `now` and returns its rate.
    pub fn tick(&mut self, now: f64) -> f64 {
        self.now = now;
        self.delta = now - self.last;
        self.last = now;
        self.rate = if self.delta > 0.0 {
            (1000.0 / self.delta).clamp(0.0, self.max_rate)
        } else {
            self.max_rate
        };
        self.ring.update(self.rate, now, self.delta);
        self.average = self.ring.average();
        self.rate
    }
    pub fn rate(&self) -> f64 {
        self.rate
    }
    pub fn average(&self) -> f64 {
        self.average
    }
    pub fn delta(&self) -> f64 {
        self.delta
    }
    pub fn now(&self) -> f64 {
        self.now
    }
    pub fn max_rate(&self) -> f64 {
        self.max_rate
    }
    pub fn ring(&self) -> &SampleRing {
        &self.ring
    }
    /// Resizes the history and refreshes the cached average.
    pub fn resize(&mut self, buffer_size: usize) {
        self.ring.resize(buffer_size);
        self.average = self.ring.average();
    }
    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            samples: self.ring.snapshot(),
            rate: self.rate,
            average: self.average,
        }
    }
}
