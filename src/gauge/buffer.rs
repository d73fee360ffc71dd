use std::collections::VecDeque;
use log::warn;
use crate::gauge::GaugeError;
/// Owned copy of the ring contents, frozen at the moment it was taken.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSnapshot {
    pub rates: Vec<f64>,
    pub timestamps: Vec<f64>,
}
impl SampleSnapshot {
    pub fn len(&self) -> usize {
        self.rates.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
    /// Index of the sample under a horizontal fraction of the surface, clamped to the valid range.
    pub fn index_for_fraction(&self, fraction: f64) -> usize {
        let len = self.len();
        if len == 0 || !fraction.is_finite() || fraction <= 0.0 {
            return 0;
        }
        ((fraction * len as f64).floor() as usize).min(len - 1)
    }
    /// `(rate, timestamp)` at `index`, clamped to the nearest stored sample.
    pub fn sample(&self, index: usize) -> Option<(f64, f64)> {
        let last = self.len().checked_sub(1)?;
        let i = index.min(last);
        Some((self.rates[i], self.timestamps[i]))
    }
    pub fn average(&self) -> f64 {
        mean(self.rates.iter().copied(), self.len())
    }
}
/// Fixed-length FIFO of `(rate, timestamp)` pairs.
///
/// The length only changes through [`SampleRing::resize`]; every push evicts the oldest sample.
pub struct SampleRing {
    rates: VecDeque<f64>,
    timestamps: VecDeque<f64>,
    min_interval: f64,
    seed_rate: f64,
}
impl SampleRing {
    pub fn new(
        size: usize,
        initial_rate: f64,
        initial_timestamp: f64,
        min_interval: f64,
    ) -> Result<Self, GaugeError> {
        if !min_interval.is_finite() || min_interval <= 0.0 {
            return Err(GaugeError::InvalidInterval);
        }
        let size = normalize_size(size);
        Ok(Self {
            rates: std::iter::repeat(initial_rate).take(size).collect(),
            timestamps: std::iter::repeat(initial_timestamp).take(size).collect(),
            min_interval,
            seed_rate: initial_rate,
        })
    }
    pub fn len(&self) -> usize {
        self.rates.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
    pub fn min_interval(&self) -> f64 {
        self.min_interval
    }
    /// Records one frame, first back-filling any interval the caller skipped.
    pub fn update(&mut self, rate: f64, now: f64, elapsed: f64) {
        self.fill_gap(rate, now, elapsed);
        self.push(rate, now);
    }
    fn fill_gap(&mut self, rate: f64, now: f64, elapsed: f64) {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return;
        }
        // Tolerate float noise so that `3 * interval` counts as three ticks.
        let ticks = (elapsed / self.min_interval + 1e-9).floor();
        if ticks < 2.0 {
            return;
        }
        let missing = ticks as usize - 1;
        // Anything beyond one full buffer would be evicted again immediately.
        let kept = missing.min(self.len());
        for step in (1..=kept).rev() {
            self.push(rate, now - step as f64 * self.min_interval);
        }
    }
    fn push(&mut self, rate: f64, timestamp: f64) {
        self.rates.pop_front();
        self.rates.push_back(rate);
        self.timestamps.pop_front();
        self.timestamps.push_back(timestamp);
    }
    pub fn average(&self) -> f64 {
        mean(self.rates.iter().copied(), self.len())
    }
    pub fn latest(&self) -> Option<(f64, f64)> {
        Some((*self.rates.back()?, *self.timestamps.back()?))
    }
    pub fn rates(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.rates.iter().copied()
    }
    pub fn timestamps(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.timestamps.iter().copied()
    }
    pub fn snapshot(&self) -> SampleSnapshot {
        SampleSnapshot {
            rates: self.rates.iter().copied().collect(),
            timestamps: self.timestamps.iter().copied().collect(),
        }
    }
    /// Replaces the contents with `size` samples aligned on the newest end.
    ///
    /// Growing pads the front with the oldest retained sample; shrinking keeps the newest.
    pub fn resize(&mut self, size: usize) {
        let size = normalize_size(size);
        if size == self.len() {
            return;
        }
        self.rates = migrate(&self.rates, size, self.seed_rate);
        let seed_time = self.timestamps.back().copied().unwrap_or(0.0);
        self.timestamps = migrate(&self.timestamps, size, seed_time);
    }
}
fn migrate(old: &VecDeque<f64>, size: usize, seed: f64) -> VecDeque<f64> {
    let pad = old.front().copied().unwrap_or(seed);
    let shift = size as isize - old.len() as isize;
    (0..size as isize)
        .map(|i| {
            let from = i - shift;
            if from >= 0 {
                old.get(from as usize).copied().unwrap_or(pad)
            } else {
                pad
            }
        })
        .collect()
}
fn normalize_size(size: usize) -> usize {
    if size == 0 {
        warn!("sample buffer size 0 is not usable, using 1");
        return 1;
    }
    size
}
fn mean(values: impl Iterator<Item = f64>, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    values.sum::<f64>() / len as f64
}
