// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::{LedgerTime, TimeError};
use parking_lot::Mutex;
use std::sync::Arc;

/// Source of the current network time.
///
/// Passed explicitly to anything that compares timestamps against "now",
/// so that time-sensitive checks stay deterministic under test.
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> Result<LedgerTime, TimeError>;
}

/// Wall clock, optionally shifted by a fixed offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: i64,
}

impl SystemClock {
    /// Clock shifted by `offset` milliseconds relative to the local wall clock.
    pub fn with_offset(offset: i64) -> Self {
        SystemClock { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Result<LedgerTime, TimeError> {
        let now = LedgerTime::now()?;
        let shift = LedgerTime::from_millis(self.offset.unsigned_abs());
        if self.offset >= 0 {
            now.checked_add(shift)
        } else {
            now.checked_sub(shift)
        }
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<Mutex<LedgerTime>>);

impl ManualClock {
    /// Creates a clock frozen at `time`
    pub fn new(time: LedgerTime) -> Self {
        ManualClock(Arc::new(Mutex::new(time)))
    }

    /// Sets the current time
    pub fn set(&self, time: LedgerTime) {
        *self.0.lock() = time;
    }

    /// Moves the clock forward
    pub fn advance(&self, delta: LedgerTime) {
        let mut time = self.0.lock();
        *time = time.saturating_add(delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Result<LedgerTime, TimeError> {
        Ok(*self.0.lock())
    }
}
