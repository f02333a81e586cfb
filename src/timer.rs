use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_TIMER_SECS: u32 = 10;
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Time source for the countdown, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Production clock backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

fn saturating_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let by = saturating_nanos(by);
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |at| {
                Some(at.saturating_add(by))
            });
    }

    pub fn set(&self, at: Duration) {
        self.nanos.store(saturating_nanos(at), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
}

/// Emitted once when a running countdown reaches zero.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expired;

/// Per-attempt countdown with a one-second cadence.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    duration_secs: u32,
    seconds_remaining: u32,
    state: TimerState,
    next_tick_at: Option<Duration>,
}

impl CountdownTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            seconds_remaining: duration_secs,
            state: TimerState::Idle,
            next_tick_at: None,
        }
    }

    /// Restarts from the full duration. Any tick pending from a previous run is dropped.
    pub fn start(&mut self, now: Duration) {
        self.seconds_remaining = self.duration_secs;
        self.state = TimerState::Running;
        self.next_tick_at = Some(now + TICK_INTERVAL);
    }

    /// Stops a running countdown without expiring it.
    pub fn cancel(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Idle;
        }
        self.next_tick_at = None;
    }

    /// Applies every tick scheduled at or before `now`.
    pub fn poll(&mut self, now: Duration) -> Option<Expired> {
        while let Some(at) = self.next_tick_at {
            if at > now {
                break;
            }
            if let Some(expired) = self.tick() {
                return Some(expired);
            }
        }
        None
    }

    fn tick(&mut self) -> Option<Expired> {
        if self.state != TimerState::Running {
            self.next_tick_at = None;
            return None;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.state = TimerState::Expired;
            self.next_tick_at = None;
            return Some(Expired);
        }

        self.next_tick_at = self.next_tick_at.map(|at| at + TICK_INTERVAL);
        None
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn next_tick_at(&self) -> Option<Duration> {
        self.next_tick_at
    }
}
