use governor::clock::{Clock as GovernorClock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Minimum spacing between outbound requests (~10 req/sec locally).
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(100);
/// Riot's documented application budget: 100 requests per 2-minute window.
pub const MAX_REQUESTS_PER_WINDOW: u32 = 100;
pub const WINDOW_SIZE: Duration = Duration::from_secs(120);

/// Monotonic time source. Injectable so timing behavior is testable without
/// real sleeps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

struct PacerState {
    last_request: Option<Instant>,
    dispatched: VecDeque<Instant>,
}

/// Paces outbound requests: enforces the minimum inter-request spacing, then
/// the window ceiling, and keeps a pruned log of dispatch times for status
/// reporting. Check-then-update runs under one lock so callers sharing a
/// client cannot interleave between the check and the record.
pub struct RequestPacer {
    clock: Arc<dyn Clock>,
    min_interval: Duration,
    window: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    window_clock: DefaultClock,
    state: Mutex<PacerState>,
}

#[derive(Debug, Clone, Copy)]
pub struct PacerStatus {
    pub requests_in_window: u32,
    pub max_requests_per_window: u32,
    pub window: Duration,
}

impl RequestPacer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_interval(clock, MIN_REQUEST_INTERVAL)
    }

    pub fn with_interval(clock: Arc<dyn Clock>, min_interval: Duration) -> Self {
        let period = WINDOW_SIZE / MAX_REQUESTS_PER_WINDOW;
        let quota = Quota::with_period(period)
            .unwrap()
            .allow_burst(NonZeroU32::new(MAX_REQUESTS_PER_WINDOW).unwrap());

        RequestPacer {
            clock,
            min_interval,
            window: RateLimiter::direct(quota),
            window_clock: DefaultClock::default(),
            state: Mutex::new(PacerState {
                last_request: None,
                dispatched: VecDeque::new(),
            }),
        }
    }

    /// Blocks until the next request may be dispatched, then records the
    /// dispatch time. Must be called exactly once per outbound request.
    pub fn wait_turn(&self) {
        let mut state = self.state.lock().unwrap();

        if let Some(last) = state.last_request {
            let elapsed = self.clock.now().saturating_duration_since(last);
            if elapsed < self.min_interval {
                self.clock.sleep(self.min_interval - elapsed);
            }
        }

        // Window ceiling: the spacing above keeps bursts polite, this keeps
        // the absolute 2-minute budget.
        while let Err(not_until) = self.window.check() {
            self.clock
                .sleep(not_until.wait_time_from(self.window_clock.now()));
        }

        let now = self.clock.now();
        state.last_request = Some(now);
        state.dispatched.push_back(now);
        Self::prune(&mut state.dispatched, now);
    }

    pub fn status(&self) -> PacerStatus {
        let mut state = self.state.lock().unwrap();
        let now = self.clock.now();
        Self::prune(&mut state.dispatched, now);

        PacerStatus {
            requests_in_window: state.dispatched.len() as u32,
            max_requests_per_window: MAX_REQUESTS_PER_WINDOW,
            window: WINDOW_SIZE,
        }
    }

    fn prune(dispatched: &mut VecDeque<Instant>, now: Instant) {
        if let Some(horizon) = now.checked_sub(WINDOW_SIZE) {
            while dispatched
                .front()
                .map_or(false, |instant| *instant < horizon)
            {
                dispatched.pop_front();
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Clock stub: sleeping advances simulated time instead of blocking, and
    /// every sleep is recorded for assertions.
    pub(crate) struct ManualClock {
        start: Instant,
        offset: Mutex<Duration>,
        sleeps: Mutex<Vec<Duration>>,
    }

    impl ManualClock {
        pub(crate) fn new() -> Self {
            ManualClock {
                start: Instant::now(),
                offset: Mutex::new(Duration::ZERO),
                sleeps: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn advance(&self, duration: Duration) {
            *self.offset.lock().unwrap() += duration;
        }

        pub(crate) fn elapsed(&self) -> Duration {
            *self.offset.lock().unwrap()
        }

        pub(crate) fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.start + *self.offset.lock().unwrap()
        }

        fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
            *self.offset.lock().unwrap() += duration;
        }
    }
}
