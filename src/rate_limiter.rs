use std::sync::Mutex;
use std::time::{Duration, Instant};

use tokio::sync::Notify;
use tokio::time;

use crate::errors::ServiceError;

/// Fixed-window admission gate: at most `capacity` grants per `window`.
/// Callers over the limit block in [`acquire`](RateLimiter::acquire) until
/// the window rolls over and tokens refill.
pub struct RateLimiter {
    capacity: u32,
    window: Duration,
    state: Mutex<QuotaState>, // held only for refill-check/decrement, never across a wait
    refill_notify: Notify,
}

#[derive(Debug)]
struct QuotaState {
    tokens: u32,
    window_start: Instant,
    shutdown: bool,
}

impl RateLimiter {
    pub fn new(window: Duration, request_limit: u32) -> Result<Self, ServiceError> {
        if request_limit == 0 {
            return Err(ServiceError::InvalidConfiguration(
                "request limit must be positive".to_string(),
            ));
        }
        if window.is_zero() {
            return Err(ServiceError::InvalidConfiguration(
                "rate window must be positive".to_string(),
            ));
        }
        Ok(Self {
            capacity: request_limit,
            window,
            state: Mutex::new(QuotaState {
                tokens: request_limit,
                window_start: Instant::now(),
                shutdown: false,
            }),
            refill_notify: Notify::new(),
        })
    }

    /// Limiter over a one-second window.
    pub fn per_second(request_limit: u32) -> Result<Self, ServiceError> {
        Self::new(Duration::from_secs(1), request_limit)
    }

    /// Waits until a token can be granted, then takes it.
    ///
    /// Returns `ServiceError::Interrupted` if the limiter is shut down
    /// while the caller is blocked.
    pub async fn acquire(&self) -> Result<(), ServiceError> {
        loop {
            let wait = {
                let mut state = self.state.lock().expect("rate limiter mutex poisoned");
                if state.shutdown {
                    return Err(ServiceError::Interrupted);
                }
                self.refill(&mut state);
                if state.tokens > 0 {
                    state.tokens -= 1;
                    return Ok(());
                }
                self.window.saturating_sub(state.window_start.elapsed())
            };
            // Lock released while waiting. A refill broadcast wakes us early;
            // otherwise sleep out the rest of the window and re-check. Waking
            // up is not a grant: every waiter re-competes for tokens.
            let wait = wait.max(Duration::from_millis(1));
            let _ = time::timeout(wait, self.refill_notify.notified()).await;
        }
    }

    /// Tokens left in the current window, refilling first if it has
    /// rolled over.
    pub fn available(&self) -> u32 {
        let mut state = self.state.lock().expect("rate limiter mutex poisoned");
        self.refill(&mut state);
        state.tokens
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Wakes every blocked caller; they and all subsequent callers get
    /// `ServiceError::Interrupted`. Quota state is left untouched.
    pub fn shutdown(&self) {
        let mut state = self.state.lock().expect("rate limiter mutex poisoned");
        state.shutdown = true;
        self.refill_notify.notify_waiters();
    }

    // Strict `>` so a grant landing exactly on the boundary still counts
    // against the old window.
    fn refill(&self, state: &mut QuotaState) {
        let now = Instant::now();
        if now.duration_since(state.window_start) > self.window {
            state.tokens = self.capacity;
            state.window_start = now;
            self.refill_notify.notify_waiters();
        }
    }
}
