use anyhow::{anyhow, Result};
use governor::{
    clock::{Clock, DefaultClock},
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{num::NonZeroU32, thread, time::Duration};
use tracing::debug;

use crate::config::RateLimits;

/// Fixed-interval gate every fetch passes through before hitting the network.
pub struct RequestGate<C: Clock = DefaultClock> {
    limiter: RateLimiter<NotKeyed, InMemoryState, C, NoOpMiddleware<C::Instant>>,
    clock: C,
}

impl RequestGate<DefaultClock> {
    pub fn from_config(rate_limits: &RateLimits) -> Result<Self> {
        Ok(Self::with_clock(quota(rate_limits)?, DefaultClock::default()))
    }

    /// Blocks the current thread until the next request may go out.
    pub fn acquire(&self) -> Duration {
        self.acquire_with(thread::sleep)
    }
}

impl<C: Clock> RequestGate<C> {
    pub fn with_clock(quota: Quota, clock: C) -> Self {
        let limiter = RateLimiter::direct_with_clock(quota, &clock);
        Self { limiter, clock }
    }

    /// Waits for a permit using `wait` and returns the total time waited.
    pub fn acquire_with<F>(&self, mut wait: F) -> Duration
    where
        F: FnMut(Duration),
    {
        let mut waited = Duration::ZERO;
        while let Err(not_until) = self.limiter.check() {
            let delay = not_until.wait_time_from(self.clock.now());
            debug!("Request gate closed, waiting {:?}", delay);
            wait(delay);
            waited += delay;
        }
        waited
    }
}

/// One permit per `1 / requests_per_second`, with no burst allowance.
pub fn quota(rate_limits: &RateLimits) -> Result<Quota> {
    let per_second = NonZeroU32::new(rate_limits.requests_per_second)
        .ok_or_else(|| anyhow!("Invalid requests_per_second value"))?;
    Ok(Quota::per_second(per_second).allow_burst(NonZeroU32::MIN))
}
