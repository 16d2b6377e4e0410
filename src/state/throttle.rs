use std::time::{Duration, Instant};

/// Spaces consecutive requests to the crawl origin
///
/// Every network operation of a run (page fetches and PDF downloads alike)
/// goes through one throttle. The delay runs from the moment the previous
/// request finished, so a slow response is still followed by a full pause.
#[derive(Debug, Clone)]
pub struct RequestThrottle {
    /// Minimum pause between the end of one request and the start of the next
    delay: Duration,

    /// Timestamp at which the last request finished
    last_request_time: Option<Instant>,

    /// Number of requests made through this throttle
    request_count: u32,
}

impl RequestThrottle {
    /// Creates a throttle that has not issued any request yet
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request_time: None,
            request_count: 0,
        }
    }

    /// Checks if a request can be made now
    pub fn can_request(&self, now: Instant) -> bool {
        self.time_until_next_request(now).is_none()
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.delay {
            Some(self.delay - elapsed)
        } else {
            None
        }
    }

    /// Records that a request finished at `now`
    pub fn record_request(&mut self, now: Instant) {
        self.last_request_time = Some(now);
    }

    /// Waits until the delay since the previous request finished has elapsed
    ///
    /// Pair every call with [`RequestThrottle::finish`] once the request
    /// completes, whatever its outcome.
    pub async fn wait_turn(&mut self) {
        if let Some(wait) = self.time_until_next_request(Instant::now()) {
            tracing::trace!("Throttling next request for {:?}", wait);
            tokio::time::sleep(wait).await;
        }
        self.request_count += 1;
    }

    /// Marks the current request as finished, starting the next delay
    pub fn finish(&mut self) {
        self.record_request(Instant::now());
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn request_count(&self) -> u32 {
        self.request_count
    }
}
