use dashmap::DashMap;
use std::net::IpAddr;
use std::time::Duration;
use tokio::time::Instant;

use crate::errors::RateLimitExceeded;

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Fixed-window request budget per client address.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: DashMap<IpAddr, Window>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> RateLimiter {
        RateLimiter {
            max_requests,
            window,
            windows: DashMap::new(),
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Count a request from `client`, or reject it if the budget is spent.
    ///
    /// Rejected requests are not counted.
    pub fn check(&self, client: IpAddr) -> Result<(), RateLimitExceeded> {
        let now = Instant::now();
        // the entry guard holds the shard lock, so read-modify-write is atomic per key
        let mut entry = self.windows.entry(client).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(entry.started_at) >= self.window {
            entry.started_at = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            return Err(RateLimitExceeded {
                limit: self.max_requests,
                window: self.window,
            });
        }
        entry.count += 1;
        Ok(())
    }

    /// Drop every window that has already elapsed. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.duration_since(w.started_at) < self.window);
        before.saturating_sub(self.windows.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}
