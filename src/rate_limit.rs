use std::net::IpAddr;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Per-IP submission rate limiter using a fixed window.
pub struct SubmissionRateLimiter {
    /// ip -> (count, window_start)
    entries: DashMap<IpAddr, (u32, Instant)>,
}

impl Default for SubmissionRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Check if request is allowed. Returns Ok(()) or Err with retry-after seconds.
    pub fn check(&self, ip: IpAddr, limit: u32, window_secs: u64) -> Result<(), u64> {
        self.check_at(ip, limit, window_secs, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, limit: u32, window_secs: u64, now: Instant) -> Result<(), u64> {
        let window = Duration::from_secs(window_secs);

        let mut entry = self.entries.entry(ip).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > window {
            *count = 1;
            *start = now;
            return Ok(());
        }

        if *count >= limit {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(window_secs.saturating_sub(elapsed));
        }

        *count += 1;
        Ok(())
    }

    /// Remove stale entries older than the given duration.
    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries.retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn allows_up_to_limit_then_blocks() {
        let limiter = SubmissionRateLimiter::new();
        let now = Instant::now();

        for _ in 0..3 {
            assert!(limiter.check_at(ip("203.0.113.9"), 3, 60, now).is_ok());
        }
        let retry_after = limiter.check_at(ip("203.0.113.9"), 3, 60, now).unwrap_err();
        assert_eq!(retry_after, 60);
    }

    #[test]
    fn addresses_are_counted_separately() {
        let limiter = SubmissionRateLimiter::new();
        let now = Instant::now();

        assert!(limiter.check_at(ip("203.0.113.9"), 1, 60, now).is_ok());
        assert!(limiter.check_at(ip("203.0.113.9"), 1, 60, now).is_err());
        assert!(limiter.check_at(ip("198.51.100.1"), 1, 60, now).is_ok());
    }

    #[test]
    fn window_resets() {
        let limiter = SubmissionRateLimiter::new();
        let start = Instant::now();

        assert!(limiter.check_at(ip("203.0.113.9"), 1, 60, start).is_ok());
        assert!(limiter.check_at(ip("203.0.113.9"), 1, 60, start).is_err());
        assert!(
            limiter
                .check_at(ip("203.0.113.9"), 1, 60, start + Duration::from_secs(61))
                .is_ok()
        );
    }

    #[test]
    fn cleanup_drops_stale_entries() {
        let limiter = SubmissionRateLimiter::new();
        limiter.check(ip("203.0.113.9"), 5, 60).unwrap();
        assert_eq!(limiter.len(), 1);

        limiter.cleanup(Duration::ZERO);
        assert!(limiter.is_empty());
    }
}
