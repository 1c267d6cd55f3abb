use std::time::{Duration, Instant};

/// Countdown started when an exam begins.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    started_at: Instant,
    duration: Duration,
}

impl Countdown {
    pub fn start(duration: Duration, now: Instant) -> Self {
        Self {
            started_at: now,
            duration,
        }
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.started_at))
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.remaining_at(now).is_zero()
    }
}

/// Formats a duration as `MM : SS`, rounding partial seconds up so the
/// clock only reads `00 : 00` once time is really over.
pub fn format_clock(remaining: Duration) -> String {
    let mut seconds = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        seconds += 1;
    }
    format!("{:02} : {:02}", seconds / 60, seconds % 60)
}
