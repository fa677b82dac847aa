use super::*;
use rand::Rng;
use std::time::Duration;

/// Durations governing turns, disconnects, computer thinking, and retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Time a human has to act before the turn is forced.
    pub turn: Duration,
    /// Extra silence tolerated beyond `turn` before eviction; also the
    /// least turn time that must remain for a mid-turn rejoin.
    pub grace: Duration,
    pub think_min: Duration,
    pub think_max: Duration,
    /// Age after which a finished table is purged.
    pub retention: Duration,
    /// Period of the disconnect sweep.
    pub sweep: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            turn: Duration::from_secs(TURN_TIMEOUT),
            grace: Duration::from_secs(REJOIN_GRACE),
            think_min: Duration::from_millis(THINK_MIN_MS),
            think_max: Duration::from_millis(THINK_MAX_MS),
            retention: Duration::from_secs(RETENTION_HOURS * 60 * 60),
            sweep: Duration::from_secs(SWEEP_INTERVAL),
        }
    }
}

impl TimerConfig {
    /// Silence after which a human seat is considered gone.
    pub fn eviction(&self) -> Duration {
        self.turn + self.grace
    }
    /// Uniform thinking delay for a computer turn.
    pub fn think<R>(&self, rng: &mut R) -> Duration
    where
        R: Rng,
    {
        if self.think_max > self.think_min {
            rng.random_range(self.think_min..=self.think_max)
        } else {
            self.think_min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TimerConfig::default();
        assert_eq!(config.turn, Duration::from_secs(45));
        assert_eq!(config.eviction(), Duration::from_secs(65));
        assert_eq!(config.retention, Duration::from_secs(24 * 3600));
    }

    #[test]
    fn thinking_stays_in_range() {
        let config = TimerConfig::default();
        let mut rng = rand::rng();
        for _ in 0..100 {
            let delay = config.think(&mut rng);
            assert!(delay >= config.think_min);
            assert!(delay <= config.think_max);
        }
        let instant = TimerConfig {
            think_max: Duration::ZERO,
            think_min: Duration::ZERO,
            ..config
        };
        assert_eq!(instant.think(&mut rng), Duration::ZERO);
    }
}
