//! Fixed-cadence scheduler advanced from the frame loop.

/// Fires once per `interval_ms` of accumulated time, independent of frame rate.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTicker {
    pub interval_ms: f64,
    pub accumulated_ms: f64,
}

impl FixedTicker {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0.0,
        }
    }

    /// Add elapsed time. The caller then drains due ticks with [`Self::next_tick`].
    pub fn advance(&mut self, dt_ms: f64) {
        self.accumulated_ms += dt_ms.max(0.0);
    }

    /// Consume one due tick, if any.
    pub fn next_tick(&mut self) -> bool {
        if self.interval_ms > 0.0 && self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(ticker: &mut FixedTicker) -> u32 {
        let mut fired = 0;
        while ticker.next_tick() {
            fired += 1;
        }
        fired
    }

    #[test]
    fn test_no_tick_before_interval() {
        let mut ticker = FixedTicker::new(100.0);
        ticker.advance(99.0);
        assert_eq!(drain(&mut ticker), 0);
        ticker.advance(1.0);
        assert_eq!(drain(&mut ticker), 1);
    }

    #[test]
    fn test_large_step_fires_multiple_times() {
        let mut ticker = FixedTicker::new(100.0);
        ticker.advance(350.0);
        assert_eq!(drain(&mut ticker), 3);
        assert!((ticker.accumulated_ms - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_sixty_frames_give_ten_score_ticks() {
        let mut ticker = FixedTicker::new(1000.0 / 10.0);
        let mut fired = 0;
        for _ in 0..60 {
            ticker.advance(1000.0 / 60.0);
            fired += drain(&mut ticker);
        }
        // Float accumulation may leave the last tick a hair short
        assert!((9..=10).contains(&fired));
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut ticker = FixedTicker::new(10.0);
        ticker.advance(-50.0);
        assert!(ticker.accumulated_ms.abs() < f64::EPSILON);
    }
}
