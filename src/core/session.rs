//! Session-wide state that outlives individual runs.
//!
//! A `Session` is created once per process and passed into every frame
//! tick. It is never written to disk.

/// Best score reached in this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub value: u32,
}

impl HighScore {
    /// Record a finished run. Returns true if the high score improved.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub high_score: HighScore,
    /// Runs that ended in a collision.
    pub runs_completed: u32,
    /// Score of the most recently finished run, for the game-over display.
    pub last_run_score: Option<u32>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close out a run. Returns true if it set a new high score.
    pub fn finish_run(&mut self, score: u32) -> bool {
        self.runs_completed += 1;
        self.last_run_score = Some(score);
        self.high_score.record(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert_eq!(session.high_score.value, 0);
        assert_eq!(session.runs_completed, 0);
        assert!(session.last_run_score.is_none());
    }

    #[test]
    fn test_high_score_keeps_maximum() {
        let mut session = Session::new();
        assert!(session.finish_run(120));
        assert!(!session.finish_run(80));
        assert_eq!(session.high_score.value, 120);
        assert_eq!(session.last_run_score, Some(80));
        assert!(session.finish_run(121));
        assert_eq!(session.high_score.value, 121);
        assert_eq!(session.runs_completed, 3);
    }

    #[test]
    fn test_equal_score_is_not_an_improvement() {
        let mut high = HighScore { value: 50 };
        assert!(!high.record(50));
        assert_eq!(high.value, 50);
    }
}
