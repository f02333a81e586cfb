pub const POINTS_PER_SECOND: i64 = 10;

/// Running score and resolved-attempt count for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreKeeper {
    score: i64,
    attempts: u32,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or subtracts ten points per second left on the clock. Returns the delta.
    pub fn apply_outcome(&mut self, correct: bool, seconds_remaining: u32) -> i64 {
        let points = i64::from(seconds_remaining) * POINTS_PER_SECOND;
        let delta = if correct { points } else { -points };
        self.score += delta;
        delta
    }

    pub fn increment_attempts(&mut self) {
        self.attempts += 1;
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.attempts = 0;
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}
