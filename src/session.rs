use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::color::{ColorState, Shade};
use crate::error::{GameError, Result};
use crate::evaluator::{MatchEvaluator, MatchRule, Verdict, DEFAULT_TOLERANCE};
use crate::gesture::{GestureMapper, Smoothing, DEFAULT_EASE_RATE};
use crate::score::ScoreKeeper;
use crate::timer::{
    Clock, CountdownTimer, Expired, MonotonicClock, TimerState, DEFAULT_TIMER_SECS,
};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub timer_secs: u32,
    pub max_attempts: u32,
    pub tolerance: f64,
    pub match_rule: MatchRule,
    pub smoothing: Smoothing,
    pub ease_rate: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timer_secs: DEFAULT_TIMER_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            tolerance: DEFAULT_TOLERANCE,
            match_rule: MatchRule::Target,
            smoothing: Smoothing::Immediate,
            ease_rate: DEFAULT_EASE_RATE,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timer_secs == 0 {
            return Err(GameError::invalid("timer_secs", "must be at least 1"));
        }
        if self.max_attempts == 0 {
            return Err(GameError::invalid("max_attempts", "must be at least 1"));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(GameError::invalid(
                "tolerance",
                format!("must be a non-negative number, got {}", self.tolerance),
            ));
        }
        if !(self.ease_rate > 0.0 && self.ease_rate <= 1.0) {
            return Err(GameError::invalid(
                "ease_rate",
                format!("must be in (0, 1], got {}", self.ease_rate),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress,
    Correct,
    Forfeited,
    SessionComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    Missed,
    TimedOut,
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Matched)
    }
}

/// How the last attempt was settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub score_delta: i64,
    pub seconds_remaining: u32,
    pub verdict: Option<Verdict>,
}

/// Drives attempts, the countdown and scoring for one player.
#[derive(Debug)]
pub struct SessionController<C: Clock = MonotonicClock> {
    config: SessionConfig,
    color: ColorState,
    mapper: GestureMapper,
    evaluator: MatchEvaluator,
    timer: CountdownTimer,
    score: ScoreKeeper,
    phase: SessionPhase,
    last_resolution: Option<Resolution>,
    clock: C,
    rng: StdRng,
}

impl SessionController {
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_clock(config, MonotonicClock::new(), StdRng::from_entropy())
    }
}

impl<C: Clock> SessionController<C> {
    /// Builds a controller and starts its first attempt.
    pub fn with_clock(config: SessionConfig, clock: C, mut rng: StdRng) -> Result<Self> {
        config.validate()?;

        let mut session = Self {
            color: ColorState::new(&mut rng),
            mapper: GestureMapper::new(config.smoothing, config.ease_rate),
            evaluator: MatchEvaluator::new(config.match_rule, config.tolerance),
            timer: CountdownTimer::new(config.timer_secs),
            score: ScoreKeeper::new(),
            phase: SessionPhase::InProgress,
            last_resolution: None,
            clock,
            rng,
            config,
        };
        session.start_attempt();
        Ok(session)
    }

    fn start_attempt(&mut self) {
        self.color.reset(&mut self.rng);
        self.mapper.cancel();
        self.timer.start(self.clock.now());
        self.phase = SessionPhase::InProgress;
        self.last_resolution = None;

        let reference = self.color.reference();
        debug!(
            attempt = self.score.attempts() + 1,
            reference_hue = reference.hue,
            reference_brightness = reference.brightness,
            "attempt started"
        );
    }

    /// Catches the countdown up with the clock, forfeiting the attempt if it ran out.
    fn sync_timer(&mut self) -> Option<Resolution> {
        let Expired = self.timer.poll(self.clock.now())?;
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        Some(self.resolve(Outcome::TimedOut, None))
    }

    fn resolve(&mut self, outcome: Outcome, verdict: Option<Verdict>) -> Resolution {
        let seconds_remaining = self.timer.seconds_remaining();
        self.timer.cancel();
        self.mapper.cancel();

        let score_delta = self
            .score
            .apply_outcome(outcome.is_correct(), seconds_remaining);
        self.score.increment_attempts();

        self.phase = if self.score.attempts() >= self.config.max_attempts {
            SessionPhase::SessionComplete
        } else if outcome.is_correct() {
            SessionPhase::Correct
        } else {
            SessionPhase::Forfeited
        };

        let resolution = Resolution {
            outcome,
            score_delta,
            seconds_remaining,
            verdict,
        };
        self.last_resolution = Some(resolution);

        info!(
            ?outcome,
            score_delta,
            score = self.score.score(),
            attempts = self.score.attempts(),
            distance = verdict.map(|v| v.distance),
            "attempt resolved"
        );
        if self.phase == SessionPhase::SessionComplete {
            info!(final_score = self.score.score(), "session complete");
        }

        resolution
    }

    /// Feeds a drag delta in pixels. Returns false when the input was ignored.
    pub fn drag(&mut self, dx: f64, dy: f64) -> bool {
        self.sync_timer();
        if self.phase != SessionPhase::InProgress {
            debug!(phase = ?self.phase, "drag ignored");
            return false;
        }
        self.mapper.drag(dx, dy, &mut self.color);
        true
    }

    /// Runtime heartbeat: advances the countdown and any eased motion.
    pub fn on_tick(&mut self) -> Option<Resolution> {
        let resolution = self.sync_timer();
        if self.phase == SessionPhase::InProgress {
            self.mapper.settle(&mut self.color);
        }
        resolution
    }

    /// Evaluates the current color. `None` when no attempt is open.
    pub fn submit(&mut self) -> Option<Resolution> {
        self.sync_timer();
        if self.phase != SessionPhase::InProgress {
            debug!(phase = ?self.phase, "submit ignored");
            return None;
        }

        let verdict = self.evaluator.evaluate(&self.color);
        let outcome = if verdict.correct {
            Outcome::Matched
        } else {
            Outcome::Missed
        };
        Some(self.resolve(outcome, Some(verdict)))
    }

    /// "Next": opens the following attempt after a resolved one.
    pub fn advance(&mut self) -> SessionPhase {
        match self.phase {
            SessionPhase::Correct | SessionPhase::Forfeited => {
                // resolve() already ends the session at the attempt limit
                debug_assert!(self.score.attempts() < self.config.max_attempts);
                self.start_attempt();
            }
            SessionPhase::InProgress | SessionPhase::SessionComplete => {
                debug!(phase = ?self.phase, "advance ignored");
            }
        }
        self.phase
    }

    /// Valid from any phase.
    pub fn new_game(&mut self) {
        info!(previous_score = self.score.score(), "new game");
        self.timer.cancel();
        self.score.reset();
        self.start_attempt();
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn hue(&self) -> f64 {
        self.color.hue()
    }

    pub fn brightness(&self) -> f64 {
        self.color.brightness()
    }

    pub fn current(&self) -> Shade {
        self.color.current()
    }

    pub fn reference(&self) -> Shade {
        self.color.reference()
    }

    /// Color the player is trying to reach under the configured rule.
    pub fn target(&self) -> Shade {
        self.evaluator.target_for(&self.color)
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.timer.seconds_remaining()
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn score(&self) -> i64 {
        self.score.score()
    }

    pub fn attempts(&self) -> u32 {
        self.score.attempts()
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    pub fn tolerance(&self) -> f64 {
        self.evaluator.tolerance()
    }

    pub fn match_rule(&self) -> MatchRule {
        self.evaluator.rule()
    }

    pub fn last_resolution(&self) -> Option<Resolution> {
        self.last_resolution
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[cfg(test)]
    pub(crate) fn color_mut(&mut self) -> &mut ColorState {
        &mut self.color
    }
}
