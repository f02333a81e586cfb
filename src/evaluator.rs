use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::color::{ColorState, Shade, NEUTRAL_BRIGHTNESS};

pub const DEFAULT_TOLERANCE: f64 = 20.0;
/// Weight of one unit of brightness against one degree of hue.
pub const BRIGHTNESS_WEIGHT: f64 = 100.0;

/// What the player's color is compared against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchRule {
    /// The reference drawn at the start of the attempt.
    Target,
    /// Hue against itself, brightness against `|brightness - 0.5| * 2`.
    Literal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub correct: bool,
    pub distance: f64,
}

pub fn distance(a: Shade, b: Shade) -> f64 {
    (a.brightness - b.brightness).abs() * BRIGHTNESS_WEIGHT + (a.hue - b.hue).abs()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchEvaluator {
    rule: MatchRule,
    tolerance: f64,
}

impl MatchEvaluator {
    pub fn new(rule: MatchRule, tolerance: f64) -> Self {
        Self { rule, tolerance }
    }

    pub fn rule(&self) -> MatchRule {
        self.rule
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn target_for(&self, color: &ColorState) -> Shade {
        match self.rule {
            MatchRule::Target => color.reference(),
            MatchRule::Literal => Shade {
                hue: color.hue(),
                brightness: (color.brightness() - NEUTRAL_BRIGHTNESS).abs() * 2.0,
            },
        }
    }

    pub fn evaluate(&self, color: &ColorState) -> Verdict {
        let distance = distance(self.target_for(color), color.current());
        Verdict {
            correct: distance <= self.tolerance,
            distance,
        }
    }
}

impl Default for MatchEvaluator {
    fn default() -> Self {
        Self::new(MatchRule::Target, DEFAULT_TOLERANCE)
    }
}
