use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::color::{ColorState, Shade};

/// Degrees of hue per horizontal pixel of drag.
pub const HUE_PER_PX: f64 = 1.0;
/// Pixels of vertical drag for a full unit of brightness.
pub const BRIGHTNESS_PX_SCALE: f64 = 150.0;
/// Share of the pending delta released per animation frame when eased.
pub const DEFAULT_EASE_RATE: f64 = 0.35;

const SNAP_EPSILON: f64 = 1e-3;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Smoothing {
    Immediate,
    Eased,
}

/// Pixel-space drag to hue/brightness deltas.
pub fn map_drag(dx: f64, dy: f64) -> (f64, f64) {
    (dx * HUE_PER_PX, -dy / BRIGHTNESS_PX_SCALE)
}

#[derive(Debug, Clone)]
pub struct GestureMapper {
    smoothing: Smoothing,
    ease_rate: f64,
    pending_hue: f64,
    pending_brightness: f64,
}

impl GestureMapper {
    pub fn new(smoothing: Smoothing, ease_rate: f64) -> Self {
        Self {
            smoothing,
            ease_rate: ease_rate.clamp(f64::EPSILON, 1.0),
            pending_hue: 0.0,
            pending_brightness: 0.0,
        }
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    pub fn drag(&mut self, dx: f64, dy: f64, color: &mut ColorState) {
        let (d_hue, d_brightness) = map_drag(dx, dy);
        if !d_hue.is_finite() || !d_brightness.is_finite() {
            return;
        }

        match self.smoothing {
            Smoothing::Immediate => color.apply_delta(d_hue, d_brightness),
            Smoothing::Eased => {
                // the eased goal never leaves the color domain
                let goal = Shade::new(
                    color.hue() + self.pending_hue + d_hue,
                    color.brightness() + self.pending_brightness + d_brightness,
                );
                self.pending_hue = goal.hue - color.hue();
                self.pending_brightness = goal.brightness - color.brightness();
            }
        }
    }

    /// Advances the eased transition by one frame.
    pub fn settle(&mut self, color: &mut ColorState) {
        if !self.is_moving() {
            return;
        }

        let (step_hue, step_brightness) = if self.pending_hue.abs() < SNAP_EPSILON
            && self.pending_brightness.abs() < SNAP_EPSILON
        {
            (self.pending_hue, self.pending_brightness)
        } else {
            (
                self.pending_hue * self.ease_rate,
                self.pending_brightness * self.ease_rate,
            )
        };

        color.apply_delta(step_hue, step_brightness);
        self.pending_hue -= step_hue;
        self.pending_brightness -= step_brightness;
    }

    pub fn is_moving(&self) -> bool {
        self.pending_hue != 0.0 || self.pending_brightness != 0.0
    }

    /// Drops any motion still queued.
    pub fn cancel(&mut self) {
        self.pending_hue = 0.0;
        self.pending_brightness = 0.0;
    }
}

impl Default for GestureMapper {
    fn default() -> Self {
        Self::new(Smoothing::Immediate, DEFAULT_EASE_RATE)
    }
}
