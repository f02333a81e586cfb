use rand::Rng;

pub const HUE_MAX: f64 = 360.0;
pub const BRIGHTNESS_MAX: f64 = 1.0;
/// Brightness every attempt starts from, and the brightness of every reference.
pub const NEUTRAL_BRIGHTNESS: f64 = 0.5;

/// A hue/brightness pair. Rendered as `hsl(hue, brightness * 100%, 50%)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    pub hue: f64,
    pub brightness: f64,
}

impl Shade {
    pub fn new(hue: f64, brightness: f64) -> Self {
        Self {
            hue: clamp_hue(hue),
            brightness: clamp_brightness(brightness),
        }
    }

    /// Fresh reference color: uniform hue, neutral brightness.
    pub fn random_reference<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(0.0..HUE_MAX), NEUTRAL_BRIGHTNESS)
    }
}

fn clamp_hue(hue: f64) -> f64 {
    if hue.is_nan() {
        0.0
    } else {
        hue.clamp(0.0, HUE_MAX)
    }
}

fn clamp_brightness(brightness: f64) -> f64 {
    if brightness.is_nan() {
        NEUTRAL_BRIGHTNESS
    } else {
        brightness.clamp(0.0, BRIGHTNESS_MAX)
    }
}

/// The color the player is mixing plus the reference for the current attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorState {
    current: Shade,
    reference: Shade,
}

impl ColorState {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut state = Self {
            current: Shade::new(0.0, NEUTRAL_BRIGHTNESS),
            reference: Shade::new(0.0, NEUTRAL_BRIGHTNESS),
        };
        state.reset(rng);
        state
    }

    /// Draws a new reference and a new starting hue.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let reference = Shade::random_reference(rng);
        let start_hue = rng.gen_range(0.0..HUE_MAX);
        self.reset_with(reference, start_hue);
    }

    pub fn reset_with(&mut self, reference: Shade, start_hue: f64) {
        self.reference = reference;
        self.current = Shade::new(start_hue, NEUTRAL_BRIGHTNESS);
    }

    /// Adds the deltas and clamps. A non-finite component is dropped.
    pub fn apply_delta(&mut self, d_hue: f64, d_brightness: f64) {
        if d_hue.is_finite() {
            self.current.hue = clamp_hue(self.current.hue + d_hue);
        }
        if d_brightness.is_finite() {
            self.current.brightness = clamp_brightness(self.current.brightness + d_brightness);
        }
    }

    pub fn hue(&self) -> f64 {
        self.current.hue
    }

    pub fn brightness(&self) -> f64 {
        self.current.brightness
    }

    pub fn current(&self) -> Shade {
        self.current
    }

    pub fn reference(&self) -> Shade {
        self.reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn in_domain(state: &ColorState) -> bool {
        (0.0..=HUE_MAX).contains(&state.hue()) && (0.0..=BRIGHTNESS_MAX).contains(&state.brightness())
    }

    #[test]
    fn test_new_starts_neutral() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = ColorState::new(&mut rng);

        assert_eq!(state.brightness(), NEUTRAL_BRIGHTNESS);
        assert_eq!(state.reference().brightness, NEUTRAL_BRIGHTNESS);
        assert!((0.0..HUE_MAX).contains(&state.hue()));
        assert!((0.0..HUE_MAX).contains(&state.reference().hue));
    }

    #[test]
    fn test_apply_delta_clamps_both_ends() {
        let mut state = ColorState::new(&mut StdRng::seed_from_u64(1));
        state.reset_with(Shade::new(100.0, 0.5), 350.0);

        state.apply_delta(40.0, 2.0);
        assert_eq!(state.hue(), HUE_MAX);
        assert_eq!(state.brightness(), 1.0);

        state.apply_delta(-1000.0, -5.0);
        assert_eq!(state.hue(), 0.0);
        assert_eq!(state.brightness(), 0.0);
    }

    #[test]
    fn test_apply_delta_ignores_non_finite() {
        let mut state = ColorState::new(&mut StdRng::seed_from_u64(1));
        state.reset_with(Shade::new(100.0, 0.5), 180.0);

        state.apply_delta(f64::NAN, 0.1);
        assert_eq!(state.hue(), 180.0);
        assert!((state.brightness() - 0.6).abs() < 1e-9);

        state.apply_delta(f64::INFINITY, f64::NEG_INFINITY);
        assert_eq!(state.hue(), 180.0);
        assert!((state.brightness() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_random_deltas_stay_in_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = ColorState::new(&mut rng);

        for _ in 0..5_000 {
            let d_hue = rng.gen_range(-900.0..900.0);
            let d_brightness = rng.gen_range(-3.0..3.0);
            state.apply_delta(d_hue, d_brightness);
            assert!(in_domain(&state), "out of domain: {:?}", state.current());
        }
    }

    #[test]
    fn test_reset_keeps_reference_fixed_until_next_reset() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = ColorState::new(&mut rng);
        let reference = state.reference();

        state.apply_delta(25.0, 0.2);
        assert_eq!(state.reference(), reference);

        state.reset(&mut rng);
        assert_eq!(state.brightness(), NEUTRAL_BRIGHTNESS);
        assert_ne!(state.reference(), reference);
    }

    #[test]
    fn test_shade_new_clamps_and_rejects_nan() {
        assert_eq!(Shade::new(-5.0, 1.5), Shade::new(0.0, 1.0));
        assert_eq!(Shade::new(f64::NAN, f64::NAN), Shade::new(0.0, NEUTRAL_BRIGHTNESS));
    }
}
