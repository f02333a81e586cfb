use std::time::Duration;

use assert_matches::assert_matches;
use huematch::color::NEUTRAL_BRIGHTNESS;
use huematch::evaluator::{distance, MatchRule, DEFAULT_TOLERANCE};
use huematch::session::{
    Outcome, Resolution, SessionConfig, SessionController, SessionPhase, DEFAULT_MAX_ATTEMPTS,
};
use huematch::timer::{ManualClock, TimerState, DEFAULT_TIMER_SECS};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn start(config: SessionConfig, seed: u64) -> (SessionController<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let session =
        SessionController::with_clock(config, clock.clone(), StdRng::seed_from_u64(seed)).unwrap();
    (session, clock)
}

/// Drags the swatch onto the reference hue; brightness already matches at the start.
fn drag_onto_reference(session: &mut SessionController<ManualClock>) {
    let dx = session.reference().hue - session.hue();
    assert!(session.drag(dx, 0.0));
}

#[test]
fn idle_attempt_forfeits_after_timer_duration() {
    let (mut session, clock) = start(SessionConfig::default(), 1);

    for _ in 0..(DEFAULT_TIMER_SECS - 1) {
        clock.advance(Duration::from_secs(1));
        assert_eq!(session.on_tick(), None);
    }
    assert_eq!(session.phase(), SessionPhase::InProgress);

    clock.advance(Duration::from_secs(1));
    let resolution = session.on_tick().unwrap();

    assert_eq!(resolution.outcome, Outcome::TimedOut);
    assert_eq!(resolution.score_delta, 0);
    assert_eq!(session.phase(), SessionPhase::Forfeited);
    assert_eq!(session.attempts(), 1);
    assert_eq!(session.score(), 0);
}

#[test]
fn immediate_submit_is_correct_iff_within_tolerance() {
    for seed in 0..50 {
        let (mut session, _) = start(SessionConfig::default(), seed);
        let expected = distance(session.reference(), session.current());

        let resolution = session.submit().unwrap();
        let verdict = resolution.verdict.unwrap();

        assert!((verdict.distance - expected).abs() < 1e-9);
        assert_eq!(verdict.correct, expected <= DEFAULT_TOLERANCE);
        let phase = if verdict.correct {
            SessionPhase::Correct
        } else {
            SessionPhase::Forfeited
        };
        assert_eq!(session.phase(), phase);
    }
}

#[test]
fn immediate_submit_under_literal_rule_is_never_correct() {
    for seed in 0..10 {
        let (mut session, _) = start(
            SessionConfig {
                match_rule: MatchRule::Literal,
                ..SessionConfig::default()
            },
            seed,
        );
        assert_eq!(session.brightness(), NEUTRAL_BRIGHTNESS);

        let verdict = session.submit().unwrap().verdict.unwrap();
        assert!((verdict.distance - 50.0).abs() < 1e-9);
        assert!(!verdict.correct);
    }
}

#[test]
fn dragging_onto_target_scores_remaining_time() {
    let (mut session, clock) = start(SessionConfig::default(), 8);
    clock.advance(Duration::from_millis(2500));
    drag_onto_reference(&mut session);

    let resolution = session.submit().unwrap();
    assert_eq!(resolution.outcome, Outcome::Matched);
    assert_eq!(resolution.seconds_remaining, 8);
    assert_eq!(session.score(), 80);
}

#[test]
fn ten_resolved_attempts_complete_the_session() {
    let (mut session, clock) = start(SessionConfig::default(), 3);
    let mut rng = StdRng::seed_from_u64(77);

    for attempt in 1..=DEFAULT_MAX_ATTEMPTS {
        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(session.seconds_remaining(), DEFAULT_TIMER_SECS);

        match rng.gen_range(0..3) {
            0 => {
                clock.advance(Duration::from_secs(10));
                session.on_tick().unwrap();
            }
            1 => {
                clock.advance(Duration::from_secs(rng.gen_range(0..10)));
                drag_onto_reference(&mut session);
                session.submit().unwrap();
            }
            _ => {
                clock.advance(Duration::from_secs(rng.gen_range(0..10)));
                session.submit().unwrap();
            }
        }
        assert_eq!(session.attempts(), attempt);

        if attempt < DEFAULT_MAX_ATTEMPTS {
            assert_ne!(session.phase(), SessionPhase::SessionComplete);
            session.advance();
        }
    }

    assert_eq!(session.phase(), SessionPhase::SessionComplete);
    assert_eq!(session.submit(), None);
    assert!(!session.drag(40.0, 40.0));
    clock.advance(Duration::from_secs(30));
    assert_eq!(session.on_tick(), None);
    assert_eq!(session.attempts(), DEFAULT_MAX_ATTEMPTS);
}

#[test]
fn each_attempt_updates_score_exactly_once() {
    let (mut session, clock) = start(SessionConfig::default(), 12);

    clock.advance(Duration::from_secs(6));
    let resolution = session.submit().unwrap();
    let score_after = session.score();
    assert_eq!(score_after, resolution.score_delta);

    // late tick, repeated submits and drags change nothing
    clock.advance(Duration::from_secs(10));
    assert_eq!(session.on_tick(), None);
    assert_eq!(session.submit(), None);
    assert_eq!(session.submit(), None);
    assert!(!session.drag(5.0, 5.0));

    assert_eq!(session.score(), score_after);
    assert_eq!(session.attempts(), 1);
}

#[test]
fn submit_one_tick_before_expiry_prevents_forfeit() {
    let (mut session, clock) = start(SessionConfig::default(), 5);
    drag_onto_reference(&mut session);

    clock.advance(Duration::from_secs(u64::from(DEFAULT_TIMER_SECS) - 1));
    let resolution = session.submit().unwrap();
    assert_eq!(resolution.outcome, Outcome::Matched);
    assert_eq!(session.timer_state(), TimerState::Idle);

    for _ in 0..5 {
        clock.advance(Duration::from_secs(1));
        assert_eq!(session.on_tick(), None);
    }
    assert_eq!(session.phase(), SessionPhase::Correct);
    assert_eq!(session.attempts(), 1);
    assert_eq!(session.score(), 10);
}

#[test]
fn stale_expiry_does_not_leak_into_next_attempt() {
    let (mut session, clock) = start(SessionConfig::default(), 6);
    clock.advance(Duration::from_millis(9500));
    session.submit().unwrap();

    // the old attempt would have expired at 10s
    clock.advance(Duration::from_millis(1000));
    session.advance();
    assert_eq!(session.phase(), SessionPhase::InProgress);

    clock.advance(Duration::from_secs(5));
    assert_eq!(session.on_tick(), None);
    assert_eq!(session.seconds_remaining(), 5);
    assert_eq!(session.attempts(), 1);
}

#[test]
fn new_game_resets_everything() {
    let (mut session, clock) = start(SessionConfig::default(), 9);
    clock.advance(Duration::from_secs(3));
    drag_onto_reference(&mut session);
    session.submit().unwrap();
    assert!(session.score() > 0);
    let old_reference = session.reference();

    session.new_game();

    assert_eq!(session.phase(), SessionPhase::InProgress);
    assert_eq!(session.score(), 0);
    assert_eq!(session.attempts(), 0);
    assert_eq!(session.seconds_remaining(), DEFAULT_TIMER_SECS);
    assert_eq!(session.brightness(), NEUTRAL_BRIGHTNESS);
    assert_ne!(session.reference(), old_reference);
    assert_matches!(session.last_resolution(), None);
}

#[test]
fn missed_submit_is_penalised_by_remaining_time() {
    let (mut session, clock) = start(SessionConfig::default(), 10);
    let dx = if session.reference().hue > 180.0 {
        -400.0
    } else {
        400.0
    };
    session.drag(dx, 0.0);
    clock.advance(Duration::from_secs(4));

    assert_matches!(
        session.submit(),
        Some(Resolution {
            outcome: Outcome::Missed,
            score_delta: -60,
            seconds_remaining: 6,
            ..
        })
    );
    assert_eq!(session.phase(), SessionPhase::Forfeited);
}
