use crate::capture_loop::core::{init, transition, Effect, Event, Startup, State};
use crate::config::Config;
use crate::decision_policy::Outcome;
use crate::device_camera::interface::{AuthorizationState, CameraError, CapturedFrame, Orientation};
use crate::image_classifier::interface::{Classification, ClassificationError};
use std::time::{Duration, Instant};

fn frame() -> CapturedFrame {
    CapturedFrame::new(vec![1, 2, 3], Orientation::Up).unwrap()
}

fn resolving() -> State {
    State::Idle {
        startup: Startup::ResolvingPermission,
    }
}

fn starting() -> State {
    State::Idle {
        startup: Startup::StartingSession,
    }
}

#[test]
fn test_init() {
    let (state, effects) = init();

    assert_eq!(state, resolving());
    assert_eq!(effects, vec![Effect::ResolvePermission]);
}

#[test]
fn test_authorized_starts_session_then_captures() {
    let config = Config::default();
    let now = Instant::now();

    let (state, effects) = transition(
        &config,
        resolving(),
        Event::PermissionResolved(AuthorizationState::Authorized),
        now,
    );
    assert_eq!(state, starting());
    assert_eq!(effects, vec![Effect::StartSession]);

    let (state, effects) = transition(&config, state, Event::SessionStarted(Ok(())), now);
    assert_eq!(state, State::AwaitingFrame);
    assert_eq!(effects, vec![Effect::CaptureFrame]);
}

#[test]
fn test_not_authorized_stops_and_dismisses() {
    let config = Config::default();

    for authorization in [
        AuthorizationState::Denied,
        AuthorizationState::Restricted,
        AuthorizationState::Unknown,
        AuthorizationState::NotDetermined,
    ] {
        let (state, effects) = transition(
            &config,
            resolving(),
            Event::PermissionResolved(authorization),
            Instant::now(),
        );

        assert_eq!(state, State::Stopped);
        assert_eq!(effects, vec![Effect::Dismiss]);
    }
}

#[test]
fn test_session_start_failure_stops_and_dismisses() {
    let config = Config::default();

    let (state, effects) = transition(
        &config,
        starting(),
        Event::SessionStarted(Err(CameraError::NoDevice)),
        Instant::now(),
    );

    assert_eq!(state, State::Stopped);
    assert_eq!(effects, vec![Effect::StopSession, Effect::Dismiss]);
}

#[test]
fn test_full_cycle() {
    let config = Config::default();
    let t0 = Instant::now();

    let (state, effects) = transition(
        &config,
        State::AwaitingFrame,
        Event::FrameReady(Ok(frame())),
        t0,
    );
    assert_eq!(state, State::Classifying);
    assert_eq!(effects, vec![Effect::Classify { frame: frame() }]);

    let (state, effects) = transition(
        &config,
        state,
        Event::ClassificationDone(Ok(vec![
            Classification::new("A", 0.4),
            Classification::new("B", 0.72),
        ])),
        t0,
    );
    assert_eq!(state, State::Cooling { since: t0 });
    assert_eq!(
        effects,
        vec![
            Effect::Emit(Outcome::Label("B".to_string())),
            Effect::ScheduleTimer {
                deadline: t0 + Duration::from_millis(1000)
            },
        ]
    );

    let (state, effects) = transition(
        &config,
        state,
        Event::TimerFired,
        t0 + Duration::from_millis(1000),
    );
    assert_eq!(state, State::AwaitingFrame);
    assert_eq!(effects, vec![Effect::CaptureFrame]);
}

#[test]
fn test_low_confidence_emits_no_result() {
    let config = Config::default();
    let t0 = Instant::now();

    let (_, effects) = transition(
        &config,
        State::Classifying,
        Event::ClassificationDone(Ok(vec![Classification::new("A", 0.6)])),
        t0,
    );

    assert_eq!(effects[0], Effect::Emit(Outcome::NoResult));
}

#[test]
fn test_empty_classification_emits_no_result() {
    let config = Config::default();

    let (_, effects) = transition(
        &config,
        State::Classifying,
        Event::ClassificationDone(Ok(vec![])),
        Instant::now(),
    );

    assert_eq!(effects[0], Effect::Emit(Outcome::NoResult));
}

#[test]
fn test_model_failure_emits_unavailable_and_keeps_looping() {
    let config = Config::default();
    let t0 = Instant::now();

    let (state, effects) = transition(
        &config,
        State::Classifying,
        Event::ClassificationDone(Err(ClassificationError::ModelInvocationFailed(
            "bad input".to_string(),
        ))),
        t0,
    );

    assert_eq!(state, State::Cooling { since: t0 });
    assert_eq!(
        effects,
        vec![
            Effect::Emit(Outcome::ClassificationUnavailable),
            Effect::ScheduleTimer {
                deadline: t0 + config.cooldown
            },
        ]
    );
}

#[test]
fn test_capture_failure_cools_down_without_emitting() {
    let config = Config::default();
    let t0 = Instant::now();

    let (state, effects) = transition(
        &config,
        State::AwaitingFrame,
        Event::FrameReady(Err(CameraError::EmptyFrameData)),
        t0,
    );

    assert_eq!(state, State::Cooling { since: t0 });
    assert_eq!(
        effects,
        vec![Effect::ScheduleTimer {
            deadline: t0 + config.cooldown
        }]
    );
}

#[test]
fn test_cooldown_is_exact_under_fixed_clock() {
    let config = Config::default();
    let since = Instant::now();
    let cooling = State::Cooling { since };

    let (state, effects) = transition(
        &config,
        cooling.clone(),
        Event::TimerFired,
        since + Duration::from_millis(999),
    );
    assert_eq!(state, cooling);
    assert_eq!(
        effects,
        vec![Effect::ScheduleTimer {
            deadline: since + Duration::from_millis(1000)
        }]
    );

    let (state, effects) = transition(
        &config,
        cooling,
        Event::TimerFired,
        since + Duration::from_millis(1000),
    );
    assert_eq!(state, State::AwaitingFrame);
    assert_eq!(effects, vec![Effect::CaptureFrame]);
}

#[test]
fn test_configured_cooldown() {
    let config = Config {
        cooldown: Duration::from_millis(250),
        ..Config::default()
    };
    let since = Instant::now();

    let (state, _) = transition(
        &config,
        State::Cooling { since },
        Event::TimerFired,
        since + Duration::from_millis(250),
    );

    assert_eq!(state, State::AwaitingFrame);
}

#[test]
fn test_no_capture_outside_cooling_and_session_start() {
    let config = Config::default();
    let now = Instant::now();

    // Only these two transitions may request a frame.
    let requesting = [
        (starting(), Event::SessionStarted(Ok(()))),
        (
            State::Cooling {
                since: now - config.cooldown,
            },
            Event::TimerFired,
        ),
    ];
    for (state, event) in requesting {
        let (_, effects) = transition(&config, state, event, now);
        assert_eq!(effects, vec![Effect::CaptureFrame]);
    }

    for state in [State::AwaitingFrame, State::Classifying] {
        let (next, effects) = transition(&config, state.clone(), Event::TimerFired, now);
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }
}

#[test]
fn test_out_of_sequence_frame_is_dropped() {
    let config = Config::default();
    let now = Instant::now();

    for state in [
        State::Classifying,
        State::Cooling { since: now },
        resolving(),
    ] {
        let (next, effects) = transition(&config, state.clone(), Event::FrameReady(Ok(frame())), now);

        assert_eq!(next, state);
        assert!(effects.is_empty());
    }
}

#[test]
fn test_out_of_sequence_classification_is_dropped() {
    let config = Config::default();
    let now = Instant::now();

    let (next, effects) = transition(
        &config,
        State::AwaitingFrame,
        Event::ClassificationDone(Ok(vec![Classification::new("A", 0.99)])),
        now,
    );

    assert_eq!(next, State::AwaitingFrame);
    assert!(effects.is_empty());
}

#[test]
fn test_shutdown_releases_session_when_held() {
    let config = Config::default();
    let now = Instant::now();

    for state in [
        State::AwaitingFrame,
        State::Classifying,
        State::Cooling { since: now },
    ] {
        let (next, effects) = transition(&config, state, Event::ShutdownRequested, now);

        assert_eq!(next, State::Stopped);
        assert_eq!(effects, vec![Effect::StopSession]);
    }
}

#[test]
fn test_shutdown_mid_start_waits_for_session_then_stops_it() {
    let config = Config::default();
    let now = Instant::now();

    let (state, effects) = transition(&config, starting(), Event::ShutdownRequested, now);
    assert_eq!(state, State::Stopping);
    assert!(effects.is_empty());

    for event in [
        Event::ShutdownRequested,
        Event::TimerFired,
        Event::FrameReady(Ok(frame())),
    ] {
        let (next, effects) = transition(&config, State::Stopping, event, now);
        assert_eq!(next, State::Stopping);
        assert!(effects.is_empty());
    }

    for started in [Ok(()), Err(CameraError::NoDevice)] {
        let (next, effects) =
            transition(&config, State::Stopping, Event::SessionStarted(started), now);
        assert_eq!(next, State::Stopped);
        assert_eq!(effects, vec![Effect::StopSession]);
    }
}

#[test]
fn test_shutdown_before_session() {
    let config = Config::default();

    let (next, effects) = transition(&config, resolving(), Event::ShutdownRequested, Instant::now());

    assert_eq!(next, State::Stopped);
    assert!(effects.is_empty());
}

#[test]
fn test_stopped_discards_late_results() {
    let config = Config::default();
    let now = Instant::now();

    let late = vec![
        Event::ClassificationDone(Ok(vec![Classification::new("A", 0.99)])),
        Event::FrameReady(Ok(frame())),
        Event::TimerFired,
        Event::SessionStarted(Ok(())),
        Event::PermissionResolved(AuthorizationState::Authorized),
        Event::ShutdownRequested,
    ];

    for event in late {
        let (next, effects) = transition(&config, State::Stopped, event, now);

        assert_eq!(next, State::Stopped);
        assert!(effects.is_empty());
    }
}
