use crate::config::Config;
use crate::decision_policy::{decide, Outcome};
use crate::device_camera::interface::{AuthorizationState, CameraError, CapturedFrame};
use crate::image_classifier::interface::{Classification, ClassificationError};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    ResolvingPermission,
    StartingSession,
}

/// Exactly one of these is active. Each working state has exactly one
/// operation in flight, so cycles never overlap.
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Idle { startup: Startup },
    AwaitingFrame,
    Classifying,
    Cooling { since: Instant },
    /// Shutdown arrived mid-start. Waits for the start to finish so the
    /// session it opens can be closed.
    Stopping,
    Stopped,
}

impl State {
    fn holds_session(&self) -> bool {
        matches!(
            self,
            State::AwaitingFrame | State::Classifying | State::Cooling { .. }
        )
    }
}

#[derive(Debug)]
pub enum Event {
    PermissionResolved(AuthorizationState),
    SessionStarted(Result<(), CameraError>),
    FrameReady(Result<CapturedFrame, CameraError>),
    ClassificationDone(Result<Vec<Classification>, ClassificationError>),
    TimerFired,
    ShutdownRequested,
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    ResolvePermission,
    StartSession,
    CaptureFrame,
    Classify { frame: CapturedFrame },
    Emit(Outcome),
    ScheduleTimer { deadline: Instant },
    StopSession,
    Dismiss,
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State::Idle {
            startup: Startup::ResolvingPermission,
        },
        vec![Effect::ResolvePermission],
    )
}

pub fn transition(config: &Config, state: State, event: Event, now: Instant) -> (State, Vec<Effect>) {
    match (state, event) {
        (State::Stopped, _) => (State::Stopped, vec![]),

        (State::Stopping, Event::SessionStarted(_)) => (State::Stopped, vec![Effect::StopSession]),
        (State::Stopping, _) => (State::Stopping, vec![]),

        (
            State::Idle {
                startup: Startup::StartingSession,
            },
            Event::ShutdownRequested,
        ) => (State::Stopping, vec![]),
        (state, Event::ShutdownRequested) => {
            let effects = if state.holds_session() {
                vec![Effect::StopSession]
            } else {
                vec![]
            };
            (State::Stopped, effects)
        }

        // Startup
        (
            State::Idle {
                startup: Startup::ResolvingPermission,
            },
            Event::PermissionResolved(authorization),
        ) => match authorization {
            AuthorizationState::Authorized => (
                State::Idle {
                    startup: Startup::StartingSession,
                },
                vec![Effect::StartSession],
            ),
            _ => (State::Stopped, vec![Effect::Dismiss]),
        },
        (
            State::Idle {
                startup: Startup::StartingSession,
            },
            Event::SessionStarted(result),
        ) => match result {
            Ok(()) => (State::AwaitingFrame, vec![Effect::CaptureFrame]),
            Err(_) => (State::Stopped, vec![Effect::StopSession, Effect::Dismiss]),
        },

        // Main loop
        (State::AwaitingFrame, Event::FrameReady(result)) => match result {
            Ok(frame) => (State::Classifying, vec![Effect::Classify { frame }]),
            Err(_) => cooling(config, now, vec![]),
        },
        (State::Classifying, Event::ClassificationDone(result)) => {
            let outcome = match result {
                Ok(classifications) => decide(&classifications, config.confidence_threshold),
                Err(_) => Outcome::ClassificationUnavailable,
            };
            cooling(config, now, vec![Effect::Emit(outcome)])
        }
        (State::Cooling { since }, Event::TimerFired) => {
            if now.saturating_duration_since(since) >= config.cooldown {
                (State::AwaitingFrame, vec![Effect::CaptureFrame])
            } else {
                (
                    State::Cooling { since },
                    vec![Effect::ScheduleTimer {
                        deadline: since + config.cooldown,
                    }],
                )
            }
        }

        // Anything else is out of sequence and dropped.
        (state, _) => (state, vec![]),
    }
}

fn cooling(config: &Config, now: Instant, mut effects: Vec<Effect>) -> (State, Vec<Effect>) {
    effects.push(Effect::ScheduleTimer {
        deadline: now + config.cooldown,
    });
    (State::Cooling { since: now }, effects)
}
