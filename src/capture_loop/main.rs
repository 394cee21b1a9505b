use crate::capture_loop::core::{init, transition, Effect, Event, State};
use crate::capture_loop::run_effect::RunEffect;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::classifier::Classifier;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::permission_gate::PermissionGate;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Drives capture, classify, decide, emit and cooldown until shut down.
///
/// All events arrive on one channel and are handled one at a time by `run`.
pub struct CaptureLoop {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    run_effect: RunEffect,
    event_sender: UnboundedSender<Event>,
    event_receiver: UnboundedReceiver<Event>,
}

/// Asks a running loop to stop. Work already in flight is left to finish and
/// its result is dropped.
#[derive(Clone)]
pub struct ShutdownHandle {
    event_sender: UnboundedSender<Event>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        let _ = self.event_sender.send(Event::ShutdownRequested);
    }
}

impl CaptureLoop {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        device_display: Arc<dyn DeviceDisplay + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = unbounded_channel();
        let permission_gate = Arc::new(PermissionGate::new(device_camera.clone(), logger.clone()));
        let classifier = Classifier::new(image_classifier, config.crop_and_scale, logger.clone());
        let run_effect = RunEffect::new(
            logger.with_namespace("effect"),
            permission_gate,
            device_camera,
            classifier,
            device_display,
            event_sender.clone(),
        );

        Self {
            config,
            logger: logger.with_namespace("capture_loop"),
            run_effect,
            event_sender,
            event_receiver,
        }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            event_sender: self.event_sender.clone(),
        }
    }

    /// Runs until the loop reaches `Stopped` and returns the final state.
    pub async fn run(self) -> State {
        let CaptureLoop {
            config,
            logger,
            run_effect,
            event_sender,
            mut event_receiver,
        } = self;
        // `run_effect` keeps its own sender, so the channel stays open.
        drop(event_sender);

        let (mut state, effects) = init();
        let _ = logger.info(&format!("Starting in {:?}", state));
        run_effects(&run_effect, &state, effects).await;

        while let Some(event) = event_receiver.recv().await {
            let _ = logger.info(&format!("Event: {:?}", event));

            let old_state = state.clone();
            let (new_state, effects) = transition(&config, state, event, Instant::now());

            if new_state == old_state && effects.is_empty() {
                let _ = logger.info("Event ignored in current state");
            } else {
                let _ = logger.info(&format!("{:?} -> {:?}", old_state, new_state));
            }

            state = new_state;
            run_effects(&run_effect, &state, effects).await;

            if state == State::Stopped {
                break;
            }
        }

        let _ = logger.info("Stopped");
        state
    }
}

async fn run_effects(run_effect: &RunEffect, state: &State, effects: Vec<Effect>) {
    for effect in effects {
        // Teardown finishes before `run` returns.
        if *state == State::Stopped || RunEffect::runs_inline(&effect) {
            run_effect.run_effect(effect).await;
        } else {
            let run_effect = run_effect.clone();
            tokio::spawn(async move { run_effect.run_effect(effect).await });
        }
    }
}
