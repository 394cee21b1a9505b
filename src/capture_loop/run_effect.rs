use crate::capture_loop::core::{Effect, Event};
use crate::device_camera::interface::{CameraError, DeviceCamera};
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::classifier::Classifier;
use crate::image_classifier::interface::ClassificationError;
use crate::library::logger::interface::Logger;
use crate::permission_gate::PermissionGate;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Carries out effects and reports what happened as events.
///
/// Blocking collaborator calls go to the blocking pool. Display calls are
/// made directly so they stay on the caller's task.
#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    permission_gate: Arc<PermissionGate>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    classifier: Classifier,
    device_display: Arc<dyn DeviceDisplay + Send + Sync>,
    event_sender: UnboundedSender<Event>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        permission_gate: Arc<PermissionGate>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        classifier: Classifier,
        device_display: Arc<dyn DeviceDisplay + Send + Sync>,
        event_sender: UnboundedSender<Event>,
    ) -> Self {
        Self {
            logger,
            permission_gate,
            device_camera,
            classifier,
            device_display,
            event_sender,
        }
    }

    /// Effects that touch the display run on the event loop itself.
    pub fn runs_inline(effect: &Effect) -> bool {
        matches!(effect, Effect::Emit(_) | Effect::Dismiss)
    }

    pub async fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::ResolvePermission => {
                let authorization = self.permission_gate.resolve().await;
                self.send(Event::PermissionResolved(authorization));
            }
            Effect::StartSession => {
                let device_camera = self.device_camera.clone();
                let started = tokio::task::spawn_blocking(move || device_camera.start_session())
                    .await
                    .unwrap_or_else(|e| Err(CameraError::Capture(e.to_string())));
                if let Err(e) = &started {
                    let _ = self.logger.warn(&format!("Failed to start session: {}", e));
                }
                self.send(Event::SessionStarted(started));
            }
            Effect::CaptureFrame => {
                let device_camera = self.device_camera.clone();
                let frame = tokio::task::spawn_blocking(move || device_camera.capture_frame())
                    .await
                    .unwrap_or_else(|e| Err(CameraError::Capture(e.to_string())));
                if let Err(e) = &frame {
                    let _ = self
                        .logger
                        .warn(&format!("Capture failed, retrying after cooldown: {}", e));
                }
                self.send(Event::FrameReady(frame));
            }
            Effect::Classify { frame } => {
                let classifier = self.classifier.clone();
                let classifications = tokio::task::spawn_blocking(move || classifier.classify(frame))
                    .await
                    .unwrap_or_else(|e| Err(ClassificationError::WorkerStopped(e.to_string())));
                self.send(Event::ClassificationDone(classifications));
            }
            Effect::Emit(outcome) => {
                self.device_display.emit(&outcome);
            }
            Effect::ScheduleTimer { deadline } => {
                tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
                self.send(Event::TimerFired);
            }
            Effect::StopSession => {
                let device_camera = self.device_camera.clone();
                let stopped = tokio::task::spawn_blocking(move || device_camera.stop_session())
                    .await
                    .unwrap_or_else(|e| Err(CameraError::Capture(e.to_string())));
                if let Err(e) = stopped {
                    let _ = self.logger.warn(&format!("Failed to stop session: {}", e));
                }
            }
            Effect::Dismiss => {
                self.device_display.dismiss();
            }
        }
    }

    fn send(&self, event: Event) {
        if let Err(e) = self.event_sender.send(event) {
            let _ = self
                .logger
                .info(&format!("Loop stopped, discarding {:?}", e.0));
        }
    }
}
