use crate::device_camera::interface::{
    AuthorizationState, CameraError, CapturedFrame, DeviceCamera, Orientation,
};
use crate::library::logger::interface::Logger;
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FakeCameraConfig {
    pub authorization: AuthorizationState,
    /// Answer given when the permission prompt is shown.
    pub grant_on_prompt: bool,
    pub prompt_latency: Duration,
    pub start_latency: Duration,
    /// Session start reports `NoDevice` even when authorized.
    pub fail_start: bool,
    pub capture_latency: Duration,
    pub frame_len: usize,
    /// Number of leading captures that come back with no image bytes.
    pub empty_frames: usize,
}

impl Default for FakeCameraConfig {
    fn default() -> Self {
        Self {
            authorization: AuthorizationState::NotDetermined,
            grant_on_prompt: true,
            prompt_latency: Duration::from_millis(500),
            start_latency: Duration::from_millis(100),
            fail_start: false,
            capture_latency: Duration::from_millis(200),
            frame_len: 64 * 64 * 3,
            empty_frames: 0,
        }
    }
}

pub struct DeviceCameraFake {
    config: FakeCameraConfig,
    logger: Arc<dyn Logger + Send + Sync>,
    authorization: Mutex<AuthorizationState>,
    running: AtomicBool,
    prompts: AtomicUsize,
    starts: AtomicUsize,
    captures: AtomicUsize,
    stops: AtomicUsize,
}

impl DeviceCameraFake {
    pub fn new(config: FakeCameraConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            authorization: Mutex::new(config.authorization),
            config,
            logger: logger.with_namespace("camera").with_namespace("fake"),
            running: AtomicBool::new(false),
            prompts: AtomicUsize::new(0),
            starts: AtomicUsize::new(0),
            captures: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
        }
    }
}

#[cfg(test)]
impl DeviceCameraFake {
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn capture_count(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn authorization_status(&self) -> AuthorizationState {
        match self.authorization.lock() {
            Ok(authorization) => *authorization,
            Err(_) => AuthorizationState::Unknown,
        }
    }

    fn request_authorization(&self) -> bool {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info("Showing camera permission prompt...");
        std::thread::sleep(self.config.prompt_latency);

        let granted = self.config.grant_on_prompt;
        if let Ok(mut authorization) = self.authorization.lock() {
            *authorization = if granted {
                AuthorizationState::Authorized
            } else {
                AuthorizationState::Denied
            };
        }
        let _ = self
            .logger
            .info(&format!("Permission prompt answered: granted={}", granted));
        granted
    }

    fn start_session(&self) -> Result<(), CameraError> {
        if self.authorization_status() != AuthorizationState::Authorized {
            return Err(CameraError::NoDevice);
        }
        self.starts.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info("Starting capture session...");
        std::thread::sleep(self.config.start_latency);
        if self.config.fail_start {
            return Err(CameraError::NoDevice);
        }
        self.running.store(true, Ordering::SeqCst);
        let _ = self.logger.info("Capture session started");
        Ok(())
    }

    fn capture_frame(&self) -> Result<CapturedFrame, CameraError> {
        if !self.running.load(Ordering::SeqCst) {
            return Err(CameraError::SessionNotRunning);
        }

        let index = self.captures.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info("Capturing frame...");
        std::thread::sleep(self.config.capture_latency);

        if index < self.config.empty_frames {
            return CapturedFrame::new(vec![], Orientation::Up);
        }

        let mut data = vec![0u8; self.config.frame_len];
        rand::rng().fill(&mut data[..]);
        let frame = CapturedFrame::new(data, Orientation::from_exif(6))?;
        let _ = self.logger.info("Frame captured");
        Ok(frame)
    }

    fn stop_session(&self) -> Result<(), CameraError> {
        let _ = self.logger.info("Stopping capture session...");
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
        let _ = self.logger.info("Capture session stopped");
        Ok(())
    }
}
