use std::fmt;
use thiserror::Error;

/// Camera access as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationState {
    Authorized,
    Denied,
    Restricted,
    NotDetermined,
    Unknown,
}

/// Pixel orientation of a captured image, in EXIF order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    LeftMirrored,
    Right,
    RightMirrored,
    Left,
}

impl Orientation {
    /// Maps an EXIF orientation tag (1-8). Anything else is treated as `Down`.
    pub fn from_exif(tag: u8) -> Self {
        match tag {
            1 => Orientation::Up,
            2 => Orientation::UpMirrored,
            3 => Orientation::Down,
            4 => Orientation::DownMirrored,
            5 => Orientation::LeftMirrored,
            6 => Orientation::Right,
            7 => Orientation::RightMirrored,
            8 => Orientation::Left,
            _ => Orientation::Down,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("captured frame contained no image data")]
    EmptyFrameData,
    #[error("capture session is not running")]
    SessionNotRunning,
    #[error("no capture device available")]
    NoDevice,
    #[error("capture failed: {0}")]
    Capture(String),
}

/// One still image. Never empty.
#[derive(Clone, PartialEq)]
pub struct CapturedFrame {
    data: Vec<u8>,
    orientation: Orientation,
}

impl CapturedFrame {
    pub fn new(data: Vec<u8>, orientation: Orientation) -> Result<Self, CameraError> {
        if data.is_empty() {
            return Err(CameraError::EmptyFrameData);
        }
        Ok(Self { data, orientation })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl fmt::Debug for CapturedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedFrame")
            .field("bytes", &self.data.len())
            .field("orientation", &self.orientation)
            .finish()
    }
}

/// Blocking camera driver. Callers run these off the event loop.
pub trait DeviceCamera: Send + Sync {
    fn authorization_status(&self) -> AuthorizationState;

    /// Shows the platform permission prompt and blocks until the user answers.
    fn request_authorization(&self) -> bool;

    fn start_session(&self) -> Result<(), CameraError>;

    fn capture_frame(&self) -> Result<CapturedFrame, CameraError>;

    fn stop_session(&self) -> Result<(), CameraError>;
}
