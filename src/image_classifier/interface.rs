use crate::device_camera::interface::Orientation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: &str, confidence: f32) -> Self {
        Self {
            label: label.to_string(),
            confidence,
        }
    }
}

/// How the model fits the frame to its input size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropAndScale {
    #[default]
    CenterCrop,
    ScaleFit,
    ScaleFill,
}

#[derive(Debug, Clone, Copy)]
pub struct InferenceRequest<'a> {
    pub image: &'a [u8],
    pub orientation: Orientation,
    pub crop_and_scale: CropAndScale,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassificationError {
    #[error("model invocation failed: {0}")]
    ModelInvocationFailed(String),
    #[error("classification worker stopped: {0}")]
    WorkerStopped(String),
}

/// The pretrained model. Blocking and compute bound.
pub trait ImageClassifier: Send + Sync {
    fn infer(
        &self,
        request: InferenceRequest<'_>,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>;
}
