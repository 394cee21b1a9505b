use crate::device_camera::interface::CapturedFrame;
use crate::image_classifier::interface::{
    Classification, ClassificationError, CropAndScale, ImageClassifier, InferenceRequest,
};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Runs the model on a frame and cleans up what it returns.
///
/// Output keeps the model's order. Entries with a blank label or a non-finite
/// confidence are dropped and the rest are clamped into `[0, 1]`. A model that
/// returns nothing usable yields an empty list, not an error.
#[derive(Clone)]
pub struct Classifier {
    model: Arc<dyn ImageClassifier + Send + Sync>,
    crop_and_scale: CropAndScale,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl Classifier {
    pub fn new(
        model: Arc<dyn ImageClassifier + Send + Sync>,
        crop_and_scale: CropAndScale,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            model,
            crop_and_scale,
            logger: logger.with_namespace("classifier"),
        }
    }

    pub fn classify(&self, frame: CapturedFrame) -> Result<Vec<Classification>, ClassificationError> {
        let request = InferenceRequest {
            image: frame.data(),
            orientation: frame.orientation(),
            crop_and_scale: self.crop_and_scale,
        };

        let raw = self.model.infer(request).map_err(|e| {
            let _ = self.logger.warn(&format!("Model invocation failed: {}", e));
            ClassificationError::ModelInvocationFailed(e.to_string())
        })?;

        let raw_len = raw.len();
        let classifications = normalize(raw);
        let _ = self.logger.info(&format!(
            "Classified frame: {} of {} results usable",
            classifications.len(),
            raw_len
        ));

        Ok(classifications)
    }
}

fn normalize(raw: Vec<Classification>) -> Vec<Classification> {
    raw.into_iter()
        .filter_map(|c| {
            let label = c.label.trim();
            if label.is_empty() || !c.confidence.is_finite() {
                return None;
            }
            Some(Classification {
                label: label.to_string(),
                confidence: c.confidence.clamp(0.0, 1.0),
            })
        })
        .collect()
}
