use crate::image_classifier::interface::{Classification, ImageClassifier, InferenceRequest};
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;
use std::time::Duration;

const LOGOS: [&str; 10] = [
    "apple", "nike", "adidas", "starbucks", "mcdonalds", "google", "amazon", "shell", "puma",
    "toyota",
];

/// Returns a few random logos with random confidences.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    latency: Duration,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, latency: Duration) -> Self {
        Self {
            logger: logger.with_namespace("model").with_namespace("fake"),
            latency,
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn infer(
        &self,
        request: InferenceRequest<'_>,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let _ = self.logger.info(&format!(
            "Running inference on {} bytes ({:?}, {:?})...",
            request.image.len(),
            request.orientation,
            request.crop_and_scale
        ));
        std::thread::sleep(self.latency);

        let mut rng = rand::rng();
        let count_dist = Uniform::new_inclusive(0, 3)?;
        let index_dist = Uniform::new(0, LOGOS.len())?;
        let confidence_dist = Uniform::new_inclusive(0.0f32, 1.0)?;

        let classifications = (0..count_dist.sample(&mut rng))
            .map(|_| Classification {
                label: LOGOS[index_dist.sample(&mut rng)].to_string(),
                confidence: confidence_dist.sample(&mut rng),
            })
            .collect();

        Ok(classifications)
    }
}
