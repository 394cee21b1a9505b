use crate::image_classifier::interface::CropAndScale;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Delay between emitting an outcome and requesting the next frame.
    pub cooldown: Duration,
    /// A label is shown only when its confidence is strictly above this.
    pub confidence_threshold: f32,
    pub crop_and_scale: CropAndScale,
    pub no_result_message: String,
    pub unavailable_message: String,
    pub placeholder_message: String,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(1000),
            confidence_threshold: 0.6,
            crop_and_scale: CropAndScale::CenterCrop,
            no_result_message: "No results found".to_string(),
            unavailable_message: "Classification unavailable".to_string(),
            placeholder_message: "...".to_string(),
            logger_timezone: mountain_standard_time(),
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap()
}
