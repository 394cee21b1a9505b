use crate::image_classifier::interface::Classification;

/// What one cycle shows to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Label(String),
    NoResult,
    ClassificationUnavailable,
}

/// Picks the most confident entry and keeps it only if its confidence is
/// strictly above `threshold`. Ties go to the first entry with the max.
///
/// `threshold` has the same `f32` type as model confidences, so a score that
/// prints as 0.6 compares equal to a 0.6 threshold and is rejected.
pub fn decide(results: &[Classification], threshold: f32) -> Outcome {
    let best = results.iter().fold(None, |best: Option<&Classification>, c| match best {
        Some(b) if b.confidence >= c.confidence => Some(b),
        _ => Some(c),
    });

    match best {
        Some(c) if c.confidence > threshold => Outcome::Label(c.label.clone()),
        _ => Outcome::NoResult,
    }
}
