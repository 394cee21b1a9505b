use crate::decision_policy::Outcome;

/// Where outcomes end up. Failures stay inside the display.
pub trait DeviceDisplay: Send + Sync {
    fn emit(&self, outcome: &Outcome);

    /// Closes the view after the session was aborted.
    fn dismiss(&self);
}
